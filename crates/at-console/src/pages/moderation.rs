//! The moderation-queue screen: reported content by type and status.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::ModerationCase;

pub fn page() -> Collection<ModerationCase> {
    Collection::new(
        "moderation",
        "Moderation Queue",
        filter_spec(),
        aggregation_spec(),
        fixtures::moderation,
    )
}

pub fn filter_spec() -> FilterSpec<ModerationCase> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![
                field(|c: &ModerationCase| Some(c.reporter.clone())),
                field(|c: &ModerationCase| Some(c.reason.clone())),
            ],
        )
        .facet("content_type", |c: &ModerationCase| {
            Some(c.content_type.clone())
        })
        .facet("status", |c: &ModerationCase| Some(c.status.clone()))
        .time_range("range", |c: &ModerationCase| c.reported_at)
}

pub fn aggregation_spec() -> AggregationSpec<ModerationCase> {
    AggregationSpec::new()
        .count("total_cases", StatScope::Full)
        .count_where("awaiting_review", StatScope::Full, |c: &ModerationCase| {
            c.status == "pending" || c.status == "escalated"
        })
        .percentage("removed_pct", StatScope::Full, |c: &ModerationCase| {
            c.status == "removed"
        })
        .group_count("by_type", StatScope::Filtered, |c: &ModerationCase| {
            Some(c.content_type.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::{compute_view_model, FilterValues, StatValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn queue_stats_over_fixtures() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::moderation(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new(),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.stats["awaiting_review"], StatValue::Scalar(2.0));
        assert_eq!(vm.stats["removed_pct"], StatValue::Scalar(25.0));
    }

    #[test]
    fn repeat_reporter_search_hits_both_cases() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::moderation(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new().set("search", "guest-4411"),
            &aggregation_spec(),
            now,
        );
        let ids: Vec<&str> = vm.filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["mod-001", "mod-004"]);
    }
}
