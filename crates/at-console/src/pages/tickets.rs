//! The support-queue screen: open tickets by priority and status.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::SupportTicket;

pub fn page() -> Collection<SupportTicket> {
    Collection::new(
        "tickets",
        "Support Queue",
        filter_spec(),
        aggregation_spec(),
        fixtures::tickets,
    )
}

pub fn filter_spec() -> FilterSpec<SupportTicket> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![
                field(|t: &SupportTicket| Some(t.subject.clone())),
                field(|t: &SupportTicket| Some(t.requester.clone())),
                field(|t: &SupportTicket| t.requester_email.clone()),
            ],
        )
        .facet("priority", |t: &SupportTicket| t.priority.clone())
        .facet("status", |t: &SupportTicket| Some(t.status.clone()))
        .time_range("range", |t: &SupportTicket| t.opened_at)
}

pub fn aggregation_spec() -> AggregationSpec<SupportTicket> {
    AggregationSpec::new()
        .count("total_tickets", StatScope::Full)
        .count_where("open", StatScope::Full, |t: &SupportTicket| {
            t.status == "open" || t.status == "in_progress"
        })
        .count_where("urgent", StatScope::Filtered, |t: &SupportTicket| {
            t.priority.as_deref() == Some("urgent")
        })
        .group_count("by_priority", StatScope::Filtered, |t: &SupportTicket| {
            t.priority.clone()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::{compute_view_model, FilterValues, StatValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn open_count_includes_in_progress() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::tickets(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new(),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.stats["open"], StatValue::Scalar(3.0));
    }

    #[test]
    fn missing_priority_is_excluded_from_facet_and_grouping() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::tickets(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new().set("priority", "high"),
            &aggregation_spec(),
            now,
        );
        // tic-004 has no priority: it can never match an active priority facet.
        assert_eq!(vm.filtered.len(), 1);
        assert_eq!(vm.filtered[0].id, "tic-001");

        let all = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new(),
            &aggregation_spec(),
            now,
        );
        let groups = all.stats["by_priority"].as_groups().unwrap();
        // Three tickets carry a priority; the priority-less one is absent.
        assert_eq!(groups.values().sum::<u64>(), 3);
    }
}
