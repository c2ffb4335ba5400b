//! The audit-log screen: administrative actions with severity.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::AuditEntry;

pub fn page() -> Collection<AuditEntry> {
    Collection::new(
        "audit",
        "Audit Log",
        filter_spec(),
        aggregation_spec(),
        fixtures::audit,
    )
}

pub fn filter_spec() -> FilterSpec<AuditEntry> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![
                field(|e: &AuditEntry| Some(e.actor.clone())),
                field(|e: &AuditEntry| Some(e.action.clone())),
                field(|e: &AuditEntry| Some(e.resource.clone())),
                field(|e: &AuditEntry| e.detail.clone()),
            ],
        )
        .facet("severity", |e: &AuditEntry| e.severity.clone())
        .time_range("range", |e: &AuditEntry| e.timestamp)
}

pub fn aggregation_spec() -> AggregationSpec<AuditEntry> {
    AggregationSpec::new()
        .count("total_entries", StatScope::Full)
        .count_where("critical", StatScope::Full, |e: &AuditEntry| {
            e.severity.as_deref() == Some("critical")
        })
        .group_count("by_actor", StatScope::Filtered, |e: &AuditEntry| {
            Some(e.actor.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::{compute_view_model, FilterValues, StatValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn search_spans_all_text_fields_including_detail() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::audit(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new().set("search", "suspicious"),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.filtered.len(), 1);
        assert_eq!(vm.filtered[0].id, "aud-003");
        assert_eq!(vm.stats["critical"], StatValue::Scalar(1.0));
    }

    #[test]
    fn severity_facet_with_1h_window() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::audit(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new().set("severity", "warning").set("range", "1h"),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.filtered.len(), 1);
        assert_eq!(vm.filtered[0].id, "aud-001");
    }
}
