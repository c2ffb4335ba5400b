//! The billing screen: invoices with totals, outstanding balance, and a
//! paid-share stat.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::Invoice;

pub fn page() -> Collection<Invoice> {
    Collection::new(
        "invoices",
        "Invoices",
        filter_spec(),
        aggregation_spec(),
        fixtures::invoices,
    )
}

pub fn filter_spec() -> FilterSpec<Invoice> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![
                field(|i: &Invoice| Some(i.number.clone())),
                field(|i: &Invoice| Some(i.client.clone())),
                field(|i: &Invoice| i.client_email.clone()),
            ],
        )
        .facet_with_options(
            "status",
            &["draft", "sent", "paid", "overdue"],
            |i: &Invoice| Some(i.status.clone()),
        )
        .time_range("range", |i: &Invoice| i.issued_at)
}

pub fn aggregation_spec() -> AggregationSpec<Invoice> {
    AggregationSpec::new()
        .count("total_invoices", StatScope::Full)
        .sum("total_invoiced", StatScope::Full, |i: &Invoice| i.total)
        .sum("outstanding", StatScope::Full, |i: &Invoice| {
            match i.status.as_str() {
                "sent" | "overdue" => i.total,
                _ => None,
            }
        })
        .percentage_of(
            "paid_pct",
            StatScope::Full,
            |i: &Invoice| i.status == "paid",
            |i: &Invoice| i.status != "draft",
        )
        .average("avg_total", StatScope::Filtered, |i: &Invoice| i.total)
        .group_count("by_status", StatScope::Filtered, |i: &Invoice| {
            Some(i.status.clone())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use at_core::{compute_view_model, FilterValues, StatValue};
    use chrono::{TimeZone, Utc};

    #[test]
    fn totals_match_fixture_sums() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::invoices(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new(),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.stats["total_invoiced"], StatValue::Scalar(12150.0));
        // sent (4050) + overdue (2700)
        assert_eq!(vm.stats["outstanding"], StatValue::Scalar(6750.0));
    }

    #[test]
    fn status_facet_restricts_filtered_stats_but_not_full_ones() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let rows = fixtures::invoices(now);
        let vm = compute_view_model(
            &rows,
            &filter_spec(),
            &FilterValues::new().set("status", "overdue"),
            &aggregation_spec(),
            now,
        );
        assert_eq!(vm.filtered.len(), 1);
        assert_eq!(vm.stats["avg_total"], StatValue::Scalar(2700.0));
        assert_eq!(vm.stats["total_invoiced"], StatValue::Scalar(12150.0));
        let groups = vm.stats["by_status"].as_groups().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["overdue"], 1);
    }
}
