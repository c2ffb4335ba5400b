//! The creator-payouts screen: status breakdown and amount totals.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::Payout;

pub fn page() -> Collection<Payout> {
    Collection::new(
        "payouts",
        "Payouts",
        filter_spec(),
        aggregation_spec(),
        fixtures::payouts,
    )
    .with_generator(fixtures::generate_payouts)
}

pub fn filter_spec() -> FilterSpec<Payout> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![field(|p: &Payout| Some(p.creator.clone()))],
        )
        .facet("method", |p: &Payout| p.method.clone())
        .facet_with_options(
            "status",
            &["pending", "processing", "completed", "failed"],
            |p: &Payout| Some(p.status.clone()),
        )
        .time_range("range", |p: &Payout| p.requested_at)
}

pub fn aggregation_spec() -> AggregationSpec<Payout> {
    AggregationSpec::new()
        .count("total_payouts", StatScope::Full)
        .sum("amount_requested", StatScope::Filtered, |p: &Payout| {
            p.amount
        })
        .count_where("failed", StatScope::Full, |p: &Payout| {
            p.status == "failed"
        })
        .percentage("completed_pct", StatScope::Full, |p: &Payout| {
            p.status == "completed"
        })
        .group_count("by_status", StatScope::Full, |p: &Payout| {
            Some(p.status.clone())
        })
}
