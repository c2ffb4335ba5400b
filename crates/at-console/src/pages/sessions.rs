//! The activity-log screen: who did what, from where, on which device.

use at_core::filter::field;
use at_core::{AggregationSpec, FilterSpec, StatScope};

use crate::console::Collection;
use crate::fixtures;
use crate::records::Session;

pub fn page() -> Collection<Session> {
    Collection::new(
        "sessions",
        "Activity Log",
        filter_spec(),
        aggregation_spec(),
        fixtures::sessions,
    )
    .with_generator(fixtures::generate_sessions)
}

pub fn filter_spec() -> FilterSpec<Session> {
    FilterSpec::new()
        .text_search(
            "search",
            vec![
                field(|s: &Session| Some(s.user_name.clone())),
                field(|s: &Session| s.user_email.clone()),
                field(|s: &Session| Some(s.action.clone())),
            ],
        )
        .facet("device", |s: &Session| {
            s.device.as_ref().map(|d| d.kind.clone())
        })
        .facet("user_type", |s: &Session| s.user_type.clone())
        .time_range("range", |s: &Session| s.timestamp)
}

pub fn aggregation_spec() -> AggregationSpec<Session> {
    AggregationSpec::new()
        .count("total_sessions", StatScope::Full)
        .count("shown", StatScope::Filtered)
        .percentage("mobile_pct", StatScope::Filtered, |s: &Session| {
            s.device.as_ref().is_some_and(|d| d.kind == "mobile")
        })
        .group_count("by_action", StatScope::Filtered, |s: &Session| {
            Some(s.action.clone())
        })
}
