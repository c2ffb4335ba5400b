//! # at-core — The Lens of ATRIUM
//!
//! The collection view-model engine behind every ATRIUM console page.
//! Given a raw collection of records and the user's current filter
//! selections, it produces the filtered subset (stable original order) and
//! the aggregate statistics shown in the stats header — nothing else.
//!
//! The engine is synchronous and holds no state of its own: every call
//! receives its inputs (including "now" for time-range rules) and returns a
//! fresh snapshot. Data sources, rendering, and filter-state ownership all
//! live with the caller.

pub mod agg;
pub mod filter;
pub mod view;

pub use agg::{aggregate, AggregationSpec, Reducer, StatScope, StatValue, StatsMap};
pub use filter::{build_predicate, FilterSpec, FilterValues, Predicate};
pub use view::{compute_view_model, ViewModel, ViewState};
