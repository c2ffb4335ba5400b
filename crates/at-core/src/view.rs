//! # View-Model Assembly
//!
//! The per-render entry point: compile the predicate, filter the collection
//! (stable original order, input untouched), evaluate full-scope stats over
//! the source and filtered-scope stats over the subset, and return both as
//! one disposable snapshot.

use chrono::{DateTime, Utc};

use crate::agg::{AggregationSpec, StatsMap};
use crate::filter::{build_predicate, FilterSpec, FilterValues};

/// The derived projection consumed by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<T> {
    /// Records surviving the active filters, in source order.
    pub filtered: Vec<T>,
    /// Named statistics in spec declaration order.
    pub stats: StatsMap,
}

/// Compute a [`ViewModel`] from one input snapshot.
///
/// Pure and idempotent: identical inputs (including `now`) produce
/// deep-equal outputs, so the caller may discard or recompute at will.
pub fn compute_view_model<T: Clone>(
    collection: &[T],
    filter_spec: &FilterSpec<T>,
    values: &FilterValues,
    agg_spec: &AggregationSpec<T>,
    now: DateTime<Utc>,
) -> ViewModel<T> {
    let predicate = build_predicate(filter_spec, values, now);

    let filtered: Vec<T> = collection
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect();

    let stats = agg_spec.run(collection, &filtered);

    ViewModel { filtered, stats }
}

// =============================================================================
// Memoization
// =============================================================================

/// Caller-owned cache for one page's view, keyed on
/// `(collection generation, FilterValues)`.
///
/// The engine cannot observe collection identity, so the caller bumps the
/// generation via [`ViewState::invalidate`] whenever the source snapshot is
/// replaced. While the key is unchanged the cached view is returned as-is.
///
/// `now` is deliberately not part of the key; a caller with an active
/// time-range filter should invalidate when its reference time moves.
pub struct ViewState<T> {
    generation: u64,
    cached: Option<Cached<T>>,
}

struct Cached<T> {
    generation: u64,
    values: FilterValues,
    view: ViewModel<T>,
}

impl<T: Clone> ViewState<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            cached: None,
        }
    }

    /// Mark the source collection as changed; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Return the cached view, recomputing only when the source generation
    /// or the filter values changed since the last call.
    pub fn view(
        &mut self,
        collection: &[T],
        filter_spec: &FilterSpec<T>,
        values: &FilterValues,
        agg_spec: &AggregationSpec<T>,
        now: DateTime<Utc>,
    ) -> &ViewModel<T> {
        let fresh = match &self.cached {
            Some(c) => c.generation != self.generation || c.values != *values,
            None => true,
        };

        if fresh {
            let view = compute_view_model(collection, filter_spec, values, agg_spec, now);
            self.cached = Some(Cached {
                generation: self.generation,
                values: values.clone(),
                view,
            });
        }

        // Invariant: `cached` is Some here on every path.
        &self
            .cached
            .as_ref()
            .expect("view cache populated above")
            .view
    }
}

impl<T: Clone> Default for ViewState<T> {
    fn default() -> Self {
        Self::new()
    }
}
