//! # Aggregation
//!
//! Computes the stats-header values shown above each console page's table.
//! Every reducer is pure and total: the empty collection yields a documented
//! zero (or empty map), never `NaN` or a panic.

use indexmap::IndexMap;
use serde::Serialize;

/// Accessor for a numeric field. `None` excludes the record from the stat.
pub type NumAccessor<T> = Box<dyn Fn(&T) -> Option<f64> + Send + Sync>;

/// A record-level predicate used by `count_where` and `percentage`.
pub type RecordPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Accessor for a grouping key. `None` excludes the record from the grouping.
pub type KeyAccessor<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

// =============================================================================
// Reducers
// =============================================================================

/// One statistic's reduction over a collection.
pub enum Reducer<T> {
    /// Collection length.
    Count,
    /// Number of records matching the predicate.
    CountWhere(RecordPredicate<T>),
    /// Sum of the accessor over records where it yields a value.
    Sum(NumAccessor<T>),
    /// Mean of the accessor over records where it yields a value; 0 when none do.
    Average(NumAccessor<T>),
    /// `100 * |numerator| / |denominator|`; 0 when the denominator count is 0.
    /// A `None` denominator means the whole candidate collection.
    Percentage {
        numerator: RecordPredicate<T>,
        denominator: Option<RecordPredicate<T>>,
    },
    /// Count per grouping key, keys in first-seen order.
    GroupCount(KeyAccessor<T>),
}

impl<T> Reducer<T> {
    fn reduce(&self, collection: &[T]) -> StatValue {
        match self {
            Reducer::Count => StatValue::Scalar(collection.len() as f64),
            Reducer::CountWhere(pred) => {
                StatValue::Scalar(collection.iter().filter(|r| pred(r)).count() as f64)
            }
            Reducer::Sum(accessor) => {
                StatValue::Scalar(collection.iter().filter_map(|r| accessor(r)).sum())
            }
            Reducer::Average(accessor) => {
                let mut sum = 0.0;
                let mut n = 0u64;
                for value in collection.iter().filter_map(|r| accessor(r)) {
                    sum += value;
                    n += 1;
                }
                StatValue::Scalar(if n == 0 { 0.0 } else { sum / n as f64 })
            }
            Reducer::Percentage {
                numerator,
                denominator,
            } => {
                let denom = match denominator {
                    Some(pred) => collection.iter().filter(|r| pred(r)).count(),
                    None => collection.len(),
                };
                if denom == 0 {
                    return StatValue::Scalar(0.0);
                }
                let numer = collection.iter().filter(|r| numerator(r)).count();
                StatValue::Scalar(numer as f64 / denom as f64 * 100.0)
            }
            Reducer::GroupCount(key) => {
                let mut groups: IndexMap<String, u64> = IndexMap::new();
                for record in collection {
                    if let Some(k) = key(record) {
                        *groups.entry(k).or_insert(0) += 1;
                    }
                }
                StatValue::Groups(groups)
            }
        }
    }
}

// =============================================================================
// AggregationSpec
// =============================================================================

/// Which candidate collection a statistic runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatScope {
    /// The full source collection, unaffected by filters.
    Full,
    /// The filtered subset.
    Filtered,
}

struct NamedStat<T> {
    name: String,
    scope: StatScope,
    reducer: Reducer<T>,
}

/// The named statistics of one console page, in display order.
pub struct AggregationSpec<T> {
    stats: Vec<NamedStat<T>>,
}

impl<T> AggregationSpec<T> {
    pub fn new() -> Self {
        Self { stats: Vec::new() }
    }

    pub fn stat(mut self, name: &str, scope: StatScope, reducer: Reducer<T>) -> Self {
        self.stats.push(NamedStat {
            name: name.to_string(),
            scope,
            reducer,
        });
        self
    }

    pub fn count(self, name: &str, scope: StatScope) -> Self {
        self.stat(name, scope, Reducer::Count)
    }

    pub fn count_where(
        self,
        name: &str,
        scope: StatScope,
        pred: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.stat(name, scope, Reducer::CountWhere(Box::new(pred)))
    }

    pub fn sum(
        self,
        name: &str,
        scope: StatScope,
        accessor: impl Fn(&T) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.stat(name, scope, Reducer::Sum(Box::new(accessor)))
    }

    pub fn average(
        self,
        name: &str,
        scope: StatScope,
        accessor: impl Fn(&T) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.stat(name, scope, Reducer::Average(Box::new(accessor)))
    }

    /// Percentage of the whole candidate collection matching `numerator`.
    pub fn percentage(
        self,
        name: &str,
        scope: StatScope,
        numerator: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.stat(
            name,
            scope,
            Reducer::Percentage {
                numerator: Box::new(numerator),
                denominator: None,
            },
        )
    }

    /// Percentage with an explicit denominator predicate.
    pub fn percentage_of(
        self,
        name: &str,
        scope: StatScope,
        numerator: impl Fn(&T) -> bool + Send + Sync + 'static,
        denominator: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.stat(
            name,
            scope,
            Reducer::Percentage {
                numerator: Box::new(numerator),
                denominator: Some(Box::new(denominator)),
            },
        )
    }

    pub fn group_count(
        self,
        name: &str,
        scope: StatScope,
        key: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.stat(name, scope, Reducer::GroupCount(Box::new(key)))
    }

    /// Evaluate every stat, picking `full` or `filtered` per its scope.
    /// Output preserves declaration order.
    pub(crate) fn run(&self, full: &[T], filtered: &[T]) -> StatsMap {
        let mut stats = StatsMap::new();
        for stat in &self.stats {
            let candidate = match stat.scope {
                StatScope::Full => full,
                StatScope::Filtered => filtered,
            };
            stats.insert(stat.name.clone(), stat.reducer.reduce(candidate));
        }
        stats
    }
}

impl<T> Default for AggregationSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Output
// =============================================================================

/// A computed statistic: a scalar or a group-count map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Scalar(f64),
    Groups(IndexMap<String, u64>),
}

impl StatValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            StatValue::Scalar(v) => Some(*v),
            StatValue::Groups(_) => None,
        }
    }

    pub fn as_groups(&self) -> Option<&IndexMap<String, u64>> {
        match self {
            StatValue::Scalar(_) => None,
            StatValue::Groups(g) => Some(g),
        }
    }
}

/// Named statistics in declaration order.
pub type StatsMap = IndexMap<String, StatValue>;

/// Run every stat in `spec` against a single collection, ignoring scopes.
///
/// The scope split only matters when full and filtered collections differ;
/// this is the entry point for callers aggregating one collection directly.
pub fn aggregate<T>(collection: &[T], spec: &AggregationSpec<T>) -> StatsMap {
    spec.run(collection, collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Invoice {
        status: String,
        total: Option<f64>,
    }

    fn invoices() -> Vec<Invoice> {
        vec![
            Invoice {
                status: "paid".into(),
                total: Some(5400.0),
            },
            Invoice {
                status: "overdue".into(),
                total: Some(4050.0),
            },
            Invoice {
                status: "sent".into(),
                total: Some(2700.0),
            },
            Invoice {
                status: "draft".into(),
                total: Some(0.0),
            },
        ]
    }

    #[test]
    fn count_equals_collection_length() {
        let spec = AggregationSpec::new().count("total", StatScope::Full);
        let stats = aggregate(&invoices(), &spec);
        assert_eq!(stats["total"], StatValue::Scalar(4.0));
    }

    #[test]
    fn sum_over_invoice_totals() {
        let spec =
            AggregationSpec::new().sum("total_invoiced", StatScope::Full, |i: &Invoice| i.total);
        let stats = aggregate(&invoices(), &spec);
        assert_eq!(stats["total_invoiced"], StatValue::Scalar(12150.0));
    }

    #[test]
    fn sum_skips_missing_values() {
        let mut rows = invoices();
        rows.push(Invoice {
            status: "void".into(),
            total: None,
        });
        let spec = AggregationSpec::new().sum("sum", StatScope::Full, |i: &Invoice| i.total);
        let stats = aggregate(&rows, &spec);
        assert_eq!(stats["sum"], StatValue::Scalar(12150.0));
    }

    #[test]
    fn average_is_zero_on_empty_collection() {
        let spec = AggregationSpec::new().average("avg", StatScope::Full, |i: &Invoice| i.total);
        let stats = aggregate(&[], &spec);
        assert_eq!(stats["avg"], StatValue::Scalar(0.0));
    }

    #[test]
    fn average_over_present_values() {
        let spec = AggregationSpec::new().average("avg", StatScope::Full, |i: &Invoice| i.total);
        let stats = aggregate(&invoices(), &spec);
        assert_eq!(stats["avg"], StatValue::Scalar(12150.0 / 4.0));
    }

    #[test]
    fn percentage_is_zero_on_empty_denominator() {
        let spec = AggregationSpec::new().percentage("paid_pct", StatScope::Full, |i: &Invoice| {
            i.status == "paid"
        });
        let stats = aggregate(&[], &spec);
        assert_eq!(stats["paid_pct"], StatValue::Scalar(0.0));
    }

    #[test]
    fn percentage_of_whole_collection() {
        let spec = AggregationSpec::new().percentage("paid_pct", StatScope::Full, |i: &Invoice| {
            i.status == "paid"
        });
        let stats = aggregate(&invoices(), &spec);
        assert_eq!(stats["paid_pct"], StatValue::Scalar(25.0));
    }

    #[test]
    fn percentage_with_explicit_denominator() {
        // Paid share of non-draft invoices: 1 of 3.
        let spec = AggregationSpec::new().percentage_of(
            "paid_of_issued",
            StatScope::Full,
            |i: &Invoice| i.status == "paid",
            |i: &Invoice| i.status != "draft",
        );
        let stats = aggregate(&invoices(), &spec);
        let got = stats["paid_of_issued"].as_scalar().unwrap();
        assert!((got - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn group_count_preserves_first_seen_order() {
        let statuses = ["completed", "processing", "pending", "failed"];
        let rows: Vec<Invoice> = statuses
            .iter()
            .map(|s| Invoice {
                status: (*s).into(),
                total: None,
            })
            .collect();
        let spec = AggregationSpec::new().group_count("by_status", StatScope::Full, |i: &Invoice| {
            Some(i.status.clone())
        });
        let stats = aggregate(&rows, &spec);
        let groups = stats["by_status"].as_groups().unwrap();
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, statuses);
        assert!(groups.values().all(|&c| c == 1));
    }

    #[test]
    fn group_count_on_empty_collection_is_empty() {
        let spec = AggregationSpec::new().group_count("by_status", StatScope::Full, |i: &Invoice| {
            Some(i.status.clone())
        });
        let stats = aggregate(&[], &spec);
        assert_eq!(stats["by_status"], StatValue::Groups(IndexMap::new()));
    }

    #[test]
    fn stats_preserve_declaration_order() {
        let spec = AggregationSpec::new()
            .count("zulu", StatScope::Full)
            .count("alpha", StatScope::Full)
            .count("mike", StatScope::Full);
        let stats = aggregate(&invoices(), &spec);
        let names: Vec<&str> = stats.keys().map(String::as_str).collect();
        assert_eq!(names, ["zulu", "alpha", "mike"]);
    }
}
