//! # Page Registry
//!
//! Resolves console pages by name and computes their view-models. Each page
//! is a typed [`Collection`] (record type + filter spec + aggregation spec +
//! fixtures) registered behind the type-erased [`PageDef`] trait, so
//! consumers like the CLI can drive any page without knowing its record
//! type.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use at_core::{compute_view_model, AggregationSpec, FilterSpec, FilterValues, StatsMap};

use crate::error::ConsoleError;
use crate::pages;

/// A type-erased view-model: records as JSON objects, stats as computed.
#[derive(Debug, Clone)]
pub struct PageView {
    pub filtered: Vec<Value>,
    pub stats: StatsMap,
}

/// The erased interface one console page exposes to consumers.
pub trait PageDef: Send + Sync {
    fn name(&self) -> &str;
    fn title(&self) -> &str;

    /// Filter rule names, in declaration order (for help output).
    fn rule_names(&self) -> Vec<&str>;

    /// The page's fixture snapshot, serialized.
    fn fixtures_json(&self, anchor: DateTime<Utc>) -> Vec<Value>;

    /// Seeded volume dataset; pages without a generator return fixtures.
    fn generate_json(&self, count: usize, seed: u64, anchor: DateTime<Utc>) -> Vec<Value>;

    /// Compute the view-model over an arbitrary JSON snapshot.
    ///
    /// Rows that do not decode as this page's record type are skipped with
    /// a warning — a malformed record must never take the page down.
    fn view_from_json(
        &self,
        records: Vec<Value>,
        values: &FilterValues,
        now: DateTime<Utc>,
    ) -> PageView;

    /// Compute the view-model over the page's own fixtures.
    fn view_of_fixtures(&self, values: &FilterValues, now: DateTime<Utc>) -> PageView;
}

// =============================================================================
// Typed page definition
// =============================================================================

/// One console page: a record type plus its declarative view configuration.
pub struct Collection<T> {
    name: &'static str,
    title: &'static str,
    filter_spec: FilterSpec<T>,
    agg_spec: AggregationSpec<T>,
    fixtures: fn(DateTime<Utc>) -> Vec<T>,
    generator: Option<fn(usize, u64, DateTime<Utc>) -> Vec<T>>,
}

impl<T> Collection<T> {
    pub fn new(
        name: &'static str,
        title: &'static str,
        filter_spec: FilterSpec<T>,
        agg_spec: AggregationSpec<T>,
        fixtures: fn(DateTime<Utc>) -> Vec<T>,
    ) -> Self {
        Self {
            name,
            title,
            filter_spec,
            agg_spec,
            fixtures,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: fn(usize, u64, DateTime<Utc>) -> Vec<T>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// The typed entry point; the JSON variants funnel through here.
    pub fn view(
        &self,
        records: &[T],
        values: &FilterValues,
        now: DateTime<Utc>,
    ) -> at_core::ViewModel<T>
    where
        T: Clone,
    {
        compute_view_model(records, &self.filter_spec, values, &self.agg_spec, now)
    }
}

fn to_json_rows<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .filter_map(|r| match serde_json::to_value(r) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize record, dropping row");
                None
            }
        })
        .collect()
}

impl<T> PageDef for Collection<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn rule_names(&self) -> Vec<&str> {
        self.filter_spec.rule_names()
    }

    fn fixtures_json(&self, anchor: DateTime<Utc>) -> Vec<Value> {
        to_json_rows(&(self.fixtures)(anchor))
    }

    fn generate_json(&self, count: usize, seed: u64, anchor: DateTime<Utc>) -> Vec<Value> {
        match self.generator {
            Some(generate) => to_json_rows(&generate(count, seed, anchor)),
            None => self.fixtures_json(anchor),
        }
    }

    fn view_from_json(
        &self,
        records: Vec<Value>,
        values: &FilterValues,
        now: DateTime<Utc>,
    ) -> PageView {
        let typed: Vec<T> = records
            .into_iter()
            .filter_map(|v| match serde_json::from_value(v) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(page = self.name, error = %e, "skipping malformed record");
                    None
                }
            })
            .collect();

        let vm = self.view(&typed, values, now);
        PageView {
            filtered: to_json_rows(&vm.filtered),
            stats: vm.stats,
        }
    }

    fn view_of_fixtures(&self, values: &FilterValues, now: DateTime<Utc>) -> PageView {
        let records = (self.fixtures)(now);
        let vm = self.view(&records, values, now);
        PageView {
            filtered: to_json_rows(&vm.filtered),
            stats: vm.stats,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// The console: every registered page, resolvable by name.
pub struct Console {
    pages: Vec<Box<dyn PageDef>>,
}

impl Console {
    /// A console with every built-in page registered.
    pub fn with_builtin_pages() -> Self {
        Self {
            pages: pages::all(),
        }
    }

    pub fn pages(&self) -> &[Box<dyn PageDef>] {
        &self.pages
    }

    pub fn get(&self, name: &str) -> Result<&dyn PageDef, ConsoleError> {
        self.pages
            .iter()
            .map(Box::as_ref)
            .find(|p| p.name() == name)
            .ok_or_else(|| ConsoleError::PageNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn builtin_pages_resolve_by_name() {
        let console = Console::with_builtin_pages();
        for name in [
            "sessions",
            "invoices",
            "payouts",
            "tickets",
            "audit",
            "moderation",
        ] {
            assert!(console.get(name).is_ok(), "missing page {name}");
        }
        assert!(matches!(
            console.get("nope"),
            Err(ConsoleError::PageNotFound(_))
        ));
    }

    #[test]
    fn fixture_views_compute_for_every_page() {
        let console = Console::with_builtin_pages();
        for page in console.pages() {
            let view = page.view_of_fixtures(&FilterValues::new(), now());
            assert!(
                !view.filtered.is_empty(),
                "page {} has empty fixtures",
                page.name()
            );
            assert!(
                !view.stats.is_empty(),
                "page {} has no stats",
                page.name()
            );
        }
    }

    #[test]
    fn malformed_records_are_skipped_not_fatal() {
        let console = Console::with_builtin_pages();
        let page = console.get("payouts").unwrap();
        let mut rows = page.fixtures_json(now());
        let valid = rows.len();
        rows.push(serde_json::json!({"unexpected": true}));
        rows.push(Value::Null);
        let view = page.view_from_json(rows, &FilterValues::new(), now());
        assert_eq!(view.filtered.len(), valid);
    }
}
