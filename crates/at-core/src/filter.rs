//! # Predicate Composition
//!
//! Turns a [`FilterSpec`] plus the user's current [`FilterValues`] into a
//! single compiled predicate over the record type. Rules combine with AND;
//! the fields of a text-search rule combine with OR. A value of `""` or
//! `"all"` disables its rule entirely.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accessor for a text-searchable field. `None` reads as the empty string.
pub type TextAccessor<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Accessor for a facet field. `None` never matches an active facet.
pub type FacetAccessor<T> = Box<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Accessor for a timestamp field. `None` never falls inside a window.
pub type TimeAccessor<T> = Box<dyn Fn(&T) -> Option<DateTime<Utc>> + Send + Sync>;

// =============================================================================
// FilterSpec
// =============================================================================

/// A single filter rule.
pub enum FilterRule<T> {
    /// Case-insensitive substring match against any of the listed fields.
    TextSearch { fields: Vec<TextAccessor<T>> },
    /// Exact equality against the selected facet value. When `options` is
    /// declared, a selection outside it is treated as `"all"`.
    Facet {
        field: FacetAccessor<T>,
        options: Option<Vec<String>>,
    },
    /// Timestamp within `[now - duration, now]` for a range token like `"24h"`.
    TimeRange { field: TimeAccessor<T> },
}

struct NamedRule<T> {
    name: String,
    rule: FilterRule<T>,
}

/// The static filter configuration of one console page.
///
/// Built once per page; the per-render inputs are the [`FilterValues`].
pub struct FilterSpec<T> {
    rules: Vec<NamedRule<T>>,
}

impl<T> FilterSpec<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a text-search rule matching any of `fields`.
    pub fn text_search(mut self, name: &str, fields: Vec<TextAccessor<T>>) -> Self {
        self.rules.push(NamedRule {
            name: name.to_string(),
            rule: FilterRule::TextSearch { fields },
        });
        self
    }

    /// Add a facet-equality rule on `field`, accepting any selected value.
    pub fn facet(
        mut self,
        name: &str,
        field: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(NamedRule {
            name: name.to_string(),
            rule: FilterRule::Facet {
                field: Box::new(field),
                options: None,
            },
        });
        self
    }

    /// Add a facet-equality rule with a closed set of selectable values.
    /// A selection outside `options` is logged and treated as `"all"`.
    pub fn facet_with_options(
        mut self,
        name: &str,
        options: &[&str],
        field: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(NamedRule {
            name: name.to_string(),
            rule: FilterRule::Facet {
                field: Box::new(field),
                options: Some(options.iter().map(|s| (*s).to_string()).collect()),
            },
        });
        self
    }

    /// Add a time-range rule on `field`.
    pub fn time_range(
        mut self,
        name: &str,
        field: impl Fn(&T) -> Option<DateTime<Utc>> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(NamedRule {
            name: name.to_string(),
            rule: FilterRule::TimeRange {
                field: Box::new(field),
            },
        });
        self
    }

    /// Names of all configured rules, in declaration order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }
}

impl<T> Default for FilterSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Box a field accessor for use in [`FilterSpec::text_search`].
pub fn field<T>(f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> TextAccessor<T> {
    Box::new(f)
}

// =============================================================================
// FilterValues
// =============================================================================

/// The user's current filter selections, keyed by rule name.
///
/// A serializable value object owned by the caller (UI state, CLI flags,
/// query string). Values of `""` or `"all"` are pass-through by convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValues(BTreeMap<String, String>);

impl FilterValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a named rule (builder style).
    pub fn set(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Names of all stored selections.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every stored value is a pass-through sentinel.
    pub fn is_default(&self) -> bool {
        self.0.values().all(|v| is_noop(v))
    }
}

fn is_noop(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("all")
}

// =============================================================================
// Range tokens
// =============================================================================

/// Parse a lookback token (`"1h"`, `"24h"`, `"7d"`, `"90d"`, `"30m"`, ...)
/// into a duration. Returns `None` for anything unrecognized.
pub fn parse_range_token(token: &str) -> Option<Duration> {
    let token = token.trim();
    // The unit is the last char; its index is a char boundary, so the
    // number slice stays valid for non-ASCII input.
    let (idx, unit) = token.char_indices().last()?;
    let number = &token[..idx];
    if number.is_empty() {
        return None;
    }
    let amount: i64 = number.parse().ok()?;
    if amount < 0 {
        return None;
    }
    // try_* constructors reject amounts outside chrono's range.
    match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        _ => None,
    }
}

// =============================================================================
// Compiled predicate
// =============================================================================

enum Step<'a, T> {
    Text {
        fields: &'a [TextAccessor<T>],
        query: String, // lowercased once at build time
    },
    Facet {
        field: &'a FacetAccessor<T>,
        accepted: String,
    },
    Window {
        field: &'a TimeAccessor<T>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// A compiled predicate: the AND of every active rule in a [`FilterSpec`].
///
/// Rules whose value is absent, `""`, `"all"`, or an unparseable range token
/// are dropped at build time, so an all-default predicate matches everything.
pub struct Predicate<'a, T> {
    steps: Vec<Step<'a, T>>,
}

impl<T> Predicate<'_, T> {
    pub fn matches(&self, record: &T) -> bool {
        self.steps.iter().all(|step| match step {
            Step::Text { fields, query } => fields.iter().any(|f| {
                f(record)
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(query.as_str())
            }),
            Step::Facet { field, accepted } => match field(record) {
                Some(value) => value == *accepted,
                None => false,
            },
            Step::Window { field, start, end } => match field(record) {
                Some(ts) => ts >= *start && ts <= *end,
                None => false,
            },
        })
    }

    /// Number of active (non-pass-through) rules.
    pub fn active_rules(&self) -> usize {
        self.steps.len()
    }
}

/// Compile `spec` against the current `values`.
///
/// `now` anchors every time-range rule; it is injected rather than read from
/// the system clock so the same inputs always produce the same predicate.
pub fn build_predicate<'a, T>(
    spec: &'a FilterSpec<T>,
    values: &FilterValues,
    now: DateTime<Utc>,
) -> Predicate<'a, T> {
    let mut steps = Vec::new();

    for name in values.names() {
        if !spec.rules.iter().any(|r| r.name == name) {
            tracing::warn!(rule = %name, "filter value names no configured rule, ignoring");
        }
    }

    for named in &spec.rules {
        let Some(raw) = values.get(&named.name) else {
            continue;
        };
        if is_noop(raw) {
            continue;
        }

        match &named.rule {
            FilterRule::TextSearch { fields } => steps.push(Step::Text {
                fields,
                query: raw.to_lowercase(),
            }),
            FilterRule::Facet { field, options } => {
                if let Some(options) = options {
                    if !options.iter().any(|o| o == raw) {
                        tracing::warn!(
                            rule = %named.name,
                            value = %raw,
                            "facet value outside configured options, treating as 'all'"
                        );
                        continue;
                    }
                }
                steps.push(Step::Facet {
                    field,
                    accepted: raw.to_string(),
                });
            }
            FilterRule::TimeRange { field } => match parse_range_token(raw) {
                Some(duration) => steps.push(Step::Window {
                    field,
                    start: now - duration,
                    end: now,
                }),
                None => {
                    tracing::warn!(
                        rule = %named.name,
                        token = %raw,
                        "unrecognized range token, treating as 'all'"
                    );
                }
            },
        }
    }

    Predicate { steps }
}
