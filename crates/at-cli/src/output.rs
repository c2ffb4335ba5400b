//! Terminal rendering of a page view: a stats header followed by the
//! filtered records as a table. Nested objects are shown as compact JSON;
//! presentation stops here — no colors, no icons.

use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

use at_core::{StatValue, StatsMap};

/// Format a scalar without trailing noise: integers stay integers,
/// everything else gets two decimals.
fn format_scalar(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

pub fn format_stats(stats: &StatsMap) -> String {
    let mut lines = Vec::with_capacity(stats.len());
    for (name, value) in stats {
        match value {
            StatValue::Scalar(v) => lines.push(format!("  {name}: {}", format_scalar(*v))),
            StatValue::Groups(groups) => {
                let parts: Vec<String> =
                    groups.iter().map(|(k, c)| format!("{k}={c}")).collect();
                lines.push(format!("  {name}: {}", parts.join("  ")));
            }
        }
    }
    lines.join("\n")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render JSON records as a table. Columns come from the first record's
/// keys (field declaration order is preserved through serialization).
pub fn render_table(rows: &[Value], limit: usize) -> String {
    let shown = &rows[..rows.len().min(limit)];

    let columns: Vec<String> = match shown.first().and_then(Value::as_object) {
        Some(obj) => obj.keys().cloned().collect(),
        None => return String::from("(no records)"),
    };

    let mut builder = Builder::default();
    builder.push_record(columns.clone());

    for row in shown {
        let cells: Vec<String> = columns
            .iter()
            .map(|col| {
                row.get(col)
                    .map(cell_text)
                    .unwrap_or_default()
            })
            .collect();
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::sharp());

    if rows.len() > limit {
        format!("{table}\n  ... {} more (raise --limit)", rows.len() - limit)
    } else {
        table.to_string()
    }
}
