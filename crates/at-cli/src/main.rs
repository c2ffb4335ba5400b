//! # at-cli — The Desk of ATRIUM
//!
//! Terminal consumer of the view-model engine.
//!
//! - `at pages` — list registered console pages.
//! - `at view <page>` — stats header plus the filtered record table.
//! - `at stats <page>` — stats header only.
//! - `at fixtures <page>` — dump the page's (optionally generated) dataset.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use at_console::{CollectionSource, Console, JsonFileSource, PageView};
use at_core::FilterValues;

mod output;

/// ATRIUM — admin console view-models in your terminal.
#[derive(Parser)]
#[command(name = "at", version, about, long_about = None)]
struct Cli {
    /// Path to config file.
    #[arg(long, default_value = "at.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered console pages.
    Pages,

    /// Compute and print a page's view-model.
    View {
        /// Page name (see `at pages`).
        page: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Load the collection from a JSON array file instead of fixtures.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Output format: table or json.
        #[arg(long)]
        format: Option<String>,

        /// Maximum rows to print in table output.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print only a page's stats header.
    Stats {
        page: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Load the collection from a JSON array file instead of fixtures.
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Dump a page's fixture or generated dataset as JSON.
    Fixtures {
        page: String,

        /// Generate this many seeded records instead of the hand-written set.
        #[arg(long)]
        count: Option<usize>,

        /// Seed for generated records.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

/// Filter selections shared by `view` and `stats`.
#[derive(Args)]
struct FilterArgs {
    /// Free-text search query.
    #[arg(long)]
    search: Option<String>,

    /// Facet selection, repeatable: --facet status=paid --facet method=paypal
    #[arg(long = "facet", value_name = "NAME=VALUE")]
    facets: Vec<String>,

    /// Time-range token (1h, 24h, 7d, 30d, 90d, ...).
    #[arg(long)]
    range: Option<String>,
}

impl FilterArgs {
    fn to_values(&self) -> Result<FilterValues, String> {
        let mut values = FilterValues::new();
        if let Some(q) = &self.search {
            values = values.set("search", q);
        }
        for facet in &self.facets {
            let (name, value) = facet
                .split_once('=')
                .ok_or_else(|| format!("invalid facet '{facet}', expected NAME=VALUE"))?;
            values = values.set(name.trim(), value.trim());
        }
        if let Some(range) = &self.range {
            values = values.set("range", range);
        }
        Ok(values)
    }
}

// =============================================================================
// Config
// =============================================================================

#[derive(Deserialize, Default, Clone)]
struct Config {
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Deserialize, Clone)]
struct OutputConfig {
    #[serde(default = "default_format")]
    format: String,
    #[serde(default = "default_limit")]
    limit: usize,
    /// Range token applied when `--range` is absent.
    #[serde(default)]
    range: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            limit: default_limit(),
            range: None,
        }
    }
}

fn default_format() -> String {
    "table".into()
}

fn default_limit() -> usize {
    50
}

fn load_config(path: &PathBuf) -> Config {
    if !path.exists() {
        return Config::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "bad config file, using defaults");
            Config::default()
        }
    }
}

// =============================================================================
// Main
// =============================================================================

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "at=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &Config) -> Result<(), String> {
    let console = Console::with_builtin_pages();
    let now = Utc::now();

    match command {
        Commands::Pages => {
            for page in console.pages() {
                println!(
                    "{:<12} {:<18} filters: {}",
                    page.name(),
                    page.title(),
                    page.rule_names().join(", ")
                );
            }
            Ok(())
        }

        Commands::View {
            page,
            filters,
            input,
            format,
            limit,
        } => {
            let page = console.get(&page).map_err(|e| e.to_string())?;
            let values = with_default_range(filters.to_values()?, config);
            let view = compute(page, input.as_deref(), &values, now)?;

            let format = format.unwrap_or_else(|| config.output.format.clone());
            let limit = limit.unwrap_or(config.output.limit);

            match format.as_str() {
                "json" => {
                    let body = serde_json::json!({
                        "filtered": view.filtered,
                        "stats": view.stats,
                    });
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&body).map_err(|e| e.to_string())?
                    );
                }
                "table" => {
                    println!("{} ({} shown)", page.title(), view.filtered.len());
                    println!("{}", output::format_stats(&view.stats));
                    println!();
                    println!("{}", output::render_table(&view.filtered, limit));
                }
                other => return Err(format!("unknown format '{other}'")),
            }
            Ok(())
        }

        Commands::Stats {
            page,
            filters,
            input,
        } => {
            let page = console.get(&page).map_err(|e| e.to_string())?;
            let values = with_default_range(filters.to_values()?, config);
            let view = compute(page, input.as_deref(), &values, now)?;
            println!("{}", page.title());
            println!("{}", output::format_stats(&view.stats));
            Ok(())
        }

        Commands::Fixtures { page, count, seed } => {
            let page = console.get(&page).map_err(|e| e.to_string())?;
            let rows = match count {
                Some(n) => page.generate_json(n, seed, now),
                None => page.fixtures_json(now),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).map_err(|e| e.to_string())?
            );
            Ok(())
        }
    }
}

fn with_default_range(values: FilterValues, config: &Config) -> FilterValues {
    match (&config.output.range, values.get("range")) {
        (Some(token), None) => values.set("range", token),
        _ => values,
    }
}

fn compute(
    page: &dyn at_console::PageDef,
    input: Option<&std::path::Path>,
    values: &FilterValues,
    now: chrono::DateTime<Utc>,
) -> Result<PageView, String> {
    match input {
        Some(path) => {
            let rows: Vec<Value> = JsonFileSource::new(path)
                .fetch()
                .map_err(|e| format!("{}: {e}", path.display()))?;
            Ok(page.view_from_json(rows, values, now))
        }
        None => Ok(page.view_of_fixtures(values, now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_args_parse_into_filter_values() {
        let args = FilterArgs {
            search: Some("sarah".into()),
            facets: vec!["status=paid".into(), "method = paypal".into()],
            range: Some("24h".into()),
        };
        let values = args.to_values().unwrap();
        assert_eq!(values.get("search"), Some("sarah"));
        assert_eq!(values.get("status"), Some("paid"));
        assert_eq!(values.get("method"), Some("paypal"));
        assert_eq!(values.get("range"), Some("24h"));
    }

    #[test]
    fn malformed_facet_is_an_error() {
        let args = FilterArgs {
            search: None,
            facets: vec!["status".into()],
            range: None,
        };
        assert!(args.to_values().is_err());
    }

    #[test]
    fn config_range_fills_in_only_when_flag_absent() {
        let config = Config {
            output: OutputConfig {
                range: Some("7d".into()),
                ..OutputConfig::default()
            },
        };
        let defaulted = with_default_range(FilterValues::new(), &config);
        assert_eq!(defaulted.get("range"), Some("7d"));

        let explicit =
            with_default_range(FilterValues::new().set("range", "24h"), &config);
        assert_eq!(explicit.get("range"), Some("24h"));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config(&PathBuf::from("/nonexistent/at.toml"));
        assert_eq!(config.output.format, "table");
        assert_eq!(config.output.limit, 50);
    }
}
