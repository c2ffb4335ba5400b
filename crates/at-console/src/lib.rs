//! # at-console — The Floor of ATRIUM
//!
//! Everything page-shaped: the record types behind each console screen, the
//! declarative view configuration (filters + stats) each page hands to
//! [`at_core`], deterministic fixture data standing in for the platform's
//! store, and the registry that resolves a page by name.
//!
//! Pages here are data, not code: adding a screen means one record type, one
//! `FilterSpec`, one `AggregationSpec`, and a fixture set.

pub mod console;
pub mod error;
pub mod fixtures;
pub mod pages;
pub mod records;
pub mod source;

pub use console::{Collection, Console, PageDef, PageView};
pub use error::{ConsoleError, SourceError};
pub use source::{CollectionSource, FixtureSource, JsonFileSource};
