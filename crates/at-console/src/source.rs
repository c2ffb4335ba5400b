//! # Collection Sources
//!
//! The injected data-source seam. The engine only ever sees a `Vec<T>`
//! snapshot; where that snapshot comes from — fixtures, a JSON export, a
//! real store — is this trait's problem. Swapping implementations requires
//! no engine change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::SourceError;

/// Supplies one collection snapshot per fetch.
pub trait CollectionSource<T> {
    fn fetch(&self) -> Result<Vec<T>, SourceError>;
}

/// A fixed in-memory collection (the mock data of the original console).
pub struct FixtureSource<T> {
    records: Vec<T>,
}

impl<T> FixtureSource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

impl<T: Clone> CollectionSource<T> for FixtureSource<T> {
    fn fetch(&self) -> Result<Vec<T>, SourceError> {
        Ok(self.records.clone())
    }
}

/// Loads a collection from a JSON array on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl<T: DeserializeOwned> CollectionSource<T> for JsonFileSource {
    fn fetch(&self) -> Result<Vec<T>, SourceError> {
        let raw = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str(&raw)?;
        Ok(records)
    }
}
