//! Console-level errors. The engine itself never errors on data shape;
//! these cover the seams around it: resolving pages and fetching records.

use thiserror::Error;

/// Failure to obtain a collection snapshot from a data source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read collection: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode collection: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure at the console registry surface.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("unknown page '{0}'")]
    PageNotFound(String),

    #[error(transparent)]
    Source(#[from] SourceError),
}
