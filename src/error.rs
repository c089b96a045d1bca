//! Error taxonomy for a catalog run.
//!
//! Every variant is terminal for the current invocation. Field-level
//! anomalies (bad numbers, missing optional columns) never surface here.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("input file not found: {} (directory contains: {})", .path.display(), .listing.join(", "))]
    InputNotFound { path: PathBuf, listing: Vec<String> },

    #[error("cannot read input file {}: {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row at line {line}: {source}")]
    MalformedRow {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Process exit status for this failure. `1` is left for anything
    /// outside the taxonomy and `2` for command-line usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            CatalogError::InputNotFound { .. } => 3,
            CatalogError::MalformedRow { .. } => 4,
            CatalogError::WriteFailure { .. } => 5,
            CatalogError::InputUnreadable { .. } => 6,
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(value: csv::Error) -> Self {
        let line = value.position().map(|p| p.line()).unwrap_or(0);
        CatalogError::MalformedRow {
            line,
            source: value,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
