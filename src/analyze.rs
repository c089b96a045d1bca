//! Quick look at a feed's shape before a full run.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::CatalogResult;
use crate::feed::FeedReader;

/// Column names and the first data row of a feed.
#[derive(Debug, Serialize)]
pub struct FeedSummary {
    pub columns: Vec<String>,
    pub example: Option<Vec<(String, String)>>,
}

/// Reads the header and first data row of the feed at `path`.
///
/// # Errors
///
/// Fails with `InputNotFound` for a missing file and `MalformedRow` if the
/// header or first row cannot be parsed.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn inspect(path: &Path) -> CatalogResult<FeedSummary> {
    let mut reader = FeedReader::open(path)?;
    let columns = reader.headers()?;

    let example = match reader.records().next() {
        Some(record) => Some(
            columns
                .iter()
                .cloned()
                .zip(record?.iter().map(str::to_string))
                .collect(),
        ),
        None => None,
    };

    Ok(FeedSummary { columns, example })
}

/// Logs a summary as pretty-printed JSON.
pub fn print_summary(summary: &FeedSummary) {
    info!(columns = summary.columns.len(), "Feed columns");
    match serde_json::to_string_pretty(summary) {
        Ok(json) => info!("{}", json),
        Err(e) => warn!(error = %e, "Could not render feed summary"),
    }
}
