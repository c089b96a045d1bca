//! Streaming reader for GTFS `stops.txt` feeds.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};

/// One data row of `stops.txt`. Every column is optional; unknown columns
/// are ignored and empty cells come through as `None`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct StopRow {
    pub stop_id: Option<String>,
    pub stop_name: Option<String>,
    pub stop_lat: Option<String>,
    pub stop_lon: Option<String>,
    pub location_type: Option<String>,
    pub parent_station: Option<String>,
    pub stop_code: Option<String>,
    pub platform_code: Option<String>,
}

pub const DEFAULT_QUOTE: u8 = b'"';

pub struct FeedReader<R> {
    inner: csv::Reader<R>,
}

impl FeedReader<File> {
    /// Opens `path` for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InputNotFound`] if the path does not exist,
    /// before any parsing is attempted, and [`CatalogError::InputUnreadable`]
    /// if it exists but cannot be opened as a file.
    pub fn open(path: &Path) -> CatalogResult<Self> {
        Self::open_with_quote(path, DEFAULT_QUOTE)
    }

    pub fn open_with_quote(path: &Path, quote: u8) -> CatalogResult<Self> {
        if !path.exists() {
            let listing = list_directory(path);
            warn!(path = %path.display(), entries = listing.len(), "Input feed not found");
            return Err(CatalogError::InputNotFound {
                path: path.to_path_buf(),
                listing,
            });
        }

        let unreadable = |source| CatalogError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        };
        if path.is_dir() {
            return Err(unreadable(std::io::Error::other("path is a directory")));
        }

        let file = File::open(path).map_err(unreadable)?;
        debug!(path = %path.display(), "Opened input feed");
        Ok(Self::from_reader(file).with_quote(quote))
    }
}

impl<R: Read> FeedReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            inner: builder(DEFAULT_QUOTE).from_reader(reader),
        }
    }

    /// Rebuilds the reader with a different quote character. A doubled
    /// quote inside a quoted field is read as one literal quote.
    pub fn with_quote(self, quote: u8) -> Self {
        Self {
            inner: builder(quote).from_reader(self.inner.into_inner()),
        }
    }

    /// Column names in header order.
    pub fn headers(&mut self) -> CatalogResult<Vec<String>> {
        Ok(self.inner.headers()?.iter().map(str::to_string).collect())
    }

    /// Raw records, in file order.
    pub fn records(self) -> impl Iterator<Item = CatalogResult<StringRecord>> {
        self.inner
            .into_records()
            .map(|r| r.map_err(CatalogError::from))
    }

    /// Lazily deserialized rows, in file order. Consumes the reader.
    pub fn rows(self) -> impl Iterator<Item = CatalogResult<StopRow>> {
        self.inner
            .into_deserialize::<StopRow>()
            .map(|r| r.map_err(CatalogError::from))
    }
}

fn builder(quote: u8) -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(true)
        .trim(Trim::None)
        .quote(quote)
        .double_quote(true);
    builder
}

/// Sorted entry names of the directory that should have held `path`.
fn list_directory(path: &Path) -> Vec<String> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}
