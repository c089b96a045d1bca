//! Serialization of the sorted catalog to JSON artifacts.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::station::Station;

/// Number of records in the sample artifact.
pub const SAMPLE_SIZE: usize = 50;

/// Writes `value` as pretty-printed JSON, replacing any previous file.
///
/// The document is rendered in memory first, so a failure never leaves a
/// partially serialized record list behind.
fn write_json(path: &Path, value: &impl Serialize) -> CatalogResult<usize> {
    let mut body = serde_json::to_vec_pretty(value).map_err(|e| CatalogError::WriteFailure {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    body.push(b'\n');

    fs::write(path, &body).map_err(|e| CatalogError::WriteFailure {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = body.len(), "Wrote JSON artifact");
    Ok(body.len())
}

/// Writes the full catalog to `path`.
///
/// # Errors
///
/// Returns [`CatalogError::WriteFailure`] if the file cannot be written.
pub fn write_catalog(path: &Path, stations: &[Station]) -> CatalogResult<()> {
    let bytes = write_json(path, &stations)?;
    info!(path = %path.display(), records = stations.len(), bytes, "Catalog written");
    Ok(())
}

/// Writes the first `limit` stations (or all of them, if fewer) to `path`.
pub fn write_sample(path: &Path, stations: &[Station], limit: usize) -> CatalogResult<()> {
    let sample = &stations[..stations.len().min(limit)];
    let bytes = write_json(path, &sample)?;
    info!(path = %path.display(), records = sample.len(), bytes, "Sample written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::StationType;
    use std::env;

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    fn stations(n: usize) -> Vec<Station> {
        (0..n)
            .map(|i| Station {
                id: format!("station_{i}"),
                name: format!("Halt {i:03}"),
                lat: 0.0,
                lon: 0.0,
                kind: StationType::Stop,
                code: None,
                platform: None,
            })
            .collect()
    }

    #[test]
    fn test_write_catalog_is_pretty_utf8() {
        let path = temp_path("gtfs_stations_test_pretty.json");
        let _ = fs::remove_file(&path);

        let mut list = stations(1);
        list[0].name = "Genève-Aéroport".to_string();
        write_catalog(&path, &list).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Genève-Aéroport"));
        assert!(content.contains("\n  {\n    \"id\""));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_catalog_overwrites() {
        let path = temp_path("gtfs_stations_test_overwrite.json");
        let _ = fs::remove_file(&path);

        write_catalog(&path, &stations(3)).unwrap();
        write_catalog(&path, &stations(1)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_sample_truncates() {
        let path = temp_path("gtfs_stations_test_sample.json");
        let _ = fs::remove_file(&path);

        let list = stations(60);
        write_sample(&path, &list, SAMPLE_SIZE).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), SAMPLE_SIZE);
        assert_eq!(parsed[49]["id"], "station_49");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_sample_shorter_than_limit() {
        let path = temp_path("gtfs_stations_test_sample_short.json");
        let _ = fs::remove_file(&path);

        write_sample(&path, &stations(3), SAMPLE_SIZE).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_destination_is_write_failure() {
        let path = temp_path("gtfs_stations_no_such_dir/stations.json");
        let result = write_catalog(&path, &stations(1));

        assert!(matches!(result, Err(CatalogError::WriteFailure { .. })));
    }
}
