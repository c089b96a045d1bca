//! Run configuration.
//!
//! Paths come from constants and may be overridden through the environment
//! (or a `.env` file loaded by the binary):
//!
//! | Variable                 | Default                 |
//! |--------------------------|-------------------------|
//! | `STATIONS_INPUT`         | `stops.txt`             |
//! | `STATIONS_OUTPUT`        | `stations.json`         |
//! | `STATIONS_SAMPLE_OUTPUT` | `stations-sample.json`  |

use std::path::PathBuf;

use crate::output::SAMPLE_SIZE;

pub const DEFAULT_INPUT_PATH: &str = "stops.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "stations.json";
pub const DEFAULT_SAMPLE_PATH: &str = "stations-sample.json";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub sample_path: PathBuf,
    pub sample_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sample_path: PathBuf::from(DEFAULT_SAMPLE_PATH),
            sample_size: SAMPLE_SIZE,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            input_path: path("STATIONS_INPUT", DEFAULT_INPUT_PATH),
            output_path: path("STATIONS_OUTPUT", DEFAULT_OUTPUT_PATH),
            sample_path: path("STATIONS_SAMPLE_OUTPUT", DEFAULT_SAMPLE_PATH),
            sample_size: SAMPLE_SIZE,
        }
    }
}
