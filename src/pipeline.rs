//! Filter, validate, sort and write: the whole catalog run.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::analyze::{FeedSummary, inspect, print_summary};
use crate::collate::sort_stations;
use crate::config::CatalogConfig;
use crate::error::CatalogResult;
use crate::feed::{FeedReader, StopRow};
use crate::geo::GeoValidator;
use crate::output::{write_catalog, write_sample};
use crate::station::{Rejection, Station, is_candidate};
use crate::stats::PipelineStats;

const PROGRESS_INTERVAL: usize = 10_000;

/// Sorted stations plus the counters gathered while building them.
#[derive(Debug, Default)]
pub struct Catalog {
    pub stations: Vec<Station>,
    pub stats: PipelineStats,
}

/// Runs every row through the filter, projector and geo validator, then
/// sorts the survivors by name.
///
/// Synthetic ids are numbered by how many stations were already stored, so
/// a row dropped by the validator never consumes a number.
///
/// # Errors
///
/// Stops at the first row that fails to parse.
pub fn build_catalog<I>(rows: I, validator: &GeoValidator) -> CatalogResult<Catalog>
where
    I: IntoIterator<Item = CatalogResult<StopRow>>,
{
    let mut stations = Vec::new();
    let mut stats = PipelineStats::default();

    for row in rows {
        let row = row?;
        stats.rows_read += 1;

        if stats.rows_read % PROGRESS_INTERVAL == 0 {
            debug!(
                rows_read = stats.rows_read,
                accepted = stations.len(),
                "Processing feed"
            );
        }

        if let Err(reason) = is_candidate(&row) {
            stats.record_rejected(reason);
            continue;
        }

        let station = Station::project(&row, stations.len());
        if !validator.accepts(&station) {
            debug!(id = %station.id, lat = station.lat, lon = station.lon, "Outside bounding box");
            stats.record_rejected(Rejection::OutOfBounds);
            continue;
        }

        stats.record_accepted(&station);
        stations.push(station);
    }

    Ok(Catalog {
        stations: sort_stations(stations),
        stats,
    })
}

/// Reads the configured feed, builds the catalog and writes the primary
/// artifact.
#[tracing::instrument(skip_all, fields(input = %config.input_path.display()))]
pub fn run(config: &CatalogConfig) -> CatalogResult<Catalog> {
    let reader = FeedReader::open(&config.input_path)?;
    let catalog = build_catalog(reader.rows(), &GeoValidator::default())?;

    let stats = &catalog.stats;
    info!(
        rows_read = stats.rows_read,
        accepted = stats.accepted,
        stations = stats.stations,
        stops = stats.stops,
        rejected_unnamed = stats.rejected_unnamed,
        rejected_child_stop = stats.rejected_child_stop,
        rejected_out_of_bounds = stats.rejected_out_of_bounds,
        rejected = stats.rejected(),
        sentinel_coordinates = stats.sentinel_coordinates,
        with_code = stats.with_code,
        with_platform = stats.with_platform,
        acceptance_pct = stats.acceptance_pct(),
        "Catalog built"
    );

    write_catalog(&config.output_path, &catalog.stations)?;
    Ok(catalog)
}

/// [`run`], then also writes the first `sample_size` stations to the
/// sample path.
pub fn run_with_sample(config: &CatalogConfig) -> CatalogResult<Catalog> {
    let catalog = run(config)?;
    write_sample(&config.sample_path, &catalog.stations, config.sample_size)?;
    Ok(catalog)
}

/// What a single invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Build the catalog and write the primary artifact.
    Build,
    /// Report the feed's columns and an example row, then build.
    Analyze,
    /// Build, then also write the sample artifact.
    Sample,
}

impl Mode {
    /// `--analyze` wins when both flags are given.
    pub fn select(analyze: bool, sample: bool) -> Self {
        if analyze {
            Mode::Analyze
        } else if sample {
            Mode::Sample
        } else {
            Mode::Build
        }
    }

    /// Picks the mode from raw invocation arguments. Unrecognized tokens
    /// are ignored.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut analyze, mut sample) = (false, false);
        for arg in args {
            match arg.as_ref() {
                "--analyze" => analyze = true,
                "--sample" => sample = true,
                _ => {}
            }
        }
        Self::select(analyze, sample)
    }
}

/// Runs one invocation in the given mode.
pub fn run_mode(mode: Mode, config: &CatalogConfig) -> CatalogResult<Catalog> {
    run_mode_with(mode, config, inspect)
}

/// [`run_mode`] with a caller-supplied feed inspector for `Mode::Analyze`.
/// A failed inspection is logged and the build runs regardless.
pub fn run_mode_with<F>(
    mode: Mode,
    config: &CatalogConfig,
    inspector: F,
) -> CatalogResult<Catalog>
where
    F: FnOnce(&Path) -> CatalogResult<FeedSummary>,
{
    match mode {
        Mode::Build => run(config),
        Mode::Analyze => {
            match inspector(&config.input_path) {
                Ok(summary) => print_summary(&summary),
                Err(e) => warn!(error = %e, "Feed inspection failed, building catalog directly"),
            }
            run(config)
        }
        Mode::Sample => run_with_sample(config),
    }
}
