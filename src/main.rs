//! CLI entry point for the station catalog builder.
//!
//! Reads a GTFS `stops.txt`, keeps stations and top-level stops inside the
//! bounding box and writes them, sorted by name, as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use gtfs_stations::config::CatalogConfig;
use gtfs_stations::error::CatalogError;
use gtfs_stations::pipeline::{Mode, run_mode};
use std::ffi::OsStr;
use std::path::Path;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gtfs_stations")]
#[command(about = "Build a sorted station catalog from a GTFS stops.txt", long_about = None)]
struct Cli {
    /// Print the feed's columns and an example row before building
    #[arg(long)]
    analyze: bool,

    /// Also write the first 50 stations to the sample file
    #[arg(long)]
    sample: bool,
}

/// Unrecognized arguments never stop a run: they are reported and the mode
/// is picked from whichever known flags are present.
fn parse_mode() -> Mode {
    match Cli::try_parse() {
        Ok(cli) => Mode::select(cli.analyze, cli.sample),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            warn!(error = ?e.kind(), "Ignoring unrecognized arguments");
            Mode::from_args(std::env::args().skip(1))
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing();
    let mode = parse_mode();

    match execute(mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Catalog run failed");
            let code = e
                .downcast_ref::<CatalogError>()
                .map(CatalogError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Coloured stderr output plus a JSON daily rolling log file.
fn init_tracing() -> WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gtfs_stations.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gtfs_stations.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn execute(mode: Mode) -> Result<()> {
    let config = CatalogConfig::from_env();
    info!(
        input = %config.input_path.display(),
        output = %config.output_path.display(),
        ?mode,
        "Starting catalog build"
    );

    let catalog = run_mode(mode, &config)
        .with_context(|| format!("building catalog from {}", config.input_path.display()))?;

    info!(stations = catalog.stations.len(), "Done");
    Ok(())
}
