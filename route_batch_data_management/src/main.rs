use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Args, Parser};
use route_batch_data_management::{
    config::{RateLimit, RunConfig},
    RouteBatch, DESTINATION_FILE, KEY_FILE, ORIGIN_FILE, OUTPUT_DIR, ROUTE_NAME, SERVICE_URL,
};
use route_batch_lib::{
    place::ColumnMap,
    profile::{DistanceUnit, Preference, TravelMode},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "route_batch")]
#[command(about = "Route every origin to every destination and write shapefiles", long_about = None)]
struct Cli {
    /// General description, used in output file names
    #[arg(long, default_value = ROUTE_NAME)]
    route_name: String,
    #[arg(long, value_enum, default_value_t = TravelMode::DrivingCar)]
    mode: TravelMode,
    #[arg(long, value_enum, default_value_t = DistanceUnit::Miles)]
    units: DistanceUnit,
    #[arg(long, value_enum, default_value_t = Preference::Fastest)]
    preference: Preference,

    #[arg(long, default_value = ORIGIN_FILE)]
    origins: PathBuf,
    #[arg(long, default_value = DESTINATION_FILE)]
    destinations: PathBuf,
    #[arg(long, default_value = KEY_FILE)]
    key_file: PathBuf,
    #[arg(long, default_value = OUTPUT_DIR)]
    output_dir: PathBuf,
    #[arg(long, default_value = SERVICE_URL)]
    service_url: String,

    #[command(flatten)]
    origin_columns: OriginColumns,
    #[command(flatten)]
    destination_columns: DestinationColumns,

    /// Requests allowed per window
    #[arg(long, default_value_t = 40)]
    requests_per_window: u32,
    #[arg(long, default_value_t = 60)]
    window_secs: u64,
}

/// Column positions in the origin file
#[derive(Args)]
struct OriginColumns {
    #[arg(long, default_value_t = 0)]
    origin_id: usize,
    #[arg(long, default_value_t = 1)]
    origin_name: usize,
    #[arg(long, default_value_t = 2)]
    origin_long: usize,
    #[arg(long, default_value_t = 3)]
    origin_lat: usize,
}

/// Column positions in the destination file
#[derive(Args)]
struct DestinationColumns {
    #[arg(long, default_value_t = 0)]
    dest_id: usize,
    #[arg(long, default_value_t = 1)]
    dest_name: usize,
    #[arg(long, default_value_t = 2)]
    dest_long: usize,
    #[arg(long, default_value_t = 3)]
    dest_lat: usize,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            route_name: cli.route_name,
            travel_mode: cli.mode,
            units: cli.units,
            preference: cli.preference,
            origin_columns: ColumnMap {
                id: cli.origin_columns.origin_id,
                name: cli.origin_columns.origin_name,
                longitude: cli.origin_columns.origin_long,
                latitude: cli.origin_columns.origin_lat,
            },
            destination_columns: ColumnMap {
                id: cli.destination_columns.dest_id,
                name: cli.destination_columns.dest_name,
                longitude: cli.destination_columns.dest_long,
                latitude: cli.destination_columns.dest_lat,
            },
            key_file: cli.key_file,
            origin_file: cli.origins,
            destination_file: cli.destinations,
            output_dir: cli.output_dir,
            service_url: cli.service_url,
            rate_limit: RateLimit {
                requests: cli.requests_per_window,
                window: Duration::from_secs(cli.window_secs),
            },
            ..RunConfig::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=trace,route_batch_data_management=trace", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RunConfig::from(Cli::parse());

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: RunConfig) -> anyhow::Result<()> {
    let summary = RouteBatch::start(config)?.run().await?;

    if !summary.report.failures.is_empty() {
        tracing::warn!(
            "{} of {} pairs failed",
            summary.report.failures.len(),
            summary.report.attempted()
        );
    }

    Ok(())
}
