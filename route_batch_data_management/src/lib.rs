use std::path::PathBuf;

use const_format::concatcp;
use route_batch_lib::{geometry::GeometryError, place::PlaceError};

pub mod config;
pub mod credential;
pub mod csv_loader;
pub mod fetcher;
pub mod openroute;
pub mod plot;
pub mod point_table;
pub mod report;
pub mod route_table;
mod shapefile_util;
pub mod throttle;
mod route_batch;

pub use route_batch::*;

pub const INPUT_DIR: &str = "input/";
pub const OUTPUT_DIR: &str = "output/";
pub const ORIGIN_FILE: &str = concatcp!(INPUT_DIR, "origins.csv");
pub const DESTINATION_FILE: &str = concatcp!(INPUT_DIR, "destinations.csv");
pub const KEY_FILE: &str = "ors_key.txt";
pub const ROUTE_NAME: &str = "scili_to_libs";
pub const SERVICE_URL: &str = "https://api.openrouteservice.org/";

#[derive(Debug, thiserror::Error)]
pub enum RouteBatchError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{} has no header row", .0.display())]
    EmptyTable(PathBuf),
    #[error(transparent)]
    Place(#[from] PlaceError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("failed to write shapefile {}: {message}", .path.display())]
    Shapefile { path: PathBuf, message: String },
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("api key file {} is empty", .0.display())]
    EmptyApiKey(PathBuf),
    #[error("invalid service url {url}: {message}")]
    ServiceUrl { url: String, message: String },
}
