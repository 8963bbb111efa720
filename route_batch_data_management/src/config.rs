use std::{path::{Path, PathBuf}, time::Duration};

use chrono::NaiveDate;
use route_batch_lib::{
    place::ColumnMap,
    profile::{DistanceUnit, Preference, TravelMode},
};

use crate::{DESTINATION_FILE, KEY_FILE, ORIGIN_FILE, OUTPUT_DIR, ROUTE_NAME, SERVICE_URL};

/// The service allows 40 directions requests per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub requests: u32,
    pub window: Duration,
}

impl Default for RateLimit {
    fn default() -> Self {
        Self {
            requests: 40,
            window: Duration::from_secs(60),
        }
    }
}

/// Everything a run needs, passed explicitly to each stage.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// General description, used in output file names.
    pub route_name: String,
    pub travel_mode: TravelMode,
    pub units: DistanceUnit,
    pub preference: Preference,
    pub origin_columns: ColumnMap,
    pub destination_columns: ColumnMap,
    pub key_file: PathBuf,
    pub origin_file: PathBuf,
    pub destination_file: PathBuf,
    pub output_dir: PathBuf,
    pub service_url: String,
    pub rate_limit: RateLimit,
    pub run_date: NaiveDate,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            route_name: ROUTE_NAME.into(),
            travel_mode: TravelMode::default(),
            units: DistanceUnit::default(),
            preference: Preference::default(),
            origin_columns: ColumnMap::default(),
            destination_columns: ColumnMap::default(),
            key_file: KEY_FILE.into(),
            origin_file: ORIGIN_FILE.into(),
            destination_file: DESTINATION_FILE.into(),
            output_dir: OUTPUT_DIR.into(),
            service_url: SERVICE_URL.into(),
            rate_limit: RateLimit::default(),
            run_date: chrono::Local::now().date_naive(),
        }
    }
}

impl RunConfig {
    pub fn date_tag(&self) -> String {
        self.run_date.format("%Y_%m_%d").to_string()
    }

    fn route_stem(&self) -> String {
        format!("{}_{}_{}_{}", self.route_name, self.travel_mode, self.preference, self.date_tag())
    }

    pub fn route_output(&self) -> PathBuf {
        self.output_dir.join(format!("{}.shp", self.route_stem()))
    }

    pub fn plot_output(&self) -> PathBuf {
        self.output_dir.join(format!("{}.svg", self.route_stem()))
    }

    pub fn failures_output(&self) -> PathBuf {
        self.output_dir.join(format!("{}_failures.csv", self.route_stem()))
    }

    pub fn origin_output(&self) -> PathBuf {
        self.places_output(&self.origin_file)
    }

    pub fn destination_output(&self) -> PathBuf {
        self.places_output(&self.destination_file)
    }

    // Input file name up to its first dot, tagged with the run date
    fn places_output(&self, input: &Path) -> PathBuf {
        let name = input
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('.').next())
            .unwrap_or("places");
        self.output_dir.join(format!("{}_{}.shp", name, self.date_tag()))
    }
}
