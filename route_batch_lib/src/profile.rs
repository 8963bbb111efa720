use std::fmt;

use serde::{Deserialize, Serialize};

/// Transit mode understood by the directions service.
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelMode {
    #[default]
    DrivingCar,
    DrivingHgv,
    FootWalking,
    FootHiking,
    CyclingRegular,
    CyclingRoad,
    CyclingMountain,
    CyclingElectric,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::DrivingCar => "driving-car",
            TravelMode::DrivingHgv => "driving-hgv",
            TravelMode::FootWalking => "foot-walking",
            TravelMode::FootHiking => "foot-hiking",
            TravelMode::CyclingRegular => "cycling-regular",
            TravelMode::CyclingRoad => "cycling-road",
            TravelMode::CyclingMountain => "cycling-mountain",
            TravelMode::CyclingElectric => "cycling-electric",
        }
    }
}

#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[serde(rename = "m")]
    #[cfg_attr(feature = "clap", value(name = "m"))]
    Meters,
    #[serde(rename = "km")]
    #[cfg_attr(feature = "clap", value(name = "km"))]
    Kilometers,
    #[default]
    #[serde(rename = "mi")]
    #[cfg_attr(feature = "clap", value(name = "mi"))]
    Miles,
}

impl DistanceUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

/// Routing optimization criterion.
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    #[default]
    Fastest,
    Shortest,
    Recommended,
}

impl Preference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preference::Fastest => "fastest",
            Preference::Shortest => "shortest",
            Preference::Recommended => "recommended",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
