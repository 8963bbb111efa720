use route_batch_lib::profile::{DistanceUnit, Preference, TravelMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsRequest {
    /// Part of the request path, not the body.
    #[serde(skip)]
    pub profile: TravelMode,
    /// Longitude/latitude pairs, start first.
    pub coordinates: [[f64; 2]; 2],
    pub preference: Preference,
    pub units: DistanceUnit,
    pub instructions: bool,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Route {
    pub summary: Summary,
    /// Encoded polyline.
    pub geometry: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Summary {
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}
