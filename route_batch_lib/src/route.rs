/// Column header of the route table, `route` holding the WKT text.
pub const ROUTE_HEADER: [&str; 7] = [
    "ogn_id",
    "ogn_name",
    "dest_id",
    "dest_name",
    "distance",
    "travtime",
    "route",
];

/// One successfully routed origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub origin_id: String,
    pub origin_name: String,
    pub destination_id: String,
    pub destination_name: String,
    /// In the distance unit the run was configured with.
    pub distance: f64,
    /// Minutes.
    pub travel_time: f64,
    pub route: String,
}

impl RouteRecord {
    pub fn new(
        origin_id: String,
        origin_name: String,
        destination_id: String,
        destination_name: String,
        distance: f64,
        travel_time: f64,
        route: String,
    ) -> Self {
        Self {
            origin_id,
            origin_name,
            destination_id,
            destination_name,
            distance,
            travel_time,
            route,
        }
    }
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / 60.0
}
