pub mod geometry;
pub mod place;
pub mod profile;
pub mod route;

/// Coordinate reference system of every table this workspace produces.
pub const CRS: &str = "EPSG:4326";
