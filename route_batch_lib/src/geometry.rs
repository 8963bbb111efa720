use geo_types::LineString;
use wkt::{ToWkt, TryFromWkt};

/// Precision of the polylines returned by the directions service.
pub const POLYLINE_PRECISION: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("failed to decode route polyline: {0}")]
    Polyline(String),
    #[error("failed to parse WKT: {0}")]
    Wkt(String),
}

/// Decodes an encoded 2D polyline into a line of longitude/latitude coordinates.
pub fn decode_route_geometry(encoded: &str) -> Result<LineString<f64>, GeometryError> {
    polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| GeometryError::Polyline(e.to_string()))
}

pub fn to_wkt(line: &LineString<f64>) -> String {
    line.wkt_string()
}

pub fn from_wkt(text: &str) -> Result<LineString<f64>, GeometryError> {
    LineString::<f64>::try_from_wkt_str(text).map_err(|e| GeometryError::Wkt(e.to_string()))
}
