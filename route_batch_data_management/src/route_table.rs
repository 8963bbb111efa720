use std::path::Path;

use geo_types::LineString;
use route_batch_lib::{
    geometry::from_wkt,
    route::{RouteRecord, ROUTE_HEADER},
    CRS,
};
use shapefile::dbase::{FieldValue, Record};

use crate::{
    shapefile_util::{prepare_output, shapefile_error, truncate_value, TableLayout, INDEX_FIELD},
    RouteBatchError,
};

/// A route record with its WKT parsed into a line; the text column is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub origin_id: String,
    pub origin_name: String,
    pub destination_id: String,
    pub destination_name: String,
    pub distance: f64,
    pub travel_time: f64,
    pub geometry: LineString<f64>,
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    pub rows: Vec<RouteRow>,
    pub crs: &'static str,
}

impl RouteTable {
    pub fn from_records(records: &[RouteRecord]) -> Result<Self, RouteBatchError> {
        let rows = records
            .iter()
            .map(|record| -> Result<RouteRow, RouteBatchError> {
                Ok(RouteRow {
                    origin_id: record.origin_id.clone(),
                    origin_name: record.origin_name.clone(),
                    destination_id: record.destination_id.clone(),
                    destination_name: record.destination_name.clone(),
                    distance: record.distance,
                    travel_time: record.travel_time,
                    geometry: from_wkt(&record.route)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rows, crs: CRS })
    }

    pub fn write(&self, export: &Path) -> Result<(), RouteBatchError> {
        prepare_output(export)?;

        let [ogn_id, ogn_name, dest_id, dest_name, distance, travtime, _route] = ROUTE_HEADER;
        let text = |row: &RouteRow| {
            [
                truncate_value(&row.origin_id),
                truncate_value(&row.origin_name),
                truncate_value(&row.destination_id),
                truncate_value(&row.destination_name),
            ]
        };
        let values: Vec<[String; 4]> = self.rows.iter().map(text).collect();
        let text_fields = [ogn_id, ogn_name, dest_id, dest_name];

        let mut layout = TableLayout::new(export)?;
        for (i, name) in text_fields.iter().enumerate() {
            layout = layout.character(name, values.iter().map(|v| v[i].len()))?;
        }
        let layout = layout.numeric(distance)?.numeric(travtime)?;

        let mut writer = shapefile::Writer::from_path(export, layout.build()).map_err(|e| shapefile_error(export, e))?;

        for (index, (row, text)) in self.rows.iter().zip(values).enumerate() {
            let mut record = Record::default();
            record.insert(INDEX_FIELD.to_string(), FieldValue::Numeric(Some(index as f64)));
            for (name, value) in text_fields.iter().zip(text) {
                record.insert(name.to_string(), FieldValue::Character(Some(value)));
            }
            record.insert(distance.to_string(), FieldValue::Numeric(Some(row.distance)));
            record.insert(travtime.to_string(), FieldValue::Numeric(Some(row.travel_time)));

            let mut points = row
                .geometry
                .coords()
                .map(|c| shapefile::Point::new(c.x, c.y))
                .collect::<Vec<_>>();
            // A polyline part needs two vertices; a zero-length route has one
            match points.as_slice() {
                [] => return Err(shapefile_error(export, format!("route {index} has no coordinates"))),
                [only] => points.push(*only),
                _ => {}
            }
            let shape = shapefile::Polyline::new(points);

            writer
                .write_shape_and_record(&shape, &record)
                .map_err(|e| shapefile_error(export, e))?;
        }

        Ok(())
    }
}

/// Parses the accumulated records into a route table and writes it to `export`.
pub fn write_routes(records: &[RouteRecord], export: &Path) -> Result<RouteTable, RouteBatchError> {
    let table = RouteTable::from_records(records)?;
    table.write(export)?;
    tracing::info!("Wrote route shapefile to: {}", export.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use route_batch_lib::geometry::{decode_route_geometry, to_wkt};

    use super::*;

    fn record(origin: &str, destination: &str, encoded: &str) -> RouteRecord {
        let line = decode_route_geometry(encoded).unwrap();
        RouteRecord::new(
            origin.into(),
            format!("Origin {origin}"),
            destination.into(),
            format!("Destination {destination}"),
            1.372,
            6.291666666666667,
            to_wkt(&line),
        )
    }

    #[test]
    fn wkt_becomes_geometry() {
        let records = vec![record("1", "a", "_p~iF~ps|U_ulLnnqC_mqNvxq`@")];

        let table = RouteTable::from_records(&records).unwrap();

        assert_eq!(table.crs, "EPSG:4326");
        assert_eq!(table.rows[0].geometry, decode_route_geometry("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap());
        assert_eq!(to_wkt(&table.rows[0].geometry), records[0].route);
    }

    #[test]
    fn bad_wkt_is_rejected() {
        let mut bad = record("1", "a", "_p~iF~ps|U_ulLnnqC");
        bad.route = "LINESTRING(oops)".into();

        assert!(matches!(RouteTable::from_records(&[bad]), Err(RouteBatchError::Geometry(_))));
    }

    #[test]
    fn written_routes_read_back_without_wkt_column() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("scili_to_libs_driving-car_fastest_2024_06_11.shp");
        let records = vec![
            record("1", "a", "_p~iF~ps|U_ulLnnqC_mqNvxq`@"),
            record("1", "b", "_p~iF~ps|U_ulLnnqC"),
        ];

        write_routes(&records, &export).unwrap();

        let shapes = shapefile::read_as::<_, shapefile::Polyline, Record>(&export).unwrap();
        assert_eq!(shapes.len(), 2);

        let (line, attributes) = &shapes[0];
        let coords: Vec<_> = line.parts()[0].iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(-120.2, 38.5), (-120.95, 40.7), (-126.453, 43.252)]);

        assert_eq!(attributes.get("dest_id"), Some(&FieldValue::Character(Some("a".into()))));
        assert_eq!(
            attributes.get("ogn_name"),
            Some(&FieldValue::Character(Some("Origin 1".into())))
        );
        assert!(attributes.get("route").is_none());

        match attributes.get("travtime") {
            Some(FieldValue::Numeric(Some(minutes))) => assert!((minutes - 6.291666).abs() < 1e-5),
            other => panic!("expected numeric travtime, got {other:?}"),
        }

        assert!(dir.path().join("scili_to_libs_driving-car_fastest_2024_06_11.prj").exists());
    }
}
