use std::path::Path;

use geo_types::Point;
use route_batch_lib::{
    place::{ColumnMap, Place, PlaceTable},
    CRS,
};
use shapefile::dbase::{FieldValue, Record};

use crate::{
    shapefile_util::{field_names, prepare_output, shapefile_error, truncate_value, TableLayout, INDEX_FIELD},
    RouteBatchError,
};

/// A place table with a point per row.
#[derive(Debug, Clone)]
pub struct PointTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub points: Vec<Point<f64>>,
    pub crs: &'static str,
}

impl PointTable {
    /// Derives each row's point from the longitude/latitude positions.
    pub fn from_places(table: &PlaceTable, longitude: usize, latitude: usize) -> Result<Self, RouteBatchError> {
        // Header names must exist for the coordinate columns
        table.column_name(longitude)?;
        table.column_name(latitude)?;

        let columns = ColumnMap {
            longitude,
            latitude,
            ..ColumnMap::default()
        };

        let points = table
            .rows
            .iter()
            .map(|row| Place::new(row, columns).coordinate().map(Point::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            columns: table.header.clone(),
            rows: table.rows.clone(),
            points,
            crs: CRS,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Writes a point shapefile with every column as a character field.
    pub fn write(&self, export: &Path) -> Result<(), RouteBatchError> {
        prepare_output(export)?;

        let names = field_names(self.columns.iter().map(String::as_str));
        let values: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| (0..names.len()).map(|i| truncate_value(row.get(i).map(String::as_str).unwrap_or(""))).collect())
            .collect();

        let mut layout = TableLayout::new(export)?;
        for (i, name) in names.iter().enumerate() {
            layout = layout.character(name, values.iter().map(|row| row[i].len()))?;
        }

        let mut writer = shapefile::Writer::from_path(export, layout.build()).map_err(|e| shapefile_error(export, e))?;

        for (index, (point, row)) in self.points.iter().zip(values).enumerate() {
            let mut record = Record::default();
            record.insert(INDEX_FIELD.to_string(), FieldValue::Numeric(Some(index as f64)));
            for (name, value) in names.iter().zip(row) {
                record.insert(name.clone(), FieldValue::Character(Some(value)));
            }

            let shape = shapefile::Point::new(point.x(), point.y());
            writer
                .write_shape_and_record(&shape, &record)
                .map_err(|e| shapefile_error(export, e))?;
        }

        Ok(())
    }
}

/// Builds the point table for a loaded place file and writes it to `export`.
pub fn coords_to_points(
    table: &PlaceTable,
    longitude: usize,
    latitude: usize,
    export: &Path,
) -> Result<PointTable, RouteBatchError> {
    let points = PointTable::from_places(table, longitude, latitude)?;
    points.write(export)?;
    tracing::info!("Wrote shapefile {}", export.display());
    Ok(points)
}
