use geo_types::{coord, Coord};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlaceError {
    #[error("column {position} is out of range for a row of {width} fields")]
    MissingColumn { position: usize, width: usize },
    #[error("invalid coordinate {value:?} in column {position}")]
    InvalidCoordinate { position: usize, value: String },
}

/// Positions of the id, name, longitude and latitude columns in a place table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: usize,
    pub name: usize,
    pub longitude: usize,
    pub latitude: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: 0,
            name: 1,
            longitude: 2,
            latitude: 3,
        }
    }
}

/// A loaded place file: the header row and the data rows, all fields kept as text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PlaceTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_name(&self, position: usize) -> Result<&str, PlaceError> {
        self.header
            .get(position)
            .map(String::as_str)
            .ok_or(PlaceError::MissingColumn { position, width: self.header.len() })
    }

    pub fn places(&self, columns: ColumnMap) -> impl Iterator<Item = Place<'_>> {
        self.rows.iter().map(move |row| Place { row, columns })
    }
}

/// View of one data row through a [`ColumnMap`].
#[derive(Debug, Clone, Copy)]
pub struct Place<'a> {
    row: &'a [String],
    columns: ColumnMap,
}

impl<'a> Place<'a> {
    pub fn new(row: &'a [String], columns: ColumnMap) -> Self {
        Self { row, columns }
    }

    pub fn field(&self, position: usize) -> Result<&'a str, PlaceError> {
        self.row
            .get(position)
            .map(String::as_str)
            .ok_or(PlaceError::MissingColumn { position, width: self.row.len() })
    }

    pub fn id(&self) -> Result<&'a str, PlaceError> {
        self.field(self.columns.id)
    }

    pub fn name(&self) -> Result<&'a str, PlaceError> {
        self.field(self.columns.name)
    }

    /// Longitude/latitude of the row as x/y.
    pub fn coordinate(&self) -> Result<Coord<f64>, PlaceError> {
        let x = self.parse_degrees(self.columns.longitude)?;
        let y = self.parse_degrees(self.columns.latitude)?;
        Ok(coord! { x: x, y: y })
    }

    fn parse_degrees(&self, position: usize) -> Result<f64, PlaceError> {
        let value = self.field(position)?;
        value.parse::<f64>().map_err(|_| PlaceError::InvalidCoordinate {
            position,
            value: value.to_owned(),
        })
    }
}
