use std::path::Path;

use csv::{ReaderBuilder, Trim};
use route_batch_lib::place::PlaceTable;

use crate::RouteBatchError;

/// Reads a comma separated place file. The first row is the header, every field is
/// whitespace-trimmed, and rows are not checked against the header width.
pub fn read_places(path: &Path) -> Result<PlaceTable, RouteBatchError> {
    let csv_error = |source| RouteBatchError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_error)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| RouteBatchError::EmptyTable(path.to_path_buf()))?;

    let table = PlaceTable::new(header, rows.collect());
    tracing::debug!("Read {} places from {}", table.len(), path.display());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn strips_every_field() {
        let file = write_file("id, name ,lon,lat\n1,  Sciences Library , -71.4004,41.8270\n");

        let table = read_places(file.path()).unwrap();
        assert_eq!(table.header, vec!["id", "name", "lon", "lat"]);
        assert_eq!(table.rows, vec![vec!["1", "Sciences Library", "-71.4004", "41.8270"]]);
    }

    #[test]
    fn keeps_ragged_rows() {
        let file = write_file("id,name,lon,lat\n1,Rock\n2,Hay,-71.40,41.82,extra\n");

        let table = read_places(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 5);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let file = write_file("id,name,lon,lat\n3,\"Orwig, Music Library\",-71.39,41.82\n");

        let table = read_places(file.path()).unwrap();
        assert_eq!(table.rows[0][1], "Orwig, Music Library");
    }

    #[test]
    fn empty_file_has_no_header() {
        let file = write_file("");

        assert!(matches!(read_places(file.path()), Err(RouteBatchError::EmptyTable(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = read_places(&dir.path().join("origins.csv"));
        assert!(matches!(result, Err(RouteBatchError::Csv { .. })));
    }
}
