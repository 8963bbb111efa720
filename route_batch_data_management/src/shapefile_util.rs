use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use shapefile::dbase::{FieldName, TableWriterBuilder};

use crate::RouteBatchError;

/// ESRI projection for EPSG:4326.
pub const WGS84_PRJ: &str = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;

const MAX_FIELD_NAME: usize = 10;
const MAX_CHARACTER_LENGTH: usize = 254;

pub const INDEX_FIELD: &str = "index";

pub(crate) fn shapefile_error(path: &Path, error: impl std::fmt::Display) -> RouteBatchError {
    RouteBatchError::Shapefile {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// dBase field names hold at most ten ASCII bytes and must be unique.
///
/// Non-ASCII characters become `_`, long names are cut, and a name already
/// taken (case-insensitively, `index` included) gets a `_1`, `_2`, ... suffix.
pub(crate) fn field_names<'n>(columns: impl IntoIterator<Item = &'n str>) -> Vec<String> {
    let mut taken = HashSet::from([INDEX_FIELD.to_ascii_uppercase()]);

    columns
        .into_iter()
        .map(|column| {
            let mut base: String = column
                .chars()
                .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '_' })
                .collect();
            if base.is_empty() {
                base.push_str("field");
            }

            let mut name = cut(&base, MAX_FIELD_NAME).to_string();
            let mut suffix = 0;
            while !taken.insert(name.to_ascii_uppercase()) {
                suffix += 1;
                let tail = format!("_{suffix}");
                name = format!("{}{tail}", cut(&base, MAX_FIELD_NAME - tail.len()));
            }
            name
        })
        .collect()
}

fn cut(value: &str, max: usize) -> &str {
    let mut end = value.len().min(max);
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

fn dbase_field(path: &Path, name: &str) -> Result<FieldName, RouteBatchError> {
    FieldName::try_from(name).map_err(|_| shapefile_error(path, format!("invalid field name {name:?}")))
}

pub(crate) fn truncate_value(value: &str) -> String {
    cut(value, MAX_CHARACTER_LENGTH).to_string()
}

/// Builds the attribute table layout field by field.
pub(crate) struct TableLayout<'a> {
    path: &'a Path,
    builder: TableWriterBuilder,
}

impl<'a> TableLayout<'a> {
    pub fn new(path: &'a Path) -> Result<Self, RouteBatchError> {
        let builder = TableWriterBuilder::new().add_numeric_field(dbase_field(path, INDEX_FIELD)?, 10, 0);
        Ok(Self { path, builder })
    }

    pub fn character(mut self, name: &str, values: impl Iterator<Item = usize>) -> Result<Self, RouteBatchError> {
        let width = values.max().unwrap_or(1).clamp(1, MAX_CHARACTER_LENGTH) as u8;
        self.builder = self.builder.add_character_field(dbase_field(self.path, name)?, width);
        Ok(self)
    }

    pub fn numeric(mut self, name: &str) -> Result<Self, RouteBatchError> {
        self.builder = self.builder.add_numeric_field(dbase_field(self.path, name)?, 20, 6);
        Ok(self)
    }

    pub fn build(self) -> TableWriterBuilder {
        self.builder
    }
}

/// Creates the parent directory and writes the `.prj` next to the `.shp`.
pub(crate) fn prepare_output(path: &Path) -> Result<(), RouteBatchError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| RouteBatchError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let prj = prj_path(path);
    std::fs::write(&prj, WGS84_PRJ).map_err(|source| RouteBatchError::Io { path: prj, source })
}

pub(crate) fn prj_path(path: &Path) -> PathBuf {
    path.with_extension("prj")
}
