use std::path::Path;

use serde::Serialize;

use crate::{fetcher::PairFailure, RouteBatchError};

#[derive(Serialize)]
struct FailureRow<'a> {
    origin_id: &'a str,
    destination_id: &'a str,
    reason: String,
}

/// Writes one line per failed pair with the reason it failed.
pub fn write_failures(failures: &[PairFailure], export: &Path) -> Result<(), RouteBatchError> {
    let csv_error = |source| RouteBatchError::Csv {
        path: export.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(export).map_err(csv_error)?;
    for failure in failures {
        writer
            .serialize(FailureRow {
                origin_id: &failure.origin_id,
                destination_id: &failure.destination_id,
                reason: failure.reason.to_string(),
            })
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| RouteBatchError::Io {
        path: export.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote {} failed pairs to {}", failures.len(), export.display());
    Ok(())
}
