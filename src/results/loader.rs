use std::path::Path;

use crate::config::LabelEncoding;
use crate::results::PredictionResult;
use crate::table::{TableError, read_table};

/// Reads a predictions artifact and picks the result variant from its shape.
///
/// A missing file is not an error: the framework failed or produced nothing,
/// and every metric of the returned `NoResult` is `NA`.
pub fn load_predictions(
    path: &Path,
    encoding: LabelEncoding,
) -> Result<PredictionResult, TableError> {
    tracing::info!("loading predictions from {}", path.display());
    if !path.is_file() {
        tracing::warn!(
            "predictions file {} is missing: framework either failed or could not produce any prediction",
            path.display()
        );
        return Ok(PredictionResult::NoResult);
    }

    let table = read_table(path)?;
    tracing::debug!(
        "predictions preview: columns={:?} rows={} head={:?}",
        table.columns,
        table.n_rows(),
        table.rows.iter().take(10).collect::<Vec<_>>()
    );
    Ok(PredictionResult::from_table(table, encoding))
}
