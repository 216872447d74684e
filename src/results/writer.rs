use std::path::Path;

use crate::table::{Table, TableError, WriteMode, backup_file, write_table};

pub const PREDICTIONS_COLUMN: &str = "predictions";
pub const TRUTH_COLUMN: &str = "truth";

/// Framework output ready to be written as a predictions artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionsOutput {
    Classification {
        classes: Vec<String>,
        /// One row per sample, one probability per entry of `classes`.
        probabilities: Vec<Vec<f64>>,
        predictions: Vec<String>,
        truth: Vec<String>,
    },
    Regression {
        predictions: Vec<f64>,
        truth: Vec<f64>,
    },
}

impl PredictionsOutput {
    /// Probability columns sorted by class label, then `predictions`, `truth`.
    pub fn to_table(&self) -> Result<Table, TableError> {
        match self {
            PredictionsOutput::Classification {
                classes,
                probabilities,
                predictions,
                truth,
            } => {
                let n = truth.len();
                if predictions.len() != n || probabilities.len() != n {
                    return Err(TableError::Shape(format!(
                        "{} probability rows, {} predictions, {} truth values",
                        probabilities.len(),
                        predictions.len(),
                        n
                    )));
                }
                if let Some(row) = probabilities.iter().find(|r| r.len() != classes.len()) {
                    return Err(TableError::Shape(format!(
                        "probability row has {} values for {} classes",
                        row.len(),
                        classes.len()
                    )));
                }

                let mut order = (0..classes.len()).collect::<Vec<_>>();
                order.sort_by(|&a, &b| classes[a].cmp(&classes[b]));

                let mut columns = order.iter().map(|&i| classes[i].clone()).collect::<Vec<_>>();
                columns.push(PREDICTIONS_COLUMN.to_string());
                columns.push(TRUTH_COLUMN.to_string());

                let mut table = Table::new(columns);
                for ((probs, pred), t) in probabilities.iter().zip(predictions).zip(truth) {
                    let mut row = order
                        .iter()
                        .map(|&i| probs[i].to_string())
                        .collect::<Vec<_>>();
                    row.push(pred.clone());
                    row.push(t.clone());
                    table.rows.push(row);
                }
                Ok(table)
            }
            PredictionsOutput::Regression { predictions, truth } => {
                if predictions.len() != truth.len() {
                    return Err(TableError::Shape(format!(
                        "{} predictions, {} truth values",
                        predictions.len(),
                        truth.len()
                    )));
                }
                let mut table =
                    Table::new(vec![PREDICTIONS_COLUMN.to_string(), TRUTH_COLUMN.to_string()]);
                for (p, t) in predictions.iter().zip(truth) {
                    table.rows.push(vec![p.to_string(), t.to_string()]);
                }
                Ok(table)
            }
        }
    }
}

/// Writes a predictions artifact, backing up any file already at `path`.
pub fn save_predictions(path: &Path, output: &PredictionsOutput) -> Result<(), TableError> {
    let table = output.to_table()?;
    tracing::debug!("saving predictions to {}", path.display());
    backup_file(path)?;
    write_table(&table, path, WriteMode::Create)?;
    tracing::info!("predictions saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/writer.rs"]
mod tests;
