use crate::results::metrics::{accuracy, binary_log_loss, mean_squared_error};
use crate::results::{ProblemType, ScoringError, dispatch, parse_f64};
use crate::table::Table;

type RegressionMetric = fn(&RegressionResult) -> Result<f64, ScoringError>;

// acc, logloss and auc are kept so every variant answers the same metric list.
// On continuous targets they carry no meaning: acc is exact float equality,
// logloss treats predictions as probabilities, auc is NaN.
const METRICS: &[(&str, RegressionMetric)] = &[
    ("acc", RegressionResult::acc),
    ("logloss", RegressionResult::logloss),
    ("mse", RegressionResult::mse),
    ("rmse", RegressionResult::rmse),
    ("auc", RegressionResult::auc),
];

#[derive(Debug, Clone)]
pub struct RegressionResult {
    columns: Vec<String>,
    predictions: Vec<String>,
    truth: Vec<String>,
}

impl RegressionResult {
    pub fn new(table: Table) -> Self {
        let n_cols = table.n_columns();
        let (predictions, truth) = if n_cols >= 2 {
            let owned = |idx: usize| {
                table
                    .column(idx)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            };
            (owned(n_cols - 2), owned(n_cols - 1))
        } else {
            (Vec::new(), Vec::new())
        };
        Self {
            columns: table.columns,
            predictions,
            truth,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.truth.len()
    }

    pub fn evaluate(&self, metric: &str) -> Result<f64, ScoringError> {
        if self.columns.len() < 2 {
            return Err(ScoringError::InvalidShape {
                n_columns: self.columns.len(),
            });
        }
        if self.n_rows() == 0 {
            return Err(ScoringError::EmptyPredictions);
        }
        dispatch(METRICS, self, metric, ProblemType::Regression)
    }

    pub fn truth_values(&self) -> Result<Vec<f64>, ScoringError> {
        self.parse_column(&self.truth, self.columns.len().saturating_sub(1))
    }

    pub fn prediction_values(&self) -> Result<Vec<f64>, ScoringError> {
        self.parse_column(&self.predictions, self.columns.len().saturating_sub(2))
    }

    fn parse_column(&self, values: &[String], idx: usize) -> Result<Vec<f64>, ScoringError> {
        let column = self.columns.get(idx).map(String::as_str).unwrap_or("");
        values.iter().map(|v| parse_f64(column, v)).collect()
    }

    fn acc(&self) -> Result<f64, ScoringError> {
        Ok(accuracy(&self.truth_values()?, &self.prediction_values()?))
    }

    fn logloss(&self) -> Result<f64, ScoringError> {
        Ok(binary_log_loss(
            &self.truth_values()?,
            &self.prediction_values()?,
        ))
    }

    fn mse(&self) -> Result<f64, ScoringError> {
        Ok(mean_squared_error(
            &self.truth_values()?,
            &self.prediction_values()?,
        ))
    }

    fn rmse(&self) -> Result<f64, ScoringError> {
        Ok(self.mse()?.sqrt())
    }

    fn auc(&self) -> Result<f64, ScoringError> {
        Ok(f64::NAN)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/regression.rs"]
mod tests;
