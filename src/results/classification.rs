use crate::config::LabelEncoding;
use crate::results::metrics::{accuracy, log_loss, mean_squared_error, roc_auc};
use crate::results::{ProblemType, ScoringError, dispatch, parse_f64};
use crate::table::Table;

type ClassificationMetric = fn(&ClassificationResult) -> Result<f64, ScoringError>;

const METRICS: &[(&str, ClassificationMetric)] = &[
    ("acc", ClassificationResult::acc),
    ("logloss", ClassificationResult::logloss),
    ("mse", ClassificationResult::mse),
    ("rmse", ClassificationResult::rmse),
    ("auc", ClassificationResult::auc),
];

/// Probability columns (one per class) followed by `predictions` and `truth`.
///
/// Classes are kept in alphabetical order and the probability cells are
/// permuted to match, so class index `i` is always the `i`-th sorted label.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    classes: Vec<String>,
    probabilities: Vec<Vec<String>>,
    predictions: Vec<String>,
    truth: Vec<String>,
    encoding: LabelEncoding,
}

impl ClassificationResult {
    pub fn new(table: Table, encoding: LabelEncoding) -> Self {
        let n_cols = table.n_columns();
        let n_classes = n_cols.saturating_sub(2);

        let mut order = (0..n_classes).collect::<Vec<_>>();
        order.sort_by(|&a, &b| table.columns[a].cmp(&table.columns[b]));

        let classes = order.iter().map(|&i| table.columns[i].clone()).collect();
        let predictions = table
            .column(n_cols.saturating_sub(2))
            .into_iter()
            .map(str::to_string)
            .collect();
        let truth = table
            .column(n_cols.saturating_sub(1))
            .into_iter()
            .map(str::to_string)
            .collect();
        let probabilities = table
            .rows
            .iter()
            .map(|row| {
                order
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            classes,
            probabilities,
            predictions,
            truth,
            encoding,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_rows(&self) -> usize {
        self.truth.len()
    }

    pub fn problem_type(&self) -> ProblemType {
        if self.classes.len() == 2 {
            ProblemType::Binomial
        } else {
            ProblemType::Multinomial
        }
    }

    pub fn evaluate(&self, metric: &str) -> Result<f64, ScoringError> {
        if self.n_rows() == 0 {
            return Err(ScoringError::EmptyPredictions);
        }
        dispatch(METRICS, self, metric, self.problem_type())
    }

    pub fn encoded_truth(&self) -> Result<Vec<usize>, ScoringError> {
        self.encode(&self.truth)
    }

    pub fn encoded_predictions(&self) -> Result<Vec<usize>, ScoringError> {
        self.encode(&self.predictions)
    }

    pub fn probability_matrix(&self) -> Result<Vec<Vec<f64>>, ScoringError> {
        self.probabilities
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.classes.iter())
                    .map(|(value, class)| parse_f64(class, value))
                    .collect()
            })
            .collect()
    }

    fn acc(&self) -> Result<f64, ScoringError> {
        Ok(accuracy(
            &self.encoded_truth()?,
            &self.encoded_predictions()?,
        ))
    }

    fn logloss(&self) -> Result<f64, ScoringError> {
        Ok(log_loss(&self.encoded_truth()?, &self.probability_matrix()?))
    }

    fn mse(&self) -> Result<f64, ScoringError> {
        let truth = as_f64(&self.encoded_truth()?);
        let predictions = as_f64(&self.encoded_predictions()?);
        Ok(mean_squared_error(&truth, &predictions))
    }

    fn rmse(&self) -> Result<f64, ScoringError> {
        Ok(self.mse()?.sqrt())
    }

    fn auc(&self) -> Result<f64, ScoringError> {
        if self.problem_type() != ProblemType::Binomial {
            return Err(ScoringError::AucRequiresBinomial {
                classes: self.classes.clone(),
            });
        }
        let positive = self
            .encoded_truth()?
            .into_iter()
            .map(|idx| idx == 1)
            .collect::<Vec<_>>();
        let scores = self
            .probability_matrix()?
            .into_iter()
            .map(|row| row[1])
            .collect::<Vec<_>>();
        Ok(roc_auc(&positive, &scores))
    }

    fn encode(&self, labels: &[String]) -> Result<Vec<usize>, ScoringError> {
        let already_encoded = self.encoding == LabelEncoding::PreEncoded
            && labels.first().is_some_and(|v| is_index(v));
        labels
            .iter()
            .map(|label| {
                let idx = if already_encoded {
                    label.trim().parse::<usize>().ok()
                } else {
                    self.classes.iter().position(|c| c == label)
                };
                idx.filter(|&i| i < self.classes.len())
                    .ok_or_else(|| ScoringError::UnknownLabel {
                        label: label.clone(),
                        classes: self.classes.clone(),
                    })
            })
            .collect()
    }
}

fn is_index(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && v.chars().all(|c| c.is_ascii_digit())
}

fn as_f64(values: &[usize]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/classification.rs"]
mod tests;
