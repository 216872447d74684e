use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::LabelEncoding;
use crate::table::{Table, TableError};

pub mod classification;
pub mod loader;
pub mod metrics;
pub mod regression;
pub mod writer;

pub use classification::ClassificationResult;
pub use loader::load_predictions;
pub use regression::RegressionResult;
pub use writer::{PredictionsOutput, save_predictions};

/// Metrics scored when the caller does not ask for a specific list.
pub const DEFAULT_METRICS: &[&str] = &["acc", "logloss", "mse", "rmse", "auc"];

/// `auc` is left out: it is only defined for two classes.
pub const MULTINOMIAL_METRICS: &[&str] = &["acc", "logloss", "mse", "rmse"];

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("metric {metric} is not supported for {problem_type}")]
    UnsupportedMetric {
        metric: String,
        problem_type: ProblemType,
    },
    #[error("AUC metric is only supported for binary classification: {classes:?}")]
    AucRequiresBinomial { classes: Vec<String> },
    #[error("label {label:?} is not one of the predicted classes {classes:?}")]
    UnknownLabel { label: String, classes: Vec<String> },
    #[error("invalid value {value:?} in column {column:?}")]
    InvalidValue { column: String, value: String },
    #[error("predictions artifact has {n_columns} column(s); at least 2 are required")]
    InvalidShape { n_columns: usize },
    #[error("predictions artifact has no rows")]
    EmptyPredictions,
    #[error("at least one metric must be requested")]
    EmptyMetrics,
    #[error("unknown framework: {0}")]
    UnknownFramework(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemType {
    Binomial,
    Multinomial,
    Regression,
}

impl ProblemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemType::Binomial => "binomial",
            ProblemType::Multinomial => "multinomial",
            ProblemType::Regression => "regression",
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric value, or `NA` when the framework produced no predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score {
    Value(f64),
    Missing,
}

impl Score {
    pub const MISSING: &'static str = "NA";

    pub fn value(self) -> Option<f64> {
        match self {
            Score::Value(v) => Some(v),
            Score::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Score::Missing)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Value(v) => write!(f, "{v}"),
            Score::Missing => f.write_str(Self::MISSING),
        }
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Score::Value(v) => serializer.serialize_f64(*v),
            Score::Missing => serializer.serialize_str(Self::MISSING),
        }
    }
}

/// A loaded predictions artifact, tagged by the problem type inferred from its shape.
#[derive(Debug, Clone)]
pub enum PredictionResult {
    /// The artifact was missing: every metric evaluates to `NA`.
    NoResult,
    Classification(ClassificationResult),
    Regression(RegressionResult),
}

impl PredictionResult {
    /// More than two columns means probability columns are present.
    pub fn from_table(table: Table, encoding: LabelEncoding) -> Self {
        if table.n_columns() > 2 {
            PredictionResult::Classification(ClassificationResult::new(table, encoding))
        } else {
            PredictionResult::Regression(RegressionResult::new(table))
        }
    }

    pub fn problem_type(&self) -> Option<ProblemType> {
        match self {
            PredictionResult::NoResult => None,
            PredictionResult::Classification(r) => Some(r.problem_type()),
            PredictionResult::Regression(_) => Some(ProblemType::Regression),
        }
    }

    /// Metrics scored for this result when none are requested explicitly.
    pub fn metrics(&self) -> &'static [&'static str] {
        match self.problem_type() {
            Some(ProblemType::Multinomial) => MULTINOMIAL_METRICS,
            _ => DEFAULT_METRICS,
        }
    }

    pub fn evaluate(&self, metric: &str) -> Result<Score, ScoringError> {
        match self {
            PredictionResult::NoResult => Ok(Score::Missing),
            PredictionResult::Classification(r) => r.evaluate(metric).map(Score::Value),
            PredictionResult::Regression(r) => r.evaluate(metric).map(Score::Value),
        }
    }
}

/// Looks `metric` up in a variant's table and runs it.
pub(crate) fn dispatch<T>(
    table: &[(&str, fn(&T) -> Result<f64, ScoringError>)],
    result: &T,
    metric: &str,
    problem_type: ProblemType,
) -> Result<f64, ScoringError> {
    match table.iter().find(|(name, _)| *name == metric) {
        Some((_, f)) => f(result),
        None => Err(ScoringError::UnsupportedMetric {
            metric: metric.to_string(),
            problem_type,
        }),
    }
}

pub(crate) fn parse_f64(column: &str, value: &str) -> Result<f64, ScoringError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ScoringError::InvalidValue {
            column: column.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/results/mod.rs"]
mod tests;
