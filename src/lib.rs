pub mod config;
pub mod logging;
pub mod results;
pub mod scope;
pub mod scoreboard;
pub mod table;
pub mod task;

pub use config::{LabelEncoding, Settings};
pub use results::{PredictionResult, ProblemType, Score, ScoringError};
pub use scope::{Scope, resolve_scope};
pub use scoreboard::{ScoreRow, Scoreboard};
pub use task::{ScoreRecord, TaskResult, score_from_predictions_path};
