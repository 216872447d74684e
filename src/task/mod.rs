use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::Utc;

use crate::config::Settings;
use crate::results::{PredictionResult, Score, ScoringError, load_predictions};
use crate::table::TableError;

pub mod naming;
pub mod record;

pub use naming::PredictionsFileName;
pub use record::ScoreRecord;

type CacheKey = (String, u32, String);

/// Loaded predictions keyed by `(task, fold, framework)`.
///
/// Entries are never evicted or refreshed: a result stays as first loaded for
/// the lifetime of the owning [`TaskResult`], even if the file changes on disk.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RefCell<HashMap<CacheKey, Rc<PredictionResult>>>,
}

impl ResultCache {
    pub fn get(&self, key: &CacheKey) -> Option<Rc<PredictionResult>> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, result: Rc<PredictionResult>) {
        self.entries.borrow_mut().insert(key, result);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Scores the predictions of every framework for one (task, fold).
#[derive(Debug)]
pub struct TaskResult<'a> {
    task: String,
    fold: u32,
    predictions_dir: PathBuf,
    settings: &'a Settings,
    cache: ResultCache,
}

impl<'a> TaskResult<'a> {
    pub fn new(settings: &'a Settings, task: &str, fold: u32) -> Self {
        Self::with_predictions_dir(settings, task, fold, &settings.predictions_dir)
    }

    pub fn with_predictions_dir(
        settings: &'a Settings,
        task: &str,
        fold: u32,
        predictions_dir: &Path,
    ) -> Self {
        Self {
            task: task.to_string(),
            fold,
            predictions_dir: predictions_dir.to_path_buf(),
            settings,
            cache: ResultCache::default(),
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn fold(&self) -> u32 {
        self.fold
    }

    pub fn predictions_path(&self, framework: &str) -> PathBuf {
        self.predictions_dir
            .join(PredictionsFileName::format(framework, &self.task, self.fold))
    }

    pub fn load_result(&self, framework: &str) -> Result<Rc<PredictionResult>, TableError> {
        let key = (self.task.clone(), self.fold, framework.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let result = Rc::new(load_predictions(
            &self.predictions_path(framework),
            self.settings.label_encoding,
        )?);
        self.cache.insert(key, Rc::clone(&result));
        Ok(result)
    }

    /// Evaluates `metrics` for `framework`; `result` defaults to [`Self::load_result`].
    pub fn compute_scores(
        &self,
        framework: &str,
        metrics: &[&str],
        result: Option<&PredictionResult>,
    ) -> Result<ScoreRecord, ScoringError> {
        let Some((&primary, rest)) = metrics.split_first() else {
            return Err(ScoringError::EmptyMetrics);
        };
        let definition = self
            .settings
            .frameworks
            .definition(framework)
            .ok_or_else(|| ScoringError::UnknownFramework(framework.to_string()))?;

        let loaded;
        let result = match result {
            Some(r) => r,
            None => {
                loaded = self.load_result(framework)?;
                &*loaded
            }
        };

        let primary_score = result.evaluate(primary)?;
        let mut scores: Vec<(String, Score)> = Vec::with_capacity(metrics.len());
        scores.push((primary.to_string(), primary_score));
        for &metric in rest {
            if scores.iter().any(|(name, _)| name == metric) {
                continue;
            }
            scores.push((metric.to_string(), result.evaluate(metric)?));
        }

        let utc = Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        let record = ScoreRecord::new(
            framework,
            &self.task,
            self.fold,
            &self.settings.run_mode,
            &definition.version,
            &utc,
            primary_score,
            scores,
        );
        tracing::info!("metric scores: {:?}", record.entries());
        Ok(record)
    }

    pub fn cached_results(&self) -> usize {
        self.cache.len()
    }
}

/// Scores a predictions file named `{framework}_{task}_{fold}[_{datetime}].csv`
/// with the default metric list.
///
/// Returns `Ok(None)` when the file name does not follow that grammar.
pub fn score_from_predictions_path(
    settings: &Settings,
    path: &Path,
) -> Result<Option<ScoreRecord>, ScoringError> {
    let Some(name) = PredictionsFileName::parse(path) else {
        tracing::error!("{} predictions file name has wrong format", path.display());
        return Ok(None);
    };

    let result = load_predictions(path, settings.label_encoding)?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let task_result = TaskResult::with_predictions_dir(settings, &name.task, name.fold, dir);
    let record = task_result.compute_scores(&name.framework, result.metrics(), Some(&result))?;
    Ok(Some(record))
}

#[cfg(test)]
#[path = "../../tests/src_inline/task/tests.rs"]
mod tests;
