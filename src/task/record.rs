use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::results::Score;

/// Scores of one framework on one (task, fold).
///
/// `result` holds the score of the first requested metric. Built once by
/// [`TaskResult::compute_scores`](crate::task::TaskResult::compute_scores).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    framework: String,
    task: String,
    fold: u32,
    result: Score,
    mode: String,
    version: String,
    utc: String,
    metrics: Vec<(String, Score)>,
}

impl ScoreRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        framework: &str,
        task: &str,
        fold: u32,
        mode: &str,
        version: &str,
        utc: &str,
        result: Score,
        metrics: Vec<(String, Score)>,
    ) -> Self {
        Self {
            framework: framework.to_string(),
            task: task.to_string(),
            fold,
            result,
            mode: mode.to_string(),
            version: version.to_string(),
            utc: utc.to_string(),
            metrics,
        }
    }

    pub fn framework(&self) -> &str {
        &self.framework
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn fold(&self) -> u32 {
        self.fold
    }

    pub fn result(&self) -> Score {
        self.result
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn utc(&self) -> &str {
        &self.utc
    }

    /// Metric values in request order.
    pub fn metrics(&self) -> &[(String, Score)] {
        &self.metrics
    }

    pub fn metric(&self, name: &str) -> Option<Score> {
        self.metrics
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, score)| *score)
    }

    /// Cell text for a column: fixed keys first, then metrics.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "framework" => Some(self.framework.clone()),
            "task" => Some(self.task.clone()),
            "fold" => Some(self.fold.to_string()),
            "result" => Some(self.result.to_string()),
            "mode" => Some(self.mode.clone()),
            "version" => Some(self.version.clone()),
            "utc" => Some(self.utc.clone()),
            _ => self.metric(key).map(|s| s.to_string()),
        }
    }

    /// `(column, cell)` pairs in record order: fixed keys, then metrics.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out = vec![
            ("framework".to_string(), self.framework.clone()),
            ("task".to_string(), self.task.clone()),
            ("fold".to_string(), self.fold.to_string()),
            ("result".to_string(), self.result.to_string()),
            ("mode".to_string(), self.mode.clone()),
            ("version".to_string(), self.version.clone()),
            ("utc".to_string(), self.utc.clone()),
        ];
        for (name, score) in &self.metrics {
            out.push((name.clone(), score.to_string()));
        }
        out
    }
}

impl Serialize for ScoreRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(7 + self.metrics.len()))?;
        map.serialize_entry("framework", &self.framework)?;
        map.serialize_entry("task", &self.task)?;
        map.serialize_entry("fold", &self.fold)?;
        map.serialize_entry("result", &self.result)?;
        map.serialize_entry("mode", &self.mode)?;
        map.serialize_entry("version", &self.version)?;
        map.serialize_entry("utc", &self.utc)?;
        for (name, score) in &self.metrics {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}
