use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

// framework is lazy so that `fw_task_name_0.csv` keeps `task_name` together;
// the datetime suffix must be tried before `task` can swallow it.
static PREDICTIONS_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<framework>[A-Za-z0-9_-]+?)_(?P<task>[A-Za-z0-9_-]+)_(?P<fold>\d+)(?:_(?P<datetime>\d{8}T\d{6}))?\.csv$",
    )
    .unwrap_or_else(|e| panic!("invalid predictions file pattern: {e}"))
});

/// Parts of a `{framework}_{task}_{fold}[_{YYYYMMDDThhmmss}].csv` file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionsFileName {
    pub framework: String,
    pub task: String,
    pub fold: u32,
    pub datetime: Option<String>,
}

impl PredictionsFileName {
    pub fn parse(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let caps = PREDICTIONS_FILE.captures(name)?;
        Some(Self {
            framework: caps["framework"].to_string(),
            task: caps["task"].to_string(),
            fold: caps["fold"].parse().ok()?,
            datetime: caps.name("datetime").map(|m| m.as_str().to_string()),
        })
    }

    pub fn format(framework: &str, task: &str, fold: u32) -> String {
        format!("{}_{}_{}.csv", framework.to_lowercase(), task, fold)
    }
}
