use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

pub const RESULTS_FILE: &str = "results.csv";

/// Which scoreboard a record belongs to. All-absent is the global board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    pub framework: Option<String>,
    pub benchmark: Option<String>,
    pub task: Option<String>,
}

impl Scope {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn framework(name: &str) -> Self {
        Self {
            framework: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_benchmark(mut self, name: &str) -> Self {
        self.benchmark = Some(name.to_string());
        self
    }

    pub fn with_task(mut self, name: &str) -> Self {
        self.task = Some(name.to_string());
        self
    }

    pub fn is_global(&self) -> bool {
        self.framework.is_none() && self.benchmark.is_none() && self.task.is_none()
    }

    /// Scoreboard file name for this scope. Task wins over benchmark.
    pub fn file_name(&self) -> String {
        match (&self.framework, &self.benchmark, &self.task) {
            (Some(fw), _, Some(task)) => format!("{fw}_task_{task}.csv"),
            (Some(fw), Some(bench), None) => format!("{fw}_benchmark_{bench}.csv"),
            (Some(fw), None, None) => format!("{fw}.csv"),
            (None, _, Some(task)) => format!("task_{task}.csv"),
            (None, Some(bench), None) => format!("benchmark_{bench}.csv"),
            (None, None, None) => RESULTS_FILE.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |v: &Option<String>| v.as_deref().unwrap_or("-").to_string();
        write!(
            f,
            "framework={} benchmark={} task={}",
            part(&self.framework),
            part(&self.benchmark),
            part(&self.task)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePattern {
    Global,
    FrameworkBenchmark,
    Benchmark,
    FrameworkTask,
    Task,
    Framework,
}

/// Most specific first. `Framework` matches almost any csv name, so it must stay last.
pub const SCOPE_PATTERNS: [ScopePattern; 6] = [
    ScopePattern::Global,
    ScopePattern::FrameworkBenchmark,
    ScopePattern::Benchmark,
    ScopePattern::FrameworkTask,
    ScopePattern::Task,
    ScopePattern::Framework,
];

const ID: &str = "[A-Za-z0-9_-]+";

static COMPILED: LazyLock<Vec<(ScopePattern, Regex)>> = LazyLock::new(|| {
    SCOPE_PATTERNS
        .iter()
        .map(|&p| {
            let re = Regex::new(&p.regex_source())
                .unwrap_or_else(|e| panic!("invalid scope pattern {p:?}: {e}"));
            (p, re)
        })
        .collect()
});

impl ScopePattern {
    pub fn name(self) -> &'static str {
        match self {
            ScopePattern::Global => "global",
            ScopePattern::FrameworkBenchmark => "framework_benchmark",
            ScopePattern::Benchmark => "benchmark",
            ScopePattern::FrameworkTask => "framework_task",
            ScopePattern::Task => "task",
            ScopePattern::Framework => "framework",
        }
    }

    fn regex_source(self) -> String {
        match self {
            ScopePattern::Global => format!("^{}$", regex::escape(RESULTS_FILE)),
            ScopePattern::FrameworkBenchmark => {
                format!(r"^(?P<framework>{ID})_benchmark_(?P<benchmark>{ID})\.csv$")
            }
            ScopePattern::Benchmark => format!(r"^benchmark_(?P<benchmark>{ID})\.csv$"),
            ScopePattern::FrameworkTask => {
                format!(r"^(?P<framework>{ID})_task_(?P<task>{ID})\.csv$")
            }
            ScopePattern::Task => format!(r"^task_(?P<task>{ID})\.csv$"),
            ScopePattern::Framework => format!(r"^(?P<framework>{ID})\.csv$"),
        }
    }

    /// Applies this single pattern to a bare file name.
    pub fn matches(self, file_name: &str) -> Option<Scope> {
        let (_, re) = COMPILED.iter().find(|(p, _)| *p == self)?;
        let caps = re.captures(file_name)?;
        let group = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Some(Scope {
            framework: group("framework"),
            benchmark: group("benchmark"),
            task: group("task"),
        })
    }
}

/// Resolves the scope of a scoreboard file from its name, first pattern wins.
pub fn resolve_scope(path: &Path) -> Option<(ScopePattern, Scope)> {
    let file_name = path.file_name()?.to_str()?;
    SCOPE_PATTERNS
        .iter()
        .find_map(|&p| p.matches(file_name).map(|scope| (p, scope)))
}

#[cfg(test)]
#[path = "../tests/src_inline/scope.rs"]
mod tests;
