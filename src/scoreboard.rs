use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::scope::{Scope, resolve_scope};
use crate::table::{Table, TableError, WriteMode, backup_file, read_header, read_table, write_table};
use crate::task::ScoreRecord;

/// Leading scoreboard columns, in file order. Every other column follows, sorted.
pub const FIXED_COLUMNS: [&str; 7] = ["task", "framework", "fold", "result", "mode", "version", "utc"];

/// One scoreboard line as column -> cell text. Empty cells are not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRow(BTreeMap<String, String>);

impl ScoreRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn insert(&mut self, column: &str, value: &str) {
        if value.is_empty() {
            self.0.remove(column);
        } else {
            self.0.insert(column.to_string(), value.to_string());
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&ScoreRecord> for ScoreRow {
    fn from(record: &ScoreRecord) -> Self {
        record.entries().into_iter().collect()
    }
}

impl FromIterator<(String, String)> for ScoreRow {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut row = ScoreRow::new();
        for (column, value) in iter {
            row.insert(&column, &value);
        }
        row
    }
}

/// Score rows of one scope, backed by one csv file in `scores_dir`.
///
/// Appending returns a new board; nothing is deduplicated or sorted. Saving
/// assumes a single writer per scope: two processes overwriting the same file
/// can lose rows, so callers must serialize writers externally.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    scope: Scope,
    scores_dir: PathBuf,
    rows: Vec<ScoreRow>,
}

impl Scoreboard {
    pub fn load(scope: Scope, scores_dir: &Path) -> Result<Self, TableError> {
        let mut board = Self::from_rows(scope, scores_dir, Vec::new());
        board.rows = load_rows(&board.score_file())?;
        Ok(board)
    }

    /// The global board, `results.csv`.
    pub fn all(scores_dir: &Path) -> Result<Self, TableError> {
        Self::load(Scope::global(), scores_dir)
    }

    /// Loads the board a file name stands for; `None` if the name maps to no scope.
    ///
    /// A bare file name is looked up in `scores_dir`, any other path in its own
    /// parent directory.
    pub fn from_file(path: &Path, scores_dir: &Path) -> Result<Option<Self>, TableError> {
        let Some((_, scope)) = resolve_scope(path) else {
            return Ok(None);
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => scores_dir,
        };
        Self::load(scope, dir).map(Some)
    }

    pub fn from_rows(scope: Scope, scores_dir: &Path, rows: Vec<ScoreRow>) -> Self {
        Self {
            scope,
            scores_dir: scores_dir.to_path_buf(),
            rows,
        }
    }

    pub fn from_records(scope: Scope, scores_dir: &Path, records: &[ScoreRecord]) -> Self {
        Self::from_rows(scope, scores_dir, records.iter().map(ScoreRow::from).collect())
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scores_dir(&self) -> &Path {
        &self.scores_dir
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn score_file(&self) -> PathBuf {
        self.scores_dir.join(self.scope.file_name())
    }

    pub fn append_rows(&self, rows: &[ScoreRow]) -> Scoreboard {
        let mut merged = self.rows.clone();
        merged.extend_from_slice(rows);
        Self::from_rows(self.scope.clone(), &self.scores_dir, merged)
    }

    pub fn append_board(&self, other: &Scoreboard) -> Scoreboard {
        self.append_rows(&other.rows)
    }

    pub fn append_records(&self, records: &[ScoreRecord]) -> Scoreboard {
        let rows = records.iter().map(ScoreRow::from).collect::<Vec<_>>();
        self.append_rows(&rows)
    }

    /// Fixed columns, then every other column seen in any row, sorted.
    pub fn columns(&self) -> Vec<String> {
        if self.rows.is_empty() {
            return Vec::new();
        }
        let dynamic = self
            .rows
            .iter()
            .flat_map(|row| row.columns())
            .filter(|c| !FIXED_COLUMNS.contains(c))
            .collect::<BTreeSet<_>>();

        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(dynamic)
            .map(str::to_string)
            .collect()
    }

    pub fn to_table(&self) -> Table {
        self.project(self.columns())
    }

    /// Rows laid out under `columns`; cells of other columns are dropped.
    fn project(&self, columns: Vec<String>) -> Table {
        let mut table = Table::new(columns);
        for row in &self.rows {
            let cells = table
                .columns
                .iter()
                .map(|c| row.get(c).unwrap_or("").to_string())
                .collect();
            table.rows.push(cells);
        }
        table
    }

    /// Writes the board to its scope file and returns the path.
    ///
    /// With `append`, rows go after the existing content without a header,
    /// laid out under the header already in the file. If the rows carry a
    /// column that header lacks, the file is loaded, merged with these rows and
    /// rewritten instead. Without `append`, an existing file is backed up
    /// before being rewritten.
    pub fn save(&self, append: bool) -> Result<PathBuf, TableError> {
        let path = self.score_file();
        if !path.is_file() {
            return self.write(&path, self.to_table(), WriteMode::Create);
        }
        if append {
            let header = read_header(&path)?;
            let fits = self
                .rows
                .iter()
                .flat_map(|row| row.columns())
                .all(|c| header.iter().any(|h| h == c));
            if fits {
                return self.write(&path, self.project(header), WriteMode::Append);
            }
            tracing::info!(
                "scores in {} have new columns, rewriting the file",
                path.display()
            );
            let merged = Self::load(self.scope.clone(), &self.scores_dir)?.append_board(self);
            return merged.save(false);
        }
        backup_file(&path)?;
        self.write(&path, self.to_table(), WriteMode::Create)
    }

    fn write(&self, path: &Path, table: Table, mode: WriteMode) -> Result<PathBuf, TableError> {
        tracing::debug!("saving scores to {}", path.display());
        write_table(&table, path, mode)?;
        tracing::info!("scores saved to {} ({} rows)", path.display(), self.rows.len());
        Ok(path.to_path_buf())
    }
}

fn load_rows(path: &Path) -> Result<Vec<ScoreRow>, TableError> {
    tracing::debug!("loading scores from {}", path.display());
    if !path.is_file() {
        tracing::debug!("no scores at {}, starting empty", path.display());
        return Ok(Vec::new());
    }
    let table = read_table(path)?;
    let rows = table
        .rows
        .iter()
        .map(|cells| {
            table
                .columns
                .iter()
                .zip(cells.iter())
                .map(|(c, v)| (c.clone(), v.clone()))
                .collect()
        })
        .collect::<Vec<ScoreRow>>();
    tracing::info!("loaded scores from {} ({} rows)", path.display(), rows.len());
    Ok(rows)
}

#[cfg(test)]
#[path = "../tests/src_inline/scoreboard.rs"]
mod tests;
