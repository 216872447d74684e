use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("shape mismatch: {0}")]
    Shape(String),
}

/// Header plus string cells, as read from or written to a CSV file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `idx`, top to bottom. Short rows yield empty cells.
    pub fn column(&self, idx: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate (or create) and write the header first.
    Create,
    /// Append rows after existing content, no header.
    Append,
}

pub fn read_table(path: &Path) -> Result<Table, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(Table { columns, rows })
}

/// Header row only; the rest of the file is not parsed.
pub fn read_header(path: &Path) -> Result<Vec<String>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(reader.headers()?.iter().map(|s| s.to_string()).collect())
}

pub fn write_table(table: &Table, path: &Path, mode: WriteMode) -> Result<(), TableError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = match mode {
        WriteMode::Create => File::create(path)?,
        WriteMode::Append => OpenOptions::new().create(true).append(true).open(path)?,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    if mode == WriteMode::Create && !table.columns.is_empty() {
        writer.write_record(&table.columns)?;
    }
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Copies an existing file to `<dir>/backup/<stem>_<mtime><.ext>` and returns the copy's path.
/// A backup is never overwritten: a numeric suffix is added when the name is taken.
pub fn backup_file(path: &Path) -> Result<Option<PathBuf>, TableError> {
    if !path.is_file() {
        return Ok(None);
    }

    let modified: DateTime<Utc> = fs::metadata(path)?.modified()?.into();
    let stamp = modified.format("%Y%m%dT%H%M%S").to_string();

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let backup_dir = dir.join("backup");
    fs::create_dir_all(&backup_dir)?;

    let mut dest = backup_dir.join(format!("{stem}_{stamp}{ext}"));
    let mut n = 1usize;
    while dest.exists() {
        dest = backup_dir.join(format!("{stem}_{stamp}_{n}{ext}"));
        n += 1;
    }

    fs::copy(path, &dest)?;
    tracing::debug!("backed up {} to {}", path.display(), dest.display());
    Ok(Some(dest))
}

#[cfg(test)]
#[path = "../tests/src_inline/table.rs"]
mod tests;
