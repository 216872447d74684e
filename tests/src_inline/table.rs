use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("amlb_table_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn sample_table() -> Table {
    Table {
        columns: vec!["a".to_string(), "b".to_string()],
        rows: vec![
            vec!["1".to_string(), "x".to_string()],
            vec!["2".to_string(), "y, z".to_string()],
        ],
    }
}

#[test]
fn test_write_create_then_read() {
    let dir = make_temp_dir();
    let path = dir.join("t.csv");
    write_table(&sample_table(), &path, WriteMode::Create).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("a,b\n"));

    let back = read_table(&path).unwrap();
    assert_eq!(back, sample_table());
}

#[test]
fn test_append_writes_no_header() {
    let dir = make_temp_dir();
    let path = dir.join("t.csv");
    write_table(&sample_table(), &path, WriteMode::Create).unwrap();
    write_table(&sample_table(), &path, WriteMode::Append).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.matches("a,b").count(), 1);

    let back = read_table(&path).unwrap();
    assert_eq!(back.n_rows(), 4);
    assert_eq!(back.column(0), vec!["1", "2", "1", "2"]);
}

#[test]
fn test_read_header_only() {
    let dir = make_temp_dir();
    let path = dir.join("t.csv");
    write_table(&sample_table(), &path, WriteMode::Create).unwrap();
    assert_eq!(read_header(&path).unwrap(), vec!["a", "b"]);
}

#[test]
fn test_write_creates_parent_dirs() {
    let dir = make_temp_dir();
    let path = dir.join("nested").join("deeper").join("t.csv");
    write_table(&sample_table(), &path, WriteMode::Create).unwrap();
    assert!(path.is_file());
}

#[test]
fn test_short_rows_read_as_empty_cells() {
    let dir = make_temp_dir();
    let path = dir.join("short.csv");
    fs::write(&path, "a,b,c\n1,2\n").unwrap();
    let table = read_table(&path).unwrap();
    assert_eq!(table.column(2), vec![""]);
    assert_eq!(table.column_index("b"), Some(1));
    assert_eq!(table.column_index("zz"), None);
}

#[test]
fn test_backup_missing_file_is_noop() {
    let dir = make_temp_dir();
    assert_eq!(backup_file(&dir.join("absent.csv")).unwrap(), None);
    assert!(!dir.join("backup").exists());
}

#[test]
fn test_backup_never_overwrites_previous_backup() {
    let dir = make_temp_dir();
    let path = dir.join("results.csv");

    fs::write(&path, "first\n").unwrap();
    let b1 = backup_file(&path).unwrap().unwrap();
    fs::write(&path, "second\n").unwrap();
    let b2 = backup_file(&path).unwrap().unwrap();

    assert_ne!(b1, b2);
    assert_eq!(b1.parent().unwrap(), dir.join("backup"));
    let name = b1.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("results_"));
    assert!(name.ends_with(".csv"));

    let contents = [
        fs::read_to_string(&b1).unwrap(),
        fs::read_to_string(&b2).unwrap(),
    ];
    assert!(contents.contains(&"first\n".to_string()));
    assert!(contents.contains(&"second\n".to_string()));
    assert!(path.is_file());
}
