use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("amlb_results_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_no_result_is_na_for_every_metric() {
    let r = PredictionResult::NoResult;
    for metric in ["acc", "logloss", "mse", "rmse", "auc", "anything"] {
        assert_eq!(r.evaluate(metric).unwrap(), Score::Missing);
    }
    assert_eq!(r.problem_type(), None);
    assert_eq!(Score::Missing.to_string(), "NA");
}

#[test]
fn test_missing_file_loads_as_no_result() {
    let dir = make_temp_dir();
    let r = load_predictions(&dir.join("fw_task_0.csv"), LabelEncoding::Raw).unwrap();
    assert!(matches!(r, PredictionResult::NoResult));
}

#[test]
fn test_shape_decides_variant() {
    let dir = make_temp_dir();
    let cls = dir.join("cls.csv");
    fs::write(&cls, "a,b,predictions,truth\n0.4,0.6,b,b\n").unwrap();
    let reg = dir.join("reg.csv");
    fs::write(&reg, "predictions,truth\n1.5,2.0\n").unwrap();
    // malformed values still load; only shape is inspected
    let odd = dir.join("odd.csv");
    fs::write(&odd, "x,y,z\nfoo,bar,baz\n").unwrap();

    let cls = load_predictions(&cls, LabelEncoding::Raw).unwrap();
    assert_eq!(cls.problem_type(), Some(ProblemType::Binomial));
    let reg = load_predictions(&reg, LabelEncoding::Raw).unwrap();
    assert_eq!(reg.problem_type(), Some(ProblemType::Regression));
    let odd = load_predictions(&odd, LabelEncoding::Raw).unwrap();
    assert_eq!(odd.problem_type(), Some(ProblemType::Multinomial));
}

#[test]
fn test_end_to_end_binary_artifact() {
    let dir = make_temp_dir();
    let path = dir.join("fw_task_0.csv");
    fs::write(
        &path,
        "classA,classB,predictions,truth\n0.9,0.1,classA,classA\n0.2,0.8,classB,classA\n",
    )
    .unwrap();

    let r = load_predictions(&path, LabelEncoding::Raw).unwrap();
    assert_eq!(r.problem_type(), Some(ProblemType::Binomial));
    assert_eq!(r.evaluate("acc").unwrap(), Score::Value(0.5));
    let auc = r.evaluate("auc").unwrap().value().unwrap();
    assert!((0.0..=1.0).contains(&auc));
}

#[test]
fn test_score_display_and_json() {
    assert_eq!(Score::Value(0.25).to_string(), "0.25");
    assert_eq!(serde_json::to_string(&Score::Missing).unwrap(), "\"NA\"");
    assert_eq!(serde_json::to_string(&Score::Value(1.5)).unwrap(), "1.5");
    assert_eq!(Score::Value(2.0).value(), Some(2.0));
    assert!(Score::Missing.is_missing());
}

#[test]
fn test_default_metric_list() {
    assert_eq!(
        PredictionResult::NoResult.metrics(),
        &["acc", "logloss", "mse", "rmse", "auc"]
    );
}

#[test]
fn test_multinomial_metric_list_skips_auc() {
    let table = Table {
        columns: ["a", "b", "c", "predictions", "truth"].map(String::from).to_vec(),
        rows: vec![["0.8", "0.1", "0.1", "a", "a"].map(String::from).to_vec()],
    };
    let result = PredictionResult::from_table(table, LabelEncoding::Raw);
    assert_eq!(result.metrics(), &["acc", "logloss", "mse", "rmse"]);
    for metric in result.metrics() {
        assert!(result.evaluate(metric).is_ok(), "{metric}");
    }
}
