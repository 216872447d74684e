use super::*;

fn resolve(name: &str) -> Option<(ScopePattern, Scope)> {
    resolve_scope(Path::new(name))
}

#[test]
fn test_pattern_priority_order() {
    assert_eq!(
        SCOPE_PATTERNS,
        [
            ScopePattern::Global,
            ScopePattern::FrameworkBenchmark,
            ScopePattern::Benchmark,
            ScopePattern::FrameworkTask,
            ScopePattern::Task,
            ScopePattern::Framework,
        ]
    );
}

#[test]
fn test_results_csv_is_global() {
    let (pattern, scope) = resolve("results.csv").unwrap();
    assert_eq!(pattern, ScopePattern::Global);
    assert!(scope.is_global());
}

#[test]
fn test_framework_benchmark() {
    let (pattern, scope) = resolve("fooFW_benchmark_small.csv").unwrap();
    assert_eq!(pattern, ScopePattern::FrameworkBenchmark);
    assert_eq!(scope, Scope::framework("fooFW").with_benchmark("small"));
    assert_eq!(scope.task, None);
}

#[test]
fn test_benchmark_only() {
    let (pattern, scope) = resolve("benchmark_test-1.csv").unwrap();
    assert_eq!(pattern, ScopePattern::Benchmark);
    assert_eq!(scope, Scope::global().with_benchmark("test-1"));
}

#[test]
fn test_framework_task_and_task_only() {
    let (pattern, scope) = resolve("RandomForest_task_iris.csv").unwrap();
    assert_eq!(pattern, ScopePattern::FrameworkTask);
    assert_eq!(scope, Scope::framework("RandomForest").with_task("iris"));

    let (pattern, scope) = resolve("task_iris.csv").unwrap();
    assert_eq!(pattern, ScopePattern::Task);
    assert_eq!(scope, Scope::global().with_task("iris"));
}

#[test]
fn test_framework_is_last_resort() {
    let (pattern, scope) = resolve("my_results.csv").unwrap();
    assert_eq!(pattern, ScopePattern::Framework);
    assert_eq!(scope, Scope::framework("my_results"));
}

#[test]
fn test_first_match_wins_over_later_patterns() {
    // also a valid `{framework}.csv` and `{framework}_task_{task}.csv` name
    let (pattern, scope) = resolve("a_benchmark_b_task_c.csv").unwrap();
    assert_eq!(pattern, ScopePattern::FrameworkBenchmark);
    assert_eq!(scope.framework.as_deref(), Some("a"));
    assert_eq!(scope.benchmark.as_deref(), Some("b_task_c"));
}

#[test]
fn test_directory_is_ignored() {
    let (_, scope) = resolve_scope(Path::new("/data/scores/fooFW.csv")).unwrap();
    assert_eq!(scope, Scope::framework("fooFW"));
}

#[test]
fn test_unrecognized_names() {
    assert!(resolve("results.tsv").is_none());
    assert!(resolve("foo.bar.csv").is_none());
    assert!(resolve("with space.csv").is_none());
    assert!(resolve(".csv").is_none());
}

#[test]
fn test_file_name_inverts_resolution() {
    let scopes = [
        Scope::global(),
        Scope::framework("fw"),
        Scope::framework("fw").with_benchmark("small"),
        Scope::framework("fw").with_task("iris"),
        Scope::global().with_benchmark("small"),
        Scope::global().with_task("iris"),
    ];
    for scope in scopes {
        let name = scope.file_name();
        let (_, back) = resolve(&name).unwrap();
        assert_eq!(back, scope, "{name}");
    }
}

#[test]
fn test_task_takes_precedence_in_file_name() {
    let scope = Scope::framework("fw").with_benchmark("b").with_task("t");
    assert_eq!(scope.file_name(), "fw_task_t.csv");
    assert_eq!(
        Scope::global().with_benchmark("b").with_task("t").file_name(),
        "task_t.csv"
    );
}
