// tests/execute_api.rs
//
// Drives `testwatch::execute` end to end with `sh` standing in for `go`.

#![cfg(unix)]

mod common;
use crate::common::init_tracing;

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use testwatch::config::{Settings, load_and_validate};
use testwatch::errors::TestwatchError;
use testwatch::problems::{DirProblemService, ProblemService};
use testwatch::types::ExecOptions;

const FAILING_SCRIPT: &str = r#"echo "=== RUN   TestA"; echo "--- PASS: TestA (0.00s)"; echo "=== RUN   TestB"; echo "--- FAIL: TestB (0.00s)"; echo "    expected: 1"; echo "    actual: 2"; echo FAIL; exit 1"#;

const PASSING_SCRIPT: &str = r#"echo "--- PASS: TestA (0.00s)"; echo "--- PASS: TestB (0.00s)"; echo PASS"#;

/// A temp workspace with one problem and a config running `script` via `sh`.
fn workspace(script: &str) -> (TempDir, Settings) {
    let tmp = tempfile::tempdir().unwrap();
    let problem_dir = tmp.path().join("problems").join("two-sum");
    fs::create_dir_all(&problem_dir).unwrap();
    fs::write(problem_dir.join("solution.go"), "package twosum\n").unwrap();
    fs::write(problem_dir.join("solution_test.go"), "package twosum\n").unwrap();

    let config = format!(
        r#"
[runner]
command = "sh"
args = ['-c', '{script}', "sh"]
verbose_flag = ""
race_flag = ""

[problems]
root = '{root}'
"#,
        root = tmp.path().join("problems").display(),
    );
    let config_path = tmp.path().join("Testwatch.toml");
    fs::write(&config_path, config).unwrap();

    let settings = load_and_validate(&config_path).unwrap();
    (tmp, settings)
}

fn service(settings: &Settings) -> DirProblemService {
    DirProblemService::new(settings.problems.clone())
}

#[tokio::test]
async fn failing_suite_is_parsed_into_a_result() {
    init_tracing();
    let (_tmp, settings) = workspace(FAILING_SCRIPT);

    let result = testwatch::execute(
        "two-sum",
        &service(&settings),
        &settings,
        ExecOptions {
            verbose: true,
            race_detection: false,
        },
    )
    .await
    .unwrap();

    assert!(!result.all_passed);
    assert_eq!(result.exit_code, 1);
    assert_eq!((result.passed_count, result.total_count), (1, 2));
    assert_eq!(result.failed_tests.len(), 1);
    assert_eq!(result.failed_tests[0].name, "TestB");
    assert_eq!(result.failed_tests[0].expected, "1");
    assert_eq!(result.failed_tests[0].actual, "2");
    assert!(result.verbose);
    assert!(result.raw_output.contains("--- FAIL: TestB"));
}

#[tokio::test]
async fn passing_suite_is_all_passed() {
    init_tracing();
    let (_tmp, settings) = workspace(PASSING_SCRIPT);

    let result = testwatch::execute("two-sum", &service(&settings), &settings, ExecOptions::default())
        .await
        .unwrap();

    assert!(result.all_passed);
    assert_eq!((result.passed_count, result.total_count), (2, 2));
    assert!(result.failed_tests.is_empty());
}

#[tokio::test]
async fn unknown_problem_is_not_found() {
    init_tracing();
    let (_tmp, settings) = workspace(PASSING_SCRIPT);

    let err = testwatch::execute("three-sum", &service(&settings), &settings, ExecOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, TestwatchError::ProblemNotFound(id) if id == "three-sum"));
}

#[tokio::test]
async fn missing_runner_binary_is_a_spawn_error() {
    init_tracing();
    let (_tmp, mut settings) = workspace(PASSING_SCRIPT);
    settings.runner.command = "testwatch-no-such-runner".to_string();

    let err = testwatch::execute("two-sum", &service(&settings), &settings, ExecOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, TestwatchError::Spawn { .. }));
}

#[test]
fn recorded_success_is_persisted_under_the_problems_root() {
    init_tracing();
    let (tmp, settings) = workspace(PASSING_SCRIPT);
    let service = service(&settings);
    let result = testwatch::exec::parser::parse("--- PASS: TestA (0.00s)\n", 0);

    service.record_success("two-sum", &result).unwrap();

    let record = service.last_success("two-sum").unwrap().unwrap();
    assert_eq!((record.passed_count, record.total_count), (1, 1));
    assert!(progress_file(tmp.path()).is_file());
}

fn progress_file(root: &Path) -> std::path::PathBuf {
    root.join("problems").join(testwatch::problems::PROGRESS_FILE_PATH)
}
