// src/types.rs

//! Result types shared by the executor, the watch loop and reporters.

/// Flags for a single test execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Ask the test runner for per-test output (`-v`).
    ///
    /// `go test` only prints `--- PASS:` lines in verbose mode, so without
    /// this flag a passing suite reports `0/0` and only failures are counted.
    pub verbose: bool,
    /// Enable the runner's extra safety-checking mode (`-race`).
    pub race_detection: bool,
}

/// One failing test case recovered from runner output.
///
/// Only `name` is guaranteed; the other fields are empty when the output did
/// not carry them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FailedTest {
    pub name: String,
    pub expected: String,
    pub actual: String,
    pub message: String,
}

impl FailedTest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Outcome of one execution of a problem's test suite.
///
/// `all_passed` always mirrors the process exit status; the counts are
/// recovered from output markers and are advisory. Passing tests are only
/// counted when the run was verbose (see [`ExecOptions::verbose`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub all_passed: bool,
    pub passed_count: usize,
    pub total_count: usize,
    pub failed_tests: Vec<FailedTest>,
    pub raw_output: String,
    pub exit_code: i32,
    pub verbose: bool,
    pub race_detection: bool,
}

impl TestResult {
    /// Attach the flags the run was made with.
    pub fn with_options(mut self, options: ExecOptions) -> Self {
        self.verbose = options.verbose;
        self.race_detection = options.race_detection;
        self
    }
}

/// How a new result relates to the previous one in a watch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FirstRun,
    FailToPass,
    PassToFail,
    NoChange,
}
