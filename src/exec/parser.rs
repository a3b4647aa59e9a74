// src/exec/parser.rs

//! Line-oriented parser for `go test` output.
//!
//! The parser is a two-state machine:
//!
//! - `Scanning`: counting `--- PASS:` / `--- FAIL:` markers.
//! - `InFailureBlock`: a `--- FAIL:` line opened a record; assertion lines
//!   (`expected:`, `actual:`, `Error:`) are attributed to it until the next
//!   `--- FAIL:` or `=== RUN` line.
//!
//! Parsing never fails. Failing output with no per-test markers is a
//! compilation failure when it carries both a package failure line and a
//! compiler diagnostic, and an unknown failure otherwise.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::types::{FailedTest, TestResult};

static PASS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*--- PASS: (\S+)").expect("valid PASS regex"));
static FAIL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*--- FAIL: (\S+)").expect("valid FAIL regex"));
static RUN_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*=== RUN\s").expect("valid RUN regex"));

/// Compiler diagnostics for a syntax or unresolved-reference error.
const COMPILER_MARKERS: &[&str] = &["syntax error", "undefined:"];

/// Suffix `go test` puts on the package `FAIL` line when the build broke.
const BUILD_FAILED_MARKER: &str = "[build failed]";

pub const COMPILATION_FAILURE: &str = "Compilation";
pub const UNKNOWN_FAILURE: &str = "Unknown";

#[derive(Debug)]
enum ParseState {
    Scanning,
    InFailureBlock(FailedTest),
}

#[derive(Debug, Clone, Copy)]
enum AssertionField {
    Expected,
    Actual,
    Message,
}

/// Counters accumulated over one pass.
#[derive(Debug, Default)]
struct Tally {
    passed: usize,
    failed: Vec<FailedTest>,
}

/// Parse combined runner output into a [`TestResult`].
///
/// `all_passed` is taken from `exit_code` alone; the counts come from the
/// markers found in `raw_output`.
pub fn parse(raw_output: &str, exit_code: i32) -> TestResult {
    let mut tally = Tally::default();
    let mut state = ParseState::Scanning;

    for line in raw_output.lines() {
        state = step(state, line, &mut tally);
    }
    close_block(state, &mut tally);

    let mut passed_count = tally.passed;
    let mut total_count = tally.passed + tally.failed.len();
    let mut failed_tests = tally.failed;

    if total_count == 0 && exit_code != 0 {
        let synthetic = classify_markerless_failure(raw_output);
        debug!(
            exit_code,
            kind = %synthetic.name,
            "no per-test markers in failing output; synthesizing failure"
        );
        failed_tests = vec![synthetic];
        passed_count = 0;
        total_count = 1;
    }

    TestResult {
        all_passed: exit_code == 0,
        passed_count,
        total_count,
        failed_tests,
        raw_output: raw_output.to_string(),
        exit_code,
        verbose: false,
        race_detection: false,
    }
}

fn step(state: ParseState, line: &str, tally: &mut Tally) -> ParseState {
    if let Some(name) = capture_name(&FAIL_LINE, line) {
        close_block(state, tally);
        return ParseState::InFailureBlock(FailedTest::named(name));
    }

    if PASS_LINE.is_match(line) {
        tally.passed += 1;
        return state;
    }

    if RUN_LINE.is_match(line) {
        close_block(state, tally);
        return ParseState::Scanning;
    }

    match state {
        ParseState::InFailureBlock(mut test) => {
            if let Some((field, value)) = assertion_field(line) {
                fill_field(&mut test, field, value);
            }
            ParseState::InFailureBlock(test)
        }
        ParseState::Scanning => ParseState::Scanning,
    }
}

fn close_block(state: ParseState, tally: &mut Tally) {
    if let ParseState::InFailureBlock(test) = state {
        tally.failed.push(test);
    }
}

fn capture_name(re: &Regex, line: &str) -> Option<String> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Split an assertion line on its first colon and recognise the key.
///
/// testify pads keys (`actual  : 3`) and ends the error line with a colon
/// (`Error: Not equal:`); both are normalised away.
fn assertion_field(line: &str) -> Option<(AssertionField, &str)> {
    let (key, value) = line.split_once(':')?;
    let field = match key.trim().to_ascii_lowercase().as_str() {
        "expected" => AssertionField::Expected,
        "actual" => AssertionField::Actual,
        "error" => AssertionField::Message,
        _ => return None,
    };
    let value = value.trim();
    let value = value.strip_suffix(':').unwrap_or(value).trim_end();
    Some((field, value))
}

fn fill_field(test: &mut FailedTest, field: AssertionField, value: &str) {
    let slot = match field {
        AssertionField::Expected => &mut test.expected,
        AssertionField::Actual => &mut test.actual,
        AssertionField::Message => &mut test.message,
    };
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

fn classify_markerless_failure(raw_output: &str) -> FailedTest {
    let diagnostic = raw_output
        .lines()
        .find(|line| COMPILER_MARKERS.iter().any(|marker| line.contains(marker)));
    let package_failed = raw_output.lines().any(is_package_failure_line);

    match diagnostic {
        Some(line) if package_failed => FailedTest {
            message: line.trim().to_string(),
            ..FailedTest::named(COMPILATION_FAILURE)
        },
        _ => FailedTest::named(UNKNOWN_FAILURE),
    }
}

/// `FAIL` or `FAIL\t<pkg> ...` as printed per package, or a `[build failed]`
/// note anywhere on the line.
fn is_package_failure_line(line: &str) -> bool {
    let line = line.trim();
    line.contains(BUILD_FAILED_MARKER)
        || line == "FAIL"
        || line
            .strip_prefix("FAIL")
            .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_passes_and_clean_exit() {
        let raw = "=== RUN   TestA\n--- PASS: TestA (0.00s)\n=== RUN   TestB\n--- PASS: TestB (0.00s)\nPASS\nok  \tproblems/two-sum\t0.002s\n";
        let result = parse(raw, 0);

        assert!(result.all_passed);
        assert_eq!(result.passed_count, 2);
        assert_eq!(result.total_count, 2);
        assert!(result.failed_tests.is_empty());
        assert_eq!(result.raw_output, raw);
    }

    #[test]
    fn failure_block_collects_assertion_fields() {
        let raw = "--- PASS: TestA (0.00s)\n--- FAIL: TestX (0.00s)\n    Error: Not equal\n    expected: 5\n    actual: 3\nFAIL\n";
        let result = parse(raw, 1);

        assert!(!result.all_passed);
        assert_eq!(result.passed_count, 1);
        assert_eq!(result.total_count, 2);
        assert_eq!(
            result.failed_tests,
            vec![FailedTest {
                name: "TestX".into(),
                expected: "5".into(),
                actual: "3".into(),
                message: "Not equal".into(),
            }]
        );
    }

    #[test]
    fn testify_layout_is_normalised() {
        let raw = concat!(
            "--- FAIL: TestTwoSum (0.00s)\n",
            "    solution_test.go:12: \n",
            "        \tError Trace:\tsolution_test.go:12\n",
            "        \tError:      \tNot equal: \n",
            "        \t            \tExpected: [0 1]\n",
            "        \t            \tActual  : [1 0]\n",
            "FAIL\n",
        );
        let result = parse(raw, 1);

        let failed = &result.failed_tests[0];
        assert_eq!(failed.name, "TestTwoSum");
        assert_eq!(failed.message, "Not equal");
        assert_eq!(failed.expected, "[0 1]");
        assert_eq!(failed.actual, "[1 0]");
    }

    #[test]
    fn run_marker_closes_failure_block() {
        let raw = "--- FAIL: TestX (0.00s)\n=== RUN   TestY\n    expected: 7\n--- PASS: TestY (0.00s)\n";
        let result = parse(raw, 1);

        assert_eq!(result.failed_tests.len(), 1);
        assert_eq!(result.failed_tests[0].expected, "");
    }

    #[test]
    fn first_value_for_a_field_wins() {
        let raw = "--- FAIL: TestX\nexpected: 1\nexpected: 2\n";
        let result = parse(raw, 1);
        assert_eq!(result.failed_tests[0].expected, "1");
    }

    #[test]
    fn assertion_lines_outside_a_block_are_ignored() {
        let raw = "expected: 1\nactual: 2\n--- PASS: TestA\n";
        let result = parse(raw, 0);
        assert!(result.failed_tests.is_empty());
        assert_eq!(result.total_count, 1);
    }

    #[test]
    fn subtests_are_counted_individually() {
        let raw = "--- FAIL: TestSum (0.00s)\n    --- PASS: TestSum/empty (0.00s)\n    --- FAIL: TestSum/negative (0.00s)\n";
        let result = parse(raw, 1);

        assert_eq!(result.passed_count, 1);
        assert_eq!(result.total_count, 3);
        let names: Vec<_> = result.failed_tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["TestSum", "TestSum/negative"]);
    }

    #[test]
    fn compile_errors_become_a_single_compilation_failure() {
        let raw = "# problems/two-sum\n./solution.go:4:2: undefined: foo\n./solution.go:9:1: syntax error: unexpected }\nFAIL\tproblems/two-sum [build failed]\n";
        let result = parse(raw, 2);

        assert!(!result.all_passed);
        assert_eq!(result.passed_count, 0);
        assert_eq!(result.total_count, 1);
        assert_eq!(result.failed_tests.len(), 1);
        assert_eq!(result.failed_tests[0].name, COMPILATION_FAILURE);
        assert!(result.failed_tests[0].message.contains("undefined: foo"));
    }

    #[test]
    fn package_failure_line_alone_is_unknown() {
        let result = parse("FAIL\texample.com/two-sum [setup failed]\n", 1);
        assert_eq!(result.failed_tests, vec![FailedTest::named(UNKNOWN_FAILURE)]);

        let result = parse("FAIL\texample.com/two-sum [build failed]\n", 1);
        assert_eq!(result.failed_tests[0].name, UNKNOWN_FAILURE);
    }

    #[test]
    fn compiler_diagnostic_alone_is_unknown() {
        let result = parse("./solution.go:4:2: undefined: foo\n", 1);
        assert_eq!(result.failed_tests, vec![FailedTest::named(UNKNOWN_FAILURE)]);
    }

    #[test]
    fn bare_fail_line_with_syntax_error_is_compilation() {
        let raw = "./solution.go:9:1: syntax error: unexpected }\nFAIL\n";
        let failed = &parse(raw, 1).failed_tests[0];

        assert_eq!(failed.name, COMPILATION_FAILURE);
        assert_eq!(failed.message, "./solution.go:9:1: syntax error: unexpected }");
    }

    #[test]
    fn failing_word_inside_a_line_is_not_a_package_failure() {
        assert!(!is_package_failure_line("FAILED to load"));
        assert!(!is_package_failure_line("undefined: FAIL"));
        assert!(is_package_failure_line("FAIL\tproblems/two-sum 0.002s"));
    }

    #[test]
    fn markerless_failure_without_compiler_output_is_unknown() {
        let result = parse("panic: something odd\n", 1);

        assert_eq!(result.total_count, 1);
        assert_eq!(result.passed_count, 0);
        assert_eq!(result.failed_tests, vec![FailedTest::named(UNKNOWN_FAILURE)]);
    }

    #[test]
    fn empty_successful_run_is_zero_of_zero() {
        let result = parse("ok  \tproblems/empty\t0.001s [no tests to run]\n", 0);

        assert!(result.all_passed);
        assert_eq!(result.total_count, 0);
        assert_eq!(result.passed_count, 0);
        assert!(result.failed_tests.is_empty());
    }

    #[test]
    fn quiet_passing_run_counts_nothing() {
        let result = parse("PASS\nok  \tproblems/two-sum\t0.002s\n", 0);

        assert!(result.all_passed);
        assert_eq!((result.passed_count, result.total_count), (0, 0));
    }

    #[test]
    fn exit_code_overrides_markers() {
        let result = parse("--- FAIL: TestX (0.00s)\n", 0);
        assert!(result.all_passed);
        assert_eq!(result.failed_tests.len(), 1);

        let result = parse("--- PASS: TestA (0.00s)\n", 1);
        assert!(!result.all_passed);
        assert_eq!(result.passed_count, 1);
        assert!(result.failed_tests.is_empty());
    }
}
