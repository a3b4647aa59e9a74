// src/report.rs

//! Plain-text rendering of test results.
//!
//! Reports go to stdout (logs go to stderr, see [`crate::logging`]).

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::errors::TestwatchError;
use crate::problems::Problem;
use crate::types::{TestResult, Transition};

/// Display surface for results produced by the executor.
pub trait ResultReporter: Send {
    /// Show one result. `transition` is `None` outside watch mode.
    fn report(&mut self, problem: &Problem, result: &TestResult, transition: Option<Transition>)
    -> io::Result<()>;

    /// Show an infrastructure failure for one cycle.
    fn report_error(&mut self, problem: &Problem, error: &TestwatchError) -> io::Result<()>;

    /// Announce that a watch session started.
    fn watching(&mut self, _problem: &Problem) -> io::Result<()> {
        Ok(())
    }
}

/// Writes human-readable reports to any `io::Write` (stdout by default).
#[derive(Debug)]
pub struct ConsoleReporter<W = io::Stdout> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ResultReporter for ConsoleReporter<W> {
    fn report(
        &mut self,
        problem: &Problem,
        result: &TestResult,
        transition: Option<Transition>,
    ) -> io::Result<()> {
        self.out
            .write_all(render(problem, result, transition).as_bytes())?;
        self.out.flush()
    }

    fn report_error(&mut self, problem: &Problem, error: &TestwatchError) -> io::Result<()> {
        writeln!(self.out, "ERROR {}: {error}", problem.id)?;
        self.out.flush()
    }

    fn watching(&mut self, problem: &Problem) -> io::Result<()> {
        writeln!(
            self.out,
            "Watching {} for changes (Ctrl+C to stop)",
            problem.solution_path.display()
        )?;
        self.out.flush()
    }
}

/// Render a result as text.
pub fn render(problem: &Problem, result: &TestResult, transition: Option<Transition>) -> String {
    let mut s = String::new();

    if result.verbose && !result.raw_output.is_empty() {
        s.push_str(&result.raw_output);
        if !result.raw_output.ends_with('\n') {
            s.push('\n');
        }
    }

    let status = if result.all_passed { "PASS" } else { "FAIL" };
    let _ = write!(
        s,
        "{status} {}: {}/{} tests passed",
        problem.id, result.passed_count, result.total_count
    );
    if result.race_detection {
        s.push_str(" (race detector on)");
    }
    s.push('\n');

    for test in &result.failed_tests {
        let _ = writeln!(s, "  --- {}", test.name);
        for (label, value) in [
            ("message", &test.message),
            ("expected", &test.expected),
            ("actual", &test.actual),
        ] {
            if !value.is_empty() {
                let _ = writeln!(s, "      {label:<9}{value}");
            }
        }
    }

    match transition {
        Some(Transition::FailToPass) => s.push_str("Fixed: all tests pass now.\n"),
        Some(Transition::PassToFail) => s.push_str("Regression: tests were passing before this change.\n"),
        Some(Transition::FirstRun) | Some(Transition::NoChange) | None => {}
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::parser::parse;

    fn problem() -> Problem {
        Problem::new("two-sum", "problems/two-sum", "solution.go", "solution_test.go")
    }

    #[test]
    fn failing_result_lists_failures() {
        let result = parse(
            "--- PASS: TestA\n--- FAIL: TestX\nError: Not equal\nexpected: 5\nactual: 3\n",
            1,
        );
        let text = render(&problem(), &result, None);

        assert!(text.starts_with("FAIL two-sum: 1/2 tests passed\n"));
        assert!(text.contains("  --- TestX\n"));
        assert!(text.contains("message  Not equal"));
        assert!(text.contains("expected 5"));
        assert!(text.contains("actual   3"));
        assert!(!text.contains("--- PASS"));
    }

    #[test]
    fn verbose_result_includes_raw_output() {
        let mut result = parse("--- PASS: TestA", 0);
        result.verbose = true;
        let text = render(&problem(), &result, Some(Transition::FirstRun));

        assert!(text.starts_with("--- PASS: TestA\nPASS two-sum: 1/1 tests passed\n"));
    }

    #[test]
    fn transitions_add_a_footer() {
        let result = parse("", 0);
        assert!(render(&problem(), &result, Some(Transition::FailToPass)).contains("Fixed"));
        assert!(
            render(&problem(), &parse("", 1), Some(Transition::PassToFail)).contains("Regression")
        );
        assert!(!render(&problem(), &result, Some(Transition::NoChange)).contains("Fixed"));
    }

    #[test]
    fn console_reporter_writes_to_its_sink() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.report(&problem(), &parse("", 0), None).unwrap();
        let err = TestwatchError::ProblemNotFound("x".into());
        reporter.report_error(&problem(), &err).unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("PASS two-sum: 0/0 tests passed"));
        assert!(out.contains("ERROR two-sum: Problem not found: x"));
    }

    struct SilentReporter;

    impl ResultReporter for SilentReporter {
        fn report(&mut self, _: &Problem, _: &TestResult, _: Option<Transition>) -> io::Result<()> {
            Ok(())
        }

        fn report_error(&mut self, _: &Problem, _: &TestwatchError) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn watching_defaults_to_a_no_op() {
        assert!(SilentReporter.watching(&problem()).is_ok());
    }
}
