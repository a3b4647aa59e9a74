#![allow(dead_code)]

use testwatch::problems::Problem;

/// Builder for `go test` style output.
///
/// ```ignore
/// let raw = GoOutputBuilder::new()
///     .pass("TestA")
///     .fail("TestX")
///     .detail("Error", "Not equal")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct GoOutputBuilder {
    lines: Vec<String>,
}

impl GoOutputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(mut self, name: &str) -> Self {
        self.lines.push(format!("=== RUN   {name}"));
        self
    }

    pub fn pass(mut self, name: &str) -> Self {
        self.lines.push(format!("--- PASS: {name} (0.00s)"));
        self
    }

    pub fn fail(mut self, name: &str) -> Self {
        self.lines.push(format!("--- FAIL: {name} (0.00s)"));
        self
    }

    /// An indented assertion line such as `    expected: 5`.
    pub fn detail(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("    {key}: {value}"));
        self
    }

    pub fn line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}

/// A problem fixture that doesn't need to exist on disk.
pub fn problem(id: &str) -> Problem {
    Problem::new(
        id,
        format!("problems/{id}"),
        "solution.go",
        "solution_test.go",
    )
}

/// Canned passing / failing outputs.
pub fn passing_output() -> String {
    GoOutputBuilder::new().pass("TestA").pass("TestB").line("PASS").build()
}

pub fn failing_output() -> String {
    GoOutputBuilder::new()
        .pass("TestA")
        .fail("TestB")
        .detail("expected", "1")
        .detail("actual", "2")
        .line("FAIL")
        .build()
}
