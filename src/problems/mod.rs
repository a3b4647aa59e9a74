// src/problems/mod.rs

//! Problem lookup and progress recording.
//!
//! The watch loop only needs two things from the surrounding application:
//! where a problem's files live, and a hook to call when a problem goes from
//! failing to passing. Both sit behind [`ProblemService`].

pub mod dir;
pub mod memory;

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::types::TestResult;

pub use dir::{DirProblemService, PROGRESS_FILE_PATH};
pub use memory::MemoryProblemService;

/// A practice problem on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: String,
    /// Directory holding the problem's package.
    pub dir: PathBuf,
    /// The file the user edits; watch mode tracks exactly this path.
    pub solution_path: PathBuf,
    /// Generated test file for the problem.
    pub test_path: PathBuf,
}

impl Problem {
    pub fn new(
        id: impl Into<String>,
        dir: impl Into<PathBuf>,
        solution_file: &str,
        test_file: &str,
    ) -> Self {
        let dir = dir.into();
        Self {
            id: id.into(),
            solution_path: dir.join(solution_file),
            test_path: dir.join(test_file),
            dir,
        }
    }

    /// Argument naming the package to test.
    ///
    /// `go test` reads a bare relative path as an import path, so relative
    /// directories get a `./` prefix.
    pub fn test_target(&self) -> String {
        package_arg(&self.dir)
    }
}

fn package_arg(dir: &Path) -> String {
    let display = dir.to_string_lossy().replace('\\', "/");
    if dir.is_absolute() || display.starts_with('.') {
        display
    } else {
        format!("./{display}")
    }
}

/// Record store the test runner talks to.
pub trait ProblemService: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Problem>;

    /// Called when a problem's tests go from failing to passing in watch
    /// mode. Failures are logged by the caller and never stop the session.
    fn record_success(&self, id: &str, result: &TestResult) -> Result<()>;
}
