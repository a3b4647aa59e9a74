// src/problems/dir.rs

//! Directory-backed problem service.
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   two-sum/
//!     solution.go
//!     solution_test.go
//!   .testwatch/progress
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, anyhow};
use tracing::info;

use crate::config::ProblemsSettings;
use crate::errors::{Result, TestwatchError};
use crate::problems::{Problem, ProblemService};
use crate::types::TestResult;

/// Relative path (from the problems root) to the progress file.
pub const PROGRESS_FILE_PATH: &str = ".testwatch/progress";

/// One line of the progress file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessRecord {
    /// Seconds since the Unix epoch.
    pub solved_at: u64,
    pub passed_count: usize,
    pub total_count: usize,
}

#[derive(Debug)]
pub struct DirProblemService {
    settings: ProblemsSettings,
    // Serialises read-modify-write of the progress file.
    write_lock: Mutex<()>,
}

impl DirProblemService {
    pub fn new(settings: ProblemsSettings) -> Self {
        Self {
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.settings.root
    }

    fn progress_path(&self) -> PathBuf {
        self.settings.root.join(PROGRESS_FILE_PATH)
    }

    /// Most recent recorded success for `id`, if any.
    pub fn last_success(&self, id: &str) -> Result<Option<SuccessRecord>> {
        Ok(load_progress(&self.progress_path())?.get(id).copied())
    }
}

impl ProblemService for DirProblemService {
    fn find_by_id(&self, id: &str) -> Result<Problem> {
        if id.is_empty() || id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(TestwatchError::ProblemNotFound(id.to_string()));
        }

        let dir = self.settings.root.join(id);
        let problem = Problem::new(
            id,
            dir,
            &self.settings.solution_file,
            &self.settings.test_file,
        );

        if !problem.solution_path.is_file() {
            return Err(TestwatchError::ProblemNotFound(id.to_string()));
        }

        Ok(problem)
    }

    fn record_success(&self, id: &str, result: &TestResult) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow!("progress lock poisoned"))?;

        let path = self.progress_path();
        let mut map = load_progress(&path)?;
        let solved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        map.insert(
            id.to_string(),
            SuccessRecord {
                solved_at,
                passed_count: result.passed_count,
                total_count: result.total_count,
            },
        );
        save_progress(&path, &map)?;

        info!(problem = %id, solved_at, "recorded success");
        Ok(())
    }
}

fn load_progress(path: &Path) -> Result<BTreeMap<String, SuccessRecord>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let file = File::open(path).with_context(|| format!("opening progress file at {path:?}"))?;
    let reader = BufReader::new(file);

    let mut map = BTreeMap::new();
    for line_res in reader.lines() {
        let line = line_res?;
        if let Some((id, record)) = parse_progress_line(&line) {
            map.insert(id.to_string(), record);
        }
    }

    Ok(map)
}

/// `<id> <solved_at> <passed>/<total>`; malformed lines are skipped.
fn parse_progress_line(line: &str) -> Option<(&str, SuccessRecord)> {
    let mut parts = line.split_whitespace();
    let id = parts.next()?;
    let solved_at = parts.next()?.parse().ok()?;
    let (passed, total) = parts.next()?.split_once('/')?;
    Some((
        id,
        SuccessRecord {
            solved_at,
            passed_count: passed.parse().ok()?,
            total_count: total.parse().ok()?,
        },
    ))
}

fn save_progress(path: &Path, map: &BTreeMap<String, SuccessRecord>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating progress directory at {parent:?}"))?;
    }

    let file = File::create(path).with_context(|| format!("creating progress file at {path:?}"))?;
    let mut writer = BufWriter::new(file);

    for (id, record) in map {
        writeln!(
            writer,
            "{} {} {}/{}",
            id, record.solved_at, record.passed_count, record.total_count
        )?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::parser::parse;

    fn service_in(root: &Path) -> DirProblemService {
        DirProblemService::new(ProblemsSettings {
            root: root.to_path_buf(),
            solution_file: "solution.go".into(),
            test_file: "solution_test.go".into(),
        })
    }

    fn scaffold(root: &Path, id: &str) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("solution.go"), "package main\n").unwrap();
        fs::write(dir.join("solution_test.go"), "package main\n").unwrap();
    }

    #[test]
    fn finds_existing_problem() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path(), "two-sum");
        let service = service_in(tmp.path());

        let problem = service.find_by_id("two-sum").unwrap();
        assert_eq!(problem.id, "two-sum");
        assert_eq!(problem.solution_path, tmp.path().join("two-sum/solution.go"));
    }

    #[test]
    fn unknown_or_escaping_ids_are_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold(tmp.path(), "two-sum");
        let service = service_in(tmp.path());

        for id in ["missing", "", "..", "two-sum/../two-sum"] {
            let err = service.find_by_id(id).unwrap_err();
            assert!(matches!(err, TestwatchError::ProblemNotFound(_)), "{id}: {err:?}");
        }
    }

    #[test]
    fn record_success_persists_progress() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service_in(tmp.path());
        let result = parse("--- PASS: TestA\n--- PASS: TestB\n", 0);

        assert_eq!(service.last_success("two-sum").unwrap(), None);
        service.record_success("two-sum", &result).unwrap();
        service.record_success("reverse-list", &result).unwrap();

        let record = service.last_success("two-sum").unwrap().unwrap();
        assert_eq!(record.passed_count, 2);
        assert_eq!(record.total_count, 2);
        assert!(tmp.path().join(PROGRESS_FILE_PATH).is_file());

        // A fresh service sees the same data.
        let reopened = service_in(tmp.path());
        assert!(reopened.last_success("reverse-list").unwrap().is_some());
    }

    #[test]
    fn malformed_progress_lines_are_skipped() {
        assert_eq!(parse_progress_line("garbage"), None);
        assert_eq!(parse_progress_line("id notanumber 1/1"), None);
        assert_eq!(
            parse_progress_line("two-sum 17 3/4"),
            Some((
                "two-sum",
                SuccessRecord {
                    solved_at: 17,
                    passed_count: 3,
                    total_count: 4
                }
            ))
        );
    }
}
