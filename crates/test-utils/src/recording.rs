use std::io;
use std::sync::{Arc, Mutex};

use testwatch::errors::{Result, TestwatchError};
use testwatch::problems::{Problem, ProblemService};
use testwatch::report::ResultReporter;
use testwatch::types::{TestResult, Transition};

/// One thing a [`RecordingReporter`] was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Watching(String),
    Result {
        problem: String,
        transition: Option<Transition>,
        all_passed: bool,
        passed_count: usize,
        total_count: usize,
    },
    Error {
        problem: String,
        message: String,
    },
}

/// Reporter that records everything into a shared list.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    entries: Arc<Mutex<Vec<Reported>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Reported> {
        self.entries.lock().unwrap().clone()
    }

    /// Transitions of all reported results, in order.
    pub fn transitions(&self) -> Vec<Transition> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                Reported::Result {
                    transition: Some(t),
                    ..
                } => Some(t),
                _ => None,
            })
            .collect()
    }

    fn push(&self, entry: Reported) {
        self.entries.lock().unwrap().push(entry);
    }
}

impl ResultReporter for RecordingReporter {
    fn report(
        &mut self,
        problem: &Problem,
        result: &TestResult,
        transition: Option<Transition>,
    ) -> io::Result<()> {
        self.push(Reported::Result {
            problem: problem.id.clone(),
            transition,
            all_passed: result.all_passed,
            passed_count: result.passed_count,
            total_count: result.total_count,
        });
        Ok(())
    }

    fn report_error(&mut self, problem: &Problem, error: &TestwatchError) -> io::Result<()> {
        self.push(Reported::Error {
            problem: problem.id.clone(),
            message: error.to_string(),
        });
        Ok(())
    }

    fn watching(&mut self, problem: &Problem) -> io::Result<()> {
        self.push(Reported::Watching(problem.id.clone()));
        Ok(())
    }
}

/// Problem service whose `record_success` always fails.
#[derive(Debug, Default)]
pub struct FailingProblemService {
    problems: Vec<Problem>,
    attempts: Mutex<usize>,
}

impl FailingProblemService {
    pub fn new(problem: Problem) -> Self {
        Self {
            problems: vec![problem],
            attempts: Mutex::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl ProblemService for FailingProblemService {
    fn find_by_id(&self, id: &str) -> Result<Problem> {
        self.problems
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| TestwatchError::ProblemNotFound(id.to_string()))
    }

    fn record_success(&self, _id: &str, _result: &TestResult) -> Result<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(anyhow::anyhow!("progress store unavailable").into())
    }
}
