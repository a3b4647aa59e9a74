// src/problems/memory.rs

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use tracing::info;

use crate::errors::{Result, TestwatchError};
use crate::problems::{Problem, ProblemService};
use crate::types::TestResult;

/// Keeps problems and recorded successes in memory only (lost on restart).
#[derive(Debug, Default)]
pub struct MemoryProblemService {
    problems: HashMap<String, Problem>,
    successes: Mutex<Vec<String>>,
}

impl MemoryProblemService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_problem(mut self, problem: Problem) -> Self {
        self.problems.insert(problem.id.clone(), problem);
        self
    }

    /// Ids passed to `record_success`, in call order.
    pub fn successes(&self) -> Vec<String> {
        self.successes
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl ProblemService for MemoryProblemService {
    fn find_by_id(&self, id: &str) -> Result<Problem> {
        self.problems
            .get(id)
            .cloned()
            .ok_or_else(|| TestwatchError::ProblemNotFound(id.to_string()))
    }

    fn record_success(&self, id: &str, _result: &TestResult) -> Result<()> {
        self.successes
            .lock()
            .map_err(|_| anyhow!("success list poisoned"))?
            .push(id.to_string());
        info!(problem = %id, "recorded success (memory)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::parser::parse;

    #[test]
    fn lookup_and_record() {
        let service = MemoryProblemService::new().with_problem(Problem::new(
            "two-sum",
            "p/two-sum",
            "solution.go",
            "solution_test.go",
        ));

        assert!(service.find_by_id("two-sum").is_ok());
        assert!(matches!(
            service.find_by_id("nope"),
            Err(TestwatchError::ProblemNotFound(_))
        ));

        service.record_success("two-sum", &parse("", 0)).unwrap();
        assert_eq!(service.successes(), vec!["two-sum"]);
    }
}
