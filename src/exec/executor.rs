// src/exec/executor.rs

//! Runs a problem's test suite and turns the output into a [`TestResult`].

use tracing::{debug, info};

use crate::config::RunnerSettings;
use crate::errors::Result;
use crate::exec::parser;
use crate::exec::process::{ProcessRunner, TokioProcessRunner, command_line};
use crate::problems::Problem;
use crate::types::{ExecOptions, TestResult};

/// Composes a [`ProcessRunner`] with the output parser.
#[derive(Debug)]
pub struct Executor<R = TokioProcessRunner> {
    runner: R,
    settings: RunnerSettings,
}

impl Executor<TokioProcessRunner> {
    /// Production executor spawning real processes.
    pub fn from_settings(settings: &RunnerSettings) -> Self {
        Self::new(TokioProcessRunner::new(settings.timeout), settings.clone())
    }
}

impl<R: ProcessRunner> Executor<R> {
    pub fn new(runner: R, settings: RunnerSettings) -> Self {
        Self { runner, settings }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Arguments for one run: base args, optional flags, then the target.
    pub fn command_args(&self, problem: &Problem, options: ExecOptions) -> Vec<String> {
        let mut args = self.settings.args.clone();
        if options.verbose && !self.settings.verbose_flag.is_empty() {
            args.push(self.settings.verbose_flag.clone());
        }
        if options.race_detection && !self.settings.race_flag.is_empty() {
            args.push(self.settings.race_flag.clone());
        }
        args.push(problem.test_target());
        args
    }

    /// Run the tests for `problem`.
    ///
    /// Failing tests are a normal `Ok` result; `Err` means the runner could
    /// not be started (or was killed on timeout) and there is no result.
    pub async fn execute(&self, problem: &Problem, options: ExecOptions) -> Result<TestResult> {
        let args = self.command_args(problem, options);
        debug!(
            problem = %problem.id,
            cmd = %command_line(&self.settings.command, &args),
            "executing tests"
        );

        let output = self.runner.run(&self.settings.command, &args).await?;
        let result = parser::parse(&output.raw_output, output.exit_code).with_options(options);

        info!(
            problem = %problem.id,
            exit_code = output.exit_code,
            passed = result.passed_count,
            total = result.total_count,
            all_passed = result.all_passed,
            "test run finished"
        );

        Ok(result)
    }
}
