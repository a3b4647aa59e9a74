// src/exec/process.rs

//! Subprocess invocation for the external test runner.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{Result, TestwatchError};

/// Captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// stdout followed by stderr.
    pub raw_output: String,
    /// Exit status; `-1` when the process was terminated by a signal.
    pub exit_code: i32,
}

/// Trait abstracting how the test command is launched.
///
/// Production code uses [`TokioProcessRunner`]; tests provide canned output
/// without spawning anything.
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with `args` to completion.
    ///
    /// A nonzero exit is returned as `Ok` with `exit_code != 0`; only a
    /// failure to start (or a timeout) is an `Err`.
    fn run<'a>(
        &'a self,
        command: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>>;
}

/// Real runner backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessRunner {
    timeout: Option<Duration>,
}

impl TokioProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for TokioProcessRunner {
    fn run<'a>(
        &'a self,
        command: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>> {
        Box::pin(async move {
            let cmd_line = command_line(command, args);
            info!(cmd = %cmd_line, "starting test process");

            let mut cmd = Command::new(command);
            cmd.args(args)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);

            let child = cmd.spawn().map_err(|source| TestwatchError::Spawn {
                command: cmd_line.clone(),
                source,
            })?;

            // Dropping the wait future on timeout drops the child, and
            // kill_on_drop takes care of the process.
            let wait = child.wait_with_output();
            let output = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, wait).await.map_err(|_| {
                    TestwatchError::Timeout {
                        command: cmd_line.clone(),
                        after: limit,
                    }
                })??,
                None => wait.await?,
            };

            let exit_code = output.status.code().unwrap_or(-1);
            let mut raw_output = String::from_utf8_lossy(&output.stdout).into_owned();
            raw_output.push_str(&String::from_utf8_lossy(&output.stderr));

            debug!(
                cmd = %cmd_line,
                exit_code,
                bytes = raw_output.len(),
                "test process exited"
            );

            Ok(ProcessOutput {
                raw_output,
                exit_code,
            })
        })
    }
}

/// Render a command line for logs and error messages.
pub fn command_line(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{command} {}", args.join(" "))
    }
}
