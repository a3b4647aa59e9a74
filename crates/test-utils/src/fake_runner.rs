use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use testwatch::errors::{Result, TestwatchError};
use testwatch::exec::{ProcessOutput, ProcessRunner};

/// What the next call to the fake should produce.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Output(ProcessOutput),
    SpawnFailure,
}

#[derive(Debug, Default)]
struct FakeState {
    script: VecDeque<FakeOutcome>,
    last: Option<FakeOutcome>,
    calls: Vec<Vec<String>>,
}

/// A fake process runner that:
/// - records the args of every call
/// - replays scripted outcomes in order, repeating the last one once the
///   script runs out (an empty script means "exit 0, no output")
/// - optionally sleeps before answering, to simulate a slow test run.
///
/// Clones share state, so a test can keep one handle while the executor owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct FakeProcessRunner {
    state: Arc<Mutex<FakeState>>,
    delay: Option<Duration>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn push_output(&self, raw_output: impl Into<String>, exit_code: i32) -> &Self {
        self.push(FakeOutcome::Output(ProcessOutput {
            raw_output: raw_output.into(),
            exit_code,
        }))
    }

    pub fn push_spawn_failure(&self) -> &Self {
        self.push(FakeOutcome::SpawnFailure)
    }

    fn push(&self, outcome: FakeOutcome) -> &Self {
        self.state.lock().unwrap().script.push_back(outcome);
        self
    }

    /// Number of times `run` was called.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Args of every call, in order.
    pub fn call_args(&self) -> Vec<Vec<String>> {
        self.state.lock().unwrap().calls.clone()
    }

    fn next_outcome(&self, args: &[String]) -> FakeOutcome {
        let mut state = self.state.lock().unwrap();
        state.calls.push(args.to_vec());
        let outcome = state
            .script
            .pop_front()
            .or_else(|| state.last.clone())
            .unwrap_or(FakeOutcome::Output(ProcessOutput {
                raw_output: String::new(),
                exit_code: 0,
            }));
        state.last = Some(outcome.clone());
        outcome
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run<'a>(
        &'a self,
        command: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + 'a>> {
        let outcome = self.next_outcome(args);
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match outcome {
                FakeOutcome::Output(output) => Ok(output),
                FakeOutcome::SpawnFailure => Err(TestwatchError::Spawn {
                    command: command.to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake: not found"),
                }),
            }
        })
    }
}
