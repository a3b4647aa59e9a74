// src/engine/runtime.rs

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::{Instant, Sleep};
use tracing::{debug, error, info, warn};

use crate::errors::{Result, TestwatchError};
use crate::exec::{Executor, ProcessRunner};
use crate::problems::{Problem, ProblemService};
use crate::report::ResultReporter;
use crate::types::{ExecOptions, TestResult, Transition};

use super::core::WatchCore;
use super::transition::TransitionTracker;
use super::{WatchCommand, WatchEvent};

/// What a finished watch session did.
#[derive(Debug, Clone, Default)]
pub struct WatchSummary {
    /// Completed test cycles, including the initial one.
    pub cycles: usize,
    pub transitions: Vec<Transition>,
    pub last_result: Option<TestResult>,
}

/// Drives [`WatchCore`] from filesystem events, the debounce timer and a
/// shutdown signal, and runs test cycles when the core asks for one.
///
/// Everything happens on one task: a cycle is awaited inline, so no event is
/// handled while tests are running and a shutdown arriving mid-cycle is only
/// acted on once the cycle has been reported.
pub struct WatchRuntime<R: ProcessRunner, P: ResultReporter> {
    core: WatchCore,
    event_rx: mpsc::UnboundedReceiver<WatchEvent>,
    executor: Executor<R>,
    reporter: P,
    service: Arc<dyn ProblemService>,
    tracker: TransitionTracker,
    problem: Problem,
    options: ExecOptions,
    summary: WatchSummary,
}

impl<R: ProcessRunner, P: ResultReporter> fmt::Debug for WatchRuntime<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchRuntime")
            .field("core", &self.core)
            .field("problem", &self.problem.id)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<R: ProcessRunner, P: ResultReporter> WatchRuntime<R, P> {
    pub fn new(
        core: WatchCore,
        event_rx: mpsc::UnboundedReceiver<WatchEvent>,
        executor: Executor<R>,
        reporter: P,
        service: Arc<dyn ProblemService>,
        problem: Problem,
        options: ExecOptions,
    ) -> Self {
        Self {
            core,
            event_rx,
            executor,
            reporter,
            service,
            tracker: TransitionTracker::new(),
            problem,
            options,
            summary: WatchSummary::default(),
        }
    }

    /// Main event loop.
    ///
    /// - Runs one cycle immediately.
    /// - Then waits on `shutdown`, the event channel and the debounce timer,
    ///   feeding each wakeup into the core and executing its commands.
    ///
    /// Returns `Ok` on a requested shutdown and `Err(WatcherClosed)` when
    /// the event channel closes underneath the loop.
    pub async fn run<S>(mut self, shutdown: S) -> Result<WatchSummary>
    where
        S: Future<Output = ()>,
    {
        info!(problem = %self.problem.id, "watch loop started");
        tokio::pin!(shutdown);
        let mut debounce: Option<Pin<Box<Sleep>>> = None;

        let step = self.core.begin_initial_cycle();
        for command in step.commands {
            self.execute_command(command, &mut debounce).await;
        }

        loop {
            let event = tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("shutdown signal received");
                    WatchEvent::ShutdownRequested
                }

                maybe = self.event_rx.recv() => match maybe {
                    Some(event) => event,
                    None => {
                        error!("watch event channel closed; exiting");
                        return Err(TestwatchError::WatcherClosed);
                    }
                },

                () = debounce_elapsed(&mut debounce) => WatchEvent::DebounceElapsed,
            };

            if event == WatchEvent::DebounceElapsed {
                debounce = None;
            }
            debug!(?event, "watch loop received event");

            let step = self.core.step(event);
            for command in step.commands {
                self.execute_command(command, &mut debounce).await;
            }

            if !step.keep_running {
                break;
            }
        }

        info!(cycles = self.summary.cycles, "watch loop stopped");
        Ok(self.summary)
    }

    async fn execute_command(
        &mut self,
        command: WatchCommand,
        debounce: &mut Option<Pin<Box<Sleep>>>,
    ) {
        match command {
            WatchCommand::ArmDebounce(window) => match debounce {
                Some(timer) => timer.as_mut().reset(Instant::now() + window),
                None => *debounce = Some(Box::pin(tokio::time::sleep(window))),
            },
            WatchCommand::DisarmDebounce => *debounce = None,
            WatchCommand::RunCycle => {
                *debounce = None;
                self.run_cycle().await;
                self.core.finish_cycle();
            }
        }
    }

    /// Execute, classify, report and (on fail -> pass) record success.
    ///
    /// Nothing here ends the session: executor errors are reported for this
    /// cycle only and hook failures are logged.
    async fn run_cycle(&mut self) {
        let result = match self.executor.execute(&self.problem, self.options).await {
            Ok(result) => result,
            Err(err) => {
                error!(problem = %self.problem.id, error = %err, "test cycle failed");
                if let Err(io_err) = self.reporter.report_error(&self.problem, &err) {
                    warn!(error = %io_err, "failed to write error report");
                }
                self.summary.cycles += 1;
                return;
            }
        };

        let transition = self.tracker.detect(&result);
        debug!(problem = %self.problem.id, ?transition, "classified result");

        if let Err(io_err) = self.reporter.report(&self.problem, &result, Some(transition)) {
            warn!(error = %io_err, "failed to write report");
        }

        if transition == Transition::FailToPass {
            if let Err(err) = self.service.record_success(&self.problem.id, &result) {
                error!(problem = %self.problem.id, error = %err, "failed to record success");
            }
        }

        self.summary.cycles += 1;
        self.summary.transitions.push(transition);
        self.summary.last_result = Some(result);
    }
}

async fn debounce_elapsed(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}
