// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod problems;
pub mod report;
pub mod signal;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::{Settings, load_or_default};
use crate::engine::{WatchCore, WatchRuntime, WatchSummary};
use crate::errors::Result;
use crate::exec::Executor;
use crate::problems::{DirProblemService, ProblemService};
use crate::report::{ConsoleReporter, ResultReporter};
use crate::types::{ExecOptions, TestResult};

/// High-level entry point used by `main.rs`.
///
/// Loads settings, wires the directory-backed problem service and runs the
/// requested subcommand. Returns whether the process should exit
/// successfully: a single run that fails its tests is `Ok(false)`, a watch
/// session stopped by a signal is `Ok(true)`.
pub async fn run(args: CliArgs) -> Result<bool> {
    let settings = load_or_default(&args.config)?;
    debug!(?settings, "loaded settings");

    let service = Arc::new(DirProblemService::new(settings.problems.clone()));

    match args.command {
        Command::Run(test) => {
            let problem = service.find_by_id(&test.problem)?;
            let result = Executor::from_settings(&settings.runner)
                .execute(&problem, test.exec_options())
                .await?;
            ConsoleReporter::stdout().report(&problem, &result, None)?;
            Ok(result.all_passed)
        }
        Command::Watch(test) => {
            watch(&test.problem, service, &settings, test.exec_options()).await?;
            Ok(true)
        }
    }
}

/// Run a problem's tests once.
pub async fn execute(
    problem_id: &str,
    service: &dyn ProblemService,
    settings: &Settings,
    options: ExecOptions,
) -> Result<TestResult> {
    let problem = service.find_by_id(problem_id)?;
    Executor::from_settings(&settings.runner)
        .execute(&problem, options)
        .await
}

/// Watch a problem's solution file and re-run its tests on every change
/// until SIGINT/SIGTERM.
///
/// Fails immediately if the problem can't be found or the watch can't be
/// registered; otherwise returns once a shutdown signal has been handled.
pub async fn watch(
    problem_id: &str,
    service: Arc<dyn ProblemService>,
    settings: &Settings,
    options: ExecOptions,
) -> Result<WatchSummary> {
    let problem = service.find_by_id(problem_id)?;
    let shutdown = signal::shutdown_signal()?;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    // Held until this function returns; dropping it unregisters the watch.
    let watcher = crate::watch::spawn_watcher(&problem.solution_path, events_tx)?;
    debug!(dir = ?watcher.dir(), target = ?watcher.target(), "watch registered");

    let mut reporter = ConsoleReporter::stdout();
    reporter.watching(&problem)?;

    info!(problem = %problem.id, debounce = ?settings.debounce, "starting watch session");

    let runtime = WatchRuntime::new(
        WatchCore::new(settings.debounce),
        events_rx,
        Executor::from_settings(&settings.runner),
        reporter,
        service,
        problem,
        options,
    );
    runtime.run(shutdown).await
}
