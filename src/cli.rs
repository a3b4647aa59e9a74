// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;
use crate::types::ExecOptions;

/// Command-line arguments for `testwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "testwatch",
    version,
    about = "Run a practice problem's Go tests once, or re-run them on every save.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML). Missing file means defaults.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path(), global = true)]
    pub config: PathBuf,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TESTWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the tests once and exit non-zero if they fail.
    Run(TestArgs),
    /// Run the tests, then re-run them whenever the solution file changes.
    Watch(TestArgs),
}

#[derive(Debug, Clone, Args)]
pub struct TestArgs {
    /// Problem id (directory name under the problems root).
    pub problem: String,

    /// Show the test runner's full output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the race detector.
    #[arg(long)]
    pub race: bool,
}

impl TestArgs {
    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            verbose: self.verbose,
            race_detection: self.race,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
