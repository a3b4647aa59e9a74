// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Only infrastructure failures live here. A failing test suite is never an
//! error: it is a [`crate::types::TestResult`] with `all_passed == false`.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestwatchError {
    /// The OS could not start the test command at all (missing binary,
    /// permission denied, ...). A nonzero exit is not this.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` did not finish within {after:?}; process killed")]
    Timeout { command: String, after: Duration },

    #[error("failed to set up file watcher: {0}")]
    WatchSetup(#[from] notify::Error),

    #[error("file watcher channel closed unexpectedly")]
    WatcherClosed,

    #[error("Problem not found: {0}")]
    ProblemNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TestwatchError>;
