// src/exec/mod.rs

//! Test execution layer.
//!
//! - [`process`] launches the external test runner via `tokio::process` and
//!   captures its output. The [`ProcessRunner`] trait lets tests swap in a
//!   fake that never spawns anything.
//! - [`parser`] turns raw runner output into a [`crate::types::TestResult`].
//! - [`executor`] composes the two and builds the command line.

pub mod executor;
pub mod parser;
pub mod process;

pub use executor::Executor;
pub use process::{ProcessOutput, ProcessRunner, TokioProcessRunner};
