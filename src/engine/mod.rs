// src/engine/mod.rs

//! Watch-mode orchestration.
//!
//! This module ties together:
//! - the pure watch state machine (`Idle`, `Debouncing`, `Running`,
//!   `Stopped`) in [`core`]
//! - pass/fail transition detection in [`transition`]
//! - the async loop in [`runtime`] that waits on file changes, the debounce
//!   timer and the shutdown signal, and runs test cycles.

use std::path::PathBuf;

/// Events flowing into the watch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A qualifying change (write, create or rename) to the watched file.
    FileChanged { path: PathBuf },
    /// The debounce window passed with no further changes.
    DebounceElapsed,
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod runtime;
pub mod transition;

pub use core::{WatchCommand, WatchCore, WatchState, WatchStep};
pub use runtime::{WatchRuntime, WatchSummary};
pub use transition::TransitionTracker;
