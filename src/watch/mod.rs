// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Registering a cross-platform filesystem watcher (`notify`) on the
//!   directory that contains the solution file.
//! - Filtering raw notify events down to writes, creates and renames of that
//!   exact file.
//! - Forwarding them to the watch loop as [`crate::engine::WatchEvent`]s.
//!
//! It does **not** debounce; that is the watch loop's job.

pub mod event_handler;
pub mod path_utils;
pub mod watcher;

pub use event_handler::{is_qualifying_kind, to_watch_event};
pub use watcher::{WatcherHandle, spawn_watcher};
