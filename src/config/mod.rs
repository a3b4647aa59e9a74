// src/config/mod.rs

//! Configuration loading and validation for testwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate and convert raw values into [`Settings`] (`validate.rs`).
//!
//! Everything downstream receives an explicit `Settings` value; nothing reads
//! configuration ambiently.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{
    ProblemsSection, ProblemsSettings, RawSettings, RunnerSection, RunnerSettings, Settings,
    WatchSection,
};
pub use validate::parse_duration;
