// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load a configuration file from a given path and return the raw
/// `RawSettings`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] to get
/// usable [`Settings`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawSettings = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}

/// Like [`load_and_validate`], but a missing file means "all defaults".
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(?path, "no config file found; using defaults");
        return Ok(Settings::default());
    }
    load_and_validate(path)
}

/// Default config location: `Testwatch.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Testwatch.toml")
}
