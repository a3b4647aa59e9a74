// src/watch/watcher.rs

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::engine::WatchEvent;
use crate::errors::{Result, TestwatchError};
use crate::watch::event_handler::to_watch_event;
use crate::watch::path_utils::normalize;

/// Handle for the filesystem watcher.
///
/// Owns the single watch registration of a session. Dropping the handle
/// removes the registration, so it is released on every exit path.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
    dir: PathBuf,
    target: PathBuf,
}

impl WatcherHandle {
    /// The directory being watched.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The normalized file whose changes are forwarded.
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("dir", &self.dir)
            .field("target", &self.target)
            .finish()
    }
}

/// Start watching `file` and forward qualifying changes as
/// [`WatchEvent::FileChanged`] on `events_tx`.
///
/// The containing directory is watched (non-recursively) rather than the file
/// itself, so the registration survives editors that replace the file via an
/// atomic rename.
pub fn spawn_watcher(
    file: impl AsRef<Path>,
    events_tx: mpsc::UnboundedSender<WatchEvent>,
) -> Result<WatcherHandle> {
    let target = normalize(file.as_ref());
    let dir = target
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            TestwatchError::ConfigError(format!("{:?} has no parent directory to watch", target))
        })?;

    let callback_target = target.clone();

    // Called synchronously on notify's own thread for every event.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Some(watch_event) = to_watch_event(&event, &callback_target) {
                    debug!(kind = ?event.kind, "forwarding file change");
                    if events_tx.send(watch_event).is_err() {
                        debug!("watch loop gone; dropping file change");
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "file watch error");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;

    info!(dir = ?dir, file = ?target, "file watcher started");

    Ok(WatcherHandle {
        _inner: watcher,
        dir,
        target,
    })
}
