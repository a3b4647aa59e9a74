// src/watch/event_handler.rs

//! Turning raw `notify` events into watch-loop events.

use std::path::{Path, PathBuf};

use notify::event::ModifyKind;
use notify::{Event, EventKind};

use crate::engine::WatchEvent;
use crate::watch::path_utils::is_target;

/// Whether an event kind can change the file's contents.
///
/// Create and rename are included for editors that save by writing a temp
/// file and renaming it over the original. Metadata-only changes, access and
/// removal are not.
pub fn is_qualifying_kind(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_) | ModifyKind::Any) => true,
        _ => false,
    }
}

/// Map a notify event to a [`WatchEvent`] if it concerns `target`.
///
/// `target` must be normalized (see [`crate::watch::path_utils::normalize`]).
pub fn to_watch_event(event: &Event, target: &Path) -> Option<WatchEvent> {
    if !is_qualifying_kind(&event.kind) {
        return None;
    }

    event
        .paths
        .iter()
        .find(|path| is_target(target, path))
        .map(|path| WatchEvent::FileChanged {
            path: PathBuf::from(path),
        })
}
