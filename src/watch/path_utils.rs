// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::{Path, PathBuf};

/// Best-effort canonical form of `path`, including paths that don't exist
/// (yet or anymore).
///
/// - An existing path is canonicalized directly.
/// - Otherwise the parent is canonicalized and the file name re-attached,
///   which covers the moment between an editor's delete and rename.
/// - If both fail the path is returned unchanged.
pub fn normalize(path: &Path) -> PathBuf {
    if let Ok(canon) = path.canonicalize() {
        return canon;
    }

    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(parent_canon) = parent.canonicalize() {
            return parent_canon.join(name);
        }
    }

    path.to_path_buf()
}

/// Whether an event path refers to `target`.
///
/// `target` must already be normalized. Event paths are compared as-is
/// first; only on a mismatch are they normalized, since some platforms
/// (notably macOS) report a different absolute prefix for the same
/// directory (e.g. `/private/var/...`).
pub fn is_target(target: &Path, candidate: &Path) -> bool {
    if candidate == target {
        return true;
    }
    if candidate.file_name() != target.file_name() {
        return false;
    }
    normalize(candidate) == target
}
