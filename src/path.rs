//! Pure path logic for the folder namespace.
//!
//! Paths are backslash-delimited. The root path is the single
//! separator; every other canonical path carries no trailing
//! separator. Nothing here touches a store: missing ancestors are a
//! store-layer concern.

use crate::consts::{ROOT_PATH, SEP};
use crate::errors::{Error, Result};

/// Joins a parent path and a relative child path into one canonical
/// path.
///
/// Leading separators of `child` are stripped; exactly one separator
/// ends up between the parts; an empty joined result yields the root
/// path. Fails with `InvalidName` if `child` is non-empty and ends
/// with a separator: a trailing separator is never permitted on a
/// folder target.
pub fn join(parent: &str, child: &str) -> Result<String> {
    if child.ends_with(SEP) {
        return Err(Error::InvalidName);
    }

    let mut path = String::with_capacity(parent.len() + child.len() + 1);
    path.push_str(parent);

    let child = child.trim_start_matches(SEP);
    if !child.is_empty() {
        if !path.ends_with(SEP) {
            path.push(SEP);
        }
        path.push_str(child);
    }

    if path.is_empty() {
        path.push(SEP);
    }

    Ok(path)
}

/// Normalizes a path: the empty path becomes the root path, anything
/// else is returned unchanged. Idempotent.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        ROOT_PATH.to_string()
    } else {
        path.to_string()
    }
}

/// Last segment of a path.
///
/// A path without separators is its own name; a trailing separator is
/// excluded before taking the segment; the root path maps to itself.
pub fn leaf(path: &str) -> &str {
    if path == ROOT_PATH {
        return path;
    }
    let trimmed = path.strip_suffix(SEP).unwrap_or(path);
    match trimmed.rfind(SEP) {
        Some(i) => &trimmed[i + SEP.len_utf8()..],
        None => trimmed,
    }
}

/// Strips leading separators; store paths never carry them.
pub(crate) fn strip_leading(path: &str) -> &str {
    path.trim_start_matches(SEP)
}
