//! Extended-length path handling.
//!
//! Windows caps conventional paths at 260 characters; routing a path
//! through the `\\?\` (local) or `\\?\UNC\` (network) convention lifts the
//! cap. The rewrite rules are pure string work so they stay testable on
//! every platform; [`for_enumeration`] is the seam that decides whether
//! the host actually wants the prefix.

use std::path::{Path, PathBuf};

/// Extended-length marker for local paths.
pub const EXTENDED_PREFIX: &str = r"\\?\";

/// Extended-length marker that replaces the `\\` network-path lead-in.
pub const EXTENDED_UNC_PREFIX: &str = r"\\?\UNC\";

/// Rewrite `path` into its extended-length form.
///
/// A path that already carries the marker is returned unchanged. Malformed
/// input is not rejected here; it simply produces an enumeration request
/// that will fail downstream.
pub fn extended_length(path: &str) -> String {
    if path.starts_with(EXTENDED_PREFIX) {
        return path.to_string();
    }
    if let Some(rest) = path.strip_prefix(r"\\") {
        return format!("{EXTENDED_UNC_PREFIX}{rest}");
    }
    format!("{EXTENDED_PREFIX}{path}")
}

/// Extended-length path plus a trailing `*`: the argument a find-first
/// style host call expects for "list the children of this directory".
pub fn search_spec(path: &str) -> String {
    let prefixed = extended_length(path);
    if prefixed.ends_with('\\') {
        format!("{prefixed}*")
    } else {
        format!("{prefixed}\\*")
    }
}

/// The path actually handed to the directory-listing call.
///
/// Extended-length paths must be absolute, so relative roots are resolved
/// first. Only Windows honors the prefix; other hosts take the path as-is.
#[cfg(windows)]
pub fn for_enumeration(dir: &Path) -> PathBuf {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    PathBuf::from(extended_length(&absolute.to_string_lossy()))
}

#[cfg(not(windows))]
pub fn for_enumeration(dir: &Path) -> PathBuf {
    dir.to_path_buf()
}
