//! Logical path handling
//!
//! A logical path is the stable identity of a content item: forward slashes,
//! relative to the project root, no leading `./` and no trailing slash.
//! Case is preserved exactly as it appears on disk.

use std::path::{Path, PathBuf};

/// Convert a path string to logical form
///
/// `.` and `./` name the root itself and become the empty path.
pub fn to_logical(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_start_matches("./").trim_end_matches('/');
    if trimmed == "." {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// Logical path of `path` relative to `root`
///
/// Returns `None` when `path` is not below `root`.
pub fn relative_logical(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(to_logical(&relative.to_string_lossy()))
}

/// Resolve a logical path against the project root
pub fn resolve(project_root: &Path, logical: &str) -> PathBuf {
    logical
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(project_root.to_path_buf(), |acc, part| acc.join(part))
}

/// Canonicalize the project root without Windows verbatim prefixes
///
/// Falls back to the given path when it cannot be resolved.
pub fn normalize_root(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Last path segment of a logical path
pub fn file_name(logical: &str) -> &str {
    logical.rsplit('/').next().unwrap_or(logical)
}

/// File name without its final extension
pub fn file_stem(logical: &str) -> &str {
    let name = file_name(logical);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(pos) => &name[..pos],
    }
}

/// Final extension without the dot, if any
pub fn extension(logical: &str) -> Option<&str> {
    let name = file_name(logical);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&name[pos + 1..]),
    }
}

/// Parent directory of a logical path (empty at top level)
pub fn parent(logical: &str) -> &str {
    logical.rfind('/').map_or("", |pos| &logical[..pos])
}
