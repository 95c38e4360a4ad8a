//! Shared file reading utilities for the parsers
//!
//! Reads source files as UTF-8 and turns I/O failures into errors that carry
//! the offending path.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::{Result, SkeletonError};

/// Read a source file into a string.
///
/// Fails with `SkeletonError::Io` if the file cannot be opened or is not
/// valid UTF-8.
pub fn read_source_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SkeletonError::io(path, e))
}

/// Normalize line endings to `\n` and drop a leading byte order mark.
///
/// `\r\n` and lone `\r` both become `\n`, so docstrings and positions never
/// carry carriage returns.
pub fn normalize_source(content: &str) -> Cow<'_, str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Resolve `path` to an absolute canonical path.
///
/// Fails with `SkeletonError::NotFound` if nothing exists at `path`.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(SkeletonError::NotFound {
            path: path.to_path_buf(),
        });
    }
    path.canonicalize().map_err(|e| SkeletonError::io(path, e))
}

/// Final path segment used as a project name.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| root.to_string_lossy().to_string())
}

/// Render the path of a discovered file relative to `root`, or absolute.
///
/// A file root has an empty relative path; its file name is used instead.
pub fn display_path(path: &Path, root: &Path, relative: bool) -> String {
    if !relative {
        return path.to_string_lossy().to_string();
    }
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        _ => path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
    }
}
