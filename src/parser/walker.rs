//! Source file discovery with directory pruning

use std::collections::BTreeSet;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{Result, SkeletonError};
use crate::language::Language;

/// Files discovered under a root, in walk order.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    /// Names of pruned directories that were actually encountered.
    pub ignored_dirs: BTreeSet<String>,
}

/// Walks a directory tree collecting source files of one language.
///
/// Entries are visited in lexicographic file-name order. Ignored directories
/// are pruned before descent, so nothing beneath them is ever opened.
pub struct SourceWalker {
    language: Language,
    ignore_patterns: Vec<String>,
}

impl SourceWalker {
    pub fn new(language: Language, ignore_patterns: Vec<String>) -> Self {
        Self {
            language,
            ignore_patterns,
        }
    }

    /// Collect candidate files under `root`. A file root is its own only candidate.
    pub fn walk(&self, root: &Path) -> Result<Discovery> {
        let mut discovery = Discovery::default();

        if root.is_file() {
            if self.language.matches_path(root) {
                discovery.files.push(root.to_path_buf());
            }
            return Ok(discovery);
        }

        let entries = read_sorted(root)?;
        self.walk_entries(entries, &mut discovery);
        Ok(discovery)
    }

    fn walk_dir(&self, path: &Path, discovery: &mut Discovery) {
        match read_sorted(path) {
            Ok(entries) => self.walk_entries(entries, discovery),
            Err(e) => tracing::warn!("skipping unreadable directory: {}", e),
        }
    }

    fn walk_entries(&self, entries: Vec<DirEntry>, discovery: &mut Discovery) {
        for entry in entries {
            let entry_path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                let name = entry.file_name().to_string_lossy().to_string();
                if should_ignore_dir(&name, &self.ignore_patterns) {
                    tracing::debug!("pruning ignored directory {}", entry_path.display());
                    discovery.ignored_dirs.insert(name);
                    continue;
                }
                self.walk_dir(&entry_path, discovery);
            } else if file_type.is_symlink() && entry_path.is_dir() {
                // Symlinked directories are not followed to avoid cycles
                continue;
            } else if entry_path.is_file() && self.language.matches_path(&entry_path) {
                discovery.files.push(entry_path);
            }
        }
    }
}

fn read_sorted(path: &Path) -> Result<Vec<DirEntry>> {
    let entries = std::fs::read_dir(path).map_err(|e| SkeletonError::io(path, e))?;
    let mut entries: Vec<_> = entries.filter_map(|e| e.ok()).collect();
    entries.sort_by_key(|a| a.file_name());
    Ok(entries)
}

/// Check whether a directory name matches any ignore entry, literally or as a glob.
pub fn should_ignore_dir(name: &str, ignore_patterns: &[String]) -> bool {
    ignore_patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}
