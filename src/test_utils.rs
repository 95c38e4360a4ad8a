//! Test utilities for creating temporary source projects.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A small Python module exercising imports, a class and free functions.
pub const SAMPLE_MODULE: &str = r#"import os
from sys import argv


class MyClass:
    """A sample class."""

    limit = 10

    def method1(self, value):
        """Return the value."""
        return value


def function1():
    pass


def function2(a, b=1):
    """Add things."""
    return a + b
"#;

/// A temporary project directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Create a project holding `count` copies of [`SAMPLE_MODULE`].
    pub fn with_modules(count: usize) -> Self {
        let project = Self::new();
        for i in 0..count {
            project.add_file(&format!("pkg/module_{:04}.py", i), SAMPLE_MODULE);
        }
        project
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
