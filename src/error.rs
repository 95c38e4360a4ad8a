//! Error types for skeleton extraction
//!
//! A single error enum covers the whole pipeline. Parsing surfaces `NotFound`,
//! `Syntax` and `Io`; the registries surface `UnsupportedLanguage` and
//! `UnsupportedFormat`. Exporters never fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or selecting a skeleton pipeline.
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// The input path does not exist.
    #[error("{} doesn't exist", path.display())]
    NotFound { path: PathBuf },

    /// A discovered source file could not be parsed into a syntax tree.
    #[error("syntax error in {} at line {line}, column {column}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        /// 1-based line of the first offending node
        line: usize,
        /// 1-based column of the first offending node
        column: usize,
        message: String,
    },

    /// A file or directory could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parser for '{0}' not available.")]
    UnsupportedLanguage(String),

    #[error("Exporter for '{0}' not available.")]
    UnsupportedFormat(String),

    /// The tree-sitter grammar could not be loaded into a parser.
    #[error("failed to load grammar: {0}")]
    Grammar(String),
}

impl SkeletonError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

pub type Result<T> = std::result::Result<T, SkeletonError>;
