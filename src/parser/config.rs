//! Configuration types for source parsers

/// Directory names that are never descended into, whatever the configuration.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[".venv", "venv", ".env", "env"];

/// What to do when a discovered file does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyntaxErrorPolicy {
    /// Fail the whole scan on the first unparseable file (in walk order).
    #[default]
    Abort,
    /// Drop the file, record it in the report and keep scanning.
    Skip,
}

/// Configuration for parsing a project tree.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Extra directory names (or glob patterns) to prune, on top of
    /// `DEFAULT_IGNORE_DIRS`.
    pub extra_ignore: Vec<String>,
    /// Report `File::path` relative to the project root instead of absolute.
    pub use_relative_paths: bool,
    /// Capture class docstrings. Function docstrings are always captured.
    pub include_docstrings: bool,
    pub on_syntax_error: SyntaxErrorPolicy,
    /// Number of parallel workers for per-file extraction.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential (no parallelism)
    /// N = use N worker threads
    pub jobs: usize,
}

impl ParserConfig {
    /// All ignore entries: the built-in names followed by `extra_ignore`.
    pub fn ignore_patterns(&self) -> Vec<String> {
        DEFAULT_IGNORE_DIRS
            .iter()
            .map(|s| s.to_string())
            .chain(self.extra_ignore.iter().cloned())
            .collect()
    }
}
