//! Source parsers
//!
//! A parser walks a project tree, extracts each source file into the
//! skeleton model and returns the assembled [`Project`].
//!
//! # Module Structure
//!
//! - `config` - Parser configuration and syntax error policy
//! - `walker` - Directory walking with ignored-directory pruning
//! - `python` - tree-sitter based Python extraction
//! - `docstring` - String literal decoding and docstring cleanup

pub mod config;
pub mod docstring;
pub mod python;
pub mod walker;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use config::{DEFAULT_IGNORE_DIRS, ParserConfig, SyntaxErrorPolicy};
pub use python::PythonParser;
pub use walker::SourceWalker;

use crate::error::{Result, SkeletonError};
use crate::file_utils::{display_path, project_name, resolve_root};
use crate::language::Language;
use crate::model::{File, Project};

/// A file dropped under `SyntaxErrorPolicy::Skip`.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: SkeletonError,
}

/// The parsed project plus diagnostics for the caller to report.
#[derive(Debug)]
pub struct ParseReport {
    pub project: Project,
    /// Ignored directory names that were encountered (and pruned).
    pub ignored_dirs: BTreeSet<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Parses a file or source folder into a [`Project`].
pub trait SourceParser: Send + Sync {
    fn language(&self) -> Language;

    /// Parse `root` and keep the walk diagnostics.
    fn scan(&self, root: &Path) -> Result<ParseReport>;

    /// Parse `root` into a project.
    ///
    /// Fails with `NotFound` if `root` does not exist and with `Syntax` if a
    /// discovered file does not parse (unless configured to skip it).
    fn parse(&self, root: &Path) -> Result<Project> {
        self.scan(root).map(|report| report.project)
    }
}

/// Create a parser for the given language.
///
/// # Example
///
/// ```rust,ignore
/// let parser = create_parser(Language::Python, ParserConfig::default())?;
/// let project = parser.parse(Path::new("src"))?;
/// ```
pub fn create_parser(language: Language, config: ParserConfig) -> Result<Box<dyn SourceParser>> {
    match language {
        Language::Python => Ok(Box::new(PythonParser::new(config)?)),
    }
}

/// Walk `root` and extract every discovered file with `extract`.
///
/// Extraction may run in parallel; results are always collected in walk
/// order, and under `Abort` the first failure in walk order is returned.
pub(crate) fn scan_project<F>(
    language: Language,
    config: &ParserConfig,
    root: &Path,
    extract: F,
) -> Result<ParseReport>
where
    F: Fn(&Path, String) -> Result<File> + Sync,
{
    let root = resolve_root(root)?;
    let name = project_name(&root);

    let walker = SourceWalker::new(language, config.ignore_patterns());
    let discovery = walker.walk(&root)?;

    let candidates: Vec<(PathBuf, String)> = discovery
        .files
        .into_iter()
        .map(|path| {
            let shown = display_path(&path, &root, config.use_relative_paths);
            (path, shown)
        })
        .collect();

    let results = extract_all(&candidates, config.jobs, &extract);

    let mut files = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for ((path, _), result) in candidates.iter().zip(results) {
        match result {
            Ok(file) => files.push(file),
            Err(error) if error.is_syntax() && config.on_syntax_error == SyntaxErrorPolicy::Skip => {
                tracing::debug!("skipping {}: {}", path.display(), error);
                skipped.push(SkippedFile {
                    path: path.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    tracing::info!(
        "parsed {} {} files in {} ({} skipped, {} ignored directories)",
        files.len(),
        language,
        root.display(),
        skipped.len(),
        discovery.ignored_dirs.len()
    );

    Ok(ParseReport {
        project: Project::new(name, files),
        ignored_dirs: discovery.ignored_dirs,
        skipped,
    })
}

/// Run `extract` over every candidate, preserving candidate order.
fn extract_all<F>(candidates: &[(PathBuf, String)], workers: usize, extract: &F) -> Vec<Result<File>>
where
    F: Fn(&Path, String) -> Result<File> + Sync,
{
    let run_parallel = || -> Vec<Result<File>> {
        candidates
            .par_iter()
            .map(|(path, shown)| extract(path, shown.clone()))
            .collect()
    };

    match workers {
        // Auto-detect: use rayon's default thread pool
        0 => run_parallel(),
        1 => candidates
            .iter()
            .map(|(path, shown)| extract(path, shown.clone()))
            .collect(),
        n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(run_parallel),
            Err(e) => {
                // Fall back to rayon's global pool if custom pool creation fails
                tracing::debug!("falling back to global thread pool: {}", e);
                run_parallel()
            }
        },
    }
}
