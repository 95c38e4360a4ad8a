//! Skeleton - generate a readable structural summary of a source project
//!
//! The pipeline is parse → model → render: a [`SourceParser`] walks a project
//! tree into a [`Project`], and an [`Exporter`] renders it as Markdown or JSON.

pub mod error;
pub mod file_utils;
pub mod language;
pub mod model;
pub mod output;
pub mod parser;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, SkeletonError};
pub use language::Language;
pub use model::{Class, File, Function, Import, Project, Variable, WILDCARD};
pub use output::{Exporter, Format, JsonExporter, MarkdownExporter};
pub use parser::{
    ParseReport, ParserConfig, PythonParser, SkippedFile, SourceParser, SyntaxErrorPolicy,
    create_parser,
};
