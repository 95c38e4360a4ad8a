//! Skeleton exporters
//!
//! An exporter renders a parsed [`Project`] as text. Exporters are stateless,
//! total and deterministic: the same project always renders to the same bytes.
//!
//! # Module Structure
//!
//! - `markdown` - Readable Markdown outline
//! - `json` - JSON document mirroring the model

pub mod json;
pub mod markdown;

use std::fmt;

pub use json::{JsonExporter, from_json};
pub use markdown::MarkdownExporter;

use crate::error::{Result, SkeletonError};
use crate::model::Project;

/// Renders a project in one output format.
pub trait Exporter: Send + Sync {
    fn format(&self) -> Format;

    fn export(&self, project: &Project) -> String;
}

/// Output formats with an exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    Json,
}

impl Format {
    /// Every supported format, in registry order.
    pub const ALL: &'static [Format] = &[Format::Markdown, Format::Json];

    /// Look up a format by its command-line identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use skeleton::output::Format;
    ///
    /// assert_eq!(Format::from_id("markdown").unwrap(), Format::Markdown);
    /// assert_eq!(Format::from_id("md").unwrap(), Format::Markdown);
    /// assert_eq!(Format::from_id("JSON").unwrap(), Format::Json);
    /// assert!(Format::from_id("yaml").is_err());
    /// ```
    pub fn from_id(id: &str) -> Result<Self> {
        match id.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(Format::Markdown),
            "json" => Ok(Format::Json),
            _ => Err(SkeletonError::UnsupportedFormat(id.to_string())),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Json => "json",
        }
    }

    pub fn exporter(&self) -> Box<dyn Exporter> {
        match self {
            Format::Markdown => Box::new(MarkdownExporter),
            Format::Json => Box::new(JsonExporter),
        }
    }

    /// Render `project` with this format's exporter.
    pub fn export(&self, project: &Project) -> String {
        match self {
            Format::Markdown => MarkdownExporter.export(project),
            Format::Json => JsonExporter.export(project),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{File, Function, Import};

    fn project() -> Project {
        let mut file = File::new("main.py");
        file.imports.push(Import::whole_module("os"));
        file.functions.push(Function::new("main", Vec::<String>::new()));
        Project::new("demo", vec![file])
    }

    #[test]
    fn test_from_id_known_formats() {
        assert_eq!(Format::from_id("markdown").unwrap(), Format::Markdown);
        assert_eq!(Format::from_id("Markdown").unwrap(), Format::Markdown);
        assert_eq!(Format::from_id("json").unwrap(), Format::Json);
    }

    #[test]
    fn test_from_id_unknown_format() {
        let err = Format::from_id("xml").unwrap_err();
        assert!(matches!(err, SkeletonError::UnsupportedFormat(ref id) if id == "xml"));
    }

    #[test]
    fn test_id_round_trips_through_registry() {
        for format in Format::ALL {
            assert_eq!(Format::from_id(format.id()).unwrap(), *format);
            assert_eq!(format.exporter().format(), *format);
        }
    }

    #[test]
    fn test_dispatch_matches_exporter() {
        let project = project();
        for format in Format::ALL {
            assert_eq!(format.export(&project), format.exporter().export(&project));
        }
    }
}
