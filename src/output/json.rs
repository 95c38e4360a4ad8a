//! JSON output
//!
//! The document mirrors the skeleton model field for field. Every key is
//! always present and absent values are written as `null`, so the output
//! reads back into an equal [`Project`].

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::model::Project;

use super::{Exporter, Format};

const INDENT: &[u8] = b"    ";

/// Structured-data exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn format(&self) -> Format {
        Format::Json
    }

    fn export(&self, project: &Project) -> String {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        // The model holds only strings, sequences and options, which always serialize
        project
            .serialize(&mut ser)
            .expect("skeleton model serializes to JSON");
        String::from_utf8(buf).expect("serde_json writes UTF-8")
    }
}

/// Read a JSON document produced by [`JsonExporter`] back into a project.
pub fn from_json(json: &str) -> serde_json::Result<Project> {
    serde_json::from_str(json)
}
