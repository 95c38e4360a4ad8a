//! Markdown outline output
//!
//! Renders a project as a readable outline: one heading per file, then
//! bulleted imports, classes (docstring, attributes, methods) and functions.
//! Empty sections are left out entirely.

use crate::model::{Class, File, Function, Import, Project, Variable, WILDCARD};

use super::{Exporter, Format};

const DOC_INDENT: &str = "    ";
const METHOD_DOC_INDENT: &str = "        ";

/// Markdown outline exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn format(&self) -> Format {
        Format::Markdown
    }

    fn export(&self, project: &Project) -> String {
        let mut out = Outline::default();
        out.line(format!("# 📁 {}\n", project.name));

        for file in &project.files {
            out.file(file);
        }

        out.finish()
    }
}

/// Lines of the outline, joined with newlines at the end.
#[derive(Default)]
struct Outline {
    lines: Vec<String>,
}

impl Outline {
    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn file(&mut self, file: &File) {
        self.line(format!("## File: `{}`\n", file.path));

        if !file.imports.is_empty() {
            self.line("**Imports:**");
            for import in &file.imports {
                self.line(format!("- `{}` ({})", import.module, import_names(import)));
            }
        }

        if !file.classes.is_empty() {
            self.line("\n**Classes:**");
            for class in &file.classes {
                self.class(class);
            }
        }

        if !file.functions.is_empty() {
            self.line("\n**Functions:**");
            for function in &file.functions {
                self.line(format!("- `{}`", signature(function)));
                if let Some(doc) = non_empty(&function.docstring) {
                    self.line("  - Docstring:");
                    self.docstring(doc, DOC_INDENT);
                }
            }
        }

        self.line("\n---\n");
    }

    fn class(&mut self, class: &Class) {
        self.line(format!("- `{}`", class.name));

        if let Some(doc) = non_empty(&class.docstring) {
            self.line("  - Docstring:");
            self.docstring(doc, DOC_INDENT);
        }

        if !class.attributes.is_empty() {
            self.line("  - Attributes:");
            for attr in &class.attributes {
                self.line(format!("    - {}", attribute(attr)));
            }
        }

        if !class.methods.is_empty() {
            self.line("  - Methods:");
            for method in &class.methods {
                self.line(format!("    - `{}`", signature(method)));
                if let Some(doc) = non_empty(&method.docstring) {
                    self.line("      - Docstring:");
                    self.docstring(doc, METHOD_DOC_INDENT);
                }
            }
        }
    }

    /// Docstring lines re-indented; blank lines stay blank.
    fn docstring(&mut self, doc: &str, indent: &str) {
        for line in doc.trim().lines() {
            if line.trim().is_empty() {
                self.line("");
            } else {
                self.line(format!("{}{}", indent, line));
            }
        }
    }
}

fn import_names(import: &Import) -> String {
    if import.names.is_empty() || import.is_wildcard() {
        WILDCARD.to_string()
    } else {
        import.names.join(", ")
    }
}

fn signature(function: &Function) -> String {
    format!("{}({})", function.name, function.args.join(", "))
}

fn attribute(attr: &Variable) -> String {
    let mut rendered = format!("`{}`", attr.name);
    if let Some(ty) = non_empty(&attr.type_) {
        rendered.push_str(": ");
        rendered.push_str(ty);
    }
    if let Some(default) = non_empty(&attr.default) {
        rendered.push_str(" = ");
        rendered.push_str(default);
    }
    rendered
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
