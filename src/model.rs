//! Language-agnostic skeleton model
//!
//! A parser builds one [`Project`] per invocation and an exporter renders it.
//! Field order matches the JSON document layout, so serialization keeps the
//! schema order without extra attributes.

use serde::{Deserialize, Serialize};

/// Marker for `Import::names` meaning the whole module was imported.
pub const WILDCARD: &str = "*";

/// One statement-level import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub module: String,
    pub names: Vec<String>,
}

impl Import {
    /// `import module` - the whole module, no selective names.
    pub fn whole_module(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            names: vec![WILDCARD.to_string()],
        }
    }

    /// `from module import a, b`
    pub fn from_names<I, S>(module: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            module: module.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.names.len() == 1 && self.names[0] == WILDCARD
    }
}

/// A class-level attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub default: Option<String>,
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: None,
            default: None,
        }
    }
}

/// A free function or a method. Containment is the only distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub args: Vec<String>,
    pub docstring: Option<String>,
}

impl Function {
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            docstring: None,
        }
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub docstring: Option<String>,
    pub attributes: Vec<Variable>,
    /// Functions declared directly in the class body only.
    pub methods: Vec<Function>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }
}

/// Structural summary of one source file.
///
/// `classes` and `functions` are flat: they hold every definition found
/// anywhere in the file, nested ones included. Direct methods live only in
/// their class and are never repeated in `functions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub path: String,
    pub imports: Vec<Import>,
    pub classes: Vec<Class>,
    pub functions: Vec<Function>,
}

impl File {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            imports: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.classes.is_empty() && self.functions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub files: Vec<File>,
}

impl Project {
    pub fn new(name: impl Into<String>, files: Vec<File>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_module_import_is_wildcard() {
        let imp = Import::whole_module("os");
        assert_eq!(imp.module, "os");
        assert_eq!(imp.names, vec!["*"]);
        assert!(imp.is_wildcard());
    }

    #[test]
    fn test_selective_import_is_not_wildcard() {
        let imp = Import::from_names("sys", ["argv", "path"]);
        assert!(!imp.is_wildcard());
        assert_eq!(imp.names, vec!["argv", "path"]);
    }

    #[test]
    fn test_variable_serializes_type_key() {
        let var = Variable {
            name: "attr".into(),
            type_: Some("int".into()),
            default: None,
        };
        let value = serde_json::to_value(&var).unwrap();
        assert_eq!(value["type"], "int");
        assert!(value["default"].is_null());
        assert!(value.get("type_").is_none());
    }

    #[test]
    fn test_empty_file() {
        let file = File::new("empty.py");
        assert!(file.is_empty());
    }
}
