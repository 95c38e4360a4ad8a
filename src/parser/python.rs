//! Python skeleton extraction using tree-sitter
//!
//! Every node of the syntax tree is visited. Definitions are classified into a
//! small tagged kind and handled with an explicit scope, so direct methods are
//! recognised by the scope they are visited in rather than by looking back up
//! the tree.

use std::path::Path;

use tree_sitter::Node;

use super::config::ParserConfig;
use super::docstring;
use super::{ParseReport, SourceParser, scan_project};
use crate::error::{Result, SkeletonError};
use crate::file_utils::{normalize_source, read_source_file};
use crate::language::Language;
use crate::model::{Class, File, Function, Import, Variable, WILDCARD};

/// Longest snippet of offending source quoted in a syntax error.
const MAX_ERROR_SNIPPET: usize = 40;

pub struct PythonParser {
    config: ParserConfig,
}

impl PythonParser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        // Validate that the grammar loads before any file is read
        let _ = create_ts_parser()?;
        Ok(Self { config })
    }

    /// Extract the skeleton of one file. `display_path` becomes `File::path`.
    pub fn parse_file(&self, path: &Path, display_path: String) -> Result<File> {
        let content = read_source_file(path)?;
        let file = self.parse_source(path, display_path, &content)?;
        tracing::debug!(
            "parsed {} ({} imports, {} classes, {} functions)",
            path.display(),
            file.imports.len(),
            file.classes.len(),
            file.functions.len()
        );
        Ok(file)
    }

    /// Extract the skeleton of already-loaded source text.
    ///
    /// Line endings are normalized first, so CRLF sources yield the same
    /// skeleton as LF ones.
    pub fn parse_source(&self, path: &Path, display_path: String, content: &str) -> Result<File> {
        let content = normalize_source(content);
        let mut parser = create_ts_parser()?;
        let tree = parser
            .parse(content.as_bytes(), None)
            .ok_or_else(|| SkeletonError::Syntax {
                path: path.to_path_buf(),
                line: 1,
                column: 1,
                message: "parser produced no syntax tree".to_string(),
            })?;

        let root = tree.root_node();
        check_syntax(path, root, content.as_bytes())?;

        let mut visitor = Visitor {
            source: content.as_bytes(),
            include_docstrings: self.config.include_docstrings,
            file: File::new(display_path),
        };
        visitor.visit(root, Scope::Module);
        Ok(visitor.file)
    }
}

impl SourceParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan(&self, root: &Path) -> Result<ParseReport> {
        scan_project(Language::Python, &self.config, root, |path, display| {
            self.parse_file(path, display)
        })
    }
}

/// Create a tree-sitter parser loaded with the Python grammar.
fn create_ts_parser() -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .map_err(|e| SkeletonError::Grammar(format!("Failed to set Python language: {}", e)))?;
    Ok(parser)
}

/// Node kinds the visitor acts on.
enum SyntaxKind<'tree> {
    Class(Node<'tree>),
    Function(Node<'tree>),
    Import(Node<'tree>),
    ImportFrom(Node<'tree>),
    Other(Node<'tree>),
}

fn classify(node: Node<'_>) -> SyntaxKind<'_> {
    match node.kind() {
        "class_definition" => SyntaxKind::Class(node),
        "function_definition" => SyntaxKind::Function(node),
        "import_statement" => SyntaxKind::Import(node),
        "import_from_statement" | "future_import_statement" => SyntaxKind::ImportFrom(node),
        _ => SyntaxKind::Other(node),
    }
}

/// Where a node sits relative to the nearest enclosing definition.
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    Module,
    /// Direct statement of the named class's body.
    ClassBody(&'a str),
    /// Anywhere else: inside a function, a compound statement, an expression.
    Nested,
}

struct Visitor<'src> {
    source: &'src [u8],
    include_docstrings: bool,
    file: File,
}

impl<'src> Visitor<'src> {
    fn visit(&mut self, node: Node<'_>, scope: Scope<'_>) {
        match classify(node) {
            SyntaxKind::Class(node) => {
                let class = self.extract_class(node);
                tracing::trace!("class {} ({:?})", class.name, scope);
                let name = class.name.clone();
                self.file.classes.push(class);

                let body = node.child_by_field_name("body");
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if Some(child) == body {
                        self.visit_children(child, Scope::ClassBody(&name));
                    } else {
                        self.visit(child, Scope::Nested);
                    }
                }
            }
            SyntaxKind::Function(node) => {
                let function = self.extract_function(node);
                match scope {
                    // Already recorded in Class::methods
                    Scope::ClassBody(class) => {
                        tracing::trace!("method {}.{}", class, function.name);
                    }
                    Scope::Module | Scope::Nested => {
                        tracing::trace!("function {} ({:?})", function.name, scope);
                        self.file.functions.push(function);
                    }
                }
                self.visit_children(node, Scope::Nested);
            }
            SyntaxKind::Import(node) => {
                let imports = self.extract_import(node);
                self.file.imports.extend(imports);
            }
            SyntaxKind::ImportFrom(node) => {
                let import = self.extract_import_from(node);
                self.file.imports.push(import);
            }
            SyntaxKind::Other(node) => {
                // Decorators do not move a definition out of its class body
                let child_scope = match (node.kind(), scope) {
                    ("decorated_definition", _) => scope,
                    ("module", _) => Scope::Module,
                    _ => Scope::Nested,
                };
                self.visit_children(node, child_scope);
            }
        }
    }

    fn visit_children(&mut self, node: Node<'_>, scope: Scope<'_>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child, scope);
        }
    }

    fn extract_class(&self, node: Node<'_>) -> Class {
        let mut class = Class::new(self.field_text(node, "name"));

        let Some(body) = node.child_by_field_name("body") else {
            return class;
        };

        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            match stmt.kind() {
                "function_definition" => class.methods.push(self.extract_function(stmt)),
                "decorated_definition" => {
                    if let Some(def) = stmt.child_by_field_name("definition") {
                        if def.kind() == "function_definition" {
                            class.methods.push(self.extract_function(def));
                        }
                    }
                }
                "expression_statement" => class.attributes.extend(self.extract_attributes(stmt)),
                _ => {}
            }
        }

        if self.include_docstrings {
            class.docstring = self.extract_docstring(body);
        }
        class
    }

    /// Plain `name = value` assignments; chained targets each count.
    fn extract_attributes(&self, stmt: Node<'_>) -> Vec<Variable> {
        let mut attributes = Vec::new();
        let mut cursor = stmt.walk();
        for expr in stmt.named_children(&mut cursor) {
            let mut current = Some(expr);
            while let Some(assign) = current.filter(|n| n.kind() == "assignment") {
                // Annotated assignments are not plain attributes
                if assign.child_by_field_name("type").is_some() {
                    break;
                }
                if let Some(left) = assign.child_by_field_name("left") {
                    if left.kind() == "identifier" {
                        attributes.push(Variable::named(self.text(left)));
                    }
                }
                current = assign.child_by_field_name("right");
            }
        }
        attributes
    }

    fn extract_function(&self, node: Node<'_>) -> Function {
        let name = self.field_text(node, "name");
        let args = node
            .child_by_field_name("parameters")
            .map(|params| self.positional_parameters(params))
            .unwrap_or_default();
        let docstring = node
            .child_by_field_name("body")
            .and_then(|body| self.extract_docstring(body));

        Function {
            name,
            args,
            docstring,
        }
    }

    /// Names of the standard positional parameters.
    ///
    /// Positional-only parameters (before `/`) are dropped, capture stops at
    /// the first `*` or `*args`, and `**kwargs` is never captured.
    fn positional_parameters(&self, params: Node<'_>) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = params.walk();

        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "identifier" => names.push(self.text(param)),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = param.child_by_field_name("name") {
                        if name.kind() == "identifier" {
                            names.push(self.text(name));
                        }
                    }
                }
                "typed_parameter" => {
                    let mut inner = param.walk();
                    match param.named_children(&mut inner).next().map(|n| (n.kind(), n)) {
                        Some(("identifier", name)) => names.push(self.text(name)),
                        Some(("list_splat_pattern", _)) => break,
                        _ => {}
                    }
                }
                "positional_separator" => names.clear(),
                "keyword_separator" | "list_splat_pattern" => break,
                _ => {}
            }
        }

        names
    }

    /// Value of a leading string-literal statement in `body`, cleaned.
    fn extract_docstring(&self, body: Node<'_>) -> Option<String> {
        let mut cursor = body.walk();
        let first = body
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment")?;
        if first.kind() != "expression_statement" || first.named_child_count() != 1 {
            return None;
        }

        let mut inner = first.walk();
        let expr = first.named_children(&mut inner).next()?;
        let value = match expr.kind() {
            "string" => docstring::literal_value(&self.text(expr))?,
            "concatenated_string" => {
                let mut parts = expr.walk();
                expr.named_children(&mut parts)
                    .filter(|n| n.kind() == "string")
                    .map(|n| docstring::literal_value(&self.text(n)))
                    .collect::<Option<Vec<_>>>()?
                    .concat()
            }
            _ => return None,
        };

        Some(docstring::clean(&value))
    }

    /// `import a, b.c as d` yields one whole-module import per name.
    fn extract_import(&self, node: Node<'_>) -> Vec<Import> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .map(|name| Import::whole_module(self.imported_name(name)))
            .collect()
    }

    /// `from m import x, y as z` yields a single import listing the original names.
    fn extract_import_from(&self, node: Node<'_>) -> Import {
        let module = if node.kind() == "future_import_statement" {
            "__future__".to_string()
        } else {
            node.child_by_field_name("module_name")
                .map(|module| self.module_name(module))
                .unwrap_or_default()
        };

        let mut cursor = node.walk();
        let is_wildcard = node
            .named_children(&mut cursor)
            .any(|n| n.kind() == "wildcard_import");
        if is_wildcard {
            return Import::from_names(module, [WILDCARD]);
        }

        let mut cursor = node.walk();
        let names: Vec<String> = node
            .children_by_field_name("name", &mut cursor)
            .map(|name| self.imported_name(name))
            .collect();
        Import::from_names(module, names)
    }

    /// Module of a `from` import; relative dots are dropped.
    fn module_name(&self, node: Node<'_>) -> String {
        if node.kind() != "relative_import" {
            return self.dotted_name(node);
        }
        let mut cursor = node.walk();
        let dotted = node
            .named_children(&mut cursor)
            .find(|n| n.kind() == "dotted_name");
        dotted.map(|n| self.dotted_name(n)).unwrap_or_default()
    }

    /// The imported name itself, never its alias.
    fn imported_name(&self, node: Node<'_>) -> String {
        if node.kind() == "aliased_import" {
            if let Some(name) = node.child_by_field_name("name") {
                return self.dotted_name(name);
            }
        }
        self.dotted_name(node)
    }

    fn dotted_name(&self, node: Node<'_>) -> String {
        if node.kind() != "dotted_name" {
            return self.text(node);
        }
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter(|n| n.kind() == "identifier")
            .map(|n| self.text(n))
            .collect::<Vec<_>>()
            .join(".")
    }

    fn field_text(&self, node: Node<'_>, field: &str) -> String {
        node.child_by_field_name(field)
            .map(|n| self.text(n))
            .unwrap_or_default()
    }

    fn text(&self, node: Node<'_>) -> String {
        get_node_text(node, self.source).to_string()
    }
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
fn get_node_text<'a>(node: Node<'_>, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            e
        );
        ""
    })
}

/// Reject sources that tree-sitter recovers from but Python does not accept.
///
/// Besides error and missing nodes, Python 2 `print`/`exec` statements and
/// statements that do not line up with their siblings are syntax errors.
fn check_syntax(path: &Path, root: Node<'_>, source: &[u8]) -> Result<()> {
    let (line, column, message) = match first_invalid(root, source) {
        Some((node, message)) => {
            let position = node.start_position();
            (position.row + 1, position.column + 1, message)
        }
        None if root.has_error() => (1, 1, "invalid syntax".to_string()),
        None => return Ok(()),
    };

    Err(SkeletonError::Syntax {
        path: path.to_path_buf(),
        line,
        column,
        message,
    })
}

/// First invalid node in document order, with the reason it is invalid.
fn first_invalid<'tree>(node: Node<'tree>, source: &[u8]) -> Option<(Node<'tree>, String)> {
    if node.is_missing() {
        return Some((node, format!("missing `{}`", node.kind())));
    }
    if node.is_error() {
        return Some((node, unexpected(node, source)));
    }
    if matches!(node.kind(), "print_statement" | "exec_statement") {
        let keyword = node.kind().trim_end_matches("_statement");
        return Some((node, format!("missing parentheses in call to '{}'", keyword)));
    }

    let misaligned = match node.kind() {
        "module" | "block" => misaligned_statement(node),
        _ => None,
    };

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    for child in children {
        if let Some((stmt, message)) = misaligned.filter(|(stmt, _)| *stmt == child) {
            return Some((stmt, message.to_string()));
        }
        if let Some(found) = first_invalid(child, source) {
            return Some(found);
        }
    }
    None
}

/// First statement of a module or block that starts a line at the wrong column.
///
/// Module statements start at column 0; block statements line up with the
/// first statement of the block. Statements sharing a line after `;` are not
/// checked.
fn misaligned_statement(node: Node<'_>) -> Option<(Node<'_>, &'static str)> {
    let mut expected = (node.kind() == "module").then_some(0);
    let mut previous_end_row: Option<usize> = None;

    let mut cursor = node.walk();
    for stmt in node
        .named_children(&mut cursor)
        .filter(|n| !matches!(n.kind(), "comment" | "line_continuation"))
    {
        let start = stmt.start_position();
        let starts_line = previous_end_row.is_none_or(|row| start.row > row);
        previous_end_row = Some(stmt.end_position().row);
        if !starts_line {
            continue;
        }

        match expected {
            None => expected = Some(start.column),
            Some(column) if start.column > column => return Some((stmt, "unexpected indent")),
            Some(column) if start.column < column => {
                return Some((stmt, "unindent does not match any outer indentation level"));
            }
            Some(_) => {}
        }
    }
    None
}

fn unexpected(node: Node<'_>, source: &[u8]) -> String {
    let snippet: String = get_node_text(node, source)
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .take(MAX_ERROR_SNIPPET)
        .collect();
    if snippet.is_empty() {
        "invalid syntax".to_string()
    } else {
        format!("unexpected `{}`", snippet)
    }
}
