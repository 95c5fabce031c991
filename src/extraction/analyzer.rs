//! Import/export surface extraction.
//!
//! Walks the top-level statements of a parsed module once, collecting
//! import specifiers and exported names, then resolves the specifiers.

use tree_sitter::Node as TsNode;

use super::parser::ParsedFile;
use crate::resolution::resolve_import;
use crate::types::{ExportName, FileAnalysis};

/// Analyzes a parsed file; specifiers resolve relative to `parsed.path`.
///
/// Unresolved specifiers are dropped from `resolved_imports` without a
/// placeholder, so that list can be shorter than `imports`.
pub fn analyze_file(parsed: &ParsedFile) -> FileAnalysis {
    let mut imports = Vec::new();
    let mut exports = Vec::new();

    let root = parsed.root();
    let mut cursor = root.walk();
    for node in root.children(&mut cursor) {
        match node.kind() {
            "import_statement" => {
                if let Some(specifier) = import_specifier(parsed, node) {
                    imports.push(specifier);
                }
            }
            "export_statement" => {
                if let Some(name) = export_name(parsed, node) {
                    exports.push(name);
                }
            }
            _ => {}
        }
    }

    let resolved_imports = imports
        .iter()
        .filter_map(|specifier| resolve_import(&parsed.path, specifier))
        .collect();

    FileAnalysis {
        imports,
        exports,
        resolved_imports,
    }
}

/// Returns the unquoted source string of an import statement.
///
/// `import x = require("...")` has no `source` field and yields `None`.
fn import_specifier(parsed: &ParsedFile, node: TsNode<'_>) -> Option<String> {
    let source = node.child_by_field_name("source")?;
    Some(unquote(parsed.text(source)).to_string())
}

/// Returns the name an export statement contributes, if any.
fn export_name(parsed: &ParsedFile, node: TsNode<'_>) -> Option<ExportName> {
    if is_default_export(node) {
        return Some(ExportName::Default);
    }
    let declaration = node.child_by_field_name("declaration")?;
    declared_name(parsed, declaration).map(ExportName::Named)
}

/// Returns `true` if the export statement carries the `default` keyword.
pub(crate) fn is_default_export(node: TsNode<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && child.kind() == "default");
    found
}

/// Name of a declaration that carries one directly.
///
/// Variable declarations have no single name of their own and contribute
/// nothing; `declare function f(): void` is looked through to `f`.
fn declared_name(parsed: &ParsedFile, declaration: TsNode<'_>) -> Option<String> {
    if let Some(name) = declaration.child_by_field_name("name") {
        return Some(parsed.text(name).to_string());
    }
    if declaration.kind() == "ambient_declaration" {
        let mut cursor = declaration.walk();
        let inner = declaration.named_children(&mut cursor).next();
        return inner.and_then(|inner| declared_name(parsed, inner));
    }
    None
}

/// Strips one layer of matching quotes from a string literal.
fn unquote(literal: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = literal
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    literal
}
