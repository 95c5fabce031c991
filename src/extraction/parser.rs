//! Tree-sitter based source parser for TypeScript/JSX-flavored modules.
//!
//! Every file is parsed with the TSX grammar, which accepts TypeScript type
//! syntax and JSX alike; plain JavaScript parses the same way.

use std::fs;
use std::path::{Path, PathBuf};

use tree_sitter::{Node as TsNode, Parser, Tree};

use crate::errors::{BundleError, Result};

/// Longest excerpt of offending source quoted in a syntax error.
const ERROR_EXCERPT_LEN: usize = 40;

/// A parsed source file. Owns its text and its syntax tree; the tree is
/// only ever traversed.
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

impl ParsedFile {
    /// Returns the root `program` node.
    pub fn root(&self) -> TsNode<'_> {
        self.tree.root_node()
    }

    /// Returns the source text covered by a node of this file's tree.
    pub fn text(&self, node: TsNode<'_>) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Reusable parser with the TSX grammar loaded.
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    /// Creates a parser with the TSX grammar.
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|e| BundleError::Grammar {
                message: format!("failed to load TSX grammar: {e}"),
            })?;
        Ok(Self { parser })
    }

    /// Reads a file and parses it as a module.
    ///
    /// Fails with `BundleError::Read` if the file cannot be read and with
    /// `BundleError::Syntax` if the tree contains any error or missing node.
    pub fn parse_file(&mut self, path: &Path) -> Result<ParsedFile> {
        let source = fs::read_to_string(path).map_err(|e| BundleError::Read {
            message: e.to_string(),
            path: path.display().to_string(),
        })?;
        self.parse_source(path, source)
    }

    /// Parses already-loaded text as if it had been read from `path`.
    pub fn parse_source(&mut self, path: &Path, source: String) -> Result<ParsedFile> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| BundleError::Syntax {
                message: "parser produced no tree".to_string(),
                path: path.display().to_string(),
                line: 0,
                column: 0,
            })?;

        if let Some(error) = first_error(tree.root_node()) {
            let position = error.start_position();
            let message = if error.is_missing() {
                format!("missing `{}`", error.kind())
            } else {
                format!("unexpected `{}`", excerpt(&source, error))
            };
            return Err(BundleError::Syntax {
                message,
                path: path.display().to_string(),
                line: position.row as u32 + 1,
                column: position.column as u32 + 1,
            });
        }

        Ok(ParsedFile {
            path: path.to_path_buf(),
            source,
            tree,
        })
    }
}

/// Reads and parses a single file with a fresh parser.
pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    SourceParser::new()?.parse_file(path)
}

/// Returns the first error or missing node in document order.
fn first_error(node: TsNode<'_>) -> Option<TsNode<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error).or(Some(node))
}

/// First line of a node's text, shortened for error messages.
fn excerpt(source: &str, node: TsNode<'_>) -> String {
    let text = source.get(node.byte_range()).unwrap_or("");
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > ERROR_EXCERPT_LEN {
        let short: String = line.chars().take(ERROR_EXCERPT_LEN).collect();
        format!("{short}...")
    } else {
        line.to_string()
    }
}
