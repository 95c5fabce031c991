use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, Serializer};

/// Marker recorded for a default export, whatever is being defaulted.
pub const DEFAULT_EXPORT: &str = "default";

/// An exported name as seen by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExportName {
    /// `export function foo() {}`, `export class Foo {}`, ...
    Named(String),
    /// Any `export default ...` statement.
    Default,
}

impl ExportName {
    /// Returns the exported name, or `"default"` for a default export.
    pub fn as_str(&self) -> &str {
        match self {
            ExportName::Named(name) => name,
            ExportName::Default => DEFAULT_EXPORT,
        }
    }
}

impl fmt::Display for ExportName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ExportName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Import/export surface of one parsed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileAnalysis {
    /// Raw import specifiers, in declaration order.
    pub imports: Vec<String>,
    /// Exported names, in declaration order.
    pub exports: Vec<ExportName>,
    /// Specifiers that resolved to a file on disk, in specifier order.
    pub resolved_imports: Vec<PathBuf>,
}

/// Kinds of pieces the export slicer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPieceKind {
    /// The function declared by `export default function ...`.
    DefaultFunction,
    /// The top-level declaration named by `export default <identifier>;`.
    DefaultTarget,
    /// The `export default <identifier>;` statement itself. Always follows
    /// any `DefaultTarget` pieces, so the slice carries both.
    DefaultStatement,
    /// Any other `export default ...` statement, verbatim.
    DefaultOther,
    /// The declaration attached to a named export, without `export`.
    NamedDeclaration,
}

impl ExportPieceKind {
    /// Returns the string representation of this piece kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportPieceKind::DefaultFunction => "default_function",
            ExportPieceKind::DefaultTarget => "default_target",
            ExportPieceKind::DefaultStatement => "default_statement",
            ExportPieceKind::DefaultOther => "default_other",
            ExportPieceKind::NamedDeclaration => "named_declaration",
        }
    }
}

/// One piece of source text in an export slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPiece {
    pub kind: ExportPieceKind,
    pub text: String,
    /// 1-based line the piece starts on.
    pub line: u32,
}

/// What to do when a dependency cannot be read or parsed while the
/// collector expands it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyErrorPolicy {
    /// Keep the dependency listed, do not expand it, report a diagnostic.
    #[default]
    Skip,
    /// Stop the whole collection with the error.
    Abort,
}

/// Output format for bundles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parses a format name, returning `None` for unrecognized values.
    pub fn from_name(name: &str) -> Option<OutputFormat> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// The export slice of one dependency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencySlice {
    pub path: PathBuf,
    pub exports: String,
}

/// A dependency left out of a bundle because it failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedDependency {
    pub path: PathBuf,
    pub reason: String,
}

/// Export slices of a changed file and its direct local dependencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextBundle {
    pub main_file: PathBuf,
    pub changed_logic: String,
    /// Sliced dependencies in collection order. Slices may be empty.
    pub dependencies: Vec<DependencySlice>,
    pub skipped: Vec<SkippedDependency>,
}

impl ContextBundle {
    /// Dependency slices that contribute text, in collection order.
    pub fn non_empty_dependencies(&self) -> impl Iterator<Item = &DependencySlice> {
        self.dependencies.iter().filter(|d| !d.exports.is_empty())
    }
}
