//! Export slicing.
//!
//! Produces the source text of only the exported top-level declarations of
//! a parsed file, in document order.

use std::collections::HashMap;

use tree_sitter::Node as TsNode;

use super::analyzer::is_default_export;
use super::parser::ParsedFile;
use crate::types::{ExportPiece, ExportPieceKind};

/// Separator placed between pieces of a slice.
pub const PIECE_SEPARATOR: &str = "\n\n";

/// Node kinds of a default-exported value that count as a function.
const FUNCTION_KINDS: [&str; 5] = [
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "function",
    "generator_function",
];

/// Returns the concatenated text of every export piece, separated by a
/// blank line. A file without top-level exports yields an empty string.
pub fn slice_exports(parsed: &ParsedFile) -> String {
    export_pieces(parsed)
        .into_iter()
        .map(|piece| piece.text)
        .collect::<Vec<_>>()
        .join(PIECE_SEPARATOR)
}

/// Returns the export slice as structured pieces.
///
/// `export default <identifier>;` yields the underlying top-level
/// declaration(s) of that name as `DefaultTarget` pieces followed by the
/// statement itself as `DefaultStatement`. Both are kept on purpose.
pub fn export_pieces(parsed: &ParsedFile) -> Vec<ExportPiece> {
    let root = parsed.root();
    let declarations = index_declarations(parsed, root);

    let mut pieces = Vec::new();
    let mut cursor = root.walk();
    for node in root.children(&mut cursor) {
        if node.kind() != "export_statement" {
            continue;
        }
        if is_default_export(node) {
            slice_default_export(parsed, node, &declarations, &mut pieces);
        } else if let Some(declaration) = node.child_by_field_name("declaration") {
            pieces.push(piece(parsed, ExportPieceKind::NamedDeclaration, declaration));
        }
    }
    pieces
}

fn slice_default_export<'t>(
    parsed: &ParsedFile,
    node: TsNode<'t>,
    declarations: &HashMap<String, Vec<TsNode<'t>>>,
    pieces: &mut Vec<ExportPiece>,
) {
    let exported = node
        .child_by_field_name("declaration")
        .or_else(|| node.child_by_field_name("value"));

    match exported {
        Some(value) if FUNCTION_KINDS.contains(&value.kind()) => {
            pieces.push(piece(parsed, ExportPieceKind::DefaultFunction, value));
        }
        Some(value) if value.kind() == "identifier" => {
            let name = parsed.text(value);
            for target in declarations.get(name).into_iter().flatten() {
                pieces.push(piece(parsed, ExportPieceKind::DefaultTarget, *target));
            }
            pieces.push(piece(parsed, ExportPieceKind::DefaultStatement, node));
        }
        _ => pieces.push(piece(parsed, ExportPieceKind::DefaultOther, node)),
    }
}

/// Indexes top-level function and variable declarations by name, including
/// those wrapped in a named export. A variable maps to its whole declaration
/// statement. Names declared more than once keep every match in order.
fn index_declarations<'t>(
    parsed: &ParsedFile,
    root: TsNode<'t>,
) -> HashMap<String, Vec<TsNode<'t>>> {
    let mut index: HashMap<String, Vec<TsNode<'t>>> = HashMap::new();

    let mut cursor = root.walk();
    for statement in root.children(&mut cursor) {
        let declaration = if statement.kind() == "export_statement" {
            match statement.child_by_field_name("declaration") {
                Some(declaration) => declaration,
                None => continue,
            }
        } else {
            statement
        };

        match declaration.kind() {
            "function_declaration" | "generator_function_declaration" => {
                if let Some(name) = declaration.child_by_field_name("name") {
                    index
                        .entry(parsed.text(name).to_string())
                        .or_default()
                        .push(declaration);
                }
            }
            "lexical_declaration" | "variable_declaration" => {
                let mut inner = declaration.walk();
                for declarator in declaration.named_children(&mut inner) {
                    if declarator.kind() != "variable_declarator" {
                        continue;
                    }
                    let Some(name) = declarator.child_by_field_name("name") else {
                        continue;
                    };
                    if name.kind() == "identifier" {
                        index
                            .entry(parsed.text(name).to_string())
                            .or_default()
                            .push(declaration);
                    }
                }
            }
            _ => {}
        }
    }

    index
}

fn piece(parsed: &ParsedFile, kind: ExportPieceKind, node: TsNode<'_>) -> ExportPiece {
    ExportPiece {
        kind,
        text: parsed.text(node).to_string(),
        line: node.start_position().row as u32 + 1,
    }
}
