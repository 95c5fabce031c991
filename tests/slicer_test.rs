use ctxbundle::extraction::{export_pieces, slice_exports, ParsedFile, SourceParser};
use ctxbundle::types::*;
use std::path::Path;

fn parse(source: &str) -> ParsedFile {
    SourceParser::new()
        .unwrap()
        .parse_source(Path::new("/virtual/mod.tsx"), source.to_string())
        .expect("source should parse")
}

fn kinds(parsed: &ParsedFile) -> Vec<ExportPieceKind> {
    export_pieces(parsed).into_iter().map(|p| p.kind).collect()
}

#[test]
fn test_default_function_emits_function_only() {
    let parsed = parse("export default function run(){ return 1 }\n");
    assert_eq!(slice_exports(&parsed), "function run(){ return 1 }");
    assert_eq!(kinds(&parsed), vec![ExportPieceKind::DefaultFunction]);
}

#[test]
fn test_anonymous_default_function() {
    let parsed = parse("export default function () { return 2 }\n");
    assert_eq!(slice_exports(&parsed), "function () { return 2 }");
}

#[test]
fn test_default_identifier_duplicates_definition_and_statement() {
    let parsed = parse("const greet = () => \"hi\";\nexport default greet;\n");

    let pieces = export_pieces(&parsed);
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].kind, ExportPieceKind::DefaultTarget);
    assert_eq!(pieces[0].text, "const greet = () => \"hi\";");
    assert_eq!(pieces[0].line, 1);
    assert_eq!(pieces[1].kind, ExportPieceKind::DefaultStatement);
    assert_eq!(pieces[1].text, "export default greet;");
    assert_eq!(pieces[1].line, 2);

    assert_eq!(
        slice_exports(&parsed),
        "const greet = () => \"hi\";\n\nexport default greet;"
    );
}

#[test]
fn test_default_identifier_resolves_function_declaration() {
    let parsed = parse(
        "import React from 'react';\n\
         function Hero() { return <h1>Hi</h1>; }\n\
         export default Hero;\n",
    );
    assert_eq!(
        slice_exports(&parsed),
        "function Hero() { return <h1>Hi</h1>; }\n\nexport default Hero;"
    );
}

#[test]
fn test_default_identifier_declared_later_in_file() {
    let parsed = parse("export default helper;\nfunction helper() {}\n");
    assert_eq!(
        kinds(&parsed),
        vec![
            ExportPieceKind::DefaultTarget,
            ExportPieceKind::DefaultStatement
        ]
    );
}

#[test]
fn test_default_identifier_without_local_declaration() {
    let parsed = parse("import Thing from './thing';\nexport default Thing;\n");
    assert_eq!(slice_exports(&parsed), "export default Thing;");
    assert_eq!(kinds(&parsed), vec![ExportPieceKind::DefaultStatement]);
}

#[test]
fn test_default_identifier_ignores_nested_declarations() {
    let parsed = parse(
        "function outer() { const inner = 1; return inner }\nexport default inner;\n",
    );
    assert_eq!(slice_exports(&parsed), "export default inner;");
}

#[test]
fn test_default_identifier_matches_exported_variable() {
    let parsed = parse("export const api = { get() {} };\nexport default api;\n");
    assert_eq!(
        kinds(&parsed),
        vec![
            ExportPieceKind::NamedDeclaration,
            ExportPieceKind::DefaultTarget,
            ExportPieceKind::DefaultStatement,
        ]
    );
    let pieces = export_pieces(&parsed);
    assert_eq!(pieces[0].text, pieces[1].text);
}

#[test]
fn test_other_default_shapes_are_verbatim() {
    let class = parse("export default class Widget { render() {} }\n");
    assert_eq!(
        slice_exports(&class),
        "export default class Widget { render() {} }"
    );

    let arrow = parse("export default () => 42;\n");
    assert_eq!(slice_exports(&arrow), "export default () => 42;");
    assert_eq!(kinds(&arrow), vec![ExportPieceKind::DefaultOther]);
}

#[test]
fn test_named_declaration_drops_export_keyword() {
    let parsed = parse("export function add(a,b){ return a+b }\nexport const limit = 3;\n");
    assert_eq!(
        slice_exports(&parsed),
        "function add(a,b){ return a+b }\n\nconst limit = 3;"
    );
}

#[test]
fn test_export_lists_contribute_nothing() {
    let parsed = parse(
        "const a = 1;\nconst b = 2;\nexport { a, b as c };\nexport * from './x';\nexport { y } from './y';\n",
    );
    assert_eq!(slice_exports(&parsed), "");
}

#[test]
fn test_no_exports_is_empty() {
    let parsed = parse("const local = 1;\nfunction f() { return local }\n");
    assert_eq!(slice_exports(&parsed), "");
    assert!(export_pieces(&parsed).is_empty());
}

#[test]
fn test_pieces_follow_document_order() {
    let parsed = parse(
        "export interface Props { label: string }\n\
         const Button = (p: Props) => <button>{p.label}</button>;\n\
         export type Size = 'sm' | 'lg';\n\
         export default Button;\n",
    );
    assert_eq!(
        kinds(&parsed),
        vec![
            ExportPieceKind::NamedDeclaration,
            ExportPieceKind::NamedDeclaration,
            ExportPieceKind::DefaultTarget,
            ExportPieceKind::DefaultStatement,
        ]
    );
    let slice = slice_exports(&parsed);
    let props = slice.find("interface Props").unwrap();
    let size = slice.find("type Size").unwrap();
    let button = slice.find("const Button").unwrap();
    assert!(props < size && size < button);
}

#[test]
fn test_slicing_is_idempotent() {
    let parsed = parse(
        "export function a() {}\nconst b = 1;\nexport default b;\nexport class C {}\n",
    );
    let first = slice_exports(&parsed);
    let second = slice_exports(&parsed);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
