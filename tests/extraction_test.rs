use ctxbundle::errors::BundleError;
use ctxbundle::extraction::{analyze_file, parse_file, SourceParser};
use ctxbundle::types::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn named(name: &str) -> ExportName {
    ExportName::Named(name.to_string())
}

#[test]
fn test_parse_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = parse_file(&dir.path().join("nope.ts")).unwrap_err();
    assert!(matches!(err, BundleError::Read { .. }), "got {err:?}");
    assert!(err.is_parse_failure());
}

#[test]
fn test_parse_broken_file_is_syntax_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "broken.ts", "export function {{{\n");
    let err = parse_file(&path).unwrap_err();
    match err {
        BundleError::Syntax { path: p, line, .. } => {
            assert!(p.ends_with("broken.ts"));
            assert!(line >= 1);
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_parse_plain_javascript_and_jsx() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "src/Card.jsx",
        r#"import React from "react";

export default function Card({ title }) {
  return <div className="card">{title}</div>;
}
"#,
    );
    let parsed = parse_file(&path).unwrap();
    assert_eq!(parsed.path, path);
    assert!(parsed.source.contains("className"));
}

#[test]
fn test_parser_is_reusable() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.ts", "export const a: number = 1;\n");
    let b = write_file(dir.path(), "b.tsx", "export const b = <span />;\n");

    let mut parser = SourceParser::new().unwrap();
    assert!(parser.parse_file(&a).is_ok());
    assert!(parser.parse_file(&b).is_ok());
}

#[test]
fn test_analyze_collects_imports_in_order() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "src/helpers.ts", "export function add(a, b) { return a + b }\n");
    write_file(dir.path(), "src/styles/index.js", "export const color = 'red';\n");
    let main = write_file(
        dir.path(),
        "src/main.ts",
        r#"import React from "react";
import { add } from "./helpers";
import type { Props } from './types';
import "./styles";
import * as path from "path";

export default function run() { return add(1, 2) }
"#,
    );

    let parsed = parse_file(&main).unwrap();
    let analysis = analyze_file(&parsed);

    assert_eq!(
        analysis.imports,
        vec!["react", "./helpers", "./types", "./styles", "path"]
    );
    assert_eq!(
        analysis.resolved_imports,
        vec![
            dir.path().join("src/helpers.ts"),
            dir.path().join("src/styles/index.js"),
        ]
    );
}

#[test]
fn test_analyze_drops_missing_import() {
    let dir = TempDir::new().unwrap();
    let main = write_file(
        dir.path(),
        "main.ts",
        "import { gone } from './missing';\nexport function run() { return gone }\n",
    );

    let analysis = analyze_file(&parse_file(&main).unwrap());
    assert_eq!(analysis.imports, vec!["./missing"]);
    assert!(analysis.resolved_imports.is_empty());
}

#[test]
fn test_analyze_export_names() {
    let dir = TempDir::new().unwrap();
    let main = write_file(
        dir.path(),
        "mod.ts",
        r#"export function add(a: number, b: number) { return a + b }
export class Counter {}
export interface Shape { area(): number }
export type Id = string;
export enum Color { Red, Green }
export const limit = 10;
const hidden = 1;
export { hidden };
export * from "./other";
export default Counter;
"#,
    );

    let analysis = analyze_file(&parse_file(&main).unwrap());
    assert_eq!(
        analysis.exports,
        vec![
            named("add"),
            named("Counter"),
            named("Shape"),
            named("Id"),
            named("Color"),
            ExportName::Default,
        ]
    );
}

#[test]
fn test_default_marker_for_any_default_shape() {
    let dir = TempDir::new().unwrap();
    let a = write_file(dir.path(), "a.ts", "export default { a: 1 };\n");
    let b = write_file(dir.path(), "b.ts", "export default class Widget {}\n");

    for path in [a, b] {
        let analysis = analyze_file(&parse_file(&path).unwrap());
        assert_eq!(analysis.exports, vec![ExportName::Default]);
        assert_eq!(analysis.exports[0].as_str(), DEFAULT_EXPORT);
    }
}

#[test]
fn test_reexport_is_not_an_import() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "b.ts", "export const b = 1;\n");
    let a = write_file(dir.path(), "a.ts", "export { b } from './b';\n");

    let analysis = analyze_file(&parse_file(&a).unwrap());
    assert!(analysis.imports.is_empty());
    assert!(analysis.exports.is_empty());
}
