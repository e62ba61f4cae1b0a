//! Rename engine, declaration editor and pipeline tests.

use gofold_ast::{Decl, SourceFile};
use gofold_options::RewriteOptions;
use gofold_parser::parse_file;
use gofold_printer::print_file;
use gofold_transformers::{edit, Renamer, Rewriter};
use indexmap::IndexMap;

/// Helper: parse source that must be valid.
fn parse(source: &str) -> SourceFile {
    match parse_file("test.go", source) {
        Ok(file) => file,
        Err(err) => panic!("unexpected parse error: {}", err),
    }
}

/// Helper: an ordered string map.
fn map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const COUNTER: &str = r#"package demo

import "fmt"

// Counter counts things. Counter is not CounterSet.
type Counter int

// Limit is the cap for a Counter.
const Limit = 10

func (c Counter) Inc() Counter {
	return c + 1
}

// Run uses Counter and Limit.
func Run() {
	var c Counter
	for c < Limit {
		c = c.Inc()
	}
	fmt.Println(c)
}
"#;

// ============================================================================
// Rename engine
// ============================================================================

#[test]
fn test_empty_rename_is_identity() {
    let mut file = parse(COUNTER);
    let report = Renamer::default().rename_file(&mut file).unwrap();
    assert_eq!(print_file(&file), COUNTER);
    assert_eq!(report.changed().count(), 0);
}

#[test]
fn test_rename_with_map_and_prefix() {
    let mut file = parse(COUNTER);
    let renamer = Renamer::new(map(&[("Counter", "Tally")])).with_prefix("x");
    let report = renamer.rename_file(&mut file).unwrap();

    let expected = r#"package demo

import xfmt "fmt"

// xTally counts things. xTally is not CounterSet.
type xTally int

// xLimit is the cap for a Counter.
const xLimit = 10

func (c xTally) Inc() xTally {
	return c + 1
}

// xRun uses Counter and Limit.
func xRun() {
	var c xTally
	for c < xLimit {
		c = c.Inc()
	}
	xfmt.Println(c)
}
"#;
    assert_eq!(print_file(&file), expected);
    assert_eq!(report.old_name("xTally"), Some("Counter"));
    assert_eq!(report.old_name("xfmt"), Some("fmt"));
    let changed: Vec<_> = report.changed().map(|(new, _)| new).collect();
    assert_eq!(changed, vec!["xfmt", "xTally", "xLimit", "xRun"]);
}

#[test]
fn test_rename_import_becomes_alias() {
    let mut file = parse(COUNTER);
    Renamer::new(map(&[("fmt", "format")]))
        .rename_file(&mut file)
        .unwrap();
    let out = print_file(&file);
    assert!(out.contains("import format \"fmt\"\n"));
    assert!(out.contains("\tformat.Println(c)\n"));
}

#[test]
fn test_shadowed_names_are_not_renamed() {
    let mut file = parse("package a\n\nvar n int\n\nfunc f(n int) int {\n\treturn n\n}\n");
    Renamer::new(map(&[("n", "m")])).rename_file(&mut file).unwrap();
    assert_eq!(
        print_file(&file),
        "package a\n\nvar m int\n\nfunc f(n int) int {\n\treturn n\n}\n"
    );
}

#[test]
fn test_rename_reaches_map_keys() {
    let mut file = parse("package a\n\nconst Key = \"k\"\n\nvar M = map[string]int{Key: 1}\n");
    Renamer::new(map(&[("Key", "NewKey")]))
        .rename_file(&mut file)
        .unwrap();
    assert_eq!(
        print_file(&file),
        "package a\n\nconst NewKey = \"k\"\n\nvar M = map[string]int{NewKey: 1}\n"
    );
}

// ============================================================================
// Declaration editor
// ============================================================================

#[test]
fn test_remove_one_name_from_group() {
    let mut file = parse("package a\n\nvar (\n\tx, y, z = 1, 2, 3\n\tw = 4\n)\n");
    let removed = edit::remove_decls(&mut file, &["y".to_string()]).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(
        print_file(&file),
        "package a\n\nvar (\n\tx, z = 1, 3\n\tw = 4\n)\n"
    );
}

#[test]
fn test_remove_last_entry_drops_group() {
    let mut file = parse("package a\n\nvar (\n\tx = 1\n)\n\ntype (\n\tA int\n\tB int\n)\n\nfunc F() {}\n");
    let names = ["x", "A", "F", "Missing"].map(String::from);
    let removed = edit::remove_decls(&mut file, &names).unwrap();
    assert_eq!(removed, 3);
    assert_eq!(print_file(&file), "package a\n\ntype (\n\tB int\n)\n");
}

#[test]
fn test_remove_imports_by_effective_name() {
    let mut file = parse("package a\n\nimport (\n\t\"fmt\"\n\tos2 \"os\"\n\t_ \"embed\"\n)\n");
    let names = ["os2", "_"].map(String::from);
    edit::remove_decls(&mut file, &names).unwrap();
    assert_eq!(
        print_file(&file),
        "package a\n\nimport (\n\t\"fmt\"\n\t_ \"embed\"\n)\n"
    );
}

#[test]
fn test_methods_are_not_removed() {
    let mut file = parse("package a\n\ntype T int\n\nfunc (T) M() {}\n");
    edit::remove_decls(&mut file, &["M".to_string()]).unwrap();
    assert_eq!(file.decls.len(), 2);
}

#[test]
fn test_add_imports_prepends_group() {
    let mut file = parse("package a\n\nimport \"os\"\n\nvar x = os.Args\n");
    edit::add_imports(&mut file, &map(&[("str", "strings"), ("json", "encoding/json")]));
    assert_eq!(
        print_file(&file),
        "package a\n\nimport (\n\tstr \"strings\"\n\t\"encoding/json\"\n)\n\nimport \"os\"\n\nvar x = os.Args\n"
    );
}

#[test]
fn test_update_const_values() {
    let mut file = parse("package a\n\nconst (\n\tA, B = 1, 2\n\tC = iota\n)\n\nvar V = 1\n");
    let updated = edit::update_const_values(
        &mut file,
        &map(&[("B", "\"two\""), ("C", "3.5"), ("V", "9"), ("Z", "0")]),
    );
    assert_eq!(updated, 2);
    assert_eq!(
        print_file(&file),
        "package a\n\nconst (\n\tA, B = 1, \"two\"\n\tC = 3.5\n)\n\nvar V = 1\n"
    );
}

#[test]
fn test_import_map_and_package_rename() {
    let mut file = parse("package a\n\nimport (\n\t\"fmt\"\n\tos2 \"os\"\n\t_ \"embed\"\n)\n");
    let imports = edit::import_map(&file).unwrap();
    assert_eq!(imports, map(&[("fmt", "fmt"), ("os2", "os"), ("_", "embed")]));

    edit::rename_package(&mut file, "b");
    assert_eq!(file.package.name, "b");
    assert!(matches!(file.decls[0], Decl::Import(_)));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_rewriter_pipeline() {
    let source = "package old\n\nconst (\n\tA, B = 1, 2\n\tC = 3\n)\n\nvar Unused = 0\n\nfunc Use() int {\n\treturn A + C\n}\n";
    let options = RewriteOptions {
        package: Some("new".to_string()),
        consts: map(&[("A", "100")]),
        imports: map(&[("str", "strings"), ("fmt", "fmt")]),
        remove: vec!["B".to_string(), "Unused".to_string()],
        suffix: Some("_v".to_string()),
        ..RewriteOptions::default()
    };
    let (out, report) = Rewriter::new(options).rewrite_source("old.go", source).unwrap();
    assert_eq!(
        out,
        "package new\n\nimport (\n\tstr \"strings\"\n\t\"fmt\"\n)\n\nconst (\n\tA_v = 100\n\tC_v = 3\n)\n\nfunc Use_v() int {\n\treturn A_v + C_v\n}\n"
    );
    assert_eq!(report.old_name("Use_v"), Some("Use"));
}

#[test]
fn test_rewriter_reports_parse_errors() {
    let err = Rewriter::default()
        .rewrite_source("bad.go", "package a\n\nfunc f( {\n")
        .unwrap_err();
    assert!(err.to_string().contains("bad.go"));
}
