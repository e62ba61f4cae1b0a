//! Merge engine tests.
//!
//! Tests import deduplication, collision renaming, package validation and
//! the file-based `Package` front end.

use gofold_ast::SourceFile;
use gofold_merge::{merge_units, MergeError, Package};
use gofold_parser::parse_file;
use gofold_printer::print_file;

/// Helper: parse units that must be valid, named `u0.go`, `u1.go`, ...
fn units(sources: &[&str]) -> Vec<SourceFile> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| match parse_file(&format!("u{}.go", i), source) {
            Ok(file) => file,
            Err(err) => panic!("unexpected parse error: {}", err),
        })
        .collect()
}

/// Helper: merge and print.
fn merge(sources: &[&str]) -> String {
    let merged = merge_units(units(sources)).unwrap();
    print_file(&merged)
}

// ============================================================================
// Import deduplication
// ============================================================================

#[test]
fn test_identical_imports_are_deduplicated() {
    let out = merge(&[
        "// Package demo prints.\npackage demo\n\nimport \"fmt\"\n\nfunc A() {\n\tfmt.Println(\"a\")\n}\n",
        "package demo\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc B() {\n\tfmt.Fprintln(os.Stderr, \"b\")\n}\n",
    ]);
    assert_eq!(
        out,
        "// Package demo prints.\npackage demo\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n\nfunc A() {\n\tfmt.Println(\"a\")\n}\n\nfunc B() {\n\tfmt.Fprintln(os.Stderr, \"b\")\n}\n"
    );
}

#[test]
fn test_blank_and_dot_imports_are_kept_once() {
    let out = merge(&[
        "package demo\n\nimport (\n\t_ \"embed\"\n\t. \"strings\"\n)\n\nvar s = ToUpper(\"x\")\n",
        "package demo\n\nimport _ \"embed\"\n\nvar t = 1\n",
    ]);
    assert_eq!(
        out,
        "package demo\n\nimport (\n\t_ \"embed\"\n\t. \"strings\"\n)\n\nvar s = ToUpper(\"x\")\n\nvar t = 1\n"
    );
}

#[test]
fn test_merge_without_imports_has_no_import_decl() {
    let out = merge(&[
        "package demo\n\nconst A = 1\n",
        "package demo\n\nconst B = A + 1\n\n// trailing\n",
    ]);
    assert_eq!(out, "package demo\n\nconst A = 1\n\nconst B = A + 1\n\n// trailing\n");
}

// ============================================================================
// Name collisions
// ============================================================================

#[test]
fn test_colliding_import_names_get_distinct_names() {
    let out = merge(&[
        "package demo\n\nimport (\n\t\"fmt\"\n\t\"example.com/a/log\"\n)\n\nfunc A() {\n\tlog.Print(fmt.Sprint(1))\n}\n",
        "package demo\n\nimport \"example.com/b/log\"\n\nfunc B() {\n\tlog.Print(\"b\")\n\tif log := 2; log > 1 {\n\t\tlog.Print(\"c\")\n\t}\n}\n",
    ]);
    assert_eq!(
        out,
        "package demo\n\nimport (\n\t\"fmt\"\n\tlog00 \"example.com/a/log\"\n\tlog01 \"example.com/b/log\"\n)\n\nfunc A() {\n\tlog00.Print(fmt.Sprint(1))\n}\n\nfunc B() {\n\tlog01.Print(\"b\")\n\tif log := 2; log > 1 {\n\t\tlog.Print(\"c\")\n\t}\n}\n"
    );
}

#[test]
fn test_import_colliding_with_global_is_renamed() {
    let out = merge(&[
        "package demo\n\nimport \"example.com/log\"\n\nfunc A() {\n\tlog.Print()\n}\n",
        "package demo\n\nvar log = 1\n\nfunc B() int {\n\treturn log\n}\n",
    ]);
    assert_eq!(
        out,
        "package demo\n\nimport log00 \"example.com/log\"\n\nfunc A() {\n\tlog00.Print()\n}\n\nvar log = 1\n\nfunc B() int {\n\treturn log\n}\n"
    );
}

#[test]
fn test_import_rename_leaves_other_globals_and_docs() {
    let out = merge(&[
        "package demo\n\nimport \"example.com/log\"\n\n// Flush writes log output.\nfunc Flush() {\n\tlog.Print()\n}\n",
        "package demo\n\n// log is the level.\nvar log = 1\n",
    ]);
    assert_eq!(
        out,
        "package demo\n\nimport log00 \"example.com/log\"\n\n// Flush writes log output.\nfunc Flush() {\n\tlog00.Print()\n}\n\n// log is the level.\nvar log = 1\n"
    );
}

#[test]
fn test_generated_name_skips_taken_candidates() {
    let out = merge(&[
        "package demo\n\nimport \"x/log\"\n\nvar log00 = log.New()\n",
        "package demo\n\nimport log \"y/log\"\n\nvar l = log.New()\n",
    ]);
    assert!(out.contains("\tlog01 \"x/log\"\n\tlog02 \"y/log\"\n"));
    assert!(out.contains("var log00 = log01.New()\n"));
    assert!(out.contains("var l = log02.New()\n"));
}

#[test]
fn test_import_paths_with_odd_elements() {
    let out = merge(&[
        "package demo\n\nimport v2 \"gopkg.in/yaml.v2\"\n\nvar a = v2.X\n",
        "package demo\n\nimport v2 \"example.com/v2\"\n\nvar b = v2.Y\n",
    ]);
    assert!(out.contains("\tyaml_v200 \"gopkg.in/yaml.v2\"\n\tv200 \"example.com/v2\"\n"));
}

#[test]
fn test_candidates_exhausted() {
    let mut taken = String::from("package demo\n\nvar (\n\tlog = 0\n");
    for i in 0..100 {
        taken.push_str(&format!("\tlog{:02} = {}\n", i, i));
    }
    taken.push_str(")\n");
    let sources = ["package demo\n\nimport \"x/log\"\n\nvar a = log.X\n", taken.as_str()];

    let err = merge_units(units(&sources)).unwrap_err();
    match err {
        MergeError::CandidatesExhausted { path, base } => {
            assert_eq!(path, "x/log");
            assert_eq!(base, "log");
        }
        other => panic!("expected CandidatesExhausted, got {:?}", other),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_package_name_mismatch() {
    let err = merge_units(units(&["package a\n\nvar x = 1\n", "package b\n\nvar y = 1\n"])).unwrap_err();
    match err {
        MergeError::PackageNameMismatch { expected, found, file } => {
            assert_eq!(expected, "a");
            assert_eq!(found, "b");
            assert_eq!(file, "u1.go");
        }
        other => panic!("expected PackageNameMismatch, got {:?}", other),
    }
}

#[test]
fn test_no_units() {
    assert!(matches!(merge_units(Vec::new()), Err(MergeError::NoUnits)));
}

#[test]
fn test_malformed_import_path() {
    let mut files = units(&["package a\n\nimport \"fmt\"\n\nvar x = fmt.X\n"]);
    if let gofold_ast::Decl::Import(d) = &mut files[0].decls[0] {
        d.specs[0].path.value = "\"fmt".to_string();
    }
    assert!(matches!(merge_units(files), Err(MergeError::ImportPath(_))));
}

// ============================================================================
// Package
// ============================================================================

#[test]
fn test_package_merge_to_string() {
    let mut package = Package::new();
    package.add_source("a.go", "package demo\n\nimport \"fmt\"\n\nfunc A() {\n\tfmt.Println()\n}\n");
    package.add_source("b.go", "package demo\n\nimport \"fmt\"\n\nfunc B() {\n\tfmt.Println()\n}\n");
    assert_eq!(package.len(), 2);
    assert_eq!(package.file_names().collect::<Vec<_>>(), vec!["a.go", "b.go"]);

    let out = package.merge_to_string().unwrap();
    assert_eq!(
        out,
        "package demo\n\nimport \"fmt\"\n\nfunc A() {\n\tfmt.Println()\n}\n\nfunc B() {\n\tfmt.Println()\n}\n"
    );
}

#[test]
fn test_package_reports_parse_errors() {
    let mut package = Package::new();
    package.add_source("good.go", "package demo\n\nvar x = 1\n");
    package.add_source("bad.go", "package demo\n\nfunc (\n");
    let err = package.merge().unwrap_err();
    assert!(matches!(err, MergeError::Parse(_)));
    assert!(err.to_string().contains("bad.go"));
}

#[test]
fn test_package_load_missing_file() {
    let mut package = Package::new();
    let err = package
        .load_files(&["/nonexistent/gofold/missing.go"])
        .unwrap_err();
    match err {
        MergeError::Io { path, .. } => assert_eq!(path, "/nonexistent/gofold/missing.go"),
        other => panic!("expected Io, got {:?}", other),
    }
    assert!(package.is_empty());
}
