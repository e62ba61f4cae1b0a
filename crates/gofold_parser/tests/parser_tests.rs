//! Parser integration tests.
//!
//! Tests parsing Go source into the owned tree, comment attachment and
//! error reporting.

use gofold_ast::*;
use gofold_parser::{parse_file, Parser};

/// Helper: parse source that must be valid.
fn parse_ok(source: &str) -> SourceFile {
    match parse_file("test.go", source) {
        Ok(file) => file,
        Err(err) => panic!("unexpected parse error: {}", err),
    }
}

/// Helper: the body statements of the first function declaration.
fn first_func_body(file: &SourceFile) -> &[Stmt] {
    for decl in &file.decls {
        if let Decl::Func(f) = decl {
            return &f.body.as_ref().expect("function has a body").stmts;
        }
    }
    panic!("no function declaration");
}

/// Helper: count error diagnostics for invalid source.
fn error_count(source: &str) -> usize {
    let (_, diagnostics) = Parser::new("test.go", source).parse_source_file();
    diagnostics.error_count()
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_parse_package_and_imports() {
    let file = parse_ok("package main\n\nimport (\n\t\"fmt\"\n\tfmt2 \"fmt\"\n\t_ \"embed\"\n)\n");
    assert_eq!(file.package.name, "main");
    let specs: Vec<_> = file.imports().collect();
    assert_eq!(specs.len(), 3);
    assert!(specs[0].name.is_none());
    assert_eq!(specs[1].name.as_ref().map(|n| n.name.as_str()), Some("fmt2"));
    assert_eq!(specs[2].effective_name().unwrap(), None);
}

#[test]
fn test_parse_single_import_is_not_grouped() {
    let file = parse_ok("package a\n\nimport \"os\"\n");
    match &file.decls[0] {
        Decl::Import(d) => {
            assert!(!d.grouped);
            assert_eq!(d.specs[0].path_value().unwrap(), "os");
        }
        other => panic!("expected import, got {:?}", other),
    }
}

#[test]
fn test_parse_value_decls() {
    let file = parse_ok("package a\n\nconst (\n\tA = 1\n\tB, C int = 2, 3\n)\n\nvar x, y = f()\n");
    match &file.decls[0] {
        Decl::Value(d) => {
            assert_eq!(d.kind, ValueKind::Const);
            assert!(d.grouped);
            assert_eq!(d.specs.len(), 2);
            assert_eq!(d.specs[1].names.len(), 2);
            assert!(d.specs[1].ty.is_some());
            assert_eq!(d.specs[1].values.len(), 2);
        }
        other => panic!("expected const group, got {:?}", other),
    }
    match &file.decls[1] {
        Decl::Value(d) => {
            assert_eq!(d.kind, ValueKind::Var);
            assert_eq!(d.specs[0].values.len(), 1);
        }
        other => panic!("expected var, got {:?}", other),
    }
}

#[test]
fn test_parse_type_decls() {
    let file = parse_ok(
        "package a\n\ntype T struct {\n\tA, B int `json:\"a\"`\n\t*Embedded\n\tpkg.Other\n}\n\ntype Alias = T\n\ntype I interface {\n\tM(x int) error\n\tio.Reader\n}\n",
    );
    match &file.decls[0] {
        Decl::Type(d) => match &d.specs[0].ty {
            Expr::StructType(fields) => {
                assert_eq!(fields.fields.len(), 3);
                assert_eq!(fields.fields[0].names.len(), 2);
                assert!(fields.fields[0].tag.is_some());
                assert!(fields.fields[1].names.is_empty());
                assert!(matches!(fields.fields[2].ty, Expr::Selector(_)));
            }
            other => panic!("expected struct, got {:?}", other),
        },
        other => panic!("expected type decl, got {:?}", other),
    }
    match &file.decls[1] {
        Decl::Type(d) => assert!(d.specs[0].assign),
        other => panic!("expected alias, got {:?}", other),
    }
    match &file.decls[2] {
        Decl::Type(d) => match &d.specs[0].ty {
            Expr::InterfaceType(methods) => {
                assert_eq!(methods.fields.len(), 2);
                assert_eq!(methods.fields[0].names[0].name, "M");
            }
            other => panic!("expected interface, got {:?}", other),
        },
        other => panic!("expected type decl, got {:?}", other),
    }
}

#[test]
fn test_parse_method_and_parameters() {
    let file = parse_ok(
        "package a\n\nfunc (r *root) Hello(a, b int, rest ...string) (n int, err error) {\n\treturn 0, nil\n}\n",
    );
    match &file.decls[0] {
        Decl::Func(f) => {
            assert!(f.is_method());
            assert_eq!(f.name.name, "Hello");
            let params = &f.ty.params.fields;
            assert_eq!(params.len(), 2);
            assert_eq!(params[0].names.len(), 2);
            assert!(matches!(params[1].ty, Expr::Ellipsis(Some(_))));
            assert_eq!(f.ty.results.fields.len(), 2);
        }
        other => panic!("expected func, got {:?}", other),
    }
}

#[test]
fn test_parse_unnamed_parameters() {
    let file = parse_ok("package a\n\nfunc f(int, context.Context) error\n");
    match &file.decls[0] {
        Decl::Func(f) => {
            assert!(f.body.is_none());
            assert_eq!(f.ty.params.fields.len(), 2);
            assert!(f.ty.params.fields.iter().all(|p| p.names.is_empty()));
            assert_eq!(f.ty.results.fields.len(), 1);
        }
        other => panic!("expected func, got {:?}", other),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_parse_define_and_range() {
    let file = parse_ok(
        "package a\n\nfunc f() {\n\tx := []int{1, 2}\n\tfor i, v := range x {\n\t\t_ = i + v\n\t}\n\tfor range x {\n\t}\n}\n",
    );
    let body = first_func_body(&file);
    match &body[0] {
        Stmt::Assign(a) => {
            assert!(a.is_define());
            assert!(matches!(a.rhs[0], Expr::CompositeLit(_)));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
    match &body[1] {
        Stmt::Range(r) => {
            assert!(r.define);
            assert!(r.key.is_some() && r.value.is_some());
        }
        other => panic!("expected range, got {:?}", other),
    }
    match &body[2] {
        Stmt::Range(r) => assert!(r.key.is_none()),
        other => panic!("expected range, got {:?}", other),
    }
}

#[test]
fn test_composite_literal_not_allowed_in_if_header() {
    let file = parse_ok("package a\n\nfunc f() {\n\tif x == T {\n\t\treturn\n\t}\n}\n");
    match &first_func_body(&file)[0] {
        Stmt::If(s) => {
            assert!(matches!(s.cond, Expr::Binary(_)));
            assert_eq!(s.body.stmts.len(), 1);
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_switches_and_select() {
    let file = parse_ok(
        "package a\n\nfunc f(v interface{}, c chan int) {\n\tswitch x := v.(type) {\n\tcase int, string:\n\t\t_ = x\n\tdefault:\n\t}\n\tswitch {\n\tcase true:\n\t\tfallthrough\n\tdefault:\n\t}\n\tselect {\n\tcase n := <-c:\n\t\t_ = n\n\tcase c <- 1:\n\tdefault:\n\t}\n}\n",
    );
    let body = first_func_body(&file);
    match &body[0] {
        Stmt::TypeSwitch(s) => {
            assert_eq!(s.clauses.len(), 2);
            assert_eq!(s.clauses[0].list.len(), 2);
            assert!(s.clauses[1].is_default);
        }
        other => panic!("expected type switch, got {:?}", other),
    }
    match &body[1] {
        Stmt::Switch(s) => assert!(s.tag.is_none()),
        other => panic!("expected switch, got {:?}", other),
    }
    match &body[2] {
        Stmt::Select(s) => {
            assert_eq!(s.clauses.len(), 3);
            assert!(matches!(s.clauses[0].comm, Some(Stmt::Assign(_))));
            assert!(matches!(s.clauses[1].comm, Some(Stmt::Send(_))));
            assert!(s.clauses[2].comm.is_none());
        }
        other => panic!("expected select, got {:?}", other),
    }
}

#[test]
fn test_parse_labels_and_branches() {
    let file = parse_ok(
        "package a\n\nfunc f() {\nouter:\n\tfor {\n\t\tbreak outer\n\t}\n\tgoto outer\n}\n",
    );
    let body = first_func_body(&file);
    match &body[0] {
        Stmt::Labeled(l) => {
            assert_eq!(l.label.name, "outer");
            assert!(matches!(l.stmt, Stmt::For(_)));
        }
        other => panic!("expected label, got {:?}", other),
    }
    match &body[1] {
        Stmt::Branch(b) => assert_eq!(b.label.as_ref().map(|l| l.name.as_str()), Some("outer")),
        other => panic!("expected goto, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_define_target_is_accepted() {
    let file = parse_ok("package a\n\nfunc f() {\n\t(x) := 1\n\t_ = x\n}\n");
    match &first_func_body(&file)[0] {
        Stmt::Assign(a) => assert_eq!(a.lhs[0].unparen_ident().map(|i| i.name.as_str()), Some("x")),
        other => panic!("expected assignment, got {:?}", other),
    }
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_doc_and_trailing_comments_attach() {
    let file = parse_ok(
        "// Package a does things.\npackage a\n\n// Answer is the answer.\nconst Answer = 42 // always\n\nvar (\n\t// first doc\n\tx = 1\n\t// dangling\n)\n",
    );
    assert_eq!(file.doc, vec!["// Package a does things.".to_string()]);
    match &file.decls[0] {
        Decl::Value(d) => {
            assert_eq!(d.doc, vec!["// Answer is the answer.".to_string()]);
            assert_eq!(d.specs[0].comment.as_deref(), Some("// always"));
        }
        other => panic!("expected const, got {:?}", other),
    }
    match &file.decls[1] {
        Decl::Value(d) => {
            assert_eq!(d.specs[0].doc, vec!["// first doc".to_string()]);
            assert_eq!(d.end_comments, vec!["// dangling".to_string()]);
        }
        other => panic!("expected var group, got {:?}", other),
    }
}

#[test]
fn test_block_comments_become_statements() {
    let file = parse_ok("package a\n\nfunc f() {\n\t// lead\n\tg() // tail\n}\n");
    let body = first_func_body(&file);
    assert_eq!(body.len(), 3);
    assert!(matches!(&body[0], Stmt::Comment(c) if c.text == "// lead" && !c.trailing));
    assert!(matches!(&body[1], Stmt::Expr(Expr::Call(_))));
    assert!(matches!(&body[2], Stmt::Comment(c) if c.text == "// tail" && c.trailing));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_package_clause() {
    assert!(error_count("func f() {}\n") >= 1);
}

#[test]
fn test_type_parameters_rejected() {
    let err = parse_file("g.go", "package a\n\nfunc Map[T any](x T) T { return x }\n").unwrap_err();
    assert!(err.diagnostics.iter().any(|d| d.code == 1112));
}

#[test]
fn test_malformed_statement_reports_position() {
    let err = parse_file("bad.go", "package a\n\nfunc f() {\n\tx := \n}\n").unwrap_err();
    assert_eq!(err.file, "bad.go");
    let first = &err.diagnostics[0];
    assert_eq!(first.position.map(|p| p.line), Some(5));
    assert!(err.to_string().starts_with("failed to parse bad.go"));
}

#[test]
fn test_go_statement_requires_call() {
    assert!(error_count("package a\n\nfunc f() {\n\tgo x\n}\n") >= 1);
}

#[test]
fn test_empty_file_is_only_a_warning() {
    let file = parse_ok("package a\n");
    assert!(file.decls.is_empty());
}

// ============================================================================
// Nesting limits
// ============================================================================

/// Helper: a `var x = ...` unit around `expr`.
fn var_unit(expr: &str) -> String {
    format!("package p\n\nvar x = {}\n", expr)
}

/// Helper: codes of the error diagnostics for `source`.
fn error_codes(source: &str) -> Vec<u32> {
    let (_, diagnostics) = Parser::new("deep.go", source).parse_source_file();
    diagnostics
        .diagnostics()
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.code)
        .collect()
}

#[test]
fn test_long_binary_chain_within_limit() {
    let expr = format!("1{}", "+1".repeat(500));
    let file = parse_ok(&var_unit(&expr));
    let Decl::Value(d) = &file.decls[0] else {
        panic!("expected a var declaration");
    };

    let mut depth = 0;
    let mut x = &d.specs[0].values[0];
    while let Expr::Binary(b) = x {
        depth += 1;
        x = &b.x;
    }
    assert_eq!(depth, 500);
}

#[test]
fn test_overlong_binary_chain_is_rejected() {
    let source = var_unit(&format!("1{}", "+1".repeat(100_000)));
    let err = parse_file("deep.go", &source).unwrap_err();
    assert!(err.diagnostics.iter().any(|d| d.code == 1111));
}

#[test]
fn test_overlong_call_chain_is_rejected() {
    let source = var_unit(&format!("f{}", "()".repeat(100_000)));
    assert!(error_codes(&source).contains(&1111));
}

#[test]
fn test_deeply_nested_parentheses_are_rejected() {
    let source = var_unit(&format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000)));
    assert!(error_codes(&source).contains(&1111));
}

#[test]
fn test_deeply_nested_elided_literals_are_rejected() {
    let source = var_unit(&format!("[]T{}{}", "{".repeat(10_000), "}".repeat(10_000)));
    assert!(error_codes(&source).contains(&1111));
}
