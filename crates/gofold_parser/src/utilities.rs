//! Small classification helpers shared by the statement and expression parsers.

use gofold_ast::{Expr, LitKind, Stmt, SyntaxKind};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 200;

/// Maximum number of links in the left-nested chains on one path through an
/// expression (`a + b + c`, `f()()`, `x.y.z`). Each link nests the tree one
/// level deeper without recursing in the parser.
pub(crate) const MAX_CHAIN_DEPTH: u32 = 1000;

/// Which extra forms a simple statement may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SimpleMode {
    Basic,
    /// `label:` is accepted.
    LabelOk,
    /// `k, v := range x` is accepted.
    RangeOk,
}

/// Result of parsing a simple statement.
pub(crate) enum SimpleStmt {
    Stmt(Stmt),
    /// A labeled statement; its inner statement already consumed its `;`.
    Labeled(Stmt),
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        define: bool,
        x: Expr,
    },
}

pub(crate) fn lit_kind(kind: SyntaxKind) -> LitKind {
    match kind {
        SyntaxKind::FloatLiteral => LitKind::Float,
        SyntaxKind::ImagLiteral => LitKind::Imag,
        SyntaxKind::RuneLiteral => LitKind::Char,
        SyntaxKind::StringLiteral => LitKind::String,
        _ => LitKind::Int,
    }
}

/// Whether `x` names a type syntactically: `T` or `pkg.T`.
pub(crate) fn is_type_name(x: &Expr) -> bool {
    match x {
        Expr::Ident(_) => true,
        Expr::Selector(sel) => matches!(sel.x, Expr::Ident(_)),
        _ => false,
    }
}

/// Whether `x` may be followed by `{` to form a composite literal.
pub(crate) fn is_literal_type(x: &Expr) -> bool {
    match x {
        Expr::ArrayType(_) | Expr::StructType(_) | Expr::MapType(_) => true,
        other => is_type_name(other),
    }
}

/// Whether the token can start a statement (used for error recovery).
pub(crate) fn is_statement_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::BreakKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::DeferKeyword
            | SyntaxKind::FallthroughKeyword
            | SyntaxKind::ForKeyword
            | SyntaxKind::GoKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::IfKeyword
            | SyntaxKind::ReturnKeyword
            | SyntaxKind::SelectKeyword
            | SyntaxKind::SwitchKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::CaseKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::CloseBraceToken
    )
}

/// Whether the token can start a top-level declaration.
pub(crate) fn is_declaration_start(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::ImportKeyword
            | SyntaxKind::ConstKeyword
            | SyntaxKind::TypeKeyword
            | SyntaxKind::VarKeyword
            | SyntaxKind::FuncKeyword
    )
}
