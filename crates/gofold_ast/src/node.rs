//! Syntax tree node definitions for Go source units.
//!
//! A [`SourceFile`] owns an ordered list of top-level [`Decl`]s. Statements
//! and expressions are closed enums; the `Bad` variants are produced by
//! parser error recovery and mark subtrees no pass can safely interpret.

use crate::literal::{base_name, quote, unquote, ImportPathError};
use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use gofold_core::text::TextRange;

// ============================================================================
// Leaves
// ============================================================================

/// An identifier occurrence. Renaming passes mutate `name` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub range: TextRange,
}

impl Ident {
    /// An identifier that does not come from parsed text.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            range: TextRange::DETACHED,
        }
    }

    pub fn with_range(name: impl Into<String>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// Whether this is the blank identifier `_`.
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// A literal token: number, rune or string, kept exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicLit {
    pub kind: LitKind,
    pub value: String,
    pub range: TextRange,
}

impl BasicLit {
    pub fn new(kind: LitKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            range: TextRange::DETACHED,
        }
    }

    /// A quoted string literal holding `value`.
    pub fn string(value: &str) -> Self {
        Self::new(LitKind::String, quote(value))
    }
}

/// Placeholder for a region the parser could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadNode {
    pub range: TextRange,
}

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub file_name: String,
    /// Comments above the package clause.
    pub doc: Vec<String>,
    pub package: Ident,
    pub decls: Vec<Decl>,
    /// Comments after the last declaration.
    pub end_comments: Vec<String>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, package: &str) -> Self {
        Self {
            file_name: file_name.into(),
            doc: Vec::new(),
            package: Ident::new(package),
            decls: Vec::new(),
            end_comments: Vec::new(),
        }
    }

    /// The import specs of every import declaration, in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|d| match d {
            Decl::Import(group) => group.specs.as_slice(),
            _ => &[],
        })
    }
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Import(ImportDecl),
    Type(TypeDecl),
    Value(ValueDecl),
    Func(FuncDecl),
    Bad(BadNode),
}

impl Decl {
    /// Leading documentation lines of the declaration.
    pub fn doc(&self) -> &[String] {
        match self {
            Decl::Import(d) => &d.doc,
            Decl::Type(d) => &d.doc,
            Decl::Value(d) => &d.doc,
            Decl::Func(d) => &d.doc,
            Decl::Bad(_) => &[],
        }
    }

    pub fn is_import(&self) -> bool {
        matches!(self, Decl::Import(_))
    }
}

/// `import "p"` or `import ( ... )`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub doc: Vec<String>,
    pub grouped: bool,
    pub specs: Vec<ImportSpec>,
    pub end_comments: Vec<String>,
    pub range: TextRange,
}

impl ImportDecl {
    pub fn new(specs: Vec<ImportSpec>) -> Self {
        Self {
            doc: Vec::new(),
            grouped: specs.len() != 1,
            specs,
            end_comments: Vec::new(),
            range: TextRange::DETACHED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    pub doc: Vec<String>,
    /// Explicit local name, including `_` and `.`.
    pub name: Option<Ident>,
    /// The path literal as written, quotes included.
    pub path: BasicLit,
    pub comment: Option<String>,
}

impl ImportSpec {
    /// A spec importing `path`, aliased when `alias` is given.
    pub fn new(alias: Option<&str>, path: &str) -> Self {
        Self {
            doc: Vec::new(),
            name: alias.map(Ident::new),
            path: BasicLit::string(path),
            comment: None,
        }
    }

    /// The decoded import path.
    pub fn path_value(&self) -> Result<String, ImportPathError> {
        unquote(&self.path.value).map_err(|source| ImportPathError {
            raw: self.path.value.clone(),
            source,
        })
    }

    /// The name the import is addressed by: the alias, or the last path
    /// element. `None` for blank and dot imports, which bind nothing.
    pub fn effective_name(&self) -> Result<Option<String>, ImportPathError> {
        match &self.name {
            Some(name) if name.name == "_" || name.name == "." => Ok(None),
            Some(name) => Ok(Some(name.name.clone())),
            None => {
                let path = self.path_value()?;
                Ok(Some(base_name(&path).to_string()))
            }
        }
    }
}

/// `type T ...` or `type ( ... )`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub doc: Vec<String>,
    pub grouped: bool,
    pub specs: Vec<TypeSpec>,
    pub end_comments: Vec<String>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub doc: Vec<String>,
    pub name: Ident,
    /// `type A = B` alias form.
    pub assign: bool,
    pub ty: Expr,
    pub comment: Option<String>,
}

/// `const ...` / `var ...`, single or parenthesized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueDecl {
    pub doc: Vec<String>,
    pub kind: ValueKind,
    pub grouped: bool,
    pub specs: Vec<ValueSpec>,
    pub end_comments: Vec<String>,
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub doc: Vec<String>,
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
    pub comment: Option<String>,
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub doc: Vec<String>,
    pub recv: Option<FieldList>,
    pub name: Ident,
    pub ty: FuncType,
    pub body: Option<BlockStmt>,
    pub range: TextRange,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

// ============================================================================
// Fields and function signatures
// ============================================================================

/// Parameters, results, receivers, struct fields or interface methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldList {
    pub fields: Vec<Field>,
    pub end_comments: Vec<String>,
}

impl FieldList {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            end_comments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub doc: Vec<String>,
    /// Empty for anonymous parameters and embedded fields.
    pub names: Vec<Ident>,
    pub ty: Expr,
    pub tag: Option<BasicLit>,
    pub comment: Option<String>,
}

impl Field {
    pub fn new(names: Vec<Ident>, ty: Expr) -> Self {
        Self {
            doc: Vec::new(),
            names,
            ty,
            tag: None,
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncType {
    pub params: FieldList,
    pub results: FieldList,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A `type`, `const` or `var` declaration inside a function body.
    Decl(Box<Decl>),
    Empty(TextRange),
    Labeled(Box<LabeledStmt>),
    Expr(Expr),
    Send(Box<SendStmt>),
    IncDec(Box<IncDecStmt>),
    Assign(Box<AssignStmt>),
    Go(Expr),
    Defer(Expr),
    Return(ReturnStmt),
    Branch(BranchStmt),
    Block(BlockStmt),
    If(Box<IfStmt>),
    Switch(Box<SwitchStmt>),
    TypeSwitch(Box<TypeSwitchStmt>),
    Select(Box<SelectStmt>),
    For(Box<ForStmt>),
    Range(Box<RangeStmt>),
    /// A comment on its own line, or trailing the previous statement.
    Comment(CommentStmt),
    Bad(BadNode),
}

impl Stmt {
    /// Short name of the statement kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Decl(_) => "declaration statement",
            Stmt::Empty(_) => "empty statement",
            Stmt::Labeled(_) => "labeled statement",
            Stmt::Expr(_) => "expression statement",
            Stmt::Send(_) => "send statement",
            Stmt::IncDec(_) => "inc/dec statement",
            Stmt::Assign(_) => "assignment",
            Stmt::Go(_) => "go statement",
            Stmt::Defer(_) => "defer statement",
            Stmt::Return(_) => "return statement",
            Stmt::Branch(_) => "branch statement",
            Stmt::Block(_) => "block",
            Stmt::If(_) => "if statement",
            Stmt::Switch(_) => "switch statement",
            Stmt::TypeSwitch(_) => "type switch statement",
            Stmt::Select(_) => "select statement",
            Stmt::For(_) => "for statement",
            Stmt::Range(_) => "range statement",
            Stmt::Comment(_) => "comment",
            Stmt::Bad(_) => "malformed statement",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentStmt {
    pub text: String,
    /// Printed on the same line as the preceding statement.
    pub trailing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub stmts: Vec<Stmt>,
    pub range: TextRange,
}

impl BlockStmt {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self {
            stmts,
            range: TextRange::DETACHED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStmt {
    pub label: Ident,
    pub stmt: Stmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendStmt {
    pub chan: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncDecStmt {
    pub x: Expr,
    /// `++` when true, `--` otherwise.
    pub inc: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub lhs: Vec<Expr>,
    /// `=`, `:=` or an operator-assignment token.
    pub op: SyntaxKind,
    pub rhs: Vec<Expr>,
    pub range: TextRange,
}

impl AssignStmt {
    pub fn is_define(&self) -> bool {
        self.op == SyntaxKind::ColonEqualsToken
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
}

/// `break`, `continue`, `goto` or `fallthrough`.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchStmt {
    pub tok: SyntaxKind,
    pub label: Option<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub init: Option<Stmt>,
    pub cond: Expr,
    pub body: BlockStmt,
    /// Either another `Stmt::If` or a `Stmt::Block`.
    pub els: Option<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub init: Option<Stmt>,
    pub tag: Option<Expr>,
    pub clauses: Vec<CaseClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeSwitchStmt {
    pub init: Option<Stmt>,
    /// `x := y.(type)` or `y.(type)`.
    pub assign: Stmt,
    pub clauses: Vec<CaseClause>,
}

/// `case a, b:` or `default:` (empty `list`).
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub list: Vec<Expr>,
    pub is_default: bool,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub clauses: Vec<CommClause>,
}

/// `case comm:` or `default:` (no `comm`).
#[derive(Debug, Clone, PartialEq)]
pub struct CommClause {
    pub comm: Option<Stmt>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Option<Stmt>,
    pub cond: Option<Expr>,
    pub post: Option<Stmt>,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStmt {
    pub key: Option<Expr>,
    pub value: Option<Expr>,
    /// `:=` when true, `=` when false (ignored without key).
    pub define: bool,
    pub x: Expr,
    pub body: BlockStmt,
}

// ============================================================================
// Expressions and types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(Ident),
    BasicLit(BasicLit),
    CompositeLit(Box<CompositeLit>),
    FuncLit(Box<FuncLit>),
    Paren(Box<Expr>),
    Selector(Box<SelectorExpr>),
    Index(Box<IndexExpr>),
    Slice(Box<SliceExpr>),
    TypeAssert(Box<TypeAssertExpr>),
    Call(Box<CallExpr>),
    Star(Box<Expr>),
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    KeyValue(Box<KeyValueExpr>),
    /// `...T` in a variadic parameter, or `...` as an array length.
    Ellipsis(Option<Box<Expr>>),
    ArrayType(Box<ArrayType>),
    StructType(Box<FieldList>),
    FuncType(Box<FuncType>),
    InterfaceType(Box<FieldList>),
    MapType(Box<MapType>),
    ChanType(Box<ChanType>),
    Bad(BadNode),
}

impl Expr {
    pub fn ident(name: &str) -> Expr {
        Expr::Ident(Ident::new(name))
    }

    /// The identifier this expression denotes once parentheses are removed.
    pub fn unparen_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(id) => Some(id),
            Expr::Paren(inner) => inner.unparen_ident(),
            _ => None,
        }
    }

    pub fn unparen_ident_mut(&mut self) -> Option<&mut Ident> {
        match self {
            Expr::Ident(id) => Some(id),
            Expr::Paren(inner) => inner.unparen_ident_mut(),
            _ => None,
        }
    }

    /// Short name of the expression kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "identifier",
            Expr::BasicLit(_) => "literal",
            Expr::CompositeLit(_) => "composite literal",
            Expr::FuncLit(_) => "function literal",
            Expr::Paren(_) => "parenthesized expression",
            Expr::Selector(_) => "selector",
            Expr::Index(_) => "index expression",
            Expr::Slice(_) => "slice expression",
            Expr::TypeAssert(_) => "type assertion",
            Expr::Call(_) => "call",
            Expr::Star(_) => "pointer expression",
            Expr::Unary(_) => "unary expression",
            Expr::Binary(_) => "binary expression",
            Expr::KeyValue(_) => "key/value pair",
            Expr::Ellipsis(_) => "ellipsis",
            Expr::ArrayType(_) => "array type",
            Expr::StructType(_) => "struct type",
            Expr::FuncType(_) => "func type",
            Expr::InterfaceType(_) => "interface type",
            Expr::MapType(_) => "map type",
            Expr::ChanType(_) => "channel type",
            Expr::Bad(_) => "malformed expression",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeLit {
    /// `None` for elided element types inside an outer literal.
    pub ty: Option<Expr>,
    pub elts: Vec<Expr>,
    /// The closing brace sits on its own line.
    pub multiline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub ty: FuncType,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorExpr {
    pub x: Expr,
    pub sel: Ident,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub x: Expr,
    pub index: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub x: Expr,
    pub low: Option<Expr>,
    pub high: Option<Expr>,
    pub max: Option<Expr>,
    pub slice3: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssertExpr {
    pub x: Expr,
    /// `None` for `x.(type)` in a type switch.
    pub ty: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub fun: Expr,
    pub args: Vec<Expr>,
    /// Final argument spread with `...`.
    pub ellipsis: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: SyntaxKind,
    pub x: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub x: Expr,
    pub op: SyntaxKind,
    pub y: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueExpr {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// `None` for slices, `Expr::Ellipsis(None)` for `[...]T`.
    pub len: Option<Expr>,
    pub elt: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Expr,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChanType {
    pub dir: ChanDir,
    pub value: Expr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_name_of_import_specs() {
        let plain = ImportSpec::new(None, "github.com/dave/dst");
        assert_eq!(plain.effective_name().unwrap().as_deref(), Some("dst"));

        let aliased = ImportSpec::new(Some("fmt2"), "fmt");
        assert_eq!(aliased.effective_name().unwrap().as_deref(), Some("fmt2"));

        let blank = ImportSpec::new(Some("_"), "embed");
        assert_eq!(blank.effective_name().unwrap(), None);

        let dot = ImportSpec::new(Some("."), "strings");
        assert_eq!(dot.effective_name().unwrap(), None);
    }

    #[test]
    fn test_malformed_import_path_is_reported() {
        let mut spec = ImportSpec::new(None, "fmt");
        spec.path.value = "\"fmt".to_string();
        let err = spec.effective_name().unwrap_err();
        assert_eq!(err.raw, "\"fmt");
    }

    #[test]
    fn test_unparen_ident() {
        let expr = Expr::Paren(Box::new(Expr::Paren(Box::new(Expr::ident("x")))));
        assert_eq!(expr.unparen_ident().map(|i| i.name.as_str()), Some("x"));
        assert!(Expr::Star(Box::new(Expr::ident("x"))).unparen_ident().is_none());
    }
}
