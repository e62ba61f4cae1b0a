//! The two-phase global walker.
//!
//! Phase 1 binds every top-level name into the global scope without
//! reporting anything, so forward references resolve. Phase 2 walks every
//! declaration, statement and expression, opening a scope for each
//! construct that introduces bindings, and reports identifiers that
//! resolve to a global.

use crate::error::WalkError;
use crate::scope::Scope;
use crate::symbol::{Occurrence, SymKind};
use gofold_ast::*;
use gofold_core::text::TextRange;

/// Receives each identifier occurrence that resolves to a global.
///
/// The identifier may be renamed in place; later steps of the same walk see
/// the new name.
pub trait GlobalVisitor {
    fn visit(&mut self, ident: &mut Ident, kind: SymKind, occurrence: Occurrence);
}

impl<F> GlobalVisitor for F
where
    F: FnMut(&mut Ident, SymKind, Occurrence),
{
    fn visit(&mut self, ident: &mut Ident, kind: SymKind, occurrence: Occurrence) {
        self(ident, kind, occurrence)
    }
}

/// Walk `file`, calling `visitor` once per occurrence of a global name.
///
/// Fails without finishing the walk when the tree holds a construct that
/// cannot be traversed (parser recovery nodes, invalid `:=` targets) or a
/// malformed import path.
#[tracing::instrument(level = "debug", skip_all, fields(file = %file.file_name))]
pub fn walk_file<V: GlobalVisitor + ?Sized>(
    file: &mut SourceFile,
    visitor: &mut V,
) -> Result<(), WalkError> {
    let mut walker = Walker {
        scope: Some(Scope::global()),
        visitor,
        hoisting: true,
    };
    for decl in &mut file.decls {
        walker.walk_decl(decl)?;
    }
    walker.hoisting = false;
    for decl in &mut file.decls {
        walker.walk_decl(decl)?;
    }
    Ok(())
}

struct Walker<'v, V: GlobalVisitor + ?Sized> {
    /// The current scope as nodes are visited.
    scope: Option<Box<Scope>>,
    visitor: &'v mut V,
    /// Phase 1: bind top-level names only.
    hoisting: bool,
}

impl<V: GlobalVisitor + ?Sized> Walker<'_, V> {
    // ========================================================================
    // Scope management
    // ========================================================================

    fn push_scope(&mut self) {
        self.scope = Some(Scope::push(self.scope.take()));
        tracing::trace!(depth = self.depth(), "push scope");
    }

    fn pop_scope(&mut self) {
        tracing::trace!(depth = self.depth(), "pop scope");
        self.scope = self.scope.take().and_then(Scope::pop);
    }

    fn depth(&self) -> u32 {
        self.scope.as_ref().map_or(0, |s| s.depth())
    }

    fn at_global_scope(&self) -> bool {
        self.scope.as_ref().map_or(true, |s| s.is_global())
    }

    /// Bind a name in the current scope. `_` is never bound.
    fn bind(&mut self, name: &str, kind: SymKind) {
        if name == "_" {
            return;
        }
        if let Some(scope) = self.scope.as_mut() {
            scope.bind(name, kind);
        }
    }

    /// Report a declaring occurrence of a global.
    fn declare(&mut self, ident: &mut Ident, kind: SymKind) {
        if ident.is_blank() || !self.at_global_scope() {
            return;
        }
        tracing::trace!(name = %ident.name, %kind, "global declared");
        self.visitor.visit(ident, kind, Occurrence::Declaring);
    }

    fn resolve(&mut self, ident: &mut Ident) {
        let Some(scope) = self.scope.as_ref() else {
            return;
        };
        if let Some(symbol) = scope.lookup_chain(&ident.name) {
            if symbol.is_global() {
                let kind = symbol.kind;
                tracing::trace!(name = %ident.name, %kind, "global referenced");
                self.visitor.visit(ident, kind, Occurrence::Referencing);
            }
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn walk_decl(&mut self, decl: &mut Decl) -> Result<(), WalkError> {
        match decl {
            Decl::Import(d) => {
                if !self.at_global_scope() {
                    return Err(WalkError::Unsupported {
                        construct: "import inside a function",
                        range: d.range,
                    });
                }
                for spec in &mut d.specs {
                    self.walk_import_spec(spec)?;
                }
            }
            Decl::Type(d) => {
                for spec in &mut d.specs {
                    self.bind(&spec.name.name, SymKind::Type);
                    if self.hoisting {
                        continue;
                    }
                    self.declare(&mut spec.name, SymKind::Type);
                    self.walk_expr(&mut spec.ty)?;
                }
            }
            Decl::Value(d) => {
                let kind = match d.kind {
                    ValueKind::Const => SymKind::Const,
                    ValueKind::Var => SymKind::Var,
                };
                for spec in &mut d.specs {
                    if !self.hoisting {
                        if let Some(ty) = &mut spec.ty {
                            self.walk_expr(ty)?;
                        }
                        for value in &mut spec.values {
                            self.walk_expr(value)?;
                        }
                    }
                    for name in &mut spec.names {
                        self.bind(&name.name, kind);
                        if !self.hoisting {
                            self.declare(name, kind);
                        }
                    }
                }
            }
            Decl::Func(f) => {
                if f.recv.is_none() {
                    self.bind(&f.name.name, SymKind::Func);
                }
                if self.hoisting {
                    return Ok(());
                }
                if f.recv.is_none() {
                    self.declare(&mut f.name, SymKind::Func);
                }

                self.push_scope();
                self.walk_signature(f.recv.as_mut(), &mut f.ty)?;
                if let Some(body) = &mut f.body {
                    self.walk_block(body)?;
                }
                self.pop_scope();
            }
            Decl::Bad(bad) => {
                return Err(WalkError::Unsupported {
                    construct: "malformed declaration",
                    range: bad.range,
                });
            }
        }
        Ok(())
    }

    fn walk_import_spec(&mut self, spec: &mut ImportSpec) -> Result<(), WalkError> {
        let Some(name) = spec.effective_name()? else {
            return Ok(());
        };
        self.bind(&name, SymKind::Import);
        if self.hoisting {
            return Ok(());
        }

        match &mut spec.name {
            Some(alias) => self.visitor.visit(alias, SymKind::Import, Occurrence::Declaring),
            None => {
                // Unaliased imports are reported under their derived name;
                // a rename turns it into an explicit alias.
                let mut ident = Ident::with_range(name.as_str(), spec.path.range);
                self.visitor
                    .visit(&mut ident, SymKind::Import, Occurrence::Declaring);
                if ident.name != name {
                    spec.name = Some(ident);
                }
            }
        }
        Ok(())
    }

    /// Signature types resolve outside the function; the names are then bound
    /// in the function's own scope.
    fn walk_signature(
        &mut self,
        recv: Option<&mut FieldList>,
        ty: &mut FuncType,
    ) -> Result<(), WalkError> {
        let mut recv = recv;
        if let Some(recv) = recv.as_deref_mut() {
            self.walk_field_types(recv)?;
        }
        self.walk_field_types(&mut ty.params)?;
        self.walk_field_types(&mut ty.results)?;

        if let Some(recv) = recv {
            self.bind_fields(recv, SymKind::Receiver);
        }
        self.bind_fields(&ty.params, SymKind::Parameter);
        self.bind_fields(&ty.results, SymKind::Result);
        Ok(())
    }

    /// Field, parameter and method types. Field and method names are not
    /// bindings of the enclosing scope.
    fn walk_field_types(&mut self, list: &mut FieldList) -> Result<(), WalkError> {
        for field in &mut list.fields {
            self.walk_expr(&mut field.ty)?;
        }
        Ok(())
    }

    fn bind_fields(&mut self, list: &FieldList, kind: SymKind) {
        for field in &list.fields {
            for name in &field.names {
                self.bind(&name.name, kind);
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn walk_block(&mut self, block: &mut BlockStmt) -> Result<(), WalkError> {
        self.push_scope();
        self.walk_stmts(&mut block.stmts)?;
        self.pop_scope();
        Ok(())
    }

    fn walk_stmts(&mut self, stmts: &mut [Stmt]) -> Result<(), WalkError> {
        for stmt in stmts {
            self.walk_stmt(stmt)?;
        }
        Ok(())
    }

    fn walk_opt_stmt(&mut self, stmt: &mut Option<Stmt>) -> Result<(), WalkError> {
        match stmt {
            Some(stmt) => self.walk_stmt(stmt),
            None => Ok(()),
        }
    }

    fn walk_stmt(&mut self, stmt: &mut Stmt) -> Result<(), WalkError> {
        match stmt {
            Stmt::Empty(_) | Stmt::Branch(_) | Stmt::Comment(_) => {}
            Stmt::Decl(decl) => self.walk_decl(decl)?,
            Stmt::Labeled(labeled) => self.walk_stmt(&mut labeled.stmt)?,
            Stmt::Expr(x) | Stmt::Go(x) | Stmt::Defer(x) => self.walk_expr(x)?,
            Stmt::Send(s) => {
                self.walk_expr(&mut s.chan)?;
                self.walk_expr(&mut s.value)?;
            }
            Stmt::IncDec(s) => self.walk_expr(&mut s.x)?,
            Stmt::Assign(a) => {
                for x in &mut a.rhs {
                    self.walk_expr(x)?;
                }
                let define = a.is_define();
                for x in &mut a.lhs {
                    if define {
                        let Some(ident) = x.unparen_ident() else {
                            return Err(WalkError::InvalidDefineTarget {
                                construct: "short variable declaration",
                                range: a.range,
                            });
                        };
                        let name = ident.name.clone();
                        self.bind(&name, SymKind::Var);
                    }
                    self.walk_expr(x)?;
                }
            }
            Stmt::Return(r) => {
                for x in &mut r.results {
                    self.walk_expr(x)?;
                }
            }
            Stmt::Block(block) => self.walk_block(block)?,
            Stmt::If(s) => {
                self.push_scope();
                self.walk_opt_stmt(&mut s.init)?;
                self.walk_expr(&mut s.cond)?;
                self.walk_block(&mut s.body)?;
                self.walk_opt_stmt(&mut s.els)?;
                self.pop_scope();
            }
            Stmt::Switch(s) => {
                self.push_scope();
                self.walk_opt_stmt(&mut s.init)?;
                if let Some(tag) = &mut s.tag {
                    self.walk_expr(tag)?;
                }
                self.walk_case_clauses(&mut s.clauses)?;
                self.pop_scope();
            }
            Stmt::TypeSwitch(s) => {
                self.push_scope();
                self.walk_opt_stmt(&mut s.init)?;
                self.walk_stmt(&mut s.assign)?;
                self.walk_case_clauses(&mut s.clauses)?;
                self.pop_scope();
            }
            Stmt::Select(s) => {
                for clause in &mut s.clauses {
                    self.push_scope();
                    self.walk_opt_stmt(&mut clause.comm)?;
                    self.walk_stmts(&mut clause.body)?;
                    self.pop_scope();
                }
            }
            Stmt::For(s) => {
                self.push_scope();
                self.walk_opt_stmt(&mut s.init)?;
                if let Some(cond) = &mut s.cond {
                    self.walk_expr(cond)?;
                }
                self.walk_opt_stmt(&mut s.post)?;
                self.walk_block(&mut s.body)?;
                self.pop_scope();
            }
            Stmt::Range(s) => {
                self.push_scope();
                self.walk_expr(&mut s.x)?;
                if s.define {
                    for target in [&s.key, &s.value].into_iter().flatten() {
                        let Some(ident) = target.unparen_ident() else {
                            return Err(WalkError::InvalidDefineTarget {
                                construct: "range clause",
                                range: s.body.range,
                            });
                        };
                        let name = ident.name.clone();
                        self.bind(&name, SymKind::Var);
                    }
                }
                if let Some(key) = &mut s.key {
                    self.walk_expr(key)?;
                }
                if let Some(value) = &mut s.value {
                    self.walk_expr(value)?;
                }
                self.walk_block(&mut s.body)?;
                self.pop_scope();
            }
            Stmt::Bad(bad) => {
                return Err(WalkError::Unsupported {
                    construct: "malformed statement",
                    range: bad.range,
                });
            }
        }
        Ok(())
    }

    fn walk_case_clauses(&mut self, clauses: &mut [CaseClause]) -> Result<(), WalkError> {
        for clause in clauses {
            self.push_scope();
            for x in &mut clause.list {
                self.walk_expr(x)?;
            }
            self.walk_stmts(&mut clause.body)?;
            self.pop_scope();
        }
        Ok(())
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    /// Walk a composite literal. `implied` is the element type an elided
    /// literal takes from its enclosing literal.
    ///
    /// Keys of map, array and slice literals are expressions and resolve
    /// like any other. A bare identifier key of any other literal names a
    /// struct field and is left alone.
    fn walk_composite_lit(
        &mut self,
        lit: &mut CompositeLit,
        implied: Option<&Expr>,
    ) -> Result<(), WalkError> {
        self.walk_opt_expr(&mut lit.ty)?;

        let ty = lit.ty.as_ref().or(implied).map(|t| unparen(t).clone());
        let (keys_are_exprs, key_ty, elt_ty) = match &ty {
            Some(Expr::MapType(m)) => (true, Some(&m.key), Some(&m.value)),
            Some(Expr::ArrayType(a)) => (true, None, Some(&a.elt)),
            _ => (false, None, None),
        };

        for elt in &mut lit.elts {
            match elt {
                Expr::KeyValue(kv) => {
                    if keys_are_exprs || !matches!(kv.key, Expr::Ident(_)) {
                        self.walk_element(&mut kv.key, key_ty)?;
                    }
                    self.walk_element(&mut kv.value, elt_ty)?;
                }
                other => self.walk_element(other, elt_ty)?,
            }
        }
        Ok(())
    }

    /// An element or key of a composite literal, which may itself be a
    /// literal with its type elided.
    fn walk_element(&mut self, expr: &mut Expr, implied: Option<&Expr>) -> Result<(), WalkError> {
        match expr {
            Expr::CompositeLit(lit) if lit.ty.is_none() => {
                // `{...}` for a `*T` element stands for `&T{...}`.
                let implied = implied.map(|t| match unparen(t) {
                    Expr::Star(inner) => inner.as_ref(),
                    other => other,
                });
                self.walk_composite_lit(lit, implied)
            }
            other => self.walk_expr(other),
        }
    }

    fn walk_opt_expr(&mut self, expr: &mut Option<Expr>) -> Result<(), WalkError> {
        match expr {
            Some(x) => self.walk_expr(x),
            None => Ok(()),
        }
    }

    fn walk_expr(&mut self, expr: &mut Expr) -> Result<(), WalkError> {
        match expr {
            Expr::Ident(ident) => self.resolve(ident),
            Expr::BasicLit(_) => {}
            Expr::Ellipsis(elt) => {
                if let Some(elt) = elt {
                    self.walk_expr(elt)?;
                }
            }
            Expr::FuncLit(f) => {
                self.push_scope();
                self.walk_signature(None, &mut f.ty)?;
                self.walk_block(&mut f.body)?;
                self.pop_scope();
            }
            Expr::CompositeLit(lit) => self.walk_composite_lit(lit, None)?,
            Expr::Paren(x) | Expr::Star(x) => self.walk_expr(x)?,
            // Only the operand; the selected name belongs to another namespace.
            Expr::Selector(s) => self.walk_expr(&mut s.x)?,
            Expr::Index(ix) => {
                self.walk_expr(&mut ix.x)?;
                self.walk_expr(&mut ix.index)?;
            }
            Expr::Slice(s) => {
                self.walk_expr(&mut s.x)?;
                self.walk_opt_expr(&mut s.low)?;
                self.walk_opt_expr(&mut s.high)?;
                self.walk_opt_expr(&mut s.max)?;
            }
            Expr::TypeAssert(ta) => {
                self.walk_expr(&mut ta.x)?;
                self.walk_opt_expr(&mut ta.ty)?;
            }
            Expr::Call(call) => {
                self.walk_expr(&mut call.fun)?;
                for arg in &mut call.args {
                    self.walk_expr(arg)?;
                }
            }
            Expr::Unary(u) => self.walk_expr(&mut u.x)?,
            Expr::Binary(b) => {
                self.walk_expr(&mut b.x)?;
                self.walk_expr(&mut b.y)?;
            }
            Expr::KeyValue(kv) => {
                // Outside a literal whose type is known; treated like a struct key.
                if !matches!(kv.key, Expr::Ident(_)) {
                    self.walk_expr(&mut kv.key)?;
                }
                self.walk_expr(&mut kv.value)?;
            }
            Expr::ArrayType(a) => {
                self.walk_opt_expr(&mut a.len)?;
                self.walk_expr(&mut a.elt)?;
            }
            Expr::StructType(fields) | Expr::InterfaceType(fields) => {
                self.walk_field_types(fields)?;
            }
            Expr::FuncType(sig) => {
                self.walk_field_types(&mut sig.params)?;
                self.walk_field_types(&mut sig.results)?;
            }
            Expr::MapType(m) => {
                self.walk_expr(&mut m.key)?;
                self.walk_expr(&mut m.value)?;
            }
            Expr::ChanType(c) => self.walk_expr(&mut c.value)?,
            Expr::Bad(bad) => {
                return Err(WalkError::Unsupported {
                    construct: "malformed expression",
                    range: bad.range,
                });
            }
        }
        Ok(())
    }
}

fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(inner) => unparen(inner),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_statement_aborts_walk() {
        let mut file = SourceFile::new("bad.go", "a");
        let mut body = BlockStmt::new(Vec::new());
        body.stmts.push(Stmt::Bad(BadNode {
            range: TextRange::new(10, 12),
        }));
        file.decls.push(Decl::Func(FuncDecl {
            doc: Vec::new(),
            recv: None,
            name: Ident::new("f"),
            ty: FuncType::default(),
            body: Some(body),
            range: TextRange::DETACHED,
        }));

        let mut seen = Vec::new();
        let err = walk_file(&mut file, &mut |id: &mut Ident, _: SymKind, _: Occurrence| {
            seen.push(id.name.clone())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            WalkError::Unsupported {
                construct: "malformed statement",
                ..
            }
        ));
        assert_eq!(seen, vec!["f".to_string()]);
    }
}
