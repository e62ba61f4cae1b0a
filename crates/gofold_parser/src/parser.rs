//! The Go parser: token management, declarations and statements.
//!
//! Recursive descent over the scanner's tokens. Expressions and types live
//! in `expressions.rs`. Comments are claimed from the scanner at fixed
//! points: leading comments become `doc`, a same-line comment after a spec or
//! field becomes its `comment`, and inside blocks every comment becomes a
//! `Stmt::Comment` in place.

use gofold_ast::*;
use gofold_core::text::TextRange;
use gofold_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use gofold_scanner::Scanner;

use crate::utilities::*;

/// The parser produces a SourceFile tree from Go source text.
pub struct Parser<'a> {
    pub(crate) scanner: Scanner<'a>,
    file_name: String,
    diagnostics: DiagnosticCollection,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    pub(crate) recursion_depth: u32,
    /// Open links of left-nested expression chains.
    chain_depth: u32,
    depth_reported: bool,
    /// Negative inside control clause headers, where `T {` opens a block.
    pub(crate) expr_lev: i32,
    /// End of the last consumed token that was not an implicit semicolon.
    prev_end: u32,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: &str, source_text: &'a str) -> Self {
        let mut scanner = Scanner::new(source_text);
        scanner.set_file_name(file_name);
        Self {
            scanner,
            file_name: file_name.to_string(),
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            chain_depth: 0,
            depth_reported: false,
            expr_lev: 0,
            prev_end: 0,
        }
    }

    /// Parse the whole unit. Diagnostics from both the scanner and the
    /// parser are returned alongside the (possibly partial) tree.
    pub fn parse_source_file(mut self) -> (SourceFile, DiagnosticCollection) {
        self.next_token();

        let doc = self.take_doc();
        let package = if self.current_token() == SyntaxKind::PackageKeyword {
            self.next_token();
            let name = self.parse_ident();
            self.expect_semicolon();
            name
        } else {
            self.error(&messages::PACKAGE_CLAUSE_EXPECTED, &[]);
            Ident::with_range("_", self.token_range())
        };

        let mut decls = Vec::new();
        let mut seen_other = false;
        while self.current_token() != SyntaxKind::EndOfFileToken {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                continue;
            }
            let doc = self.take_doc();
            let saved_pos = self.scanner.token_start();
            let decl = match self.current_token() {
                SyntaxKind::ImportKeyword => {
                    if seen_other {
                        self.error(&messages::IMPORTS_AFTER_DECLARATIONS, &[]);
                    }
                    Decl::Import(self.parse_import_decl(doc))
                }
                SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword => {
                    Decl::Value(self.parse_value_decl(doc))
                }
                SyntaxKind::TypeKeyword => Decl::Type(self.parse_type_decl(doc)),
                SyntaxKind::FuncKeyword => Decl::Func(self.parse_func_decl(doc)),
                other => {
                    self.error(&messages::DECLARATION_EXPECTED, &[other.describe()]);
                    let range = self.token_range();
                    Decl::Bad(BadNode { range })
                }
            };
            seen_other |= !decl.is_import();
            decls.push(decl);
            if self.scanner.token_start() == saved_pos {
                self.skip_to_next_declaration();
            }
        }

        if decls.is_empty() {
            self.diagnostics.add(Diagnostic::with_location(
                &self.file_name,
                TextRange::empty(0),
                &messages::EMPTY_FILE,
                &[],
            ));
        }

        let end_comments = self.take_doc();
        let file = SourceFile {
            file_name: self.file_name.clone(),
            doc,
            package,
            decls,
            end_comments,
        };
        let diagnostics = self.take_diagnostics();
        (file, diagnostics)
    }

    fn take_diagnostics(&mut self) -> DiagnosticCollection {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.extend(self.scanner.take_diagnostics());
        diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        if !self.scanner.is_implicit_semicolon() {
            self.prev_end = self.scanner.token_end() as u32;
        }
        self.scanner.scan()
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    pub(crate) fn token_range(&self) -> TextRange {
        self.scanner.token_range()
    }

    /// Range from `start` to the end of the last consumed token.
    pub(crate) fn range_from(&self, start: u32) -> TextRange {
        TextRange::new(start, self.prev_end.max(start))
    }

    /// Description of the current token for "found ..." messages.
    pub(crate) fn found(&self) -> &'static str {
        if self.scanner.is_implicit_semicolon() {
            "newline"
        } else {
            self.current_token().describe()
        }
    }

    pub(crate) fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            let text = kind.text().unwrap_or_else(|| kind.describe());
            let found = self.found();
            self.error(&messages::_0_EXPECTED, &[text, found]);
            false
        }
    }

    pub(crate) fn optional_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume a statement terminator. It may be omitted before a closing
    /// `)` or `}`.
    pub(crate) fn expect_semicolon(&mut self) {
        match self.current_token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
            }
            SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken => {}
            _ => {
                let found = self.found();
                self.error(&messages::_0_EXPECTED, &[";", found]);
            }
        }
    }

    pub(crate) fn error(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let range = self.token_range();
        self.diagnostics.add(Diagnostic::with_location(
            &self.file_name,
            range,
            message,
            args,
        ));
    }

    /// Enter one nesting level. Returns false once the depth limit is hit.
    pub(crate) fn enter(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            if !self.depth_reported {
                self.depth_reported = true;
                self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            }
            return false;
        }
        true
    }

    #[inline]
    pub(crate) fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Nest `x` one link deeper in a chain. Past the chain limit the chain
    /// built so far is replaced by a bad node, so the tree stays shallow.
    pub(crate) fn extend_chain(&mut self, x: Expr, links: &mut u32) -> Expr {
        if self.chain_depth < MAX_CHAIN_DEPTH {
            self.chain_depth += 1;
            *links += 1;
            return x;
        }
        if !self.depth_reported {
            self.depth_reported = true;
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
        }
        Expr::Bad(BadNode {
            range: self.token_range(),
        })
    }

    /// Close the links opened by one chain.
    #[inline]
    pub(crate) fn end_chain(&mut self, links: u32) {
        self.chain_depth -= links;
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Claim every pending comment as documentation lines.
    pub(crate) fn take_doc(&mut self) -> Vec<String> {
        self.scanner
            .take_comments()
            .into_iter()
            .map(|c| c.text)
            .collect()
    }

    /// Claim a comment on the same line as the construct just finished.
    pub(crate) fn take_trailing_comment(&mut self) -> Option<String> {
        self.scanner.take_trailing_comment().map(|c| c.text)
    }

    fn push_comments(&mut self, stmts: &mut Vec<Stmt>) {
        for comment in self.scanner.take_comments() {
            stmts.push(Stmt::Comment(CommentStmt {
                text: comment.text,
                trailing: comment.trailing,
            }));
        }
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    fn skip_to_next_declaration(&mut self) {
        self.next_token();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && !is_declaration_start(self.current_token())
        {
            self.next_token();
        }
    }

    fn skip_to_next_statement(&mut self) {
        self.next_token();
        while self.current_token() != SyntaxKind::EndOfFileToken
            && !is_statement_start(self.current_token())
        {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                return;
            }
            self.next_token();
        }
    }

    // ========================================================================
    // Identifiers
    // ========================================================================

    pub(crate) fn parse_ident(&mut self) -> Ident {
        if self.current_token() == SyntaxKind::Identifier {
            let ident = Ident::with_range(self.scanner.token_value(), self.token_range());
            self.next_token();
            ident
        } else {
            let found = self.found();
            self.error(&messages::IDENTIFIER_EXPECTED, &[found]);
            Ident::with_range("_", TextRange::empty(self.token_pos()))
        }
    }

    pub(crate) fn parse_ident_list(&mut self) -> Vec<Ident> {
        let mut names = vec![self.parse_ident()];
        while self.optional_token(SyntaxKind::CommaToken) {
            names.push(self.parse_ident());
        }
        names
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Parse `kw spec` or `kw ( spec; ... )`, calling `parse_spec` with each
    /// spec's leading comments.
    fn parse_group<T>(
        &mut self,
        mut parse_spec: impl FnMut(&mut Self, Vec<String>) -> T,
    ) -> (bool, Vec<T>, Vec<String>) {
        self.next_token();
        if self.current_token() != SyntaxKind::OpenParenToken {
            let doc = self.take_doc();
            return (false, vec![parse_spec(self, doc)], Vec::new());
        }
        self.next_token();
        let mut specs = Vec::new();
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                continue;
            }
            let saved_pos = self.scanner.token_start();
            let doc = self.take_doc();
            specs.push(parse_spec(self, doc));
            if self.scanner.token_start() == saved_pos {
                self.next_token();
            }
        }
        let end_comments = self.take_doc();
        self.expect_token(SyntaxKind::CloseParenToken);
        self.expect_semicolon();
        (true, specs, end_comments)
    }

    fn parse_import_decl(&mut self, doc: Vec<String>) -> ImportDecl {
        let start = self.token_pos();
        let (grouped, specs, end_comments) = self.parse_group(Self::parse_import_spec);
        ImportDecl {
            doc,
            grouped,
            specs,
            end_comments,
            range: self.range_from(start),
        }
    }

    fn parse_import_spec(&mut self, doc: Vec<String>) -> ImportSpec {
        let name = match self.current_token() {
            SyntaxKind::Identifier => Some(self.parse_ident()),
            SyntaxKind::DotToken => {
                let dot = Ident::with_range(".", self.token_range());
                self.next_token();
                Some(dot)
            }
            _ => None,
        };

        let path = if self.current_token() == SyntaxKind::StringLiteral {
            let value = self.scanner.token_value();
            if let Err(err) = unquote(value) {
                let reason = err.to_string();
                self.error(&messages::INVALID_IMPORT_PATH, &[value, &reason]);
            }
            let lit = BasicLit {
                kind: LitKind::String,
                value: value.to_string(),
                range: self.token_range(),
            };
            self.next_token();
            lit
        } else {
            self.error(&messages::IMPORT_PATH_EXPECTED, &[]);
            BasicLit::string("")
        };

        self.expect_semicolon();
        let comment = self.take_trailing_comment();
        ImportSpec {
            doc,
            name,
            path,
            comment,
        }
    }

    fn parse_type_decl(&mut self, doc: Vec<String>) -> TypeDecl {
        let start = self.token_pos();
        let (grouped, specs, end_comments) = self.parse_group(Self::parse_type_spec);
        TypeDecl {
            doc,
            grouped,
            specs,
            end_comments,
            range: self.range_from(start),
        }
    }

    fn parse_type_spec(&mut self, doc: Vec<String>) -> TypeSpec {
        let name = self.parse_ident();
        let assign = self.optional_token(SyntaxKind::EqualsToken);
        let ty = self.parse_type();
        self.expect_semicolon();
        let comment = self.take_trailing_comment();
        TypeSpec {
            doc,
            name,
            assign,
            ty,
            comment,
        }
    }

    fn parse_value_decl(&mut self, doc: Vec<String>) -> ValueDecl {
        let start = self.token_pos();
        let kind = if self.current_token() == SyntaxKind::ConstKeyword {
            ValueKind::Const
        } else {
            ValueKind::Var
        };
        let (grouped, specs, end_comments) = self.parse_group(Self::parse_value_spec);
        ValueDecl {
            doc,
            kind,
            grouped,
            specs,
            end_comments,
            range: self.range_from(start),
        }
    }

    fn parse_value_spec(&mut self, doc: Vec<String>) -> ValueSpec {
        let names = self.parse_ident_list();
        let ty = match self.current_token() {
            SyntaxKind::EqualsToken
            | SyntaxKind::SemicolonToken
            | SyntaxKind::CloseParenToken => None,
            _ => Some(self.parse_type()),
        };
        let values = if self.optional_token(SyntaxKind::EqualsToken) {
            self.parse_expr_list()
        } else {
            Vec::new()
        };
        self.expect_semicolon();
        let comment = self.take_trailing_comment();
        ValueSpec {
            doc,
            names,
            ty,
            values,
            comment,
        }
    }

    fn parse_func_decl(&mut self, doc: Vec<String>) -> FuncDecl {
        let start = self.token_pos();
        self.expect_token(SyntaxKind::FuncKeyword);
        let recv = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_parameters())
        } else {
            None
        };
        let name = self.parse_ident();
        if self.current_token() == SyntaxKind::OpenBracketToken {
            self.error(&messages::TYPE_PARAMETERS_NOT_SUPPORTED, &[]);
            self.skip_brackets();
        }
        let ty = self.parse_signature();
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            self.expr_lev += 1;
            let body = self.parse_block();
            self.expr_lev -= 1;
            Some(body)
        } else {
            None
        };
        let range = self.range_from(start);
        self.expect_semicolon();
        FuncDecl {
            doc,
            recv,
            name,
            ty,
            body,
            range,
        }
    }

    /// Skip a balanced `[ ... ]` run.
    pub(crate) fn skip_brackets(&mut self) {
        let mut depth = 0u32;
        loop {
            match self.current_token() {
                SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBracketToken => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.next_token();
                        return;
                    }
                }
                SyntaxKind::EndOfFileToken => return,
                _ => {}
            }
            self.next_token();
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub(crate) fn parse_block(&mut self) -> BlockStmt {
        let start = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let stmts = self.parse_stmt_list();
        self.expect_token(SyntaxKind::CloseBraceToken);
        BlockStmt {
            stmts,
            range: self.range_from(start),
        }
    }

    fn parse_stmt_list(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            self.push_comments(&mut stmts);
            match self.current_token() {
                SyntaxKind::CloseBraceToken
                | SyntaxKind::EndOfFileToken
                | SyntaxKind::CaseKeyword
                | SyntaxKind::DefaultKeyword => break,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    continue;
                }
                _ => {}
            }
            let saved_pos = self.scanner.token_start();
            let stmt = self.parse_stmt();
            stmts.push(stmt);
            if self.scanner.token_start() == saved_pos {
                self.skip_to_next_statement();
            }
        }
        stmts
    }

    fn parse_stmt(&mut self) -> Stmt {
        if !self.enter() {
            self.leave();
            return Stmt::Bad(BadNode {
                range: self.token_range(),
            });
        }
        let stmt = self.parse_stmt_inner();
        self.leave();
        stmt
    }

    fn parse_stmt_inner(&mut self) -> Stmt {
        match self.current_token() {
            SyntaxKind::ConstKeyword | SyntaxKind::VarKeyword => {
                Stmt::Decl(Box::new(Decl::Value(self.parse_value_decl(Vec::new()))))
            }
            SyntaxKind::TypeKeyword => {
                Stmt::Decl(Box::new(Decl::Type(self.parse_type_decl(Vec::new()))))
            }
            SyntaxKind::GoKeyword | SyntaxKind::DeferKeyword => {
                let kw = self.current_token();
                self.next_token();
                let call = self.parse_call_expr(kw);
                self.expect_semicolon();
                if kw == SyntaxKind::GoKeyword {
                    Stmt::Go(call)
                } else {
                    Stmt::Defer(call)
                }
            }
            SyntaxKind::ReturnKeyword => {
                self.next_token();
                let results = match self.current_token() {
                    SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken => Vec::new(),
                    _ => self.parse_expr_list(),
                };
                self.expect_semicolon();
                Stmt::Return(ReturnStmt { results })
            }
            SyntaxKind::BreakKeyword
            | SyntaxKind::ContinueKeyword
            | SyntaxKind::GotoKeyword
            | SyntaxKind::FallthroughKeyword => {
                let tok = self.current_token();
                self.next_token();
                let label = if tok != SyntaxKind::FallthroughKeyword
                    && self.current_token() == SyntaxKind::Identifier
                {
                    Some(self.parse_ident())
                } else {
                    None
                };
                self.expect_semicolon();
                Stmt::Branch(BranchStmt { tok, label })
            }
            SyntaxKind::OpenBraceToken => {
                let block = self.parse_block();
                self.expect_semicolon();
                Stmt::Block(block)
            }
            SyntaxKind::IfKeyword => {
                let stmt = self.parse_if_stmt();
                self.expect_semicolon();
                stmt
            }
            SyntaxKind::SwitchKeyword => {
                let stmt = self.parse_switch_stmt();
                self.expect_semicolon();
                stmt
            }
            SyntaxKind::SelectKeyword => {
                let stmt = self.parse_select_stmt();
                self.expect_semicolon();
                stmt
            }
            SyntaxKind::ForKeyword => {
                let stmt = self.parse_for_stmt();
                self.expect_semicolon();
                stmt
            }
            SyntaxKind::SemicolonToken => {
                let range = self.token_range();
                self.next_token();
                Stmt::Empty(range)
            }
            kind if self.is_expression_start(kind) => {
                match self.parse_simple_stmt(SimpleMode::LabelOk) {
                    SimpleStmt::Labeled(stmt) => stmt,
                    SimpleStmt::Stmt(stmt) => {
                        self.expect_semicolon();
                        stmt
                    }
                    SimpleStmt::Range { x, .. } => Stmt::Expr(x),
                }
            }
            _ => {
                let found = self.found();
                self.error(&messages::STATEMENT_EXPECTED, &[found]);
                Stmt::Bad(BadNode {
                    range: self.token_range(),
                })
            }
        }
    }

    /// Parse an expression, send, inc/dec, assignment or labeled statement.
    pub(crate) fn parse_simple_stmt(&mut self, mode: SimpleMode) -> SimpleStmt {
        let start = self.token_pos();
        let mut lhs = self.parse_expr_list();

        let op = self.current_token();
        if op.is_assign_op() {
            self.next_token();
            let is_plain = op == SyntaxKind::ColonEqualsToken || op == SyntaxKind::EqualsToken;
            if mode == SimpleMode::RangeOk
                && is_plain
                && self.current_token() == SyntaxKind::RangeKeyword
            {
                self.next_token();
                let x = self.parse_expr();
                if lhs.len() > 2 {
                    self.error(&messages::RANGE_CLAUSE_ASSIGNMENT, &[]);
                }
                let mut targets = lhs.into_iter();
                return SimpleStmt::Range {
                    key: targets.next(),
                    value: targets.next(),
                    define: op == SyntaxKind::ColonEqualsToken,
                    x,
                };
            }
            if op == SyntaxKind::ColonEqualsToken
                && lhs.iter().any(|x| x.unparen_ident().is_none())
            {
                self.error(&messages::EXPECTED_IDENTIFIER_ON_LEFT_OF_DEFINE, &[]);
            }
            let rhs = self.parse_expr_list();
            return SimpleStmt::Stmt(Stmt::Assign(Box::new(AssignStmt {
                lhs,
                op,
                rhs,
                range: self.range_from(start),
            })));
        }

        if lhs.len() > 1 {
            let found = self.found();
            self.error(&messages::_0_EXPECTED, &[":= or =", found]);
        }
        let x = lhs.swap_remove(0);

        match (self.current_token(), x) {
            (SyntaxKind::ColonToken, Expr::Ident(label)) if mode == SimpleMode::LabelOk => {
                self.next_token();
                // A label directly before `}` labels an empty statement.
                let stmt = if self.current_token() == SyntaxKind::CloseBraceToken {
                    Stmt::Empty(TextRange::empty(self.token_pos()))
                } else {
                    self.parse_stmt()
                };
                SimpleStmt::Labeled(Stmt::Labeled(Box::new(LabeledStmt { label, stmt })))
            }
            (SyntaxKind::LessThanMinusToken, x) => {
                self.next_token();
                let value = self.parse_expr();
                SimpleStmt::Stmt(Stmt::Send(Box::new(SendStmt { chan: x, value })))
            }
            (SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken, x) => {
                let inc = self.current_token() == SyntaxKind::PlusPlusToken;
                self.next_token();
                SimpleStmt::Stmt(Stmt::IncDec(Box::new(IncDecStmt { x, inc })))
            }
            (_, x) => SimpleStmt::Stmt(Stmt::Expr(x)),
        }
    }

    fn parse_simple_stmt_basic(&mut self) -> Stmt {
        match self.parse_simple_stmt(SimpleMode::Basic) {
            SimpleStmt::Stmt(stmt) | SimpleStmt::Labeled(stmt) => stmt,
            SimpleStmt::Range { x, .. } => Stmt::Expr(x),
        }
    }

    /// Turn a header statement into the condition expression it must be.
    fn stmt_to_expr(&mut self, stmt: Option<Stmt>, what: &str) -> Expr {
        match stmt {
            Some(Stmt::Expr(x)) => x,
            Some(_) | None => {
                let found = self.found();
                self.error(&messages::_0_EXPECTED, &[what, found]);
                Expr::Bad(BadNode {
                    range: self.token_range(),
                })
            }
        }
    }

    fn parse_if_stmt(&mut self) -> Stmt {
        self.expect_token(SyntaxKind::IfKeyword);

        let old = self.expr_lev;
        self.expr_lev = -1;
        let mut init = None;
        let mut cond = None;
        if self.current_token() != SyntaxKind::OpenBraceToken {
            if self.current_token() != SyntaxKind::SemicolonToken {
                cond = Some(self.parse_simple_stmt_basic());
            }
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                init = cond.take();
                if self.current_token() != SyntaxKind::OpenBraceToken {
                    cond = Some(self.parse_simple_stmt_basic());
                }
            }
        }
        self.expr_lev = old;
        let cond = self.stmt_to_expr(cond, "condition");

        let body = self.parse_block();
        let els = if self.optional_token(SyntaxKind::ElseKeyword) {
            match self.current_token() {
                SyntaxKind::IfKeyword => Some(self.parse_if_stmt()),
                SyntaxKind::OpenBraceToken => Some(Stmt::Block(self.parse_block())),
                _ => {
                    let found = self.found();
                    self.error(&messages::_0_EXPECTED, &["if statement or block", found]);
                    None
                }
            }
        } else {
            None
        };

        Stmt::If(Box::new(IfStmt {
            init,
            cond,
            body,
            els,
        }))
    }

    fn parse_case_clause(&mut self) -> CaseClause {
        let is_default = self.current_token() == SyntaxKind::DefaultKeyword;
        self.next_token();
        let list = if is_default {
            Vec::new()
        } else {
            self.parse_expr_list()
        };
        self.expect_token(SyntaxKind::ColonToken);
        let body = self.parse_stmt_list();
        CaseClause {
            list,
            is_default,
            body,
        }
    }

    fn parse_switch_stmt(&mut self) -> Stmt {
        self.expect_token(SyntaxKind::SwitchKeyword);

        let old = self.expr_lev;
        self.expr_lev = -1;
        let mut init = None;
        let mut tag = None;
        if self.current_token() != SyntaxKind::OpenBraceToken {
            if self.current_token() != SyntaxKind::SemicolonToken {
                tag = Some(self.parse_simple_stmt_basic());
            }
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                init = tag.take();
                if self.current_token() != SyntaxKind::OpenBraceToken {
                    tag = Some(self.parse_simple_stmt_basic());
                }
            }
        }
        self.expr_lev = old;

        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.current_token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_case_clause());
        }
        self.expect_token(SyntaxKind::CloseBraceToken);

        match tag {
            Some(assign) if is_type_switch_guard(&assign) => {
                Stmt::TypeSwitch(Box::new(TypeSwitchStmt {
                    init,
                    assign,
                    clauses,
                }))
            }
            Some(Stmt::Expr(x)) => Stmt::Switch(Box::new(SwitchStmt {
                init,
                tag: Some(x),
                clauses,
            })),
            Some(_) => {
                let x = self.stmt_to_expr(None, "switch expression");
                Stmt::Switch(Box::new(SwitchStmt {
                    init,
                    tag: Some(x),
                    clauses,
                }))
            }
            None => Stmt::Switch(Box::new(SwitchStmt {
                init,
                tag: None,
                clauses,
            })),
        }
    }

    fn parse_comm_clause(&mut self) -> CommClause {
        let comm = if self.current_token() == SyntaxKind::CaseKeyword {
            self.next_token();
            let mut lhs = self.parse_expr_list();
            let op = self.current_token();
            let stmt = if op == SyntaxKind::LessThanMinusToken {
                self.next_token();
                if lhs.len() > 1 {
                    self.error(&messages::SELECT_CASE_MUST_BE_COMMUNICATION, &[]);
                }
                let value = self.parse_expr();
                Stmt::Send(Box::new(SendStmt {
                    chan: lhs.swap_remove(0),
                    value,
                }))
            } else if op == SyntaxKind::EqualsToken || op == SyntaxKind::ColonEqualsToken {
                let start = self.token_pos();
                self.next_token();
                let rhs = self.parse_expr();
                if !is_receive(&rhs) {
                    self.error(&messages::SELECT_CASE_MUST_BE_COMMUNICATION, &[]);
                }
                Stmt::Assign(Box::new(AssignStmt {
                    lhs,
                    op,
                    rhs: vec![rhs],
                    range: self.range_from(start),
                }))
            } else {
                let x = lhs.swap_remove(0);
                if !is_receive(&x) {
                    self.error(&messages::SELECT_CASE_MUST_BE_COMMUNICATION, &[]);
                }
                Stmt::Expr(x)
            };
            Some(stmt)
        } else {
            self.expect_token(SyntaxKind::DefaultKeyword);
            None
        };
        self.expect_token(SyntaxKind::ColonToken);
        let body = self.parse_stmt_list();
        CommClause { comm, body }
    }

    fn parse_select_stmt(&mut self) -> Stmt {
        self.expect_token(SyntaxKind::SelectKeyword);
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut clauses = Vec::new();
        while matches!(
            self.current_token(),
            SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword
        ) {
            clauses.push(self.parse_comm_clause());
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        Stmt::Select(Box::new(SelectStmt { clauses }))
    }

    fn parse_for_stmt(&mut self) -> Stmt {
        self.expect_token(SyntaxKind::ForKeyword);

        let old = self.expr_lev;
        self.expr_lev = -1;
        let mut init = None;
        let mut cond = None;
        let mut post = None;
        let mut range = None;
        if self.current_token() != SyntaxKind::OpenBraceToken {
            if self.current_token() == SyntaxKind::RangeKeyword {
                self.next_token();
                let x = self.parse_expr();
                range = Some((None, None, false, x));
            } else if self.current_token() != SyntaxKind::SemicolonToken {
                match self.parse_simple_stmt(SimpleMode::RangeOk) {
                    SimpleStmt::Range {
                        key,
                        value,
                        define,
                        x,
                    } => range = Some((key, value, define, x)),
                    SimpleStmt::Stmt(stmt) | SimpleStmt::Labeled(stmt) => cond = Some(stmt),
                }
            }
            if range.is_none() && self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                init = cond.take();
                if self.current_token() != SyntaxKind::SemicolonToken {
                    cond = Some(self.parse_simple_stmt_basic());
                }
                self.expect_token(SyntaxKind::SemicolonToken);
                if self.current_token() != SyntaxKind::OpenBraceToken {
                    post = Some(self.parse_simple_stmt_basic());
                }
            }
        }
        self.expr_lev = old;

        let cond = match cond {
            Some(stmt) => Some(self.stmt_to_expr(Some(stmt), "for condition")),
            None => None,
        };
        let body = self.parse_block();

        match range {
            Some((key, value, define, x)) => Stmt::Range(Box::new(RangeStmt {
                key,
                value,
                define,
                x,
                body,
            })),
            None => Stmt::For(Box::new(ForStmt {
                init,
                cond,
                post,
                body,
            })),
        }
    }
}

/// `x.(type)` or `v := x.(type)`.
fn is_type_switch_guard(stmt: &Stmt) -> bool {
    let is_guard = |x: &Expr| matches!(x, Expr::TypeAssert(ta) if ta.ty.is_none());
    match stmt {
        Stmt::Expr(x) => is_guard(x),
        Stmt::Assign(assign) => {
            assign.is_define() && assign.lhs.len() == 1 && assign.rhs.len() == 1 && is_guard(&assign.rhs[0])
        }
        _ => false,
    }
}

/// A receive operation `<-ch`, possibly parenthesized.
fn is_receive(x: &Expr) -> bool {
    match x {
        Expr::Unary(u) => u.op == SyntaxKind::LessThanMinusToken,
        Expr::Paren(inner) => is_receive(inner),
        _ => false,
    }
}
