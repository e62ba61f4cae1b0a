//! Expression and type parsing.

use gofold_ast::syntax_kind::LOWEST_PRECEDENCE;
use gofold_ast::*;
use gofold_diagnostics::messages;

use crate::parser::Parser;
use crate::utilities::*;

impl<'a> Parser<'a> {
    /// Whether a token can begin an expression statement.
    pub(crate) fn is_expression_start(&self, kind: SyntaxKind) -> bool {
        kind.is_literal()
            || matches!(
                kind,
                SyntaxKind::Identifier
                    | SyntaxKind::FuncKeyword
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::StructKeyword
                    | SyntaxKind::MapKeyword
                    | SyntaxKind::ChanKeyword
                    | SyntaxKind::InterfaceKeyword
                    | SyntaxKind::PlusToken
                    | SyntaxKind::MinusToken
                    | SyntaxKind::ExclamationToken
                    | SyntaxKind::CaretToken
                    | SyntaxKind::AsteriskToken
                    | SyntaxKind::AmpersandToken
                    | SyntaxKind::LessThanMinusToken
            )
    }

    fn bad_expr(&self) -> Expr {
        Expr::Bad(BadNode {
            range: self.token_range(),
        })
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub(crate) fn parse_expr(&mut self) -> Expr {
        self.parse_binary_expr(LOWEST_PRECEDENCE + 1)
    }

    pub(crate) fn parse_expr_list(&mut self) -> Vec<Expr> {
        let mut list = vec![self.parse_expr()];
        while self.optional_token(SyntaxKind::CommaToken) {
            list.push(self.parse_expr());
        }
        list
    }

    fn parse_binary_expr(&mut self, prec1: u8) -> Expr {
        let mut x = self.parse_unary_expr();
        let mut links = 0;
        loop {
            let op = self.current_token();
            let oprec = op.binary_precedence();
            if oprec < prec1 {
                break;
            }
            self.next_token();
            let y = self.parse_binary_expr(oprec + 1);
            x = self.extend_chain(x, &mut links);
            x = Expr::Binary(Box::new(BinaryExpr { x, op, y }));
        }
        self.end_chain(links);
        x
    }

    fn parse_unary_expr(&mut self) -> Expr {
        if !self.enter() {
            self.leave();
            return self.bad_expr();
        }
        let x = match self.current_token() {
            op @ (SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::CaretToken
            | SyntaxKind::AmpersandToken) => {
                self.next_token();
                let x = self.parse_unary_expr();
                Expr::Unary(Box::new(UnaryExpr { op, x }))
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                if self.optional_token(SyntaxKind::ChanKeyword) {
                    let value = self.parse_type();
                    Expr::ChanType(Box::new(ChanType {
                        dir: ChanDir::Recv,
                        value,
                    }))
                } else {
                    let x = self.parse_unary_expr();
                    Expr::Unary(Box::new(UnaryExpr {
                        op: SyntaxKind::LessThanMinusToken,
                        x,
                    }))
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                Expr::Star(Box::new(self.parse_unary_expr()))
            }
            _ => self.parse_primary_expr(),
        };
        self.leave();
        x
    }

    fn parse_primary_expr(&mut self) -> Expr {
        let mut x = self.parse_operand();
        let mut links = 0;
        loop {
            match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    match self.current_token() {
                        SyntaxKind::Identifier => {
                            x = self.extend_chain(x, &mut links);
                            let sel = self.parse_ident();
                            x = Expr::Selector(Box::new(SelectorExpr { x, sel }));
                        }
                        SyntaxKind::OpenParenToken => {
                            x = self.extend_chain(x, &mut links);
                            self.next_token();
                            let ty = if self.optional_token(SyntaxKind::TypeKeyword) {
                                None
                            } else {
                                Some(self.parse_type())
                            };
                            self.expect_token(SyntaxKind::CloseParenToken);
                            x = Expr::TypeAssert(Box::new(TypeAssertExpr { x, ty }));
                        }
                        _ => {
                            let found = self.found();
                            self.error(&messages::IDENTIFIER_EXPECTED, &[found]);
                            break;
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    x = self.extend_chain(x, &mut links);
                    x = self.parse_index_or_slice(x);
                }
                SyntaxKind::OpenParenToken => {
                    x = self.extend_chain(x, &mut links);
                    x = self.parse_call(x);
                }
                SyntaxKind::OpenBraceToken => {
                    if is_literal_type(&x) && (self.expr_lev >= 0 || !is_type_name(&x)) {
                        x = self.extend_chain(x, &mut links);
                        x = self.parse_composite_lit(Some(x));
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        self.end_chain(links);
        x
    }

    fn parse_operand(&mut self) -> Expr {
        match self.current_token() {
            SyntaxKind::Identifier => Expr::Ident(self.parse_ident()),
            kind if kind.is_literal() => {
                let lit = BasicLit {
                    kind: lit_kind(kind),
                    value: self.scanner.token_value().to_string(),
                    range: self.token_range(),
                };
                self.next_token();
                Expr::BasicLit(lit)
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                self.expr_lev += 1;
                let x = self.parse_expr();
                self.expr_lev -= 1;
                self.expect_token(SyntaxKind::CloseParenToken);
                Expr::Paren(Box::new(x))
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                let ty = self.parse_signature();
                if self.current_token() == SyntaxKind::OpenBraceToken {
                    self.expr_lev += 1;
                    let body = self.parse_block();
                    self.expr_lev -= 1;
                    Expr::FuncLit(Box::new(FuncLit { ty, body }))
                } else {
                    Expr::FuncType(Box::new(ty))
                }
            }
            _ => match self.try_parse_type() {
                Some(ty) => ty,
                None => {
                    let found = self.found();
                    self.error(&messages::EXPRESSION_EXPECTED, &[found]);
                    self.bad_expr()
                }
            },
        }
    }

    fn parse_index_or_slice(&mut self, x: Expr) -> Expr {
        self.expect_token(SyntaxKind::OpenBracketToken);
        self.expr_lev += 1;
        let mut index: [Option<Expr>; 3] = [None, None, None];
        let mut ncolons = 0;
        if self.current_token() != SyntaxKind::ColonToken {
            index[0] = Some(self.parse_expr());
        }
        while self.current_token() == SyntaxKind::ColonToken && ncolons < 2 {
            ncolons += 1;
            self.next_token();
            if !matches!(
                self.current_token(),
                SyntaxKind::ColonToken | SyntaxKind::CloseBracketToken
            ) {
                index[ncolons] = Some(self.parse_expr());
            }
        }
        self.expr_lev -= 1;
        self.expect_token(SyntaxKind::CloseBracketToken);

        let [low, high, max] = index;
        if ncolons > 0 {
            Expr::Slice(Box::new(SliceExpr {
                x,
                low,
                high,
                max,
                slice3: ncolons == 2,
            }))
        } else {
            let index = low.unwrap_or_else(|| self.bad_expr());
            Expr::Index(Box::new(IndexExpr { x, index }))
        }
    }

    fn parse_call(&mut self, fun: Expr) -> Expr {
        self.expect_token(SyntaxKind::OpenParenToken);
        self.expr_lev += 1;
        let mut args = Vec::new();
        let mut ellipsis = false;
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            args.push(self.parse_expr());
            if self.optional_token(SyntaxKind::DotDotDotToken) {
                ellipsis = true;
            }
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expr_lev -= 1;
        self.expect_token(SyntaxKind::CloseParenToken);
        Expr::Call(Box::new(CallExpr {
            fun,
            args,
            ellipsis,
        }))
    }

    /// The operand of `go` or `defer`, which must be a call.
    pub(crate) fn parse_call_expr(&mut self, keyword: SyntaxKind) -> Expr {
        let x = self.parse_unary_expr();
        let mut inner = &x;
        while let Expr::Paren(p) = inner {
            inner = p;
        }
        if !matches!(inner, Expr::Call(_)) {
            self.error(
                &messages::EXPRESSION_IS_NOT_A_CALL,
                &[keyword.text().unwrap_or("go")],
            );
        }
        x
    }

    fn parse_composite_lit(&mut self, ty: Option<Expr>) -> Expr {
        self.expect_token(SyntaxKind::OpenBraceToken);
        self.expr_lev += 1;
        let mut elts = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            elts.push(self.parse_element());
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.expr_lev -= 1;
        let multiline = self.current_token() == SyntaxKind::CloseBraceToken
            && self.scanner.has_preceding_line_break();
        self.expect_token(SyntaxKind::CloseBraceToken);
        Expr::CompositeLit(Box::new(CompositeLit {
            ty,
            elts,
            multiline,
        }))
    }

    fn parse_element(&mut self) -> Expr {
        let x = self.parse_element_value();
        if self.optional_token(SyntaxKind::ColonToken) {
            let value = self.parse_element_value();
            Expr::KeyValue(Box::new(KeyValueExpr { key: x, value }))
        } else {
            x
        }
    }

    fn parse_element_value(&mut self) -> Expr {
        if self.current_token() == SyntaxKind::OpenBraceToken {
            if !self.enter() {
                self.leave();
                return self.bad_expr();
            }
            let lit = self.parse_composite_lit(None);
            self.leave();
            lit
        } else {
            self.parse_expr()
        }
    }

    // ========================================================================
    // Types
    // ========================================================================

    pub(crate) fn parse_type(&mut self) -> Expr {
        match self.try_parse_type() {
            Some(ty) => ty,
            None => {
                let found = self.found();
                self.error(&messages::TYPE_EXPECTED, &[found]);
                self.bad_expr()
            }
        }
    }

    fn try_parse_type(&mut self) -> Option<Expr> {
        if !self.enter() {
            self.leave();
            return Some(self.bad_expr());
        }
        let ty = self.try_parse_type_inner();
        self.leave();
        ty
    }

    fn try_parse_type_inner(&mut self) -> Option<Expr> {
        let ty = match self.current_token() {
            SyntaxKind::Identifier => self.parse_type_name(),
            SyntaxKind::OpenBracketToken => self.parse_array_type(),
            SyntaxKind::StructKeyword => self.parse_struct_type(),
            SyntaxKind::InterfaceKeyword => self.parse_interface_type(),
            SyntaxKind::AsteriskToken => {
                self.next_token();
                Expr::Star(Box::new(self.parse_type()))
            }
            SyntaxKind::FuncKeyword => {
                self.next_token();
                Expr::FuncType(Box::new(self.parse_signature()))
            }
            SyntaxKind::MapKeyword => {
                self.next_token();
                self.expect_token(SyntaxKind::OpenBracketToken);
                let key = self.parse_type();
                self.expect_token(SyntaxKind::CloseBracketToken);
                let value = self.parse_type();
                Expr::MapType(Box::new(MapType { key, value }))
            }
            SyntaxKind::ChanKeyword => {
                self.next_token();
                let dir = if self.optional_token(SyntaxKind::LessThanMinusToken) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let value = self.parse_type();
                Expr::ChanType(Box::new(ChanType { dir, value }))
            }
            SyntaxKind::LessThanMinusToken => {
                self.next_token();
                self.expect_token(SyntaxKind::ChanKeyword);
                let value = self.parse_type();
                Expr::ChanType(Box::new(ChanType {
                    dir: ChanDir::Recv,
                    value,
                }))
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let ty = self.parse_type();
                self.expect_token(SyntaxKind::CloseParenToken);
                Expr::Paren(Box::new(ty))
            }
            _ => return None,
        };
        Some(ty)
    }

    /// `T` or `pkg.T`.
    fn parse_type_name(&mut self) -> Expr {
        let name = self.parse_ident();
        if self.optional_token(SyntaxKind::DotToken) {
            let sel = self.parse_ident();
            Expr::Selector(Box::new(SelectorExpr {
                x: Expr::Ident(name),
                sel,
            }))
        } else {
            Expr::Ident(name)
        }
    }

    fn parse_array_type(&mut self) -> Expr {
        self.expect_token(SyntaxKind::OpenBracketToken);
        let len = if self.optional_token(SyntaxKind::CloseBracketToken) {
            None
        } else {
            let len = if self.optional_token(SyntaxKind::DotDotDotToken) {
                Expr::Ellipsis(None)
            } else {
                self.expr_lev += 1;
                let len = self.parse_expr();
                self.expr_lev -= 1;
                len
            };
            if self.current_token() != SyntaxKind::CloseBracketToken
                && self.try_type_start()
            {
                self.error(&messages::TYPE_PARAMETERS_NOT_SUPPORTED, &[]);
                while !matches!(
                    self.current_token(),
                    SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
                ) {
                    self.next_token();
                }
            }
            self.expect_token(SyntaxKind::CloseBracketToken);
            Some(len)
        };
        let elt = self.parse_type();
        Expr::ArrayType(Box::new(ArrayType { len, elt }))
    }

    /// Whether the current token could begin a type.
    fn try_type_start(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::Identifier
                | SyntaxKind::OpenBracketToken
                | SyntaxKind::StructKeyword
                | SyntaxKind::InterfaceKeyword
                | SyntaxKind::AsteriskToken
                | SyntaxKind::FuncKeyword
                | SyntaxKind::MapKeyword
                | SyntaxKind::ChanKeyword
                | SyntaxKind::TildeToken
        )
    }

    fn parse_struct_type(&mut self) -> Expr {
        self.expect_token(SyntaxKind::StructKeyword);
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut fields = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                continue;
            }
            let saved_pos = self.scanner.token_start();
            let doc = self.take_doc();
            fields.push(self.parse_field_decl(doc));
            if self.scanner.token_start() == saved_pos {
                self.next_token();
            }
        }
        let end_comments = self.take_doc();
        self.expect_token(SyntaxKind::CloseBraceToken);
        Expr::StructType(Box::new(FieldList {
            fields,
            end_comments,
        }))
    }

    fn parse_field_decl(&mut self, doc: Vec<String>) -> Field {
        let (names, ty) = match self.current_token() {
            SyntaxKind::Identifier => {
                let first = self.parse_ident();
                match self.current_token() {
                    SyntaxKind::DotToken => {
                        self.next_token();
                        let sel = self.parse_ident();
                        let ty = Expr::Selector(Box::new(SelectorExpr {
                            x: Expr::Ident(first),
                            sel,
                        }));
                        (Vec::new(), ty)
                    }
                    SyntaxKind::SemicolonToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::StringLiteral => (Vec::new(), Expr::Ident(first)),
                    _ => {
                        let mut names = vec![first];
                        while self.optional_token(SyntaxKind::CommaToken) {
                            names.push(self.parse_ident());
                        }
                        (names, self.parse_type())
                    }
                }
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                (Vec::new(), Expr::Star(Box::new(self.parse_type_name())))
            }
            _ => {
                let found = self.found();
                self.error(&messages::IDENTIFIER_EXPECTED, &[found]);
                (Vec::new(), self.bad_expr())
            }
        };

        let tag = if self.current_token() == SyntaxKind::StringLiteral {
            let lit = BasicLit {
                kind: LitKind::String,
                value: self.scanner.token_value().to_string(),
                range: self.token_range(),
            };
            self.next_token();
            Some(lit)
        } else {
            None
        };

        self.expect_semicolon();
        let comment = self.take_trailing_comment();
        Field {
            doc,
            names,
            ty,
            tag,
            comment,
        }
    }

    fn parse_interface_type(&mut self) -> Expr {
        self.expect_token(SyntaxKind::InterfaceKeyword);
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut fields = Vec::new();
        while self.current_token() != SyntaxKind::CloseBraceToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            if self.current_token() == SyntaxKind::SemicolonToken {
                self.next_token();
                continue;
            }
            let saved_pos = self.scanner.token_start();
            let doc = self.take_doc();
            fields.push(self.parse_method_spec(doc));
            if self.scanner.token_start() == saved_pos {
                self.next_token();
            }
        }
        let end_comments = self.take_doc();
        self.expect_token(SyntaxKind::CloseBraceToken);
        Expr::InterfaceType(Box::new(FieldList {
            fields,
            end_comments,
        }))
    }

    /// A method `Name(params) results` or an embedded interface.
    fn parse_method_spec(&mut self, doc: Vec<String>) -> Field {
        let mut field = if self.current_token() == SyntaxKind::Identifier {
            let name = self.parse_ident();
            match self.current_token() {
                SyntaxKind::OpenParenToken => {
                    let sig = self.parse_signature();
                    Field::new(vec![name], Expr::FuncType(Box::new(sig)))
                }
                SyntaxKind::DotToken => {
                    self.next_token();
                    let sel = self.parse_ident();
                    let ty = Expr::Selector(Box::new(SelectorExpr {
                        x: Expr::Ident(name),
                        sel,
                    }));
                    Field::new(Vec::new(), ty)
                }
                _ => Field::new(Vec::new(), Expr::Ident(name)),
            }
        } else {
            let found = self.found();
            self.error(&messages::TYPE_EXPECTED, &[found]);
            Field::new(Vec::new(), self.bad_expr())
        };
        self.expect_semicolon();
        field.doc = doc;
        field.comment = self.take_trailing_comment();
        field
    }

    // ========================================================================
    // Signatures
    // ========================================================================

    pub(crate) fn parse_signature(&mut self) -> FuncType {
        let params = self.parse_parameters();
        let results = if self.current_token() == SyntaxKind::OpenParenToken {
            self.parse_parameters()
        } else {
            match self.try_parse_type() {
                Some(ty) => FieldList::new(vec![Field::new(Vec::new(), ty)]),
                None => FieldList::default(),
            }
        };
        FuncType { params, results }
    }

    fn parse_param_type(&mut self) -> Expr {
        if self.optional_token(SyntaxKind::DotDotDotToken) {
            Expr::Ellipsis(Some(Box::new(self.parse_type())))
        } else {
            self.parse_type()
        }
    }

    fn param_name(&mut self, x: Expr) -> Ident {
        match x {
            Expr::Ident(ident) => ident,
            _ => {
                self.error(&messages::MIXED_NAMED_AND_UNNAMED_PARAMETERS, &[]);
                Ident::new("_")
            }
        }
    }

    /// A parenthesized parameter, result or receiver list.
    ///
    /// Entries are read as types until one is followed by another type;
    /// from then on the list is named and earlier entries were names.
    pub(crate) fn parse_parameters(&mut self) -> FieldList {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut fields = Vec::new();
        let mut pending: Vec<Expr> = Vec::new();
        let mut named = false;
        while self.current_token() != SyntaxKind::CloseParenToken
            && self.current_token() != SyntaxKind::EndOfFileToken
        {
            let par = self.parse_param_type();
            if !matches!(
                self.current_token(),
                SyntaxKind::CommaToken | SyntaxKind::CloseParenToken
            ) {
                pending.push(par);
                let ty = self.parse_param_type();
                let names: Vec<Ident> = pending
                    .drain(..)
                    .map(|x| self.param_name(x))
                    .collect();
                fields.push(Field::new(names, ty));
                named = true;
                if !self.optional_token(SyntaxKind::CommaToken) {
                    break;
                }
                while self.current_token() != SyntaxKind::CloseParenToken
                    && self.current_token() != SyntaxKind::EndOfFileToken
                {
                    let names = self.parse_ident_list();
                    let ty = self.parse_param_type();
                    fields.push(Field::new(names, ty));
                    if !self.optional_token(SyntaxKind::CommaToken) {
                        break;
                    }
                }
                break;
            }
            pending.push(par);
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }
        if !named {
            fields.extend(pending.into_iter().map(|ty| Field::new(Vec::new(), ty)));
        }
        self.expect_token(SyntaxKind::CloseParenToken);
        FieldList::new(fields)
    }
}
