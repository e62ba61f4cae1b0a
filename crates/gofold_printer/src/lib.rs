//! gofold_printer: Syntax tree to Go source text.
//!
//! Produces one canonical layout: tab indentation, one blank line between
//! top-level declarations, doc comments directly above their node and
//! trailing comments after a single space. Text already in this layout
//! prints back unchanged after a parse, and printing is idempotent.

use gofold_ast::*;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "\t".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// Print a source file with the default options.
pub fn print_file(file: &SourceFile) -> String {
    Printer::new().print_source_file(file)
}

/// The printer converts syntax trees to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    /// The current line ends in a `//` comment.
    line_comment_open: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            line_comment_open: false,
        }
    }

    /// Print a source file to a string.
    pub fn print_source_file(&mut self, file: &SourceFile) -> String {
        self.output.clear();
        self.indent_level = 0;

        self.print_doc(&file.doc);
        self.write("package ");
        self.write(&file.package.name);

        for decl in &file.decls {
            self.write_newline();
            self.write_newline();
            self.print_doc(decl.doc());
            self.print_decl(decl);
        }

        if !file.end_comments.is_empty() {
            self.write_newline();
            for comment in &file.end_comments {
                self.write_newline();
                self.write_comment(comment);
            }
        }

        if self.options.trailing_newline {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    /// Print a single expression, e.g. for messages.
    pub fn print_expression_text(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.print_expr(expr);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Doc lines, each followed by a newline at the current indentation.
    fn print_doc(&mut self, doc: &[String]) {
        for line in doc {
            self.write_comment(line);
            self.write_newline();
            self.write_indent();
        }
    }

    fn write_comment(&mut self, text: &str) {
        self.write(text);
        self.line_comment_open = text.starts_with("//");
    }

    fn print_trailing_comment(&mut self, comment: &Option<String>) {
        if let Some(text) = comment {
            self.write(" ");
            self.write_comment(text);
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn print_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Import(d) => {
                self.print_group("import", d.grouped, &d.specs, &d.end_comments, |p, spec| {
                    p.print_import_spec(spec)
                });
            }
            Decl::Type(d) => {
                self.print_group("type", d.grouped, &d.specs, &d.end_comments, |p, spec| {
                    p.print_type_spec(spec)
                });
            }
            Decl::Value(d) => {
                self.print_group(d.kind.keyword(), d.grouped, &d.specs, &d.end_comments, |p, spec| {
                    p.print_value_spec(spec)
                });
            }
            Decl::Func(f) => self.print_func_decl(f),
            Decl::Bad(_) => self.write("/* malformed declaration */"),
        }
    }

    /// `kw spec` or a parenthesized group.
    fn print_group<T: SpecDoc>(
        &mut self,
        keyword: &str,
        grouped: bool,
        specs: &[T],
        end_comments: &[String],
        mut print_spec: impl FnMut(&mut Self, &T),
    ) {
        if !grouped && specs.len() == 1 && end_comments.is_empty() {
            self.print_doc(specs[0].doc());
            self.write(keyword);
            self.write(" ");
            print_spec(self, &specs[0]);
            return;
        }

        self.write(keyword);
        if specs.is_empty() && end_comments.is_empty() {
            self.write(" ()");
            return;
        }
        self.write(" (");
        self.increase_indent();
        for spec in specs {
            self.write_newline();
            self.write_indent();
            self.print_doc(spec.doc());
            print_spec(self, spec);
        }
        for comment in end_comments {
            self.write_newline();
            self.write_indent();
            self.write_comment(comment);
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write(")");
    }

    fn print_import_spec(&mut self, spec: &ImportSpec) {
        if let Some(name) = &spec.name {
            self.write(&name.name);
            self.write(" ");
        }
        self.write(&spec.path.value);
        self.print_trailing_comment(&spec.comment);
    }

    fn print_type_spec(&mut self, spec: &TypeSpec) {
        self.write(&spec.name.name);
        self.write(if spec.assign { " = " } else { " " });
        self.print_expr(&spec.ty);
        self.print_trailing_comment(&spec.comment);
    }

    fn print_value_spec(&mut self, spec: &ValueSpec) {
        self.print_ident_list(&spec.names);
        if let Some(ty) = &spec.ty {
            self.write(" ");
            self.print_expr(ty);
        }
        if !spec.values.is_empty() {
            self.write(" = ");
            self.print_expr_list(&spec.values);
        }
        self.print_trailing_comment(&spec.comment);
    }

    fn print_func_decl(&mut self, f: &FuncDecl) {
        self.write("func ");
        if let Some(recv) = &f.recv {
            self.print_params(recv);
            self.write(" ");
        }
        self.write(&f.name.name);
        self.print_signature(&f.ty);
        if let Some(body) = &f.body {
            self.write(" ");
            self.print_block(body);
        }
    }

    // ========================================================================
    // Signatures and fields
    // ========================================================================

    fn print_signature(&mut self, ty: &FuncType) {
        self.print_params(&ty.params);
        let results = &ty.results.fields;
        match results.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.write(" ");
                self.print_expr(&single.ty);
            }
            _ => {
                self.write(" ");
                self.print_params(&ty.results);
            }
        }
    }

    fn print_params(&mut self, list: &FieldList) {
        self.write("(");
        for (i, field) in list.fields.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if !field.names.is_empty() {
                self.print_ident_list(&field.names);
                self.write(" ");
            }
            self.print_expr(&field.ty);
        }
        self.write(")");
    }

    /// Struct fields or interface methods, one per line.
    fn print_field_block(&mut self, keyword: &str, list: &FieldList) {
        self.write(keyword);
        if list.fields.is_empty() && list.end_comments.is_empty() {
            self.write("{}");
            return;
        }
        self.write(" {");
        self.increase_indent();
        for field in &list.fields {
            self.write_newline();
            self.write_indent();
            self.print_doc(&field.doc);
            match (&field.ty, field.names.as_slice()) {
                // Interface method: the name is followed directly by the signature.
                (Expr::FuncType(sig), [name]) if keyword == "interface" => {
                    self.write(&name.name);
                    self.print_signature(sig);
                }
                _ => {
                    if !field.names.is_empty() {
                        self.print_ident_list(&field.names);
                        self.write(" ");
                    }
                    self.print_expr(&field.ty);
                }
            }
            if let Some(tag) = &field.tag {
                self.write(" ");
                self.write(&tag.value);
            }
            self.print_trailing_comment(&field.comment);
        }
        for comment in &list.end_comments {
            self.write_newline();
            self.write_indent();
            self.write_comment(comment);
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn print_block(&mut self, block: &BlockStmt) {
        self.write("{");
        if block.stmts.is_empty() {
            self.write("}");
            return;
        }
        self.print_stmt_list(&block.stmts);
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    /// Statements one level deeper than the current line.
    fn print_stmt_list(&mut self, stmts: &[Stmt]) {
        self.increase_indent();
        self.line_comment_open = false;
        for stmt in stmts {
            match stmt {
                Stmt::Comment(c) if c.trailing && !self.line_comment_open => {
                    self.write(" ");
                    self.write_comment(&c.text);
                }
                _ => {
                    self.write_newline();
                    self.print_stmt(stmt);
                }
            }
        }
        self.decrease_indent();
    }

    /// Print a statement on a fresh line (indentation included).
    fn print_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::Labeled(labeled) = stmt {
            self.decrease_indent();
            self.write_indent();
            self.increase_indent();
            self.write(&labeled.label.name);
            self.write(":");
            if !matches!(labeled.stmt, Stmt::Empty(_)) {
                self.write_newline();
                self.print_stmt(&labeled.stmt);
            }
            return;
        }
        self.write_indent();
        self.print_simple(stmt);
    }

    /// Print a statement at the current position, without indentation.
    fn print_simple(&mut self, stmt: &Stmt) {
        self.line_comment_open = false;
        match stmt {
            Stmt::Decl(decl) => {
                self.print_doc(decl.doc());
                self.print_decl(decl);
            }
            Stmt::Empty(_) => {}
            Stmt::Labeled(labeled) => {
                self.write(&labeled.label.name);
                self.write(": ");
                self.print_simple(&labeled.stmt);
            }
            Stmt::Expr(x) => self.print_expr(x),
            Stmt::Send(s) => {
                self.print_expr(&s.chan);
                self.write(" <- ");
                self.print_expr(&s.value);
            }
            Stmt::IncDec(s) => {
                self.print_expr(&s.x);
                self.write(if s.inc { "++" } else { "--" });
            }
            Stmt::Assign(a) => {
                self.print_expr_list(&a.lhs);
                self.write(" ");
                self.write(a.op.text().unwrap_or("="));
                self.write(" ");
                self.print_expr_list(&a.rhs);
            }
            Stmt::Go(x) => {
                self.write("go ");
                self.print_expr(x);
            }
            Stmt::Defer(x) => {
                self.write("defer ");
                self.print_expr(x);
            }
            Stmt::Return(r) => {
                self.write("return");
                if !r.results.is_empty() {
                    self.write(" ");
                    self.print_expr_list(&r.results);
                }
            }
            Stmt::Branch(b) => {
                self.write(b.tok.text().unwrap_or("break"));
                if let Some(label) = &b.label {
                    self.write(" ");
                    self.write(&label.name);
                }
            }
            Stmt::Block(block) => self.print_block(block),
            Stmt::If(s) => self.print_if(s),
            Stmt::Switch(s) => {
                self.write("switch ");
                self.print_header_init(&s.init);
                if let Some(tag) = &s.tag {
                    self.print_expr(tag);
                    self.write(" ");
                }
                self.print_case_clauses(&s.clauses);
            }
            Stmt::TypeSwitch(s) => {
                self.write("switch ");
                self.print_header_init(&s.init);
                self.print_simple(&s.assign);
                self.write(" ");
                self.print_case_clauses(&s.clauses);
            }
            Stmt::Select(s) => {
                self.write("select {");
                for clause in &s.clauses {
                    self.write_newline();
                    self.write_indent();
                    match &clause.comm {
                        Some(comm) => {
                            self.write("case ");
                            self.print_simple(comm);
                            self.write(":");
                        }
                        None => self.write("default:"),
                    }
                    self.print_stmt_list(&clause.body);
                }
                self.write_newline();
                self.write_indent();
                self.write("}");
            }
            Stmt::For(s) => self.print_for(s),
            Stmt::Range(s) => {
                self.write("for ");
                if let Some(key) = &s.key {
                    self.print_expr(key);
                    if let Some(value) = &s.value {
                        self.write(", ");
                        self.print_expr(value);
                    }
                    self.write(if s.define { " := " } else { " = " });
                }
                self.write("range ");
                self.print_expr(&s.x);
                self.write(" ");
                self.print_block(&s.body);
            }
            Stmt::Comment(c) => self.write_comment(&c.text),
            Stmt::Bad(_) => self.write("/* malformed statement */"),
        }
    }

    /// `init; ` of an if/switch header.
    fn print_header_init(&mut self, init: &Option<Stmt>) {
        if let Some(init) = init {
            self.print_simple(init);
            self.write("; ");
        }
    }

    fn print_if(&mut self, s: &IfStmt) {
        self.write("if ");
        self.print_header_init(&s.init);
        self.print_expr(&s.cond);
        self.write(" ");
        self.print_block(&s.body);
        if let Some(els) = &s.els {
            self.write(" else ");
            match els {
                Stmt::If(inner) => self.print_if(inner),
                other => self.print_simple(other),
            }
        }
    }

    fn print_case_clauses(&mut self, clauses: &[CaseClause]) {
        self.write("{");
        for clause in clauses {
            self.write_newline();
            self.write_indent();
            if clause.is_default {
                self.write("default:");
            } else {
                self.write("case ");
                self.print_expr_list(&clause.list);
                self.write(":");
            }
            self.print_stmt_list(&clause.body);
        }
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_for(&mut self, s: &ForStmt) {
        self.write("for ");
        if s.init.is_some() || s.post.is_some() {
            if let Some(init) = &s.init {
                self.print_simple(init);
            }
            self.write(";");
            if let Some(cond) = &s.cond {
                self.write(" ");
                self.print_expr(cond);
            }
            self.write(";");
            if let Some(post) = &s.post {
                self.write(" ");
                self.print_simple(post);
            }
            self.write(" ");
        } else if let Some(cond) = &s.cond {
            self.print_expr(cond);
            self.write(" ");
        }
        self.print_block(&s.body);
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn print_expr_list(&mut self, list: &[Expr]) {
        for (i, x) in list.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(x);
        }
    }

    fn print_ident_list(&mut self, names: &[Ident]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&name.name);
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(id) => self.write(&id.name),
            Expr::BasicLit(lit) => self.write(&lit.value),
            Expr::CompositeLit(lit) => {
                if let Some(ty) = &lit.ty {
                    self.print_expr(ty);
                }
                self.write("{");
                if lit.multiline {
                    self.increase_indent();
                    for elt in &lit.elts {
                        self.write_newline();
                        self.write_indent();
                        self.print_expr(elt);
                        self.write(",");
                    }
                    self.decrease_indent();
                    self.write_newline();
                    self.write_indent();
                } else {
                    self.print_expr_list(&lit.elts);
                }
                self.write("}");
            }
            Expr::FuncLit(f) => {
                self.write("func");
                self.print_signature(&f.ty);
                self.write(" ");
                self.print_block(&f.body);
            }
            Expr::Paren(x) => {
                self.write("(");
                self.print_expr(x);
                self.write(")");
            }
            Expr::Selector(s) => {
                self.print_expr(&s.x);
                self.write(".");
                self.write(&s.sel.name);
            }
            Expr::Index(ix) => {
                self.print_expr(&ix.x);
                self.write("[");
                self.print_expr(&ix.index);
                self.write("]");
            }
            Expr::Slice(s) => {
                self.print_expr(&s.x);
                self.write("[");
                if let Some(low) = &s.low {
                    self.print_expr(low);
                }
                self.write(":");
                if let Some(high) = &s.high {
                    self.print_expr(high);
                }
                if s.slice3 {
                    self.write(":");
                    if let Some(max) = &s.max {
                        self.print_expr(max);
                    }
                }
                self.write("]");
            }
            Expr::TypeAssert(ta) => {
                self.print_expr(&ta.x);
                self.write(".(");
                match &ta.ty {
                    Some(ty) => self.print_expr(ty),
                    None => self.write("type"),
                }
                self.write(")");
            }
            Expr::Call(call) => {
                self.print_expr(&call.fun);
                self.write("(");
                self.print_expr_list(&call.args);
                if call.ellipsis {
                    self.write("...");
                }
                self.write(")");
            }
            Expr::Star(x) => {
                self.write("*");
                self.print_expr(x);
            }
            Expr::Unary(u) => {
                let op = u.op.text().unwrap_or("");
                self.write(op);
                if needs_unary_space(u.op, &u.x) {
                    self.write(" ");
                }
                self.print_expr(&u.x);
            }
            Expr::Binary(b) => {
                self.print_expr(&b.x);
                self.write(" ");
                self.write(b.op.text().unwrap_or("?"));
                self.write(" ");
                self.print_expr(&b.y);
            }
            Expr::KeyValue(kv) => {
                self.print_expr(&kv.key);
                self.write(": ");
                self.print_expr(&kv.value);
            }
            Expr::Ellipsis(elt) => {
                self.write("...");
                if let Some(elt) = elt {
                    self.print_expr(elt);
                }
            }
            Expr::ArrayType(a) => {
                self.write("[");
                if let Some(len) = &a.len {
                    self.print_expr(len);
                }
                self.write("]");
                self.print_expr(&a.elt);
            }
            Expr::StructType(fields) => self.print_field_block("struct", fields),
            Expr::InterfaceType(methods) => self.print_field_block("interface", methods),
            Expr::FuncType(sig) => {
                self.write("func");
                self.print_signature(sig);
            }
            Expr::MapType(m) => {
                self.write("map[");
                self.print_expr(&m.key);
                self.write("]");
                self.print_expr(&m.value);
            }
            Expr::ChanType(c) => {
                self.write(match c.dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.print_expr(&c.value);
            }
            Expr::Bad(_) => self.write("BAD"),
        }
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
        self.line_comment_open = false;
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// Specs that carry leading documentation.
trait SpecDoc {
    fn doc(&self) -> &[String];
}

impl SpecDoc for ImportSpec {
    fn doc(&self) -> &[String] {
        &self.doc
    }
}

impl SpecDoc for TypeSpec {
    fn doc(&self) -> &[String] {
        &self.doc
    }
}

impl SpecDoc for ValueSpec {
    fn doc(&self) -> &[String] {
        &self.doc
    }
}

/// Whether `op` directly followed by `x` would scan as a different token.
fn needs_unary_space(op: SyntaxKind, x: &Expr) -> bool {
    let Expr::Unary(inner) = x else {
        return false;
    };
    matches!(
        (op, inner.op),
        (SyntaxKind::MinusToken, SyntaxKind::MinusToken)
            | (SyntaxKind::PlusToken, SyntaxKind::PlusToken)
            | (SyntaxKind::AmpersandToken, SyntaxKind::AmpersandToken)
            | (SyntaxKind::AmpersandToken, SyntaxKind::CaretToken)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_operators_do_not_merge() {
        let inner = Expr::Unary(Box::new(UnaryExpr {
            op: SyntaxKind::MinusToken,
            x: Expr::ident("x"),
        }));
        let outer = Expr::Unary(Box::new(UnaryExpr {
            op: SyntaxKind::MinusToken,
            x: inner,
        }));
        assert_eq!(Printer::new().print_expression_text(&outer), "- -x");
    }

    #[test]
    fn test_empty_group_prints_parens() {
        let mut file = SourceFile::new("a.go", "a");
        file.decls.push(Decl::Import(ImportDecl::new(Vec::new())));
        assert_eq!(print_file(&file), "package a\n\nimport ()\n");
    }
}
