//! The Go scanner/lexer.
//!
//! Converts source text into the token stream the parser consumes. Follows
//! the Go rules for automatic semicolon insertion: a line break (or end of
//! file, or a comment running to end of line) after an identifier, literal,
//! one of `break continue fallthrough return ++ -- ) ] }` yields an implicit
//! `;` token. Comments are collected on the side for the parser to attach.

use crate::token::TokenInfo;
use gofold_ast::syntax_kind::SyntaxKind;
use gofold_ast::types::TokenFlags;
use gofold_core::text::TextRange;
use gofold_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use memchr::{memchr, memchr3, memmem};

/// A comment seen while skipping trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentInfo {
    /// Full comment text including `//` or `/* */`.
    pub text: String,
    pub range: TextRange,
    /// On the same line as the preceding token.
    pub trailing: bool,
}

/// The scanner converts Go source text into tokens.
pub struct Scanner<'a> {
    /// The source text being scanned.
    text: &'a str,
    bytes: &'a [u8],
    /// File name used for diagnostics.
    file_name: String,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The text of the current identifier or literal.
    token_value: &'a str,
    /// Token flags for the current token.
    token_flags: TokenFlags,
    /// A line break now would insert a semicolon.
    insert_semi: bool,
    /// End of the last token that was not an implicit semicolon.
    last_end: Option<usize>,
    /// Comments not yet claimed by the parser.
    comments: Vec<CommentInfo>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source text.
    pub fn new(text: &'a str) -> Self {
        let mut scanner = Self {
            text,
            bytes: text.as_bytes(),
            file_name: String::new(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: "",
            token_flags: TokenFlags::NONE,
            insert_semi: false,
            last_end: None,
            comments: Vec::new(),
            diagnostics: DiagnosticCollection::new(),
        };
        if text.starts_with('\u{FEFF}') {
            scanner.pos = '\u{FEFF}'.len_utf8();
        }
        scanner
    }

    /// Set the file name reported in diagnostics.
    pub fn set_file_name(&mut self, file_name: &str) {
        self.file_name = file_name.to_string();
    }

    /// The full source text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's text value.
    #[inline]
    pub fn token_value(&self) -> &'a str {
        self.token_value
    }

    /// Get the start position of the current token (after trivia).
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the current position (end of current token).
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_range(&self) -> TextRange {
        TextRange::new(self.token_start as u32, self.pos as u32)
    }

    /// Get the current token flags.
    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Whether the current token was preceded by a line break.
    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Whether the current token is a semicolon inserted by the scanner.
    #[inline]
    pub fn is_implicit_semicolon(&self) -> bool {
        self.token_flags.contains(TokenFlags::IMPLICIT)
    }

    /// Comments seen since the last call, in source order.
    pub fn take_comments(&mut self) -> Vec<CommentInfo> {
        std::mem::take(&mut self.comments)
    }

    /// The oldest unclaimed comment, if it trails the preceding token.
    pub fn take_trailing_comment(&mut self) -> Option<CommentInfo> {
        if self.comments.first().map_or(false, |c| c.trailing) {
            Some(self.comments.remove(0))
        } else {
            None
        }
    }

    /// Whether comments are waiting to be claimed.
    pub fn has_comments(&self) -> bool {
        !self.comments.is_empty()
    }

    /// Get the accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take the accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Get a TokenInfo for the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            kind: self.token,
            range: self.token_range(),
            text: self.token_value.to_string(),
            flags: self.token_flags,
        }
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value = "";

        if self.skip_trivia() {
            self.token = SyntaxKind::SemicolonToken;
            self.token_value = "\n";
            self.token_flags |= TokenFlags::IMPLICIT;
            self.insert_semi = false;
            return self.token;
        }
        self.token_start = self.pos;

        if self.is_eof() {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        }

        let ch = self.bytes[self.pos];
        self.token = match ch {
            b'(' => self.op(1, SyntaxKind::OpenParenToken),
            b')' => self.op(1, SyntaxKind::CloseParenToken),
            b'{' => self.op(1, SyntaxKind::OpenBraceToken),
            b'}' => self.op(1, SyntaxKind::CloseBraceToken),
            b'[' => self.op(1, SyntaxKind::OpenBracketToken),
            b']' => self.op(1, SyntaxKind::CloseBracketToken),
            b';' => self.op(1, SyntaxKind::SemicolonToken),
            b',' => self.op(1, SyntaxKind::CommaToken),
            b'~' => self.op(1, SyntaxKind::TildeToken),

            b'.' => self.scan_dot(),
            b':' => self.scan_colon(),
            b'+' => self.scan_plus(),
            b'-' => self.scan_minus(),
            b'*' => self.with_assign(SyntaxKind::AsteriskToken, SyntaxKind::AsteriskEqualsToken),
            b'/' => self.with_assign(SyntaxKind::SlashToken, SyntaxKind::SlashEqualsToken),
            b'%' => self.with_assign(SyntaxKind::PercentToken, SyntaxKind::PercentEqualsToken),
            b'^' => self.with_assign(SyntaxKind::CaretToken, SyntaxKind::CaretEqualsToken),
            b'=' => self.with_assign(SyntaxKind::EqualsToken, SyntaxKind::EqualsEqualsToken),
            b'!' => self.with_assign(SyntaxKind::ExclamationToken, SyntaxKind::ExclamationEqualsToken),
            b'&' => self.scan_ampersand(),
            b'|' => self.scan_bar(),
            b'<' => self.scan_less_than(),
            b'>' => self.scan_greater_than(),

            b'"' => self.scan_string(),
            b'`' => self.scan_raw_string(),
            b'\'' => self.scan_rune(),

            b'0'..=b'9' => self.scan_number(),

            _ => match self.current_char() {
                Some(c) if is_identifier_start(c) => self.scan_identifier(),
                Some(c) => {
                    let start = self.pos;
                    self.pos += c.len_utf8();
                    let shown = c.to_string();
                    self.error(&messages::INVALID_CHARACTER, start, &[&shown]);
                    SyntaxKind::Unknown
                }
                None => {
                    self.pos += 1;
                    SyntaxKind::Unknown
                }
            },
        };

        self.insert_semi = self.token.ends_statement();
        self.last_end = Some(self.pos);
        self.token
    }

    /// Skip whitespace and comments. Returns true when an implicit
    /// semicolon must be produced at the current position.
    fn skip_trivia(&mut self) -> bool {
        loop {
            let Some(ch) = self.current() else {
                self.token_start = self.pos;
                return self.insert_semi;
            };
            match ch {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    if self.insert_semi {
                        self.token_start = self.pos;
                        return true;
                    }
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b'/' if matches!(self.byte_at(1), Some(b'/') | Some(b'*')) => {
                    if self.insert_semi && self.comments_end_line(self.pos) {
                        self.token_start = self.pos;
                        return true;
                    }
                    self.scan_comment();
                }
                _ => return false,
            }
        }
    }

    /// Whether the comments starting at `pos` run into a line break (or end
    /// of file) before the next token.
    fn comments_end_line(&self, mut pos: usize) -> bool {
        let len = self.bytes.len();
        loop {
            let rest = &self.bytes[pos..];
            if rest.starts_with(b"//") {
                return true;
            }
            if !rest.starts_with(b"/*") {
                return false;
            }
            match memmem::find(&rest[2..], b"*/") {
                Some(i) => {
                    if memchr(b'\n', &rest[2..2 + i]).is_some() {
                        return true;
                    }
                    pos += i + 4;
                }
                None => return true,
            }
            while pos < len && matches!(self.bytes[pos], b' ' | b'\t' | b'\r') {
                pos += 1;
            }
            if pos >= len || self.bytes[pos] == b'\n' {
                return true;
            }
        }
    }

    fn scan_comment(&mut self) {
        let start = self.pos;
        let len = self.bytes.len();
        let mut text_end;
        if self.byte_at(1) == Some(b'/') {
            self.pos = memchr(b'\n', &self.bytes[start..]).map_or(len, |i| start + i);
            text_end = self.pos;
            if text_end > start && self.bytes[text_end - 1] == b'\r' {
                text_end -= 1;
            }
        } else {
            match memmem::find(&self.bytes[start + 2..], b"*/") {
                Some(i) => self.pos = start + i + 4,
                None => {
                    self.pos = len;
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(&messages::UNTERMINATED_COMMENT, start, &[]);
                }
            }
            text_end = self.pos;
            if memchr(b'\n', &self.bytes[start..text_end]).is_some() {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
            }
        }

        let trailing = match self.last_end {
            Some(prev) => memchr(b'\n', &self.bytes[prev..start]).is_none(),
            None => false,
        };
        self.comments.push(CommentInfo {
            text: self.text[start..text_end].to_string(),
            range: TextRange::new(start as u32, text_end as u32),
            trailing,
        });
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    #[inline]
    fn op(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    /// `x` or `x=`.
    fn with_assign(&mut self, plain: SyntaxKind, assign: SyntaxKind) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            self.op(2, assign)
        } else {
            self.op(1, plain)
        }
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
            self.op(3, SyntaxKind::DotDotDotToken)
        } else if self.byte_at(1).map_or(false, |b| b.is_ascii_digit()) {
            self.scan_number()
        } else {
            self.op(1, SyntaxKind::DotToken)
        }
    }

    fn scan_colon(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'=') {
            self.op(2, SyntaxKind::ColonEqualsToken)
        } else {
            self.op(1, SyntaxKind::ColonToken)
        }
    }

    fn scan_plus(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'+') => self.op(2, SyntaxKind::PlusPlusToken),
            Some(b'=') => self.op(2, SyntaxKind::PlusEqualsToken),
            _ => self.op(1, SyntaxKind::PlusToken),
        }
    }

    fn scan_minus(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'-') => self.op(2, SyntaxKind::MinusMinusToken),
            Some(b'=') => self.op(2, SyntaxKind::MinusEqualsToken),
            _ => self.op(1, SyntaxKind::MinusToken),
        }
    }

    fn scan_ampersand(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'&'), _) => self.op(2, SyntaxKind::AmpersandAmpersandToken),
            (Some(b'^'), Some(b'=')) => self.op(3, SyntaxKind::AmpersandCaretEqualsToken),
            (Some(b'^'), _) => self.op(2, SyntaxKind::AmpersandCaretToken),
            (Some(b'='), _) => self.op(2, SyntaxKind::AmpersandEqualsToken),
            _ => self.op(1, SyntaxKind::AmpersandToken),
        }
    }

    fn scan_bar(&mut self) -> SyntaxKind {
        match self.byte_at(1) {
            Some(b'|') => self.op(2, SyntaxKind::BarBarToken),
            Some(b'=') => self.op(2, SyntaxKind::BarEqualsToken),
            _ => self.op(1, SyntaxKind::BarToken),
        }
    }

    fn scan_less_than(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'<'), Some(b'=')) => self.op(3, SyntaxKind::LessThanLessThanEqualsToken),
            (Some(b'<'), _) => self.op(2, SyntaxKind::LessThanLessThanToken),
            (Some(b'='), _) => self.op(2, SyntaxKind::LessThanEqualsToken),
            (Some(b'-'), _) => self.op(2, SyntaxKind::LessThanMinusToken),
            _ => self.op(1, SyntaxKind::LessThanToken),
        }
    }

    fn scan_greater_than(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'>'), Some(b'=')) => self.op(3, SyntaxKind::GreaterThanGreaterThanEqualsToken),
            (Some(b'>'), _) => self.op(2, SyntaxKind::GreaterThanGreaterThanToken),
            (Some(b'='), _) => self.op(2, SyntaxKind::GreaterThanEqualsToken),
            _ => self.op(1, SyntaxKind::GreaterThanToken),
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if !is_identifier_part(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.token_value = &self.text[start..self.pos];
        SyntaxKind::from_keyword(self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    /// Scan digits of `radix` and `_` separators, returning the digit count.
    fn scan_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while let Some(b) = self.current() {
            if b == b'_' {
                self.pos += 1;
            } else if (b as char).is_digit(radix) {
                self.pos += 1;
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut kind = SyntaxKind::IntLiteral;
        let mut valid = true;

        let prefix = match (self.current(), self.byte_at(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some(16),
            (Some(b'0'), Some(b'b' | b'B')) => Some(2),
            (Some(b'0'), Some(b'o' | b'O')) => Some(8),
            _ => None,
        };

        if let Some(radix) = prefix {
            self.pos += 2;
            let mut digits = self.scan_digits(radix);
            if radix == 16 {
                if self.current() == Some(b'.') {
                    self.pos += 1;
                    digits += self.scan_digits(16);
                    kind = SyntaxKind::FloatLiteral;
                }
                if matches!(self.current(), Some(b'p' | b'P')) {
                    kind = SyntaxKind::FloatLiteral;
                    valid &= self.scan_exponent();
                }
            }
            valid &= digits > 0;
        } else {
            self.scan_digits(10);
            if self.current() == Some(b'.') {
                self.pos += 1;
                self.scan_digits(10);
                kind = SyntaxKind::FloatLiteral;
            }
            if matches!(self.current(), Some(b'e' | b'E')) {
                kind = SyntaxKind::FloatLiteral;
                valid &= self.scan_exponent();
            }
        }

        if self.current() == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImagLiteral;
        }

        self.token_value = &self.text[start..self.pos];
        if !valid {
            let shown = self.token_value;
            self.error(&messages::INVALID_NUMERIC_LITERAL, start, &[shown]);
        }
        kind
    }

    /// Scan `e`/`p`, an optional sign and decimal digits.
    fn scan_exponent(&mut self) -> bool {
        self.pos += 1;
        if matches!(self.current(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.scan_digits(10) > 0
    }

    /// Scan an interpreted string or rune body up to `quote`.
    fn scan_quoted(&mut self, quote: u8, unterminated: &DiagnosticMessage) {
        let start = self.pos;
        self.pos += 1;
        loop {
            match memchr3(quote, b'\\', b'\n', &self.bytes[self.pos..]) {
                Some(i) => {
                    let at = self.pos + i;
                    let b = self.bytes[at];
                    if b == quote {
                        self.pos = at + 1;
                        break;
                    } else if b == b'\\' {
                        self.pos = (at + 2).min(self.bytes.len());
                    } else {
                        self.pos = at;
                        self.token_flags |= TokenFlags::UNTERMINATED;
                        self.error(unterminated, start, &[]);
                        break;
                    }
                }
                None => {
                    self.pos = self.bytes.len();
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(unterminated, start, &[]);
                    break;
                }
            }
        }
        self.token_value = &self.text[start..self.pos];
    }

    fn scan_string(&mut self) -> SyntaxKind {
        self.scan_quoted(b'"', &messages::UNTERMINATED_STRING_LITERAL);
        SyntaxKind::StringLiteral
    }

    fn scan_rune(&mut self) -> SyntaxKind {
        self.scan_quoted(b'\'', &messages::UNTERMINATED_RUNE_LITERAL);
        SyntaxKind::RuneLiteral
    }

    fn scan_raw_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        match memchr(b'`', &self.bytes[start + 1..]) {
            Some(i) => self.pos = start + i + 2,
            None => {
                self.pos = self.bytes.len();
                self.token_flags |= TokenFlags::UNTERMINATED;
                self.error(&messages::UNTERMINATED_RAW_STRING_LITERAL, start, &[]);
            }
        }
        self.token_value = &self.text[start..self.pos];
        SyntaxKind::StringLiteral
    }

    fn error(&mut self, message: &DiagnosticMessage, start: usize, args: &[&str]) {
        let range = TextRange::new(start as u32, self.pos.max(start) as u32);
        self.diagnostics
            .add(Diagnostic::with_location(&self.file_name, range, message, args));
    }
}

/// Check if a character can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut out = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                return out;
            }
            out.push(kind);
        }
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("&^= &^ && <- <<= := ... != >>"),
            vec![
                SyntaxKind::AmpersandCaretEqualsToken,
                SyntaxKind::AmpersandCaretToken,
                SyntaxKind::AmpersandAmpersandToken,
                SyntaxKind::LessThanMinusToken,
                SyntaxKind::LessThanLessThanEqualsToken,
                SyntaxKind::ColonEqualsToken,
                SyntaxKind::DotDotDotToken,
                SyntaxKind::ExclamationEqualsToken,
                SyntaxKind::GreaterThanGreaterThanToken,
            ]
        );
    }

    #[test]
    fn test_semicolon_inserted_at_line_end() {
        let mut scanner = Scanner::new("x++\nreturn\n}");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::PlusPlusToken);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert!(scanner.is_implicit_semicolon());
        assert_eq!(scanner.scan(), SyntaxKind::ReturnKeyword);
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_no_semicolon_after_operator() {
        assert_eq!(
            kinds("a +\nb"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::PlusToken,
                SyntaxKind::Identifier,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn test_trailing_comment_precedes_semicolon() {
        let mut scanner = Scanner::new("x := 1 // one\n// next\ny");
        scanner.scan();
        scanner.scan();
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
        assert!(!scanner.has_comments());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        let comments = scanner.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "// one");
        assert!(comments[0].trailing);
        assert_eq!(comments[1].text, "// next");
        assert!(!comments[1].trailing);
    }

    #[test]
    fn test_inline_block_comment_does_not_end_line() {
        assert_eq!(
            kinds("a /* c */ + b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::PlusToken,
                SyntaxKind::Identifier,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn test_scan_number_formats() {
        let mut scanner = Scanner::new("42 3.14 0xff 0b1010 0o777 1_000 1e9 .5 2i 0x1p-2");
        let expected = [
            (SyntaxKind::IntLiteral, "42"),
            (SyntaxKind::FloatLiteral, "3.14"),
            (SyntaxKind::IntLiteral, "0xff"),
            (SyntaxKind::IntLiteral, "0b1010"),
            (SyntaxKind::IntLiteral, "0o777"),
            (SyntaxKind::IntLiteral, "1_000"),
            (SyntaxKind::FloatLiteral, "1e9"),
            (SyntaxKind::FloatLiteral, ".5"),
            (SyntaxKind::ImagLiteral, "2i"),
            (SyntaxKind::FloatLiteral, "0x1p-2"),
        ];
        for (kind, text) in expected {
            assert_eq!(scanner.scan(), kind);
            assert_eq!(scanner.token_value(), text);
        }
        assert!(scanner.diagnostics().is_empty());
    }

    #[test]
    fn test_scan_string_literals() {
        let mut scanner = Scanner::new(r#""a\"b" `raw\n` '\''"#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), r#""a\"b""#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), r"`raw\n`");
        assert_eq!(scanner.scan(), SyntaxKind::RuneLiteral);
        assert_eq!(scanner.token_value(), r"'\''");
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let mut scanner = Scanner::new("\"abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        assert!(scanner.diagnostics().has_errors());
    }

    #[test]
    fn test_unicode_identifier() {
        let mut scanner = Scanner::new("héllo π");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "héllo");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "π");
    }

    #[test]
    fn test_invalid_character() {
        let mut scanner = Scanner::new("a # b");
        scanner.scan();
        assert_eq!(scanner.scan(), SyntaxKind::Unknown);
        assert_eq!(scanner.diagnostics().len(), 1);
    }
}
