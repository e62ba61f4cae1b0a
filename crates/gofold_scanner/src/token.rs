//! Token information produced by the scanner.

use crate::scanner::Scanner;
use gofold_ast::syntax_kind::SyntaxKind;
use gofold_ast::types::TokenFlags;
use gofold_core::text::TextRange;

/// Information about a scanned token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    /// The kind of token.
    pub kind: SyntaxKind,
    /// Byte range in the source text. Empty for implicit semicolons.
    pub range: TextRange,
    /// The text of the token (identifiers and literals).
    pub text: String,
    /// Token flags (preceding line break, implicit, etc.).
    pub flags: TokenFlags,
}

impl TokenInfo {
    /// Whether there was a line break before this token.
    pub fn has_preceding_line_break(&self) -> bool {
        self.flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    /// Whether this semicolon was inserted by the scanner.
    pub fn is_implicit(&self) -> bool {
        self.flags.contains(TokenFlags::IMPLICIT)
    }
}

/// Scan `text` to the end and collect every token, end of file excluded.
pub fn tokenize(text: &str) -> Vec<TokenInfo> {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    while scanner.scan() != SyntaxKind::EndOfFileToken {
        tokens.push(scanner.token_info());
    }
    tokens
}
