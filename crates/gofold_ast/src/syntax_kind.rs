//! SyntaxKind enum - all token kinds of the Go language.

/// The kind of a token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SyntaxKind {
    // ========================================================================
    // Special
    // ========================================================================
    Unknown,
    EndOfFileToken,

    // ========================================================================
    // Identifiers and literals
    // ========================================================================
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImagLiteral,
    RuneLiteral,
    StringLiteral,

    // ========================================================================
    // Operators
    // ========================================================================
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,

    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,

    AmpersandAmpersandToken,
    BarBarToken,
    LessThanMinusToken,
    PlusPlusToken,
    MinusMinusToken,
    EqualsEqualsToken,
    LessThanToken,
    GreaterThanToken,
    EqualsToken,
    ExclamationToken,
    TildeToken,
    ExclamationEqualsToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    ColonEqualsToken,
    DotDotDotToken,

    // ========================================================================
    // Punctuation
    // ========================================================================
    OpenParenToken,
    OpenBracketToken,
    OpenBraceToken,
    CommaToken,
    DotToken,
    CloseParenToken,
    CloseBracketToken,
    CloseBraceToken,
    SemicolonToken,
    ColonToken,

    // ========================================================================
    // Keywords
    // ========================================================================
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

/// Lowest binary operator precedence.
pub const LOWEST_PRECEDENCE: u8 = 0;

/// Precedence of unary operators, above every binary operator.
pub const UNARY_PRECEDENCE: u8 = 6;

impl SyntaxKind {
    /// Map identifier text to a keyword kind.
    pub fn from_keyword(text: &str) -> Option<SyntaxKind> {
        let kind = match text {
            "break" => SyntaxKind::BreakKeyword,
            "case" => SyntaxKind::CaseKeyword,
            "chan" => SyntaxKind::ChanKeyword,
            "const" => SyntaxKind::ConstKeyword,
            "continue" => SyntaxKind::ContinueKeyword,
            "default" => SyntaxKind::DefaultKeyword,
            "defer" => SyntaxKind::DeferKeyword,
            "else" => SyntaxKind::ElseKeyword,
            "fallthrough" => SyntaxKind::FallthroughKeyword,
            "for" => SyntaxKind::ForKeyword,
            "func" => SyntaxKind::FuncKeyword,
            "go" => SyntaxKind::GoKeyword,
            "goto" => SyntaxKind::GotoKeyword,
            "if" => SyntaxKind::IfKeyword,
            "import" => SyntaxKind::ImportKeyword,
            "interface" => SyntaxKind::InterfaceKeyword,
            "map" => SyntaxKind::MapKeyword,
            "package" => SyntaxKind::PackageKeyword,
            "range" => SyntaxKind::RangeKeyword,
            "return" => SyntaxKind::ReturnKeyword,
            "select" => SyntaxKind::SelectKeyword,
            "struct" => SyntaxKind::StructKeyword,
            "switch" => SyntaxKind::SwitchKeyword,
            "type" => SyntaxKind::TypeKeyword,
            "var" => SyntaxKind::VarKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether this kind is a keyword.
    pub fn is_keyword(self) -> bool {
        self >= SyntaxKind::BreakKeyword
    }

    /// Whether this kind is a basic literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImagLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
        )
    }

    /// Whether this kind is `=`, `:=` or an operator-assignment.
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::ColonEqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
                | SyntaxKind::PercentEqualsToken
                | SyntaxKind::AmpersandEqualsToken
                | SyntaxKind::BarEqualsToken
                | SyntaxKind::CaretEqualsToken
                | SyntaxKind::LessThanLessThanEqualsToken
                | SyntaxKind::GreaterThanGreaterThanEqualsToken
                | SyntaxKind::AmpersandCaretEqualsToken
        )
    }

    /// Binary operator precedence, `LOWEST_PRECEDENCE` for non-operators.
    pub fn binary_precedence(self) -> u8 {
        match self {
            SyntaxKind::BarBarToken => 1,
            SyntaxKind::AmpersandAmpersandToken => 2,
            SyntaxKind::EqualsEqualsToken
            | SyntaxKind::ExclamationEqualsToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::LessThanEqualsToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::GreaterThanEqualsToken => 3,
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::BarToken
            | SyntaxKind::CaretToken => 4,
            SyntaxKind::AsteriskToken
            | SyntaxKind::SlashToken
            | SyntaxKind::PercentToken
            | SyntaxKind::LessThanLessThanToken
            | SyntaxKind::GreaterThanGreaterThanToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::AmpersandCaretToken => 5,
            _ => LOWEST_PRECEDENCE,
        }
    }

    /// Whether a line break after a token of this kind inserts a semicolon.
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::IntLiteral
                | SyntaxKind::FloatLiteral
                | SyntaxKind::ImagLiteral
                | SyntaxKind::RuneLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
        )
    }

    /// Fixed source text of punctuation, operators and keywords.
    pub fn text(self) -> Option<&'static str> {
        let text = match self {
            SyntaxKind::PlusToken => "+",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AsteriskToken => "*",
            SyntaxKind::SlashToken => "/",
            SyntaxKind::PercentToken => "%",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::BarToken => "|",
            SyntaxKind::CaretToken => "^",
            SyntaxKind::LessThanLessThanToken => "<<",
            SyntaxKind::GreaterThanGreaterThanToken => ">>",
            SyntaxKind::AmpersandCaretToken => "&^",
            SyntaxKind::PlusEqualsToken => "+=",
            SyntaxKind::MinusEqualsToken => "-=",
            SyntaxKind::AsteriskEqualsToken => "*=",
            SyntaxKind::SlashEqualsToken => "/=",
            SyntaxKind::PercentEqualsToken => "%=",
            SyntaxKind::AmpersandEqualsToken => "&=",
            SyntaxKind::BarEqualsToken => "|=",
            SyntaxKind::CaretEqualsToken => "^=",
            SyntaxKind::LessThanLessThanEqualsToken => "<<=",
            SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
            SyntaxKind::AmpersandCaretEqualsToken => "&^=",
            SyntaxKind::AmpersandAmpersandToken => "&&",
            SyntaxKind::BarBarToken => "||",
            SyntaxKind::LessThanMinusToken => "<-",
            SyntaxKind::PlusPlusToken => "++",
            SyntaxKind::MinusMinusToken => "--",
            SyntaxKind::EqualsEqualsToken => "==",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::TildeToken => "~",
            SyntaxKind::ExclamationEqualsToken => "!=",
            SyntaxKind::LessThanEqualsToken => "<=",
            SyntaxKind::GreaterThanEqualsToken => ">=",
            SyntaxKind::ColonEqualsToken => ":=",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::DotToken => ".",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::BreakKeyword => "break",
            SyntaxKind::CaseKeyword => "case",
            SyntaxKind::ChanKeyword => "chan",
            SyntaxKind::ConstKeyword => "const",
            SyntaxKind::ContinueKeyword => "continue",
            SyntaxKind::DefaultKeyword => "default",
            SyntaxKind::DeferKeyword => "defer",
            SyntaxKind::ElseKeyword => "else",
            SyntaxKind::FallthroughKeyword => "fallthrough",
            SyntaxKind::ForKeyword => "for",
            SyntaxKind::FuncKeyword => "func",
            SyntaxKind::GoKeyword => "go",
            SyntaxKind::GotoKeyword => "goto",
            SyntaxKind::IfKeyword => "if",
            SyntaxKind::ImportKeyword => "import",
            SyntaxKind::InterfaceKeyword => "interface",
            SyntaxKind::MapKeyword => "map",
            SyntaxKind::PackageKeyword => "package",
            SyntaxKind::RangeKeyword => "range",
            SyntaxKind::ReturnKeyword => "return",
            SyntaxKind::SelectKeyword => "select",
            SyntaxKind::StructKeyword => "struct",
            SyntaxKind::SwitchKeyword => "switch",
            SyntaxKind::TypeKeyword => "type",
            SyntaxKind::VarKeyword => "var",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            SyntaxKind::Unknown => "unknown token",
            SyntaxKind::EndOfFileToken => "EOF",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImagLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral => "literal",
            other => other.text().unwrap_or("token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for kw in ["func", "range", "select", "fallthrough", "var"] {
            let kind = SyntaxKind::from_keyword(kw).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.text(), Some(kw));
        }
        assert_eq!(SyntaxKind::from_keyword("main"), None);
    }

    #[test]
    fn test_binary_precedence_ordering() {
        assert!(SyntaxKind::AsteriskToken.binary_precedence() > SyntaxKind::PlusToken.binary_precedence());
        assert!(SyntaxKind::PlusToken.binary_precedence() > SyntaxKind::EqualsEqualsToken.binary_precedence());
        assert!(SyntaxKind::AmpersandAmpersandToken.binary_precedence() > SyntaxKind::BarBarToken.binary_precedence());
        assert_eq!(SyntaxKind::ColonEqualsToken.binary_precedence(), LOWEST_PRECEDENCE);
    }
}
