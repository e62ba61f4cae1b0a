//! Flag types shared by the scanner and parser.

bitflags::bitflags! {
    /// Flags describing how a token was scanned.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        /// A line break separates this token from the previous one.
        const PRECEDING_LINE_BREAK = 1 << 0;
        /// A semicolon inserted by the scanner at a line break or EOF.
        const IMPLICIT             = 1 << 1;
        /// A literal or comment that ran into end of line or file.
        const UNTERMINATED         = 1 << 2;
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Whether a value declaration group is `const` or `var`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Const,
    Var,
}

impl ValueKind {
    pub fn keyword(self) -> &'static str {
        match self {
            ValueKind::Const => "const",
            ValueKind::Var => "var",
        }
    }
}

/// Kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LitKind {
    Int,
    Float,
    Imag,
    Char,
    String,
}

impl LitKind {
    /// Guess the literal kind of caller-supplied literal text.
    ///
    /// Text that is not a recognisable number, rune or string is treated as
    /// an integer-like token; the printer emits it verbatim either way.
    pub fn classify(text: &str) -> LitKind {
        let text = text.trim();
        match text.chars().next() {
            Some('"') | Some('`') => LitKind::String,
            Some('\'') => LitKind::Char,
            _ if text.ends_with('i') && text.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
                LitKind::Imag
            }
            _ if !text.starts_with("0x")
                && !text.starts_with("0X")
                && (text.contains('.') || text.contains('e') || text.contains('E')) =>
            {
                LitKind::Float
            }
            _ => LitKind::Int,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literal_text() {
        assert_eq!(LitKind::classify("\"v2\""), LitKind::String);
        assert_eq!(LitKind::classify("`raw`"), LitKind::String);
        assert_eq!(LitKind::classify("'x'"), LitKind::Char);
        assert_eq!(LitKind::classify("42"), LitKind::Int);
        assert_eq!(LitKind::classify("0xE1"), LitKind::Int);
        assert_eq!(LitKind::classify("1.5e3"), LitKind::Float);
        assert_eq!(LitKind::classify("2i"), LitKind::Imag);
    }
}
