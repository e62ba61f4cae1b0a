//! Go string literal quoting and unquoting.
//!
//! Import paths are stored in the tree exactly as written (quotes included)
//! so the printer reproduces them verbatim. Anything that needs the path
//! value goes through [`unquote`].

use thiserror::Error;

/// Why a string literal could not be unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("literal is not enclosed in matching quotes")]
    NotQuoted,
    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),
    #[error("unescaped newline in interpreted string")]
    Newline,
    #[error("escaped code point {0:#x} is not a valid character")]
    InvalidCodePoint(u32),
}

/// A malformed import path literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed import path {raw}: {source}")]
pub struct ImportPathError {
    /// The literal text as written, quotes included.
    pub raw: String,
    #[source]
    pub source: UnquoteError,
}

/// Decode an interpreted (`"..."`) or raw (`` `...` ``) Go string literal.
pub fn unquote(raw: &str) -> Result<String, UnquoteError> {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 {
        return Err(UnquoteError::NotQuoted);
    }
    let quote = bytes[0];
    if bytes[bytes.len() - 1] != quote {
        return Err(UnquoteError::NotQuoted);
    }
    let body = &raw[1..raw.len() - 1];
    match quote {
        b'`' => {
            if body.contains('`') {
                return Err(UnquoteError::NotQuoted);
            }
            Ok(body.replace('\r', ""))
        }
        b'"' => unescape(body, 1),
        _ => Err(UnquoteError::NotQuoted),
    }
}

fn unescape(body: &str, offset: usize) -> Result<String, UnquoteError> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => return Err(UnquoteError::Newline),
            '"' => return Err(UnquoteError::NotQuoted),
            '\\' => {
                let at = offset + i;
                let (_, esc) = chars.next().ok_or(UnquoteError::InvalidEscape(at))?;
                match esc {
                    'a' => out.push('\u{07}'),
                    'b' => out.push('\u{08}'),
                    'f' => out.push('\u{0C}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'v' => out.push('\u{0B}'),
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    'x' | 'u' | 'U' => {
                        let digits = match esc {
                            'x' => 2,
                            'u' => 4,
                            _ => 8,
                        };
                        let value = read_digits(&mut chars, digits, 16, at)?;
                        if esc == 'x' {
                            // \x escapes denote single bytes; Go paths are ASCII.
                            out.push(value as u8 as char);
                        } else {
                            out.push(char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint(value))?);
                        }
                    }
                    '0'..='7' => {
                        let first = esc.to_digit(8).unwrap_or(0);
                        let rest = read_digits(&mut chars, 2, 8, at)?;
                        let value = first * 64 + rest;
                        if value > 255 {
                            return Err(UnquoteError::InvalidEscape(at));
                        }
                        out.push(value as u8 as char);
                    }
                    _ => return Err(UnquoteError::InvalidEscape(at)),
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

fn read_digits(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    count: usize,
    radix: u32,
    at: usize,
) -> Result<u32, UnquoteError> {
    let mut value: u32 = 0;
    for _ in 0..count {
        let (_, c) = chars.next().ok_or(UnquoteError::InvalidEscape(at))?;
        let digit = c.to_digit(radix).ok_or(UnquoteError::InvalidEscape(at))?;
        value = value.wrapping_mul(radix).wrapping_add(digit);
    }
    Ok(value)
}

/// Encode a value as an interpreted Go string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Last element of a slash-separated path, like Go's `filepath.Base`.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { "." } else { "/" };
    }
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote_interpreted() {
        assert_eq!(unquote("\"fmt\"").unwrap(), "fmt");
        assert_eq!(unquote("\"a\\tb\\\"c\"").unwrap(), "a\tb\"c");
        assert_eq!(unquote("\"\\x41\\101\\u00e9\"").unwrap(), "AAé");
    }

    #[test]
    fn test_unquote_raw() {
        assert_eq!(unquote("`net/http`").unwrap(), "net/http");
    }

    #[test]
    fn test_unquote_rejects_malformed() {
        assert_eq!(unquote("fmt"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote("\"fmt"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote("\"a\\qb\""), Err(UnquoteError::InvalidEscape(2)));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("github.com/x/y"), "\"github.com/x/y\"");
        assert_eq!(quote("a\"b\\"), "\"a\\\"b\\\\\"");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("fmt"), "fmt");
        assert_eq!(base_name("github.com/dave/dst"), "dst");
        assert_eq!(base_name("a/b/"), "b");
        assert_eq!(base_name(""), ".");
    }
}
