//! Validation of raw source bytes before scanning.

use thiserror::Error;

/// Raw file contents that are not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("source is not valid UTF-8 (first invalid byte at offset {offset})")]
pub struct InvalidSource {
    pub offset: usize,
}

/// View raw file bytes as source text, rejecting invalid UTF-8.
pub fn source_text(bytes: &[u8]) -> Result<&str, InvalidSource> {
    simdutf8::compat::from_utf8(bytes).map_err(|e| InvalidSource {
        offset: e.valid_up_to(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_text_accepts_utf8() {
        assert_eq!(source_text("package π\n".as_bytes()).unwrap(), "package π\n");
    }

    #[test]
    fn test_source_text_reports_offset() {
        let err = source_text(b"package a\n\xff").unwrap_err();
        assert_eq!(err.offset, 10);
    }
}
