//! gofold_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Diagnostics carry a code, a category, and a message rendered from a
//! template in the [`messages`] table. The scanner and parser accumulate
//! them in a [`DiagnosticCollection`]; callers decide whether errors are fatal.

use gofold_core::text::{Position, TextRange};
use std::fmt;

/// How severe a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The file where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The byte range the diagnostic points at, if any.
    pub range: Option<TextRange>,
    /// 1-based line/column of `range.pos`, filled in once a line map exists.
    pub position: Option<Position>,
    /// The rendered message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            range: None,
            position: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Create a diagnostic pointing at a byte range of a file.
    pub fn with_location(
        file: &str,
        range: TextRange,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file.to_string()),
            range: Some(range),
            position: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            match (self.position, self.range) {
                (Some(position), _) => write!(f, ":{}", position)?,
                (None, Some(range)) => write!(f, "({})", range.pos)?,
                (None, None) => {}
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} GF{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated while scanning and parsing.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Fill in `position` for every located diagnostic.
    pub fn resolve_positions(&mut self, line_map: &gofold_core::LineMap) {
        for d in &mut self.diagnostics {
            if let Some(range) = d.range {
                d.position = Some(line_map.position_of(range.pos));
            }
        }
    }

    /// Sort diagnostics by file and position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| {
                    let a_pos = a.range.map(|r| r.pos).unwrap_or(0);
                    let b_pos = b.range.map(|r| r.pos).unwrap_or(0);
                    a_pos.cmp(&b_pos)
                })
        });
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors (1000-1099)
    // ========================================================================
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1001, Error, "Invalid character '{0}'.");
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "String literal not terminated.");
    pub const UNTERMINATED_RAW_STRING_LITERAL: DiagnosticMessage = diag!(1003, Error, "Raw string literal not terminated.");
    pub const UNTERMINATED_RUNE_LITERAL: DiagnosticMessage = diag!(1004, Error, "Rune literal not terminated.");
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = diag!(1005, Error, "Comment not terminated.");
    pub const INVALID_NUMERIC_LITERAL: DiagnosticMessage = diag!(1006, Error, "Invalid numeric literal '{0}'.");

    // ========================================================================
    // Parser errors (1100-1199)
    // ========================================================================
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1100, Error, "'{0}' expected, found '{1}'.");
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1101, Error, "Identifier expected, found '{0}'.");
    pub const PACKAGE_CLAUSE_EXPECTED: DiagnosticMessage = diag!(1102, Error, "Package clause expected.");
    pub const DECLARATION_EXPECTED: DiagnosticMessage = diag!(1103, Error, "Declaration expected, found '{0}'.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1104, Error, "Expression expected, found '{0}'.");
    pub const TYPE_EXPECTED: DiagnosticMessage = diag!(1105, Error, "Type expected, found '{0}'.");
    pub const STATEMENT_EXPECTED: DiagnosticMessage = diag!(1106, Error, "Statement expected, found '{0}'.");
    pub const IMPORT_PATH_EXPECTED: DiagnosticMessage = diag!(1107, Error, "Import path must be a string literal.");
    pub const INVALID_IMPORT_PATH: DiagnosticMessage = diag!(1108, Error, "Invalid import path {0}: {1}.");
    pub const IMPORTS_AFTER_DECLARATIONS: DiagnosticMessage = diag!(1109, Error, "Imports must appear before other declarations.");
    pub const EXPECTED_IDENTIFIER_ON_LEFT_OF_DEFINE: DiagnosticMessage = diag!(1110, Error, "Non-name on left side of ':='.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1111, Error, "Maximum nesting depth exceeded.");
    pub const TYPE_PARAMETERS_NOT_SUPPORTED: DiagnosticMessage = diag!(1112, Error, "Type parameters are not supported.");
    pub const EXPRESSION_IS_NOT_A_CALL: DiagnosticMessage = diag!(1113, Error, "Expression in '{0}' must be a function call.");
    pub const RANGE_CLAUSE_ASSIGNMENT: DiagnosticMessage = diag!(1114, Error, "Range clause permits at most two iteration variables.");
    pub const MISSING_FUNCTION_BODY_IN_LITERAL: DiagnosticMessage = diag!(1115, Error, "Function literal must have a body.");
    pub const SELECT_CASE_MUST_BE_COMMUNICATION: DiagnosticMessage = diag!(1116, Error, "Select case must be a send or receive.");
    pub const MIXED_NAMED_AND_UNNAMED_PARAMETERS: DiagnosticMessage = diag!(1117, Error, "Mixed named and unnamed parameters.");
    pub const EMPTY_FILE: DiagnosticMessage = diag!(1118, Warning, "File contains no declarations.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_replaces_placeholders() {
        assert_eq!(
            format_message("'{0}' expected, found '{1}'.", &[")", "}"]),
            "')' expected, found '}'."
        );
    }

    #[test]
    fn test_display_uses_position_when_resolved() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::with_location(
            "a.go",
            TextRange::new(10, 11),
            &messages::STATEMENT_EXPECTED,
            &["else"],
        ));
        collection.resolve_positions(&gofold_core::LineMap::new("package a\nfunc"));
        let text = collection.diagnostics()[0].to_string();
        assert_eq!(text, "a.go:2:1: error GF1106: Statement expected, found 'else'.");
        assert!(collection.has_errors());
        assert_eq!(collection.error_count(), 1);
    }
}
