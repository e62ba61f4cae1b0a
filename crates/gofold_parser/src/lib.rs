//! gofold_parser: Recursive descent parser for Go.
//!
//! Parses the scanner's token stream into an owned [`SourceFile`] tree.
//! Diagnostics accumulate in a [`DiagnosticCollection`]; [`parse_file`]
//! turns any error diagnostic into a [`ParseError`].

mod expressions;
mod parser;
mod utilities;

pub use parser::Parser;

use gofold_ast::SourceFile;
use gofold_core::LineMap;
use gofold_diagnostics::{Diagnostic, DiagnosticCollection};
use thiserror::Error;

/// A unit that could not be parsed without errors.
#[derive(Debug, Clone, Error)]
#[error("failed to parse {file}: {}", first_message(.diagnostics))]
pub struct ParseError {
    pub file: String,
    /// Error diagnostics, sorted by position.
    pub diagnostics: Vec<Diagnostic>,
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "unknown error".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

/// Parse one Go source unit.
pub fn parse_file(file_name: &str, text: &str) -> Result<SourceFile, ParseError> {
    let (file, diagnostics) = Parser::new(file_name, text).parse_source_file();
    finish(file_name, text, file, diagnostics)
}

fn finish(
    file_name: &str,
    text: &str,
    file: SourceFile,
    mut diagnostics: DiagnosticCollection,
) -> Result<SourceFile, ParseError> {
    diagnostics.resolve_positions(&LineMap::new(text));
    diagnostics.sort();
    if diagnostics.has_errors() {
        let errors = diagnostics
            .into_diagnostics()
            .into_iter()
            .filter(Diagnostic::is_error)
            .collect();
        return Err(ParseError {
            file: file_name.to_string(),
            diagnostics: errors,
        });
    }
    for warning in diagnostics.diagnostics() {
        tracing::warn!("{}", warning);
    }
    Ok(file)
}
