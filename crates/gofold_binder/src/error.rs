use gofold_ast::ImportPathError;
use gofold_core::text::TextRange;
use thiserror::Error;

/// A unit the walker cannot traverse safely.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A construct with no traversal rule, typically a parser recovery node.
    #[error("cannot walk {construct} at {range}")]
    Unsupported {
        construct: &'static str,
        range: TextRange,
    },
    /// A `:=` target that is not an identifier.
    #[error("{construct} declares a non-identifier near {range}")]
    InvalidDefineTarget {
        construct: &'static str,
        range: TextRange,
    },
    #[error(transparent)]
    ImportPath(#[from] ImportPathError),
}
