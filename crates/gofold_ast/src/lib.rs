//! gofold_ast: Syntax tree definitions for Go source units.
//!
//! The tree is owned and mutable: the walker hands out `&mut Ident` so a
//! rename pass can rewrite names in place, and the merge engine moves
//! declarations between units. Token kinds live in [`SyntaxKind`].

pub mod literal;
pub mod node;
pub mod syntax_kind;
pub mod types;

// Re-export key types
pub use literal::{quote, unquote, ImportPathError, UnquoteError};
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
