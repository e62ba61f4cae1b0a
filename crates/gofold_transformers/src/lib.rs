//! gofold_transformers: Rewrites of a parsed Go source unit.
//!
//! - [`Renamer`]: global renames with prefix/suffix decoration, followed by
//!   doc comment updates for the renamed declarations
//! - [`edit`]: package rename, declaration removal, constant overrides and
//!   import insertion
//! - [`Rewriter`]: the single-unit pipeline combining both

pub mod edit;
mod error;
mod rename;
mod rewriter;

pub use error::TransformError;
pub use rename::{RenameReport, Renamer};
pub use rewriter::Rewriter;
