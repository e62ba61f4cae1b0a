//! gofold_binder: Scope analysis for Go source units.
//!
//! The walker hoists every top-level name into the global scope, then walks
//! the whole unit with a live scope chain and reports each occurrence that
//! resolves to a global declaration. Callers receive `&mut Ident` and may
//! rename in place.

mod error;
mod globals;
mod scope;
mod symbol;
mod walker;

pub use error::WalkError;
pub use globals::{global_names, walk_globals};
pub use scope::Scope;
pub use symbol::{Occurrence, SymKind, Symbol};
pub use walker::{walk_file, GlobalVisitor};
