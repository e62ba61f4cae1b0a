//! gofold_merge: Merge the files of one Go package into a single file.
//!
//! Imports from every unit are deduplicated by (local name, path). A local
//! name that two paths claim, or that collides with a global declared in
//! any unit, is replaced by a generated `<base>NN` name, and every unit that
//! used the old name through that import is rewritten. The merged unit is
//! one import declaration followed by every other declaration in unit
//! order.

mod error;
mod imports;
mod merge;
mod package;

pub use error::MergeError;
pub use imports::{ImportKey, MAX_CANDIDATES};
pub use merge::merge_units;
pub use package::Package;
