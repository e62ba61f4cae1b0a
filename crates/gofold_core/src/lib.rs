//! gofold_core: Core utilities shared by every gofold crate.
//!
//! Provides byte-offset text ranges and the line map used to turn offsets
//! into `line:column` positions for diagnostics.

pub mod text;

pub use text::{LineMap, Position, TextPos, TextRange};
