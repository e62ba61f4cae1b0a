//! gofold_scanner: Lexer/tokenizer for Go source code.
//!
//! Produces tokens from UTF-8 source text with:
//! - Go automatic semicolon insertion at line breaks and end of file
//! - Comment capture, with each comment marked as own-line or trailing
//! - Interpreted, raw and rune literals; all Go numeric literal forms
//! - Unicode identifiers

mod scanner;
mod source;
mod token;

pub use scanner::{CommentInfo, Scanner};
pub use source::{source_text, InvalidSource};
pub use token::{tokenize, TokenInfo};
