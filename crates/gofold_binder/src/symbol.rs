//! Symbol records and declaration kinds.

use std::fmt;

/// The kind of declaration that bound a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymKind {
    Func,
    Import,
    Type,
    Const,
    Var,
    Receiver,
    Parameter,
    Result,
}

impl SymKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymKind::Func => "func",
            SymKind::Import => "import",
            SymKind::Type => "type",
            SymKind::Const => "const",
            SymKind::Var => "var",
            SymKind::Receiver => "receiver",
            SymKind::Parameter => "parameter",
            SymKind::Result => "result",
        }
    }
}

impl fmt::Display for SymKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a reported identifier introduces its global or refers to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    Declaring,
    Referencing,
}

/// A name bound in some scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymKind,
    /// Depth of the owning scope; the global scope has depth 0.
    pub depth: u32,
}

impl Symbol {
    pub fn is_global(&self) -> bool {
        self.depth == 0
    }
}
