//! Scope chain for the walker.

use crate::symbol::{SymKind, Symbol};
use rustc_hash::FxHashMap;

/// A lexical scope. Scopes form a chain from inner to outer.
#[derive(Debug, Default)]
pub struct Scope {
    names: FxHashMap<String, Symbol>,
    /// The parent scope (None for the global scope).
    parent: Option<Box<Scope>>,
    depth: u32,
}

impl Scope {
    /// A fresh global scope.
    pub fn global() -> Box<Scope> {
        Box::default()
    }

    /// Open a scope nested in `parent`, or a global scope when there is none.
    pub fn push(parent: Option<Box<Scope>>) -> Box<Scope> {
        let depth = parent.as_ref().map_or(0, |p| p.depth + 1);
        Box::new(Scope {
            names: FxHashMap::default(),
            parent,
            depth,
        })
    }

    /// Close this scope and hand back its parent.
    pub fn pop(self: Box<Self>) -> Option<Box<Scope>> {
        self.parent
    }

    /// Bind `name` here. The first binding in a scope wins; returns whether
    /// this call added it.
    pub fn bind(&mut self, name: &str, kind: SymKind) -> bool {
        if self.names.contains_key(name) {
            return false;
        }
        self.names.insert(
            name.to_string(),
            Symbol {
                kind,
                depth: self.depth,
            },
        );
        true
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Symbol> {
        self.names.get(name)
    }

    /// Resolve `name` to the nearest enclosing binding.
    pub fn lookup_chain(&self, name: &str) -> Option<&Symbol> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Some(symbol) = s.names.get(name) {
                return Some(symbol);
            }
            scope = s.parent.as_deref();
        }
        None
    }

    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_binding_wins() {
        let mut scope = Scope::global();
        assert!(scope.bind("x", SymKind::Var));
        assert!(!scope.bind("x", SymKind::Func));
        assert_eq!(scope.lookup_local("x").map(|s| s.kind), Some(SymKind::Var));
    }

    #[test]
    fn test_nearest_binding_shadows() {
        let mut global = Scope::global();
        global.bind("x", SymKind::Var);
        global.bind("y", SymKind::Type);
        let mut inner = Scope::push(Some(global));
        inner.bind("x", SymKind::Parameter);

        assert!(!inner.is_global());
        assert!(!inner.lookup_chain("x").unwrap().is_global());
        assert!(inner.lookup_chain("y").unwrap().is_global());
        assert!(inner.lookup_local("y").is_none());
        assert!(inner.lookup_chain("z").is_none());

        let outer = inner.pop().unwrap();
        assert!(outer.is_global());
        assert_eq!(outer.len(), 2);
    }
}
