//! Import deduplication and local name selection.

use crate::error::MergeError;
use gofold_ast::literal::base_name;
use gofold_ast::{Ident, ImportSpec, SourceFile};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// Generated names per path: `<base>00` to `<base>99`.
pub const MAX_CANDIDATES: u32 = 100;

/// Identity of an import across units: the local name it was requested
/// under and its path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    pub name: String,
    pub path: String,
}

#[derive(Debug)]
struct ImportEntry {
    /// The first spec seen for this key.
    spec: ImportSpec,
    /// Units importing this key, ascending.
    units: Vec<usize>,
    /// False for blank and dot imports.
    binds: bool,
    final_name: String,
}

/// All imports of the units being merged, in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct ImportTable {
    entries: IndexMap<ImportKey, ImportEntry>,
    /// Paths requesting each local name, in first-seen order.
    claims: FxHashMap<String, Vec<String>>,
}

impl ImportTable {
    pub(crate) fn collect(units: &[SourceFile]) -> Result<Self, MergeError> {
        let mut table = ImportTable::default();
        for (index, unit) in units.iter().enumerate() {
            for spec in unit.imports() {
                let path = spec.path_value()?;
                let effective = spec.effective_name()?;
                let binds = effective.is_some();
                let name = match (effective, &spec.name) {
                    (Some(name), _) => name,
                    (None, Some(alias)) => alias.name.clone(),
                    (None, None) => continue,
                };

                if binds {
                    let paths = table.claims.entry(name.clone()).or_default();
                    if !paths.contains(&path) {
                        paths.push(path.clone());
                    }
                }

                let key = ImportKey { name, path };
                let entry = table
                    .entries
                    .entry(key)
                    .or_insert_with_key(|key| ImportEntry {
                        spec: spec.clone(),
                        units: Vec::new(),
                        binds,
                        final_name: key.name.clone(),
                    });
                if entry.units.last() != Some(&index) {
                    entry.units.push(index);
                }
            }
        }
        Ok(table)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Choose the final local name of every binding import.
    ///
    /// A requested name is kept when no other path requests it and it is
    /// free. Otherwise the first free `<base>NN` candidate is taken. A name
    /// is free when it is not a non-import global of any unit in `globals`,
    /// not requested by another path, and not already chosen for another
    /// import.
    pub(crate) fn resolve_names(&mut self, globals: &FxHashSet<String>) -> Result<(), MergeError> {
        let mut assigned: FxHashSet<String> = FxHashSet::default();
        for (key, entry) in self.entries.iter_mut() {
            if !entry.binds {
                continue;
            }
            let duplicate = self.claims.get(&key.name).is_some_and(|paths| paths.len() > 1);
            let free = |candidate: &str, assigned: &FxHashSet<String>| {
                !globals.contains(candidate)
                    && !assigned.contains(candidate)
                    && !self
                        .claims
                        .get(candidate)
                        .is_some_and(|paths| paths.iter().any(|p| *p != key.path))
            };

            let final_name = if !duplicate && free(&key.name, &assigned) {
                key.name.clone()
            } else {
                let base = identifier_base(base_name(&key.path));
                (0..MAX_CANDIDATES)
                    .map(|i| format!("{}{:02}", base, i))
                    .find(|candidate| free(candidate, &assigned))
                    .ok_or_else(|| MergeError::CandidatesExhausted {
                        path: key.path.clone(),
                        base: base.clone(),
                    })?
            };

            if final_name != key.name {
                tracing::debug!(path = %key.path, from = %key.name, to = %final_name, "import renamed");
            }
            assigned.insert(final_name.clone());
            entry.final_name = final_name;
        }
        Ok(())
    }

    /// Old local name to new local name for the imports of one unit.
    pub(crate) fn renames_for(&self, unit: usize) -> IndexMap<String, String> {
        self.entries
            .iter()
            .filter(|(key, entry)| {
                entry.binds && entry.final_name != key.name && entry.units.contains(&unit)
            })
            .map(|(key, entry)| (key.name.clone(), entry.final_name.clone()))
            .collect()
    }

    /// The deduplicated specs, renamed where a new local name was chosen.
    pub(crate) fn into_specs(self) -> Vec<ImportSpec> {
        self.entries
            .into_iter()
            .map(|(key, mut entry)| {
                if entry.binds && entry.final_name != key.name {
                    entry.spec.name = Some(Ident::new(entry.final_name));
                }
                entry.spec
            })
            .collect()
    }
}

/// The last path element with characters that cannot appear in an
/// identifier replaced by `_`.
fn identifier_base(element: &str) -> String {
    let mut base: String = element
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
        base.insert(0, '_');
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_base() {
        assert_eq!(identifier_base("log"), "log");
        assert_eq!(identifier_base("yaml.v2"), "yaml_v2");
        assert_eq!(identifier_base("go-isatty"), "go_isatty");
        assert_eq!(identifier_base("3d"), "_3d");
    }
}
