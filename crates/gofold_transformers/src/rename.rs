//! Global renaming and doc comment updates.

use gofold_ast::*;
use gofold_binder::{walk_file, Occurrence, SymKind, WalkError};
use gofold_options::RewriteOptions;
use indexmap::IndexMap;
use regex::Regex;

/// Renames the globals of a unit.
///
/// Each reported occurrence is first looked up in the rename map (names
/// without an entry keep their text), then decorated with the prefix and
/// suffix. Imports are decorated like every other global; an unaliased
/// import that changes name gains an explicit alias.
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    declares: IndexMap<String, String>,
    prefix: String,
    suffix: String,
    /// Restrict renaming to globals of one kind.
    only: Option<SymKind>,
}

/// The renames observed at declaring occurrences, new name to old name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    new_to_old: IndexMap<String, String>,
}

impl RenameReport {
    /// The name a declaration had before the rename.
    pub fn old_name(&self, new: &str) -> Option<&str> {
        self.new_to_old.get(new).map(String::as_str)
    }

    /// Pairs in traversal order, including unchanged names.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.new_to_old
            .iter()
            .map(|(new, old)| (new.as_str(), old.as_str()))
    }

    /// Pairs whose name actually changed.
    pub fn changed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(new, old)| new != old)
    }

    pub fn len(&self) -> usize {
        self.new_to_old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_to_old.is_empty()
    }
}

impl Renamer {
    pub fn new(declares: IndexMap<String, String>) -> Self {
        Self {
            declares,
            prefix: String::new(),
            suffix: String::new(),
            only: None,
        }
    }

    pub fn from_options(options: &RewriteOptions) -> Self {
        Self::new(options.declares.clone())
            .with_prefix(options.prefix())
            .with_suffix(options.suffix())
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    /// Leave globals of every other kind untouched.
    pub fn only(mut self, kind: SymKind) -> Self {
        self.only = Some(kind);
        self
    }

    /// Whether renaming leaves every name unchanged.
    pub fn is_identity(&self) -> bool {
        self.prefix.is_empty()
            && self.suffix.is_empty()
            && self.declares.iter().all(|(old, new)| old == new)
    }

    /// The new text for a global named `name`.
    pub fn rename(&self, name: &str, kind: SymKind) -> String {
        if self.only.is_some_and(|only| only != kind) {
            return name.to_string();
        }
        let mapped = self.declares.get(name).map_or(name, String::as_str);
        format!("{}{}{}", self.prefix, mapped, self.suffix)
    }

    /// Rename every global occurrence in `file`, then rewrite the doc
    /// comments of renamed top-level declarations.
    pub fn rename_file(&self, file: &mut SourceFile) -> Result<RenameReport, WalkError> {
        let mut report = RenameReport::default();
        walk_file(file, &mut |ident: &mut Ident, kind: SymKind, occurrence: Occurrence| {
            let old = std::mem::take(&mut ident.name);
            ident.name = self.rename(&old, kind);
            if occurrence == Occurrence::Declaring {
                report.new_to_old.insert(ident.name.clone(), old);
            }
        })?;

        update_doc_comments(file, &report);
        tracing::debug!(
            file = %file.file_name,
            declared = report.len(),
            changed = report.changed().count(),
            "renamed globals"
        );
        Ok(report)
    }
}

/// Replace the old name of each renamed top-level declaration inside that
/// declaration's own doc comment. Imports and methods have no docs rewritten.
fn update_doc_comments(file: &mut SourceFile, report: &RenameReport) {
    for decl in &mut file.decls {
        match decl {
            Decl::Type(d) => {
                let single = d.specs.len() == 1;
                for spec in &mut d.specs {
                    let name = spec.name.name.as_str();
                    substitute(&mut spec.doc, report, name);
                    if single {
                        substitute(&mut d.doc, report, name);
                    }
                }
            }
            Decl::Value(d) => {
                let single = d.specs.len() == 1;
                for spec in &mut d.specs {
                    for ident in &spec.names {
                        substitute(&mut spec.doc, report, &ident.name);
                        if single {
                            substitute(&mut d.doc, report, &ident.name);
                        }
                    }
                }
            }
            Decl::Func(f) if !f.is_method() => substitute(&mut f.doc, report, &f.name.name),
            Decl::Import(_) | Decl::Func(_) | Decl::Bad(_) => {}
        }
    }
}

/// Rewrite whole-word occurrences of the old form of `new` in `doc`.
fn substitute(doc: &mut [String], report: &RenameReport, new: &str) {
    if doc.is_empty() {
        return;
    }
    let Some(old) = report.old_name(new) else {
        return;
    };
    if old == new {
        return;
    }
    let pattern = format!(r"\b{}\b", regex::escape(old));
    let Ok(word) = Regex::new(&pattern) else {
        return;
    };
    for line in doc.iter_mut() {
        let replaced = word.replace_all(line, regex::NoExpand(new)).into_owned();
        *line = replaced;
    }
}
