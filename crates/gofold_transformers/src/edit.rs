//! Structural edits on top-level declarations.
//!
//! Names given to these functions that match nothing are ignored.

use gofold_ast::literal::base_name;
use gofold_ast::*;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Set the package clause.
pub fn rename_package(file: &mut SourceFile, name: &str) {
    file.package.name = name.to_string();
}

/// Local name to import path for every import spec, in source order.
///
/// Aliases are kept as written, including `_` and `.`; unaliased imports are
/// keyed by the last path element.
pub fn import_map(file: &SourceFile) -> Result<IndexMap<String, String>, ImportPathError> {
    let mut map = IndexMap::new();
    for spec in file.imports() {
        let path = spec.path_value()?;
        let name = match &spec.name {
            Some(alias) => alias.name.clone(),
            None => base_name(&path).to_string(),
        };
        map.insert(name, path);
    }
    Ok(map)
}

/// Remove the top-level declarations named in `names` and return how many
/// names were removed.
///
/// Only matching entries leave a group; a group left empty is dropped. In a
/// multi-name value spec the initializer at the same index goes with its
/// name when every name has its own initializer. Imports match by
/// effective name, so blank and dot imports are never removed. Methods are
/// never removed.
pub fn remove_decls(file: &mut SourceFile, names: &[String]) -> Result<usize, ImportPathError> {
    if names.is_empty() {
        return Ok(0);
    }
    let targets: FxHashSet<&str> = names.iter().map(String::as_str).collect();
    let mut removed = 0;

    // Resolve import names up front so a malformed path fails before any edit.
    let mut import_names = Vec::new();
    for spec in file.imports() {
        import_names.push(spec.effective_name()?);
    }
    let mut import_names = import_names.into_iter();

    file.decls.retain_mut(|decl| match decl {
        Decl::Import(d) => {
            d.specs.retain(|_| {
                let keep = !matches!(import_names.next(), Some(Some(name)) if targets.contains(name.as_str()));
                removed += usize::from(!keep);
                keep
            });
            !d.specs.is_empty()
        }
        Decl::Type(d) => {
            d.specs.retain(|spec| {
                let keep = !targets.contains(spec.name.name.as_str());
                removed += usize::from(!keep);
                keep
            });
            !d.specs.is_empty()
        }
        Decl::Value(d) => {
            d.specs.retain_mut(|spec| {
                removed += remove_value_names(spec, &targets);
                !spec.names.is_empty()
            });
            !d.specs.is_empty()
        }
        Decl::Func(f) if !f.is_method() && targets.contains(f.name.name.as_str()) => {
            removed += 1;
            false
        }
        Decl::Func(_) | Decl::Bad(_) => true,
    });

    tracing::debug!(file = %file.file_name, removed, "removed declarations");
    Ok(removed)
}

fn remove_value_names(spec: &mut ValueSpec, targets: &FxHashSet<&str>) -> usize {
    let doomed: Vec<bool> = spec
        .names
        .iter()
        .map(|n| targets.contains(n.name.as_str()))
        .collect();
    let count = doomed.iter().filter(|d| **d).count();
    if count == 0 {
        return 0;
    }

    let aligned = spec.values.len() == spec.names.len();
    let mut flags = doomed.iter();
    spec.names.retain(|_| !flags.next().copied().unwrap_or(false));
    if aligned {
        let mut flags = doomed.iter();
        spec.values.retain(|_| !flags.next().copied().unwrap_or(false));
    }
    count
}

/// Prepend a parenthesized import declaration holding `imports` (local
/// alias to path). The alias is omitted when it equals the last path
/// element.
pub fn add_imports(file: &mut SourceFile, imports: &IndexMap<String, String>) {
    if imports.is_empty() {
        return;
    }
    let specs = imports
        .iter()
        .map(|(alias, path)| {
            let alias = (alias.as_str() != base_name(path)).then_some(alias.as_str());
            ImportSpec::new(alias, path)
        })
        .collect();
    let mut decl = ImportDecl::new(specs);
    decl.grouped = true;
    file.decls.insert(0, Decl::Import(decl));
}

/// Replace the initializer of each top-level constant named in `consts`
/// with the given literal text. Returns how many constants were updated.
pub fn update_const_values(file: &mut SourceFile, consts: &IndexMap<String, String>) -> usize {
    if consts.is_empty() {
        return 0;
    }
    let mut updated = 0;
    for decl in &mut file.decls {
        let Decl::Value(d) = decl else {
            continue;
        };
        if d.kind != ValueKind::Const {
            continue;
        }
        for spec in &mut d.specs {
            for (i, name) in spec.names.iter().enumerate() {
                let Some(text) = consts.get(&name.name) else {
                    continue;
                };
                let lit = Expr::BasicLit(BasicLit::new(LitKind::classify(text), text.as_str()));
                if let Some(value) = spec.values.get_mut(i) {
                    *value = lit;
                    updated += 1;
                } else if spec.values.is_empty() && spec.names.len() == 1 {
                    // An implicitly repeated constant gets its own initializer.
                    spec.values.push(lit);
                    updated += 1;
                } else {
                    tracing::warn!(name = %name.name, "constant has no initializer to replace");
                }
            }
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_spec(names: &[&str], values: &[&str]) -> ValueSpec {
        ValueSpec {
            doc: Vec::new(),
            names: names.iter().map(|n| Ident::new(*n)).collect(),
            ty: None,
            values: values
                .iter()
                .map(|v| Expr::BasicLit(BasicLit::new(LitKind::Int, *v)))
                .collect(),
            comment: None,
        }
    }

    #[test]
    fn test_remove_keeps_initializers_aligned() {
        let targets: FxHashSet<&str> = ["b"].into_iter().collect();
        let mut spec = value_spec(&["a", "b", "c"], &["1", "2", "3"]);
        assert_eq!(remove_value_names(&mut spec, &targets), 1);
        let names: Vec<_> = spec.names.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(
            spec.values,
            vec![
                Expr::BasicLit(BasicLit::new(LitKind::Int, "1")),
                Expr::BasicLit(BasicLit::new(LitKind::Int, "3")),
            ]
        );
    }

    #[test]
    fn test_remove_from_tuple_assignment_keeps_call() {
        let targets: FxHashSet<&str> = ["b"].into_iter().collect();
        let mut spec = value_spec(&["a", "b"], &["f()"]);
        remove_value_names(&mut spec, &targets);
        assert_eq!(spec.names.len(), 1);
        assert_eq!(spec.values.len(), 1);
    }
}
