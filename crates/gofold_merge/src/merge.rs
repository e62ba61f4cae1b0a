//! Merging parsed units.

use crate::error::MergeError;
use crate::imports::ImportTable;
use gofold_ast::{Decl, ImportDecl, SourceFile};
use gofold_binder::{walk_globals, SymKind};
use gofold_transformers::Renamer;
use rustc_hash::FxHashSet;
use std::ops::ControlFlow;

/// Merge units of one package into a single unit.
///
/// The result keeps the first unit's file name, package clause and package
/// doc. It fails without partial output when the package names differ, an
/// import path is malformed, a unit cannot be walked, or an import runs out
/// of candidate names.
#[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
pub fn merge_units(mut units: Vec<SourceFile>) -> Result<SourceFile, MergeError> {
    let Some(first) = units.first() else {
        return Err(MergeError::NoUnits);
    };
    let expected = first.package.name.clone();
    if let Some(other) = units.iter().find(|u| u.package.name != expected) {
        return Err(MergeError::PackageNameMismatch {
            expected,
            found: other.package.name.clone(),
            file: other.file_name.clone(),
        });
    }

    let mut imports = ImportTable::collect(&units)?;
    let globals = collect_globals(&units)?;
    imports.resolve_names(&globals)?;

    let mut renamed = 0usize;
    for (index, unit) in units.iter_mut().enumerate() {
        let renames = imports.renames_for(index);
        if renames.is_empty() {
            continue;
        }
        let report = Renamer::new(renames).only(SymKind::Import).rename_file(unit)?;
        renamed += report.changed().count();
    }

    let import_count = imports.len();
    let specs = imports.into_specs();
    let mut units = units.into_iter();
    let Some(mut merged) = units.next() else {
        return Err(MergeError::NoUnits);
    };

    let mut decls = Vec::new();
    if !specs.is_empty() {
        decls.push(Decl::Import(ImportDecl::new(specs)));
    }
    decls.extend(std::mem::take(&mut merged.decls).into_iter().filter(|d| !d.is_import()));
    for unit in units {
        decls.extend(unit.decls.into_iter().filter(|d| !d.is_import()));
        merged.end_comments.extend(unit.end_comments);
    }
    merged.decls = decls;

    tracing::info!(
        package = %merged.package.name,
        imports = import_count,
        renamed,
        decls = merged.decls.len(),
        "merged units"
    );
    Ok(merged)
}

/// Non-import top-level names of every unit. After the merge all units share
/// one global scope, so an import may not take any of these names.
fn collect_globals(units: &[SourceFile]) -> Result<FxHashSet<String>, MergeError> {
    let mut globals = FxHashSet::default();
    for unit in units {
        walk_globals(unit, |name, kind| {
            if kind != SymKind::Import {
                globals.insert(name.to_string());
            }
            ControlFlow::Continue(())
        })?;
    }
    Ok(globals)
}
