//! Listing of top-level names without descending into bodies.

use crate::error::WalkError;
use crate::symbol::SymKind;
use gofold_ast::*;
use std::ops::ControlFlow;

/// Call `f` with every top-level name in `file`, in source order, stopping
/// early when `f` breaks.
///
/// Methods are not listed, and neither are `_` names or blank and dot
/// imports.
pub fn walk_globals<F>(file: &SourceFile, mut f: F) -> Result<(), WalkError>
where
    F: FnMut(&str, SymKind) -> ControlFlow<()>,
{
    let mut report = |name: &str, kind: SymKind| {
        if name == "_" {
            ControlFlow::Continue(())
        } else {
            f(name, kind)
        }
    };

    for decl in &file.decls {
        let flow = match decl {
            Decl::Import(d) => {
                let mut flow = ControlFlow::Continue(());
                for spec in &d.specs {
                    if let Some(name) = spec.effective_name()? {
                        flow = report(&name, SymKind::Import);
                        if flow.is_break() {
                            break;
                        }
                    }
                }
                flow
            }
            Decl::Type(d) => d
                .specs
                .iter()
                .try_for_each(|spec| report(&spec.name.name, SymKind::Type)),
            Decl::Value(d) => {
                let kind = match d.kind {
                    ValueKind::Const => SymKind::Const,
                    ValueKind::Var => SymKind::Var,
                };
                d.specs
                    .iter()
                    .flat_map(|spec| spec.names.iter())
                    .try_for_each(|name| report(&name.name, kind))
            }
            Decl::Func(func) if !func.is_method() => report(&func.name.name, SymKind::Func),
            Decl::Func(_) | Decl::Bad(_) => ControlFlow::Continue(()),
        };
        if flow.is_break() {
            break;
        }
    }
    Ok(())
}

/// Every top-level name with its kind, in source order.
pub fn global_names(file: &SourceFile) -> Result<Vec<(String, SymKind)>, WalkError> {
    let mut names = Vec::new();
    walk_globals(file, |name, kind| {
        names.push((name.to_string(), kind));
        ControlFlow::Continue(())
    })?;
    Ok(names)
}
