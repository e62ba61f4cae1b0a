//! The single-unit rewrite pipeline.

use crate::edit;
use crate::error::TransformError;
use crate::rename::{RenameReport, Renamer};
use gofold_ast::SourceFile;
use gofold_options::RewriteOptions;

/// Applies a [`RewriteOptions`] to one unit.
///
/// Steps run in a fixed order: package rename, constant overrides,
/// declaration removal, global rename with doc updates, import insertion.
/// Removal and overrides therefore name declarations by their original
/// names, and added imports are never decorated.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    options: RewriteOptions,
    renamer: Renamer,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Self {
        let renamer = Renamer::from_options(&options);
        Self { options, renamer }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite a parsed unit in place.
    pub fn rewrite(&self, file: &mut SourceFile) -> Result<RenameReport, TransformError> {
        if let Some(package) = &self.options.package {
            edit::rename_package(file, package);
        }
        edit::update_const_values(file, &self.options.consts);
        edit::remove_decls(file, &self.options.remove)?;
        let report = self.renamer.rename_file(file)?;
        edit::add_imports(file, &self.options.imports);
        Ok(report)
    }

    /// Parse, rewrite and print one unit.
    pub fn rewrite_source(
        &self,
        file_name: &str,
        text: &str,
    ) -> Result<(String, RenameReport), TransformError> {
        let mut file = gofold_parser::parse_file(file_name, text)?;
        let report = self.rewrite(&mut file)?;
        Ok((gofold_printer::print_file(&file), report))
    }
}
