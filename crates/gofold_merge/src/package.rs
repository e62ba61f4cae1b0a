//! A set of source files forming one package.

use crate::error::MergeError;
use crate::merge::merge_units;
use gofold_ast::SourceFile;
use gofold_parser::parse_file;
use gofold_scanner::source_text;
use rayon::prelude::*;
use std::path::Path;

/// The files of one package, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// (file name, source text)
    sources: Vec<(String, String)>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source file to the package.
    pub fn add_source(&mut self, file_name: impl Into<String>, source_text: impl Into<String>) {
        self.sources.push((file_name.into(), source_text.into()));
    }

    /// Read files from disk, in the given order.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), MergeError> {
        for path in paths {
            let path = path.as_ref();
            let name = path.display().to_string();
            let bytes = std::fs::read(path).map_err(|source| MergeError::Io {
                path: name.clone(),
                source,
            })?;
            let text = source_text(&bytes).map_err(|source| MergeError::InvalidUtf8 {
                path: name.clone(),
                source,
            })?;
            self.sources.push((name, text.to_string()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(name, _)| name.as_str())
    }

    /// Parse every file. Files are independent, so they parse in parallel;
    /// the result keeps insertion order.
    pub fn parse(&self) -> Result<Vec<SourceFile>, MergeError> {
        let units = self
            .sources
            .par_iter()
            .map(|(name, text)| parse_file(name, text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(units)
    }

    /// Parse and merge all files.
    pub fn merge(&self) -> Result<SourceFile, MergeError> {
        merge_units(self.parse()?)
    }

    /// Parse, merge and print.
    pub fn merge_to_string(&self) -> Result<String, MergeError> {
        let merged = self.merge()?;
        Ok(gofold_printer::print_file(&merged))
    }
}
