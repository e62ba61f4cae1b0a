//! gofold_options: Rewrite configuration.
//!
//! A [`RewriteOptions`] describes everything a single-unit rewrite does:
//! package rename, global renames and decoration, constant overrides,
//! declarations to drop and imports to add. It is read from a JSON file
//! and then overridden by command-line values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Options for rewriting one Go source unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct RewriteOptions {
    /// New package name.
    pub package: Option<String>,
    /// Global renames, old name to new name.
    pub declares: IndexMap<String, String>,
    /// Constant overrides, constant name to literal text.
    pub consts: IndexMap<String, String>,
    /// Imports to add, local alias to import path.
    pub imports: IndexMap<String, String>,
    /// Top-level names to remove.
    pub remove: Vec<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl RewriteOptions {
    /// Apply `other` on top of `self`: scalar values in `other` win, map
    /// entries are added or replaced, removal names are appended.
    pub fn merge_overrides(&mut self, other: RewriteOptions) {
        if other.package.is_some() {
            self.package = other.package;
        }
        self.declares.extend(other.declares);
        self.consts.extend(other.consts);
        self.imports.extend(other.imports);
        for name in other.remove {
            if !self.remove.contains(&name) {
                self.remove.push(name);
            }
        }
        if other.prefix.is_some() {
            self.prefix = other.prefix;
        }
        if other.suffix.is_some() {
            self.suffix = other.suffix;
        }
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    pub fn suffix(&self) -> &str {
        self.suffix.as_deref().unwrap_or("")
    }

    /// Whether applying these options leaves a unit unchanged.
    pub fn is_empty(&self) -> bool {
        self.package.is_none()
            && self.declares.is_empty()
            && self.consts.is_empty()
            && self.imports.is_empty()
            && self.remove.is_empty()
            && self.prefix().is_empty()
            && self.suffix().is_empty()
    }
}

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing '=' in '{0}'")]
    MissingSeparator(String),
}

/// Parse options from JSON text.
pub fn parse_config(content: &str) -> Result<RewriteOptions, ConfigError> {
    Ok(serde_json::from_str(content)?)
}

/// Parse options from a JSON file.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<RewriteOptions, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Split a `KEY=VALUE` argument at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(ConfigError::MissingSeparator(s.to_string())),
    }
}
