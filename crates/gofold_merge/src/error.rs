use gofold_ast::ImportPathError;
use gofold_binder::WalkError;
use gofold_parser::ParseError;
use gofold_scanner::InvalidSource;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("no source files to merge")]
    NoUnits,
    #[error("package name inconsistent: {file} declares package {found}, expected {expected}")]
    PackageNameMismatch {
        expected: String,
        found: String,
        file: String,
    },
    #[error("no free import name for {path}: {base}00 to {base}99 are all taken")]
    CandidatesExhausted { path: String, base: String },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    ImportPath(#[from] ImportPathError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        path: String,
        #[source]
        source: InvalidSource,
    },
}
