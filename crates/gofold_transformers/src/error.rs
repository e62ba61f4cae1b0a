use gofold_ast::ImportPathError;
use gofold_binder::WalkError;
use gofold_parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    ImportPath(#[from] ImportPathError),
}
