//! Layout error types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("grid requires at least one column")]
    InvalidColumns,

    #[error("element is not a {0}")]
    KindMismatch(&'static str),

    #[error("unknown element id")]
    UnknownElement,
}

pub type Result<T> = std::result::Result<T, LayoutError>;
