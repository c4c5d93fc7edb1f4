use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unknown asset kind: {0}")]
    UnknownKind(String),

    #[error("unknown number format: {0}")]
    UnknownNumberFormat(String),

    #[error("unknown source role: {0}")]
    UnknownRole(String),
}

pub type TypeResult<T> = Result<T, TypeError>;
