//! Errors returned while loading, classifying and evaluating data.
use thiserror::Error;

use crate::Label;

#[derive(Debug, Error)]
pub enum Error {
    /// `k` must be in `[1, n-1]`, since an instance is never its own
    /// neighbor.
    #[error("invalid k: {k} for {n} instances (must be at least 1 and less than {n})")]
    InvalidK { k: usize, n: usize },

    #[error("dataset contains no instances")]
    EmptyDataset,

    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("label {label} is out of range for {nclasses} classes")]
    LabelOutOfRange { label: Label, nclasses: usize },

    #[error("{nclasses} classes exceed the supported maximum of {max}")]
    TooManyClasses { nclasses: usize, max: usize },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shortcut for building an `Error::Parse`.
pub(crate) fn parse_error<S: Into<String>>(line: usize, message: S) -> Error {
    Error::Parse { line, message: message.into() }
}
