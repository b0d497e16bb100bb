//! Filter error types

use thiserror::Error;

use super::ops::{Arity, FilterOp};
use super::types::ValueShape;

/// Errors returned by the filter compiler
///
/// Both variants are caller errors: compilation is deterministic, so
/// resubmitting the same filter reproduces the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Operator token is not part of the vocabulary
    #[error("unsupported operation: {op}")]
    UnsupportedOperation { op: String },

    /// Value shape does not match the operator's arity class
    #[error("operator {op} on key '{key}' expects {expected}, got {found}")]
    ArityMismatch {
        key: String,
        op: FilterOp,
        expected: Arity,
        found: ValueShape,
    },
}

impl FilterError {
    pub fn unsupported(op: impl Into<String>) -> Self {
        Self::UnsupportedOperation { op: op.into() }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            Self::ArityMismatch { .. } => "ARITY_MISMATCH",
        }
    }
}

/// Errors returned while decoding a filter request body
#[derive(Error, Debug)]
pub enum FilterDecodeError {
    #[error("filter JSON exceeds maximum size of {limit} bytes")]
    TooLarge { limit: usize },

    #[error("invalid filter JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("maximum {limit} filter items allowed, got {count}")]
    TooManyItems { limit: usize, count: usize },
}

impl FilterDecodeError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "FILTER_JSON_TOO_LARGE",
            Self::InvalidJson(_) => "INVALID_FILTER_JSON",
            Self::TooManyItems { .. } => "TOO_MANY_FILTERS",
        }
    }
}
