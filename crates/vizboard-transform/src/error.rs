//! Transformation builder errors.

use thiserror::Error;

use crate::derive_category::MappingKind;

/// Errors raised by the transformation builders.
///
/// User input problems such as duplicated category names are not errors;
/// they come back as a refused submission carrying a notification.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Operation not allowed in the current builder stage.
    #[error("cannot {operation} while {stage}")]
    InvalidStage {
        operation: &'static str,
        stage: &'static str,
    },

    /// Source column type cannot be categorised.
    #[error("columns of type '{0}' cannot be used as a category source")]
    UnsupportedColumnType(String),

    /// Mappings do not match the source column type.
    #[error("expected {expected} mappings, got {found} mappings")]
    MappingKindMismatch {
        expected: MappingKind,
        found: MappingKind,
    },

    /// A mapping edit referenced a row that does not exist.
    #[error("mapping {index} does not exist ({len} mappings)")]
    MappingIndexOutOfRange { index: usize, len: usize },

    /// Submission attempted before the transformation is complete.
    #[error("transformation is incomplete: {0}")]
    Incomplete(&'static str),

    /// Descriptor could not be serialised.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransformError>;
