//! Error types for the Vizboard data model.

use thiserror::Error;

/// Errors raised while reading or editing model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Locale tag is not one of the available locales.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// A series menu edit referenced an entry that does not exist.
    #[error("cannot edit series {index}: spec has {len} metric columns")]
    SeriesIndexOutOfRange { index: usize, len: usize },

    /// JSON payload could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
