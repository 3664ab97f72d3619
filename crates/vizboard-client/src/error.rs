//! Error types for API access and the lifecycle controller.

use thiserror::Error;

/// Errors raised while talking to the Vizboard API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// An operation needs a visualisation id and none was given.
    #[error("cannot {0} without a visualisation id")]
    MissingTarget(&'static str),

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// A response or local file could not be decoded.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Invalid base URL or request target.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Settings could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(String),

    /// The exported file could not be opened.
    #[error("could not open {url}: {reason}")]
    Open { url: String, reason: String },
}

impl ClientError {
    /// Returns a short message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::MissingTarget(_) => "Save the visualisation first.",
            Self::Network(_) => "Could not reach the server. Please check your connection.",
            Self::Http { status, .. } if *status == 404 => "The item no longer exists.",
            Self::Http { status, .. } if *status >= 500 => {
                "The server ran into a problem. Please try again later."
            }
            Self::Http { .. } => "The server rejected the request.",
            Self::Open { .. } => "The export is ready but could not be opened.",
            Self::JsonParse(_) | Self::InvalidUrl(_) | Self::Config(_) | Self::Io(_) => {
                "An unexpected error occurred."
            }
        }
    }

    /// Whether the failure happened before any request was sent.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingTarget(_) | Self::InvalidUrl(_) | Self::Config(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::JsonParse(err.to_string());
        }
        Self::Network(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_target_is_local() {
        let err = ClientError::MissingTarget("export");
        assert!(err.is_local());
        assert_eq!(err.to_string(), "cannot export without a visualisation id");
    }

    #[test]
    fn test_http_messages_by_status() {
        let not_found = ClientError::Http {
            status: 404,
            body: String::new(),
        };
        let server = ClientError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(!not_found.is_local());
        assert_eq!(not_found.user_message(), "The item no longer exists.");
        assert!(server.user_message().contains("server ran into a problem"));
    }
}
