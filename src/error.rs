//! Error types for GitHub Issues operations.

use thiserror::Error;

/// Errors that can occur while composing a service or calling GitHub.
#[derive(Debug, Error)]
pub enum Error {
    /// Two incorporated capabilities declare the same method.
    #[error("capability conflict: method '{method}' is provided by both '{first}' and '{second}'")]
    ConstructionConflict {
        method: &'static str,
        first: &'static str,
        second: &'static str,
    },

    /// Configuration is missing or incomplete.
    #[error("GitHub configuration required: {0}")]
    ConfigMissing(String),

    /// A caller-supplied argument is outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Query parameters could not be encoded.
    #[error("Failed to encode query: {0}")]
    QueryEncoding(String),

    /// A request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),

    /// The connector could not complete a request.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Failures reported by a [`Connector`](crate::Connector).
///
/// The capability layer never inspects these; they reach the caller exactly
/// as the connector produced them.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl RemoteError {
    /// HTTP status attached to the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl Error {
    /// Whether this error came from the remote side rather than from this crate.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(RemoteError::Http(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Remote(RemoteError::Decode(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Remote(RemoteError::Url(err))
    }
}

/// Result type alias for GitHub Issues operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message_names_both_capabilities() {
        let err = Error::ConstructionConflict {
            method: "add_label",
            first: "labels",
            second: "tags",
        };
        let msg = err.to_string();
        assert!(msg.contains("add_label"));
        assert!(msg.contains("labels"));
        assert!(msg.contains("tags"));
        assert!(!err.is_remote());
    }

    #[test]
    fn test_remote_error_is_transparent() {
        let err: Error = RemoteError::Api {
            status: 404,
            message: "Not Found".to_string(),
        }
        .into();
        assert!(err.is_remote());
        assert_eq!(err.to_string(), "GitHub API error (404): Not Found");
    }

    #[test]
    fn test_remote_status() {
        let err = RemoteError::RateLimited {
            retry_after_secs: Some(30),
        };
        assert_eq!(err.status(), Some(429));

        let err = RemoteError::Api {
            status: 422,
            message: "Validation Failed".to_string(),
        };
        assert_eq!(err.status(), Some(422));
    }
}
