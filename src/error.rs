//! Error types shared across the client.

use std::io;

use thiserror::Error;

/// Failure categories for calls against the quiz backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("network error - please check your connection ({0})")]
    NetworkUnreachable(String),
    /// Also clears the auth context when raised by an authenticated call.
    #[error("session expired - please log in again")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error ({status}) - {message}")]
    ServerError { status: u16, message: String },
    #[error("unexpected response from {endpoint}")]
    MalformedResponse { endpoint: &'static str },
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Map a non-success HTTP status and its body message onto the taxonomy.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized(message.unwrap_or_else(|| "unauthorized".into())),
            404 => Self::NotFound(message.unwrap_or_else(|| "resource not found".into())),
            400 | 409 | 422 => {
                Self::Validation(message.unwrap_or_else(|| "invalid request format".into()))
            }
            _ => Self::ServerError {
                status,
                message: message
                    .unwrap_or_else(|| "the backend is temporarily unavailable".into()),
            },
        }
    }

    /// Whether the user should be offered a retry action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkUnreachable(_) | Self::ServerError { .. } | Self::MalformedResponse { .. }
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must not be empty")]
    Empty { key: &'static str },
}

/// Errors raised by the persisted auth session file.
#[derive(Debug, Error)]
pub enum AuthStoreError {
    #[error("failed to access session file: {0}")]
    Io(#[from] io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Top-level error for the binary and the TUI runtime.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    AuthStore(#[from] AuthStoreError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(ApiError::from_status(401, None).is_unauthorized());
        assert!(ApiError::from_status(404, None).is_not_found());
        assert_eq!(
            ApiError::from_status(400, Some("Passwords do not match".into())),
            ApiError::Validation("Passwords do not match".into())
        );
        assert_eq!(
            ApiError::from_status(503, None),
            ApiError::ServerError {
                status: 503,
                message: "the backend is temporarily unavailable".into()
            }
        );
    }

    #[test]
    fn test_retryable_categories() {
        assert!(ApiError::NetworkUnreachable("refused".into()).is_retryable());
        assert!(ApiError::from_status(500, None).is_retryable());
        assert!(ApiError::MalformedResponse { endpoint: "/submit_quiz" }.is_retryable());
        assert!(!ApiError::Unauthorized("x".into()).is_retryable());
        assert!(!ApiError::Validation("x".into()).is_retryable());
        assert!(!ApiError::NotFound("x".into()).is_retryable());
    }
}
