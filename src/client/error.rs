use thiserror::Error;

/// Errors returned by the workspace REST API and surfaced to lifecycle
/// callbacks.
///
/// SECURITY: Error messages must NEVER contain the API token.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The addressed object does not exist on the backend.
    #[error("{message}")]
    NotFound { message: String },

    /// Authentication or authorization failed (invalid, expired or
    /// under-privileged token)
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// API returned an error response
    #[error("{error_code}: {message}")]
    Api {
        status: u16,
        error_code: String,
        message: String,
    },

    /// Network-level error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Client could not be configured
    #[error("invalid client configuration: {message}")]
    Config { message: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    /// Whether the backend reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
