//! Error types for ListGuard

use std::time::Duration;

/// Result type alias using ListGuard's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ListGuard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rulebook parsing/loading errors
    #[error("rulebook error: {0}")]
    Rulebook(String),

    /// Classifier construction errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// External service errors
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new rulebook error
    pub fn rulebook(msg: impl Into<String>) -> Self {
        Self::Rulebook(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Failure taxonomy for calls to external model services.
///
/// Only the wire-level outcomes live here; what each failure means for a
/// pipeline run (degrade, abort, formatted failure string) is decided by the
/// stage adapters.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced an HTTP response
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status and an error body
    #[error("service returned {status}: {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The call exceeded the configured deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The service answered 2xx but the body carried no usable content
    #[error("empty response from service")]
    EmptyResponse,
}

impl ServiceError {
    /// Whether a retry could plausibly change the outcome.
    ///
    /// API errors are deterministic for a given request and are never
    /// retried; transport failures and timeouts get one more attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}
