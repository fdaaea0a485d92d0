use thiserror::Error;

use crate::command::CommandError;
use crate::config::error::ConfigError;
use crate::transport::TransportError;

/// Application-wide error type for everything that is surfaced synchronously.
///
/// Per-attempt failures (transport, non-2xx, unreadable body) never end up
/// here; they travel inside a `NotificationResult` instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Notification target is not a usable absolute http(s) URL
    #[error("Invalid target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Text command could not be turned into dispatch parameters
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// HTTP transport could not be constructed
    #[error("Transport initialization failed: {0}")]
    Transport(#[from] TransportError),

    /// I/O error with operation context
    #[error("I/O error while {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn invalid_target(url: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::InvalidTarget {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
