//! Transport error types

use thiserror::Error;

/// Technical failure of a round trip.
///
/// Messages are captured as text so test transports can build them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The connection could not be established (refused, DNS, TLS handshake)
    #[error("connection failed: {message}")]
    Connect { message: String },

    /// Any other request-level failure
    #[error("request failed: {message}")]
    Request { message: String },

    /// The response body could not be read
    #[error("failed to read response body: {message}")]
    Body { message: String },
}

impl TransportError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::Connect {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn body(message: impl Into<String>) -> Self {
        Self::Body {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        // Keep the source chain, the root cause ("Connection refused") lives there.
        let message = error_chain(&error);
        if error.is_timeout() {
            Self::Timeout { message }
        } else if error.is_connect() {
            Self::Connect { message }
        } else if error.is_body() || error.is_decode() {
            Self::Body { message }
        } else {
            Self::Request { message }
        }
    }
}

fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
