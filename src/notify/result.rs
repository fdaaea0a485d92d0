//! Outcome of a single send attempt.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::transport::{TransportError, TransportResponse};

/// Why an attempt failed.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Technical failure: the round trip itself did not complete
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Business failure: the endpoint answered with a non-2xx status
    #[error("error occurred: {body}")]
    Business { status: StatusCode, body: String },

    /// Business failure whose response body could not be read
    #[error("cannot decode response body: {source}")]
    BodyDecode {
        status: StatusCode,
        #[source]
        source: TransportError,
    },

    /// The sending task ended without reporting (it panicked or was torn down)
    #[error("notification task ended without reporting a result")]
    Abandoned,
}

impl NotificationError {
    /// True for network-level failures, false for HTTP-level ones
    pub fn is_technical(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Abandoned)
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Business { status, .. } | Self::BodyDecode { status, .. } => Some(*status),
            Self::Transport(_) | Self::Abandoned => None,
        }
    }
}

/// Response head kept for diagnostics
#[derive(Debug, Clone)]
pub struct ResponseSummary {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl From<&TransportResponse> for ResponseSummary {
    fn from(response: &TransportResponse) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
        }
    }
}

/// Result of one attempt, delivered exactly once through a `ResultChannel`.
#[derive(Debug)]
pub struct NotificationResult {
    pub is_error: bool,
    pub error_details: Option<NotificationError>,
    pub response: Option<ResponseSummary>,
}

impl NotificationResult {
    pub fn success(response: ResponseSummary) -> Self {
        Self {
            is_error: false,
            error_details: None,
            response: Some(response),
        }
    }

    pub fn failure(error: NotificationError, response: Option<ResponseSummary>) -> Self {
        Self {
            is_error: true,
            error_details: Some(error),
            response,
        }
    }
}
