//! Transport abstraction for outbound notification calls.
//!
//! A transport performs exactly one HTTP round trip for a prepared
//! [`NotificationRequest`]. The production implementation is
//! [`HttpTransport`] (reqwest + rustls); tests substitute in-memory fakes.

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

use crate::notify::{NotificationRequest, dump};

/// Performs one HTTP round trip.
///
/// Implementations must be safe for concurrent use: overlapping attempts of
/// the same dispatch loop share one transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response head with an unread body.
    ///
    /// Network-level failures (connection refused, timeout, DNS, TLS) are
    /// returned as `Err`; any HTTP status, including 5xx, is `Ok`.
    async fn round_trip(
        &self,
        request: &NotificationRequest,
    ) -> Result<TransportResponse, TransportError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Wire-style rendering of what [`round_trip`](Self::round_trip) sends,
    /// for verbose dumps.
    fn render_request(&self, request: &NotificationRequest) -> String {
        dump::request(request)
    }
}

/// Response body that can be drained at most once.
///
/// Dropping the body without reading it releases the underlying connection.
#[async_trait]
pub trait ResponseBody: Send {
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError>;
}

/// Response of a single round trip
pub struct TransportResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Box<dyn ResponseBody>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Box<dyn ResponseBody>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Drains the full body, consuming the response.
    pub async fn bytes(self) -> Result<Bytes, TransportError> {
        self.body.read_all().await
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Body that is already held in memory
pub struct BufferedBody(Result<Bytes, TransportError>);

impl BufferedBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(Ok(bytes.into()))
    }

    /// A body whose read always fails
    pub fn failing(error: TransportError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl ResponseBody for BufferedBody {
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffered_body_returns_bytes() {
        let response = TransportResponse::new(
            StatusCode::OK,
            HeaderMap::new(),
            Box::new(BufferedBody::new("hello")),
        );
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.bytes().await.unwrap(), Bytes::from("hello"));
    }

    #[tokio::test]
    async fn test_failing_body_returns_error() {
        let response = TransportResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            HeaderMap::new(),
            Box::new(BufferedBody::failing(TransportError::body("stream reset"))),
        );
        let err = response.bytes().await.unwrap_err();
        assert!(matches!(err, TransportError::Body { .. }));
    }
}
