//! Prepared outbound notification request.

use bytes::Bytes;
use reqwest::{Method, Url};

use crate::error::{AppError, AppResult};

/// Immutable description of one outbound call.
///
/// Built once per notification command and shared (behind an `Arc`) by every
/// attempt of its dispatch loop. The body is a `Bytes` handle, so each send
/// gets a fresh reader without copying the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    method: Method,
    url: Url,
    body: Bytes,
}

impl NotificationRequest {
    /// Validates `url` and builds a POST request carrying `body`.
    ///
    /// Fails fast with [`AppError::InvalidTarget`] without touching the
    /// network when the URL is not an absolute `http`/`https` URL with a host.
    pub fn prepare(url: &str, body: impl Into<Bytes>) -> AppResult<Self> {
        let parsed = Url::parse(url).map_err(|e| AppError::invalid_target(url, e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::invalid_target(
                url,
                format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
            ));
        }

        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(AppError::invalid_target(url, "missing host"));
        }

        Ok(Self {
            method: Method::POST,
            url: parsed,
            body: body.into(),
        })
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare() {
        let request =
            NotificationRequest::prepare("http://localhost:8080/notify", "content to be sent")
                .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.url().as_str(), "http://localhost:8080/notify");
        assert_eq!(request.body(), &Bytes::from("content to be sent"));
    }

    #[test]
    fn test_prepare_keeps_query() {
        let request = NotificationRequest::prepare("https://hooks.example.com/a?b=c", "").unwrap();
        assert_eq!(request.url().query(), Some("b=c"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_prepare_error() {
        let err = NotificationRequest::prepare("xyz", "content to be sent").unwrap_err();
        assert!(matches!(err, AppError::InvalidTarget { ref url, .. } if url == "xyz"));
    }

    #[test]
    fn test_prepare_rejects_unsupported_scheme() {
        let err = NotificationRequest::prepare("ftp://example.com/file", "x").unwrap_err();
        match err {
            AppError::InvalidTarget { reason, .. } => assert!(reason.contains("ftp")),
            other => panic!("Expected InvalidTarget, got {other:?}"),
        }
    }

    #[test]
    fn test_prepare_rejects_empty_host() {
        assert!(NotificationRequest::prepare("http://", "x").is_err());
        assert!(NotificationRequest::prepare("", "x").is_err());
        assert!(NotificationRequest::prepare("/notify", "x").is_err());
    }
}
