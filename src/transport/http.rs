//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{CONTENT_LENGTH, HeaderValue, USER_AGENT};
use reqwest::tls;

use super::{ResponseBody, Transport, TransportError, TransportResponse};
use crate::config::settings::HttpClientConfig;
use crate::notify::{NotificationRequest, dump};

/// HTTP transport over a pooled `reqwest::Client`.
///
/// The client is built once and shared by every dispatch loop, so TCP and TLS
/// sessions are reused across attempts. TLS below 1.2 is always rejected.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    user_agent: HeaderValue,
}

impl HttpTransport {
    /// Builds the transport from the `[http]` configuration section.
    pub fn new(config: &HttpClientConfig) -> Result<Self, TransportError> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            TransportError::request(format!("invalid user agent '{}': {e}", config.user_agent))
        })?;

        let client = reqwest::Client::builder()
            // Timeouts
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            // Connection pooling
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout))
            // Security
            .use_rustls_tls()
            .min_tls_version(tls::Version::TLS_1_2)
            .user_agent(user_agent.clone())
            .build()?;

        Ok(Self { client, user_agent })
    }

    /// The exact request `round_trip` executes.
    ///
    /// Client-level defaults are only merged in at execution time, so the
    /// headers that matter for a dump are set on the request itself.
    fn build_request(&self, request: &NotificationRequest) -> Result<reqwest::Request, TransportError> {
        let body = request.body();
        self.client
            .request(request.method().clone(), request.url().clone())
            .header(USER_AGENT, self.user_agent.clone())
            .header(CONTENT_LENGTH, body.len())
            .body(body.clone())
            .build()
            .map_err(TransportError::from)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn round_trip(
        &self,
        request: &NotificationRequest,
    ) -> Result<TransportResponse, TransportError> {
        let response = self.client.execute(self.build_request(request)?).await?;

        let status = response.status();
        let headers = response.headers().clone();

        Ok(TransportResponse::new(
            status,
            headers,
            Box::new(ReqwestBody(response)),
        ))
    }

    fn name(&self) -> &'static str {
        "http"
    }

    fn render_request(&self, request: &NotificationRequest) -> String {
        match self.build_request(request) {
            Ok(built) => dump::wire_request(
                built.method(),
                built.url(),
                built.headers(),
                built.body().and_then(|body| body.as_bytes()).unwrap_or_default(),
            ),
            Err(e) => format!("<request could not be built: {e}>"),
        }
    }
}

/// Unread reqwest response; dropping it returns the connection to the pool.
struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn read_all(self: Box<Self>) -> Result<Bytes, TransportError> {
        self.0.bytes().await.map_err(TransportError::from)
    }
}
