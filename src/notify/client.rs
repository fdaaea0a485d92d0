//! Notification client: prepare, fire-and-forget send, await.

use std::sync::Arc;

use bytes::Bytes;

use super::channel::{ResultChannel, ResultSender, result_channel};
use super::dump::{self, DUMP_TARGET};
use super::request::NotificationRequest;
use super::result::{NotificationError, NotificationResult, ResponseSummary};
use crate::error::AppResult;
use crate::transport::Transport;

/// Client behaviour switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientOptions {
    /// Dump outgoing requests and successful responses to the log
    pub verbose: bool,
}

/// Sends notifications through an injected [`Transport`].
///
/// Cloning is cheap; all clones share the same transport (and therefore the
/// same connection pool).
#[derive(Clone)]
pub struct NotificationClient {
    transport: Arc<dyn Transport>,
    options: ClientOptions,
}

impl NotificationClient {
    pub fn new(transport: Arc<dyn Transport>, options: ClientOptions) -> Self {
        Self { transport, options }
    }

    pub fn options(&self) -> ClientOptions {
        self.options
    }

    /// Builds a POST request for `url`, failing fast on a malformed target.
    pub fn prepare(&self, url: &str, body: impl Into<Bytes>) -> AppResult<NotificationRequest> {
        NotificationRequest::prepare(url, body)
    }

    /// Starts one attempt on its own task and returns immediately.
    ///
    /// The returned channel receives exactly one result. It may be dropped
    /// unread; the attempt still runs to completion.
    pub fn send(&self, request: Arc<NotificationRequest>) -> ResultChannel {
        let (sender, channel) = result_channel();
        let client = self.clone();
        tokio::spawn(async move {
            client.deliver(&request, sender).await;
        });
        channel
    }

    /// Waits for the result of an attempt started with [`send`](Self::send).
    pub async fn await_result(&self, channel: ResultChannel) -> NotificationResult {
        channel.recv().await
    }

    /// Runs one attempt and writes its result into `sender`.
    pub(crate) async fn deliver(&self, request: &NotificationRequest, sender: ResultSender) {
        if self.options.verbose {
            tracing::info!(
                target: DUMP_TARGET,
                "request:\n {}",
                self.transport.render_request(request)
            );
        }

        let response = match self.transport.round_trip(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(
                    url = %request.url(),
                    transport = self.transport.name(),
                    error = %e,
                    "Notification attempt failed before a response was received"
                );
                sender.deliver(NotificationResult::failure(e.into(), None));
                return;
            }
        };

        let summary = ResponseSummary::from(&response);
        let status = summary.status;

        if !status.is_success() {
            // The body is drained here; dropping the response on return
            // releases the connection whichever branch is taken.
            let error = match response.bytes().await {
                Ok(body) => NotificationError::Business {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                },
                Err(source) => NotificationError::BodyDecode { status, source },
            };
            tracing::debug!(url = %request.url(), status = %status, "Endpoint rejected notification");
            sender.deliver(NotificationResult::failure(error, Some(summary)));
            return;
        }

        tracing::debug!(url = %request.url(), status = %status, "Notification delivered");
        let listening = sender.deliver(NotificationResult::success(summary.clone()));

        if self.options.verbose {
            match response.bytes().await {
                Ok(body) => {
                    tracing::info!(target: DUMP_TARGET, "response:\n {}", dump::response(&summary, &body))
                }
                Err(e) => tracing::debug!(error = %e, "Could not read response body for dump"),
            }
        }

        if !listening {
            tracing::trace!(url = %request.url(), "Result dropped, no waiter attached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::HttpClientConfig;
    use crate::test_support::{FakeReply, FakeTransport, closed_port_url, spawn_endpoint};
    use crate::transport::{HttpTransport, TransportError};
    use reqwest::StatusCode;

    const PATH: &str = "http://localhost:8080/notify";
    const BODY: &str = "content to be sent";

    fn fake_client(reply: FakeReply) -> (NotificationClient, Arc<FakeTransport>) {
        let transport = FakeTransport::new(reply);
        let client = NotificationClient::new(transport.clone(), ClientOptions { verbose: true });
        (client, transport)
    }

    fn http_client() -> NotificationClient {
        let transport = HttpTransport::new(&HttpClientConfig::default()).unwrap();
        NotificationClient::new(Arc::new(transport), ClientOptions::default())
    }

    #[test]
    fn test_new() {
        let (client, _) = fake_client(FakeReply::Status(StatusCode::OK, ""));
        assert!(client.options().verbose);
    }

    #[test]
    fn test_prepare_error() {
        let (client, transport) = fake_client(FakeReply::Status(StatusCode::OK, ""));
        assert!(client.prepare("xyz", BODY).is_err());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_deliver_success() {
        let (client, _) = fake_client(FakeReply::Status(StatusCode::OK, ""));
        let request = client.prepare(PATH, BODY).unwrap();
        let (sender, channel) = result_channel();

        client.deliver(&request, sender).await;
        let result = client.await_result(channel).await;

        assert!(!result.is_error);
        assert!(result.error_details.is_none());
        assert_eq!(result.response.unwrap().status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_deliver_every_2xx_is_success() {
        for code in [200u16, 201, 202, 204, 299] {
            let status = StatusCode::from_u16(code).unwrap();
            let (client, _) = fake_client(FakeReply::Status(status, ""));
            let request = Arc::new(client.prepare(PATH, BODY).unwrap());

            let result = client.await_result(client.send(request)).await;
            assert!(!result.is_error, "status {code} should succeed");
            assert!(result.error_details.is_none());
        }
    }

    #[tokio::test]
    async fn test_deliver_business_error_carries_body() {
        for code in [199u16, 300, 404, 500, 503] {
            let status = StatusCode::from_u16(code).unwrap();
            let (client, _) = fake_client(FakeReply::Status(status, "oops"));
            let request = Arc::new(client.prepare(PATH, BODY).unwrap());

            let result = client.await_result(client.send(request)).await;
            assert!(result.is_error, "status {code} should fail");
            let details = result.error_details.unwrap();
            assert!(details.to_string().contains("oops"));
            assert_eq!(details.status(), Some(status));
        }
    }

    #[tokio::test]
    async fn test_deliver_unreadable_body() {
        let (client, _) = fake_client(FakeReply::UnreadableBody(StatusCode::BAD_GATEWAY));
        let request = Arc::new(client.prepare(PATH, BODY).unwrap());

        let result = client.await_result(client.send(request)).await;
        assert!(result.is_error);
        match result.error_details {
            Some(NotificationError::BodyDecode { status, .. }) => {
                assert_eq!(status, StatusCode::BAD_GATEWAY)
            }
            other => panic!("Expected BodyDecode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deliver_transport_error() {
        let (client, _) = fake_client(FakeReply::Refused);
        let request = Arc::new(client.prepare(PATH, BODY).unwrap());

        let result = client.await_result(client.send(request)).await;
        assert!(result.is_error);
        assert!(result.response.is_none());
        assert!(matches!(
            result.error_details,
            Some(NotificationError::Transport(TransportError::Connect { .. }))
        ));
    }

    #[tokio::test]
    async fn test_send_without_waiter_still_runs() {
        let (client, transport) = fake_client(FakeReply::Status(StatusCode::OK, ""));
        let request = Arc::new(client.prepare(PATH, BODY).unwrap());

        drop(client.send(request));
        for _ in 0..100 {
            if transport.calls() == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_http_endpoint_200() {
        let endpoint = spawn_endpoint(StatusCode::OK, "").await;
        let client = http_client();
        let request = Arc::new(client.prepare(endpoint.url.as_str(), BODY).unwrap());

        let result = client.await_result(client.send(request)).await;
        assert!(!result.is_error);
        assert!(result.error_details.is_none());
        assert_eq!(endpoint.received()[0].body, BODY);
    }

    #[tokio::test]
    async fn test_http_endpoint_500() {
        let endpoint = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "oops").await;
        let client = http_client();
        let request = Arc::new(client.prepare(endpoint.url.as_str(), BODY).unwrap());

        let result = client.await_result(client.send(request)).await;
        assert!(result.is_error);
        assert!(result.error_details.unwrap().to_string().contains("oops"));
    }

    #[tokio::test]
    async fn test_http_connection_refused() {
        let client = http_client();
        let url = closed_port_url().await;
        let request = Arc::new(client.prepare(url.as_str(), BODY).unwrap());

        let result = client.await_result(client.send(request)).await;
        assert!(result.is_error);
        assert!(result.error_details.unwrap().is_technical());
    }
}
