//! Shared helpers for unit tests: scripted transports and a local endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::post;
use reqwest::Url;

use crate::notify::NotificationRequest;
use crate::transport::{BufferedBody, Transport, TransportError, TransportResponse};

/// What a [`FakeTransport`] answers with
#[derive(Debug, Clone, Copy)]
pub enum FakeReply {
    Status(StatusCode, &'static str),
    UnreadableBody(StatusCode),
    Refused,
}

/// In-memory transport that counts round trips
pub struct FakeTransport {
    reply: FakeReply,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeTransport {
    pub fn new(reply: FakeReply) -> Arc<Self> {
        Self::with_delay(reply, Duration::ZERO)
    }

    pub fn with_delay(reply: FakeReply, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn round_trip(
        &self,
        _request: &NotificationRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.reply {
            FakeReply::Status(status, body) => Ok(TransportResponse::new(
                status,
                reqwest::header::HeaderMap::new(),
                Box::new(BufferedBody::new(body)),
            )),
            FakeReply::UnreadableBody(status) => Ok(TransportResponse::new(
                status,
                reqwest::header::HeaderMap::new(),
                Box::new(BufferedBody::failing(TransportError::body("unexpected EOF"))),
            )),
            FakeReply::Refused => Err(TransportError::connect("Connection refused")),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Request captured by a [`TestEndpoint`]
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub user_agent: Option<String>,
    pub body: String,
}

/// Local axum server answering `POST /notify` with a fixed status and body
pub struct TestEndpoint {
    pub url: Url,
    received: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl TestEndpoint {
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.received.lock().unwrap().clone()
    }
}

pub async fn spawn_endpoint(status: StatusCode, response_body: &'static str) -> TestEndpoint {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let app = Router::new().route(
        "/notify",
        post(move |method: Method, headers: HeaderMap, body: Bytes| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(ReceivedRequest {
                    method: method.to_string(),
                    user_agent: headers
                        .get(axum::http::header::USER_AGENT)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
                (status, response_body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestEndpoint {
        url: Url::parse(&format!("http://{addr}/notify")).unwrap(),
        received,
    }
}

/// URL of a local port that nothing listens on
pub async fn closed_port_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/notify")).unwrap()
}
