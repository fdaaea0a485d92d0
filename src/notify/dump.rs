//! Wire-style text dumps used in verbose mode.

use reqwest::header::{CONTENT_LENGTH, HeaderMap};
use reqwest::{Method, Url};

use super::request::NotificationRequest;
use super::result::ResponseSummary;

/// Log target for request/response dumps
pub const DUMP_TARGET: &str = "notifier_rs::dump";

/// Renders a prepared request with only the headers it carries itself.
///
/// Transports that add headers of their own render through
/// [`wire_request`] instead.
pub fn request(request: &NotificationRequest) -> String {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_LENGTH, request.body().len().into());
    wire_request(request.method(), request.url(), &headers, request.body())
}

/// Renders a request line, `Host`, the given headers and the body.
pub fn wire_request(method: &Method, url: &Url, headers: &HeaderMap, body: &[u8]) -> String {
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut host = url.host_str().unwrap_or_default().to_string();
    if let Some(port) = url.port() {
        host.push_str(&format!(":{port}"));
    }

    let mut out = format!("{method} {target} HTTP/1.1\r\nHost: {host}\r\n");
    push_headers(&mut out, headers);
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}

/// Renders a received response head and body.
pub fn response(summary: &ResponseSummary, body: &[u8]) -> String {
    let mut out = format!("HTTP/1.1 {}\r\n", summary.status);
    push_headers(&mut out, &summary.headers);
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}

fn push_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(&String::from_utf8_lossy(value.as_bytes()));
        out.push_str("\r\n");
    }
}
