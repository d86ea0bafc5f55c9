//! Executes `HttpRequest` values over the network.
//!
//! `ShimClient` never does I/O itself; `RequestShim` hands each built request
//! to a `Transport`. `UreqTransport` is the blocking implementation used
//! against a live server; tests substitute an in-memory one.

use tracing::debug;
use ureq::http::{HeaderName, HeaderValue};

use crate::error::ShimError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    /// Perform one round-trip. Non-2xx statuses are returned as data; only a
    /// failure to obtain a response is an error.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ShimError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ShimError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are the caller's business, not transport errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ShimError> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let url = request.url.as_str();
        let headers = &request.headers;
        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, None) => with_headers(self.agent.get(url), headers).call(),
            // The server reads the token from the JSON body even on GET.
            (HttpMethod::Get, Some(body)) => {
                with_headers(self.agent.get(url).force_send_body(), headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(url), headers).send(body.as_bytes())
            }
        };
        let mut response = result.map_err(|e| ShimError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| header_pair(name, value))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ShimError::Transport(e.to_string()))?;

        debug!(status, url = %request.url, "received response");
        Ok(HttpResponse { status, headers, body })
    }
}

/// Bytes outside visible ASCII are kept (lossily) so the raw response stays
/// inspectable.
fn header_pair(name: &HeaderName, value: &HeaderValue) -> (String, String) {
    let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
    (name.as_str().to_string(), value)
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
