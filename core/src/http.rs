//! HTTP transport types shared by the request builder and the transport.
//!
//! # Design
//! Requests and responses are plain data. `ShimClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` performs the round-trip in between. Keeping the two apart lets
//! tests inspect exactly what would go over the wire.

use serde::de::DeserializeOwned;

use crate::error::ShimError;

/// HTTP method for a request. The server under test only speaks GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute: the root address followed by the formatted route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Decode the request body as JSON. Mostly useful in tests.
    pub fn json_body(&self) -> Result<serde_json::Value, ShimError> {
        let body = self.body.as_deref().unwrap_or("null");
        serde_json::from_str(body).map_err(|e| ShimError::Deserialization(e.to_string()))
    }
}

/// An HTTP response described as plain data, handed back to the caller for
/// inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ShimError> {
        serde_json::from_str(&self.body).map_err(|e| ShimError::Deserialization(e.to_string()))
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
