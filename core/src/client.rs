//! Stateless HTTP request builder and response parser for the user API.
//!
//! # Design
//! `ShimClient` holds the root address and the test identity and carries no
//! mutable state between calls. Authentication comes in as a `&Session`
//! argument. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and, where the shim needs something out of the reply, a
//! `parse_*` method that consumes the `HttpResponse`.

use serde::Serialize;

use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::{merge, Payload, Session, Token};
use crate::types::{Credentials, LoginResponse};

#[derive(Debug, Clone)]
pub struct ShimClient {
    root: String,
    credentials: Credentials,
}

impl ShimClient {
    pub fn new(config: &ShimConfig) -> Self {
        Self {
            root: config.root.trim_end_matches('/').to_string(),
            credentials: config.credentials(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn format_route(&self, route: &str) -> String {
        crate::route::format_route(&self.root, route)
    }

    pub fn build_create_user(&self) -> Result<HttpRequest, ShimError> {
        self.json_request(HttpMethod::Post, "/user/create", &self.credentials)
    }

    pub fn build_login(&self) -> Result<HttpRequest, ShimError> {
        self.json_request(HttpMethod::Post, "/user/login", &self.credentials)
    }

    pub fn build_logout(&self, session: &Session) -> Result<HttpRequest, ShimError> {
        self.json_request(HttpMethod::Post, "/user/logout", &session.credentials())
    }

    /// Refresh the server-side idle timer for the current token.
    pub fn build_keep_alive(&self, session: &Session) -> Result<HttpRequest, ShimError> {
        self.json_request(HttpMethod::Post, "/user/update", &session.credentials())
    }

    pub fn build_get(
        &self,
        session: &Session,
        route: &str,
        extra: Payload,
    ) -> Result<HttpRequest, ShimError> {
        let body = merge(session.credentials(), extra);
        self.json_request(HttpMethod::Get, route, &body)
    }

    pub fn build_post(
        &self,
        session: &Session,
        route: &str,
        extra: Payload,
    ) -> Result<HttpRequest, ShimError> {
        let body = merge(session.credentials(), extra);
        self.json_request(HttpMethod::Post, route, &body)
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<Token, ShimError> {
        check_success(&response)?;
        let parsed: LoginResponse = response.json()?;
        parsed.token.ok_or(ShimError::MissingToken)
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ShimError> {
        check_success(&response)
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        route: &str,
        body: &B,
    ) -> Result<HttpRequest, ShimError> {
        let body =
            serde_json::to_string(body).map_err(|e| ShimError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: self.format_route(route),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map a non-2xx status to `ShimError::Status`.
fn check_success(response: &HttpResponse) -> Result<(), ShimError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ShimError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
