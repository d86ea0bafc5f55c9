//! The authenticated request shim.
//!
//! # Design
//! `RequestShim` owns the session instead of reaching for process-wide state,
//! so several independent shims (one per simulated user) can coexist in one
//! test. Calls are synchronous and block until the transport returns.

use tracing::{info, warn};

use crate::client::ShimClient;
use crate::config::ShimConfig;
use crate::error::ShimError;
use crate::http::HttpResponse;
use crate::session::{Payload, Session, Token};
use crate::transport::{Transport, UreqTransport};

#[derive(Debug)]
pub struct RequestShim<T = UreqTransport> {
    client: ShimClient,
    session: Session,
    transport: T,
}

impl RequestShim<UreqTransport> {
    /// The fixed `test`/`test` identity against `http://127.0.0.1:1145`.
    pub fn with_defaults() -> Self {
        Self::new(&ShimConfig::default(), UreqTransport::new())
    }
}

impl<T: Transport> RequestShim<T> {
    pub fn new(config: &ShimConfig, transport: T) -> Self {
        Self {
            client: ShimClient::new(config),
            session: Session::new(),
            transport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Register the test identity. The response is returned whatever its
    /// status, since the user usually exists already.
    pub fn init(&self) -> Result<HttpResponse, ShimError> {
        let response = self.transport.execute(&self.client.build_create_user()?)?;
        info!(status = response.status, "create user");
        Ok(response)
    }

    /// Log in as the test identity and store the returned token.
    ///
    /// On any failure the session keeps whatever token it had.
    pub fn login(&mut self) -> Result<Token, ShimError> {
        let response = self.transport.execute(&self.client.build_login()?)?;
        match self.client.parse_login(response) {
            Ok(token) => {
                info!(%token, "logged in");
                self.session.set_token(token.clone());
                Ok(token)
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                Err(e)
            }
        }
    }

    /// Invalidate the current token on the server and forget it locally.
    pub fn logout(&mut self) -> Result<(), ShimError> {
        let response = self.transport.execute(&self.client.build_logout(&self.session)?)?;
        self.client.parse_logout(response)?;
        info!(token = %self.session.token(), "logged out");
        self.session.clear();
        Ok(())
    }

    pub fn keep_alive(&self) -> Result<HttpResponse, ShimError> {
        self.transport.execute(&self.client.build_keep_alive(&self.session)?)
    }

    pub fn current_credentials(&self) -> Payload {
        self.session.credentials()
    }

    pub fn format_route(&self, route: &str) -> String {
        self.client.format_route(route)
    }

    pub fn get(&self, route: &str, extra: Payload) -> Result<HttpResponse, ShimError> {
        self.transport.execute(&self.client.build_get(&self.session, route, extra)?)
    }

    pub fn post(&self, route: &str, extra: Payload) -> Result<HttpResponse, ShimError> {
        self.transport.execute(&self.client.build_post(&self.session, route, extra)?)
    }
}
