//! Wire DTOs for the user endpoints.
//!
//! These mirror the mock-server's schema but are defined independently;
//! integration tests catch drift between the two crates.

use serde::{Deserialize, Serialize};

use crate::session::Token;

/// Body of `/user/create` and `/user/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub name: String,
    pub pass: String,
}

/// Body of a successful `/user/login` response. `token` is optional here so
/// a missing field surfaces as `ShimError::MissingToken` rather than a
/// decode error.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<Token>,
}
