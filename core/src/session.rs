//! Authentication state and request payloads.
//!
//! A `Session` holds exactly one token. It starts out unauthenticated (the
//! sentinel `-1`) and is only changed by a successful login or logout. Every
//! outgoing payload starts from `Session::credentials()` and is merged with
//! the caller's fields, the caller winning on collision.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object used as a request body.
pub type Payload = Map<String, Value>;

const UNAUTHENTICATED: i64 = -1;

/// An opaque credential issued by the server.
///
/// The server decides the representation (a number, a string); the shim only
/// stores and echoes it back. Numbers wider than 64 bits keep every digit
/// because `serde_json` is built with `arbitrary_precision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Value);

impl Token {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn unauthenticated() -> Self {
        Self(Value::from(UNAUTHENTICATED))
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.0.as_i64() == Some(UNAUTHENTICATED)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Token,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_unauthenticated()
    }

    pub fn set_token(&mut self, token: Token) {
        self.token = token;
    }

    pub fn clear(&mut self) {
        self.token = Token::unauthenticated();
    }

    /// The payload fragment `{"token": <token>}` injected into every request.
    pub fn credentials(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert("token".to_string(), self.token.as_value().clone());
        payload
    }
}

/// Right-biased merge: keys of `overlay` overwrite keys of `base`.
pub fn merge(mut base: Payload, overlay: Payload) -> Payload {
    base.extend(overlay);
    base
}
