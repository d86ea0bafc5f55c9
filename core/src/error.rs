//! Error types for the request shim.
//!
//! # Design
//! Only `login` and `logout` treat a non-2xx status as an error; `get`, `post`
//! and `init` hand the raw response back for manual inspection, so for them
//! only `Transport` is ever returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShimError {
    /// The request never produced a response: connection refused, I/O
    /// failure, or the body could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status where success was required.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded as the expected JSON.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Login succeeded but the response carried no `token` field.
    #[error("login response has no token field")]
    MissingToken,
}
