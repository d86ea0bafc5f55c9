//! Authenticated request shim for poking at the user API by hand.
//!
//! # Overview
//! `RequestShim` keeps one session token, logs in as a fixed test identity,
//! and sends GET/POST requests whose JSON body is the token merged with the
//! caller's fields. Responses come back raw for inspection.
//!
//! # Design
//! - `ShimClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Transport` performs the round-trip; `UreqTransport` is the blocking
//!   implementation.
//! - `Session` is owned by the shim, not global.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod route;
pub mod session;
pub mod shim;
pub mod transport;
pub mod types;
pub mod util;

pub use client::ShimClient;
pub use config::ShimConfig;
pub use error::ShimError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use route::format_route;
pub use session::{merge, Payload, Session, Token};
pub use shim::RequestShim;
pub use transport::{Transport, UreqTransport};
pub use types::{Credentials, LoginResponse};
pub use util::timestamp;
