//! notify-client
//!
//! Rust client for the GOV.UK Notify API: send email and SMS messages,
//! query their delivery status, and fetch or preview message templates.
//!
//! All traffic flows through one dispatch layer ([`speaker::Speaker`])
//! that signs a fresh bearer token per request and maps every response
//! deterministically into a typed payload or a classified
//! [`error::ClientError`]. The [`Client`] facade adds one method per API
//! operation on top.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod speaker;

pub use client::Client;
pub use error::{ClientError, ClientResult};
pub use speaker::{PRODUCTION_BASE_URL, Speaker};

pub fn pkg_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
