//! `signet-auth` — stateless signed-cookie sessions.
//!
//! This crate is intentionally decoupled from HTTP: it produces tokens and
//! [`CookieDirective`]s, and the transport layer decides how to carry them.

pub mod audit;
pub mod authenticator;
pub mod config;
pub mod cookie;
pub mod error;
pub mod signer;

pub use audit::{AuditError, AuditEvent, AuditSink, InMemoryAuditSink, TracingAuditSink};
pub use authenticator::{Logout, SessionAuthenticator};
pub use config::{AuthConfig, ConfigError, SecretKey};
pub use cookie::{CookieDirective, InvalidSameSite, SameSite};
pub use error::AuthError;
pub use signer::{SignatureError, TimestampSigner};
