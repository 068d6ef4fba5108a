//! HTTP API application wiring (Axum router + session services).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses
//! - `audit.rs`: out-of-band audit recording

use std::sync::Arc;

use axum::Router;

use signet_auth::{AuditSink, AuthConfig, ConfigError, SessionAuthenticator, TracingAuditSink};

use crate::middleware;

pub mod audit;
pub mod dto;
pub mod errors;
pub mod routes;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<SessionAuthenticator>,
    pub audit: Arc<dyn AuditSink>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AuthConfig) -> Result<Router, ConfigError> {
    build_app_with_audit(config, Arc::new(TracingAuditSink))
}

/// Same router with a caller-supplied audit sink.
pub fn build_app_with_audit(
    config: &AuthConfig,
    audit: Arc<dyn AuditSink>,
) -> Result<Router, ConfigError> {
    let state = AppState {
        auth: Arc::new(SessionAuthenticator::new(config)?),
        audit,
    };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::require_session,
    ));

    Ok(Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .with_state(state))
}
