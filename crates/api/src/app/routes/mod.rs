use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;

pub mod session;
pub mod system;

/// Endpoints reachable without a session.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(system::health))
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
}

/// Endpoints that require a verified session.
pub fn protected_router() -> Router<AppState> {
    Router::new().route("/me", get(session::me))
}
