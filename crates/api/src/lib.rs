//! HTTP adapter for signet sessions: cookie transport, session middleware and
//! the login/logout/me endpoints.

pub mod app;
pub mod context;
pub mod cookies;
pub mod middleware;
