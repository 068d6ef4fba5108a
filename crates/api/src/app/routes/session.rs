use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use signet_auth::{AuditEvent, CookieDirective, Logout};
use signet_core::SubjectId;

use crate::app::dto::{LoginRequest, MeResponse, MessageResponse};
use crate::app::errors::json_error;
use crate::app::{AppState, audit};
use crate::context::SessionContext;
use crate::cookies;

/// Start a session for `user_id` and set the signed cookie.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let directive = state.auth.session_cookie(&body.user_id);
    audit::dispatch(&state.audit, AuditEvent::login(body.user_id));
    with_cookie(MessageResponse::new("Logged in"), &directive)
}

/// End the session. Succeeds whether or not the presented cookie is valid.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = cookies::get_cookie(&headers, state.auth.cookie_name());
    let outcome: Logout<SubjectId> = state.auth.logout(token.as_deref());

    audit::dispatch(&state.audit, AuditEvent::logout(outcome.subject));
    with_cookie(MessageResponse::new("Logged out"), &outcome.directive)
}

pub async fn me(Extension(session): Extension<SessionContext>) -> impl IntoResponse {
    Json(MeResponse {
        user_id: session.subject_id(),
    })
}

fn with_cookie(body: MessageResponse, directive: &CookieDirective) -> Response {
    let mut response = Json(body).into_response();
    if let Err(e) = cookies::apply(&mut response, directive) {
        tracing::error!("failed to encode session cookie: {e}");
        return json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "cookie_error",
            "failed to encode session cookie",
        );
    }
    response
}
