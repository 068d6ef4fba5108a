use axum::{
    extract::State,
    middleware::Next,
    response::Response,
};

use signet_core::SubjectId;

use crate::app::{AppState, errors::auth_error_to_response};
use crate::context::SessionContext;
use crate::cookies;

/// Require a valid session cookie; inserts [`SessionContext`] on success.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = cookies::get_cookie(req.headers(), state.auth.cookie_name());

    let subject_id: SubjectId = state
        .auth
        .verify(token.as_deref())
        .map_err(auth_error_to_response)?;

    req.extensions_mut().insert(SessionContext::new(subject_id));

    Ok(next.run(req).await)
}
