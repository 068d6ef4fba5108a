use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use signet_auth::AuthError;

/// Every verification failure is an unauthorized-access signal.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    json_error(StatusCode::UNAUTHORIZED, err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_unauthorized() {
        for err in [
            AuthError::MissingCredential,
            AuthError::ExpiredCredential,
            AuthError::InvalidCredential,
        ] {
            assert_eq!(auth_error_to_response(err).status(), StatusCode::UNAUTHORIZED);
        }
    }
}
