//! Cookie header plumbing between HTTP requests/responses and the authenticator.

use axum::http::header::{COOKIE, InvalidHeaderValue, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;
use cookie::Cookie;

use signet_auth::CookieDirective;

/// Find the value of cookie `name` in the request's `Cookie` header(s).
///
/// Surrounding double quotes (allowed by RFC 6265) are removed. An empty
/// value (`name=`) is returned as `Some("")`; unparseable pairs are skipped.
pub fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|cookies| Cookie::split_parse(cookies))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value_trimmed().to_string())
}

/// Append `directive` to the response as a `Set-Cookie` header.
pub fn apply(response: &mut Response, directive: &CookieDirective) -> Result<(), InvalidHeaderValue> {
    let value = HeaderValue::from_str(&directive.to_header_value())?;
    response.headers_mut().append(SET_COOKIE, value);
    tracing::debug!(cookie = directive.name(), clear = directive.is_clear(), "session cookie directive applied");
    Ok(())
}
