//! Session cookie lookup.
//!
//! The `auth_token` cookie is written by the client at login. The server
//! never issues or validates it; it only reads its value for the route gate
//! and to forward as a bearer token.

use axum::http::{HeaderMap, header::COOKIE};
use cookie::Cookie;

pub use dashcart_core::stores::SESSION_COOKIE_NAME;

/// Value of the `auth_token` cookie, if present and non-empty.
///
/// Malformed cookie pairs are skipped rather than rejecting the request.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
}
