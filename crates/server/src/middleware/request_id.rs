//! Request ID middleware for request tracing and correlation.
//!
//! Every response from the façade carries an `x-request-id`. The value is
//! taken from the incoming request when an upstream proxy already assigned
//! one, and is a fresh UUID v4 otherwise. The same value is:
//! - Recorded on the `http_request` span opened by the trace layer
//! - Tagged on the Sentry scope, so a failed procedure's event can be found
//!   from the ID a client reports
//! - Echoed in the response headers
//!
//! Upstream IDs are trusted only when they are short visible ASCII; anything
//! else is replaced rather than copied into logs and headers.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream request ID that is reused as is.
pub const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every response carries a request ID.
///
/// The ID is:
/// 1. Chosen by [`resolve_request_id`]
/// 2. Recorded in the current tracing span and the Sentry scope
/// 3. Set on the response, replacing any value a handler wrote
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// The upstream request ID if it is usable, otherwise a new UUID v4.
///
/// Usable means non-empty, at most [`MAX_REQUEST_ID_LEN`] bytes and made of
/// visible ASCII only.
#[must_use]
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| is_usable(id))
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

fn is_usable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}
