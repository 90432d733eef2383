//! Cookie-presence route gate.
//!
//! Signed-in visitors skip the login page and anonymous visitors cannot reach
//! the dashboard. The token is never validated here; only its presence
//! matters.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::session_token;

/// Public login page.
pub const LOGIN_PATH: &str = "/login";

/// Root of the protected dashboard.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Whether `path` is the dashboard or lies beneath it.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    path.strip_prefix(DASHBOARD_PATH)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Redirect (307) between `/login` and `/dashboard` based on the session
/// cookie; every other request passes through.
pub async fn route_gate_middleware(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let signed_in = session_token(request.headers()).is_some();

    if signed_in && path == LOGIN_PATH {
        tracing::debug!("Session present, redirecting to dashboard");
        return Redirect::temporary(DASHBOARD_PATH).into_response();
    }
    if !signed_in && is_protected(path) {
        tracing::debug!(path, "No session, redirecting to login");
        return Redirect::temporary(LOGIN_PATH).into_response();
    }

    next.run(request).await
}
