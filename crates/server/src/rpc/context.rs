//! Per-request procedure context.

use axum::{extract::FromRequestParts, http::request::Parts};
use dashcart_core::UserId;
use secrecy::SecretString;

use crate::middleware::session::session_token;

/// Context handed to every procedure.
///
/// Built from the session cookie of the incoming request. The token is not
/// decoded, so `user_id` is always empty.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub token: Option<SecretString>,
    pub user_id: Option<UserId>,
}

impl RequestContext {
    /// Whether the request carried a session token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            token: session_token(&parts.headers).map(SecretString::from),
            user_id: None,
        })
    }
}
