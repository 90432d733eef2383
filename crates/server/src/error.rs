//! Procedure error handling with Sentry integration.
//!
//! Every procedure returns `Result<Value, RpcError>`. The error renders as a
//! JSON body `{"error": "<message>"}` with a status matching its kind.
//! Remote failures are captured to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dashcart_core::validation::ValidationErrors;
use thiserror::Error;

use crate::dummyjson::DummyJsonError;

/// Façade-level error type.
#[derive(Debug, Error)]
pub enum RpcError {
    /// First path segment names no router.
    #[error("Router not found")]
    RouterNotFound,

    /// Router exists but has no such procedure.
    #[error("Procedure not found")]
    ProcedureNotFound,

    /// Input failed its shape or field rules.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Catalog call failed. `message` is what the caller sees.
    #[error("{message}")]
    Remote {
        message: &'static str,
        #[source]
        source: DummyJsonError,
    },
}

impl RpcError {
    /// Wrap a catalog failure under the procedure's public message.
    #[must_use]
    pub const fn remote(message: &'static str, source: DummyJsonError) -> Self {
        Self::Remote { message, source }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::RouterNotFound | Self::ProcedureNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        if let Self::Remote { message, source } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %message,
                cause = %source,
                sentry_event_id = %event_id,
                "Procedure failed"
            );
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `RpcError`.
pub type Result<T> = std::result::Result<T, RpcError>;
