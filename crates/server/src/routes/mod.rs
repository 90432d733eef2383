//! HTTP routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness check
//! GET  /api/orpc/{router}.{procedure}       - Call a procedure with `{}`
//! POST /api/orpc/{router}.{procedure}       - Call a procedure with the JSON body
//! GET  /login                               - Login page (gated)
//! GET  /dashboard/*                         - Dashboard assets (gated)
//! ```
//!
//! The procedure route captures the whole remaining path, so nested paths
//! such as `/api/orpc/products/getProduct` still get a JSON 404.

pub mod orpc;

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};

use crate::middleware::route_gate::{DASHBOARD_PATH, LOGIN_PATH};
use crate::state::AppState;

/// Create all routes, serving pages from `static_dir`.
pub fn routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/orpc/{*procedure}",
            get(orpc::call_procedure).post(orpc::call_procedure),
        )
        .route_service(LOGIN_PATH, ServeFile::new(static_dir.join("login.html")))
        .nest_service(DASHBOARD_PATH, ServeDir::new(static_dir.join("dashboard")))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
