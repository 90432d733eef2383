//! HTTP middleware stack for the server.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Route gate (cookie presence redirects for `/login` and `/dashboard`)

pub mod request_id;
pub mod route_gate;
pub mod session;

pub use request_id::request_id_middleware;
pub use route_gate::route_gate_middleware;
pub use session::session_token;
