//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with `request_id` and `username` fields)
//! 3. Request ID (fills the span's `request_id`)
//! 4. Security headers
//!
//! Authentication is not a layer: protected handlers take one of the
//! extractors in [`auth`].

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::{RequireAccess, RequireAdmin, RequireRefresh};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
