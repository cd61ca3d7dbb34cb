//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health           - Liveness
//! GET    /health/ready     - Readiness (pings the database)
//!
//! # Auth
//! POST   /registration     - Create a user, returns a token pair
//! POST   /login            - Verify credentials, returns profile + token pair
//! POST   /logout/access    - Revoke the presented access token
//! POST   /logout/refresh   - Revoke the presented refresh token
//! POST   /token/refresh    - Exchange a refresh token for an access token
//!
//! # Admin (access token with role=admin)
//! GET    /users            - List users
//! DELETE /users            - Delete all users
//!
//! # Data
//! GET    /customers        - Customers joined through address/city/country
//! PUT    /customers        - Update a customer by id
//! GET    /addresses        - address_id, district
//! GET    /cities           - city_id, city
//! GET    /countries        - country_id, country
//! GET    /secret           - Fixed payload (access token)
//! ```

pub mod auth;
pub mod customers;
pub mod form;
pub mod health;
pub mod locations;
pub mod secret;
pub mod users;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/registration", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout/access", post(auth::logout_access))
        .route("/logout/refresh", post(auth::logout_refresh))
        .route("/token/refresh", post(auth::refresh))
}

/// Create the data routes router.
pub fn data_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list).delete(users::delete_all))
        .route("/customers", get(customers::list).put(customers::update))
        .route("/addresses", get(locations::addresses))
        .route("/cities", get(locations::cities))
        .route("/countries", get(locations::countries))
        .route("/secret", get(secret::secret))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(data_routes())
}

/// Build the full application: routes, middleware, and state.
///
/// Sentry layers are added by the binary, outside this router.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        username = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
