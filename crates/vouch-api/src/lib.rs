//! # vouch-api — HTTP Service for Vouch
//!
//! The transport layer over the stateless credential core. Three public
//! endpoints, all pre-authentication by nature:
//!
//! | Route                      | Module             | Leg                     |
//! |----------------------------|--------------------|-------------------------|
//! | `POST /v1/request-access`  | [`routes::access`] | Claim issuance + email  |
//! | `GET /v1/claim-access/:t`  | [`routes::access`] | Claim redemption        |
//! | `POST /v1/verify-access`   | [`routes::access`] | Grant validation        |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → RateLimitMiddleware → Handler
//! ```
//!
//! Health probes (`/health/*`) mount outside the middleware so they stay
//! reachable regardless of limiter state.

pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use crate::state::AppState;

pub use error::AppError;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let limiter = RateLimiter::new(RateLimitConfig::default());

    let api = Router::new()
        .merge(routes::access::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::rate_limit::rate_limit_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(limiter))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
