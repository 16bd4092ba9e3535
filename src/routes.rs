//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: database, cache (public)
//! - `/api/*`        - JSON API (see [`crate::api::routes`])
//! - anything else   - Static assets of the storefront
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer session for admin endpoints
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `static_dir` - directory served for every non-API path
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    static_dir: impl AsRef<Path>,
) -> NormalizePath<Router> {
    let router = service_router(state, Some(behind_proxy))
        .fallback_service(ServeDir::new(static_dir))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Health and API routes without static files or request tracing.
///
/// Pass `None` as `rate_limit` to build the router without per-IP limiters.
pub fn service_router(state: AppState, rate_limit: Option<bool>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_router(&state, rate_limit))
        .with_state(state)
}
