//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{id}`     - Short link redirect
//! - `GET /health`   - Health check
//! - `/v0/*`         - Link API (see [`crate::api::routes`])
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
///
/// Routes are registered without trailing slashes; see [`app_router`] for the
/// normalized service used when serving.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/v0", api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Builds the served application: [`router`] wrapped so that `/v0/search/`
/// and `/v0/search` reach the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
