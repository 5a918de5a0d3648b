//! Top-level router configuration.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Browser access from other origins
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with state and layers applied.
pub fn api_router(state: AppState, cors_allow_origin: &str) -> Router {
    api::routes::routes()
        .with_state(state)
        .layer(cors::layer(cors_allow_origin))
        .layer(tracing::layer())
}

/// Constructs the application service with trailing-slash normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_allow_origin` - `*` or a single allowed origin
pub fn app_router(state: AppState, cors_allow_origin: &str) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state, cors_allow_origin))
}
