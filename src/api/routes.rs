//! API route configuration.

use crate::api::handlers::{active_handler, health_handler, resolve_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Mapping store routes.
///
/// # Endpoints
///
/// - `POST /shorten`     - Create a mapping
/// - `GET  /active`      - List active mappings
/// - `GET  /health`      - Health check
/// - `GET  /{short_id}`  - Resolve a short id
///
/// Static segments take precedence over `/{short_id}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/active", get(active_handler))
        .route("/health", get(health_handler))
        .route("/{short_id}", get(resolve_handler))
}
