//! Handler for short id resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::resolve::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the full URL behind a short id.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Response
///
/// ```json
/// { "fullUrl": "https://example.com" }
/// ```
///
/// # Errors
///
/// - 404 if the short id was never issued
/// - 410 if the mapping has expired
/// - 500 on storage failure
pub async fn resolve_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let full_url = state.mapping_service.resolve(&short_id).await?;

    Ok(Json(ResolveResponse { full_url }))
}
