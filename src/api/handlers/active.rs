//! Handler for listing active mappings.

use axum::{Json, extract::State};

use crate::api::dto::active::ActiveMappingResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every mapping that has not yet expired, oldest first.
///
/// # Endpoint
///
/// `GET /active`
///
/// # Response
///
/// ```json
/// [
///   {
///     "shortId": "Ab3dE5gH",
///     "fullUrl": "https://example.com",
///     "createdAt": "2025-01-01T00:00:00Z",
///     "expiresAt": "2025-01-02T00:00:00Z"
///   }
/// ]
/// ```
pub async fn active_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActiveMappingResponse>>, AppError> {
    let mappings = state.mapping_service.list_active().await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}
