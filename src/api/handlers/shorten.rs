//! Handler for the shorten endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, Uri},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::{compose_short_url, extract_origin};

/// Creates a mapping and returns its shareable URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "expiryMinutes": 60 }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "shortenedUrl": "http://localhost:3000/Ab3dE5gH",
///   "expiresAt": "2025-01-01T01:00:00.000Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is not a JSON object of the expected shape
/// - 400 if `url` is missing, empty, or malformed, or `expiryMinutes` is out of range
/// - 400 if no public base URL is configured and neither the `Host` header
///   nor the request URI names a host
/// - 500 on storage failure
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    let Some(url) = payload.url.clone().filter(|u| !u.trim().is_empty()) else {
        return Err(AppError::bad_request("URL is required", json!({})));
    };
    payload.validate()?;

    let base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => extract_origin(&headers, &uri, state.behind_proxy)?,
    };

    let mapping = state
        .mapping_service
        .create(url, payload.expiry_minutes)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            shortened_url: compose_short_url(&base, &mapping.short_id),
            expires_at: mapping.expires_at,
        }),
    ))
}
