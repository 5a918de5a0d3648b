//! DTOs for the resolve endpoint.

use serde::Serialize;

/// The full URL behind an active short id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub full_url: String,
}
