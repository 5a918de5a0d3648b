//! DTOs for the active-mapping listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Mapping;

/// One active mapping. The internal storage id is not exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveMappingResponse {
    pub short_id: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<Mapping> for ActiveMappingResponse {
    fn from(mapping: Mapping) -> Self {
        Self {
            short_id: mapping.short_id,
            full_url: mapping.full_url,
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
        }
    }
}
