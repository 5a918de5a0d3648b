//! DTOs for the shorten endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use validator::Validate;

/// Request to shorten a URL.
///
/// ```json
/// { "url": "https://example.com/a/long/path", "expiryMinutes": 60 }
/// ```
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL to shorten. Required; checked for syntactic well-formedness only.
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    /// Minutes until the mapping expires. Absent or zero selects the default.
    /// Accepts a number or a numeric string.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expiry_minutes: Option<i64>,
}

/// Response for a created mapping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub shortened_url: String,
    pub expires_at: DateTime<Utc>,
}
