//! Mapping entity representing a short-id to full-url record.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted short-id → full-url mapping.
///
/// Mappings are immutable once stored. Expired mappings remain in storage and
/// keep their `short_id` reserved.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Mapping {
    /// Storage bookkeeping only, never exposed over the API.
    pub id: i64,
    pub short_id: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(
        id: i64,
        short_id: String,
        full_url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_id,
            full_url,
            created_at,
            expires_at,
        }
    }

    /// Returns true while `now` is strictly before the expiry instant.
    ///
    /// A mapping evaluated exactly at `expires_at` is expired.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Time left before expiry, or `None` once expired.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.is_active_at(now).then(|| self.expires_at - now)
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_id: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl NewMapping {
    /// Attaches the storage id assigned on insert.
    pub fn into_mapping(self, id: i64) -> Mapping {
        Mapping::new(
            id,
            self.short_id,
            self.full_url,
            self.created_at,
            self.expires_at,
        )
    }
}
