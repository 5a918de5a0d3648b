//! Mapping creation, resolution, and enumeration.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::clock::Clock;
use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, CachedUrl};
use crate::utils::code_generator::{generate_short_id, is_well_formed_short_id};

/// Expiry window applied when the caller supplies none (24 hours).
pub const DEFAULT_EXPIRY_MINUTES: i64 = 24 * 60;

/// Upper bound on a requested expiry window (10 years).
pub const MAX_EXPIRY_MINUTES: i64 = 10 * 365 * 24 * 60;

/// Insert attempts before a short-id collision is reported as a storage error.
const MAX_ATTEMPTS: usize = 10;

/// Tunables for [`MappingService`].
#[derive(Debug, Clone)]
pub struct MappingSettings {
    /// Expiry window used when a create request omits one or passes zero.
    pub default_expiry_minutes: i64,
    /// Upper bound on how long a resolved URL may stay cached.
    pub cache_ttl: StdDuration,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            default_expiry_minutes: DEFAULT_EXPIRY_MINUTES,
            cache_ttl: StdDuration::from_secs(3600),
        }
    }
}

/// Row counts at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingStats {
    pub total: i64,
    pub active: i64,
    pub expired: i64,
}

/// The mapping store: creates, resolves, and lists short-id → full-url
/// mappings with time-based expiry.
///
/// Every operation captures a single `now` snapshot from the injected
/// [`Clock`] and uses it for all comparisons in that operation. Snapshots are
/// truncated to millisecond precision.
pub struct MappingService<R: MappingRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
    settings: MappingSettings,
}

impl<R: MappingRepository> MappingService<R> {
    /// Creates a new mapping service.
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        clock: Arc<dyn Clock>,
        settings: MappingSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            clock,
            settings,
        }
    }

    /// Creates a mapping for `full_url` that expires `expiry_minutes` from now.
    ///
    /// `None` or `Some(0)` selects the configured default window. The URL is
    /// stored verbatim.
    ///
    /// # Short-id collisions
    ///
    /// A random 8-character id is drawn and inserted directly; the store's
    /// unique constraint decides. On collision a fresh id is drawn, up to
    /// 10 attempts in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `full_url` is empty or whitespace only
    /// - `expiry_minutes` is negative or exceeds ten years
    ///
    /// Returns [`AppError::Storage`] on persistence failure or when every
    /// attempt collided.
    pub async fn create(
        &self,
        full_url: String,
        expiry_minutes: Option<i64>,
    ) -> Result<Mapping, AppError> {
        if full_url.trim().is_empty() {
            return Err(AppError::bad_request("URL is required", json!({})));
        }

        let minutes = self.effective_expiry_minutes(expiry_minutes)?;
        let created_at = self.now();
        let expires_at = created_at
            .checked_add_signed(Duration::minutes(minutes))
            .ok_or_else(|| {
                AppError::bad_request(
                    "Expiry is out of range",
                    json!({ "expiry_minutes": minutes }),
                )
            })?;

        for attempt in 1..=MAX_ATTEMPTS {
            let new_mapping = NewMapping {
                short_id: generate_short_id(),
                full_url: full_url.clone(),
                created_at,
                expires_at,
            };

            match self.repository.insert(new_mapping).await? {
                InsertOutcome::Inserted(mapping) => {
                    info!(
                        short_id = %mapping.short_id,
                        expires_at = %mapping.expires_at,
                        "Created mapping"
                    );
                    return Ok(mapping);
                }
                InsertOutcome::ShortIdTaken => {
                    warn!(attempt, "Short id collision, retrying");
                }
            }
        }

        Err(AppError::storage(
            "Failed to generate unique short id",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Resolves a short id to its full URL.
    ///
    /// Matching is exact. Resolving never mutates the store; expired
    /// mappings are reported, not removed. Ids that could never have been
    /// issued are `NotFound` without a lookup.
    ///
    /// # Cache Strategy
    ///
    /// - **Hit**: the entry's `expires_at` is compared with the same `now`
    ///   snapshot, so a backend TTL that runs late cannot revive a mapping
    /// - **Miss**: read from the store; active mappings are cached for
    ///   `min(cache_ttl, expires_at - now)`
    /// - **Cache error**: logged, falls back to the store
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no mapping was ever issued for `short_id`
    /// - [`AppError::Expired`] if the mapping's expiry is at or before now
    /// - [`AppError::Storage`] on database errors
    pub async fn resolve(&self, short_id: &str) -> Result<String, AppError> {
        let not_found = || {
            AppError::not_found("Shortened URL not found", json!({ "short_id": short_id }))
        };
        if !is_well_formed_short_id(short_id) {
            return Err(not_found());
        }

        let expired = |expires_at: DateTime<Utc>| {
            AppError::expired(
                "Shortened URL has expired",
                json!({ "short_id": short_id, "expired_at": expires_at }),
            )
        };

        let now = self.now();

        match self.cache.get_url(short_id).await {
            Ok(Some(entry)) if entry.is_active_at(now) => {
                debug!(short_id, "Cache HIT");
                return Ok(entry.full_url);
            }
            // Mappings never change, so a stale entry still proves the id expired.
            Ok(Some(entry)) => {
                debug!(short_id, expires_at = %entry.expires_at, "Cache HIT past expiry");
                return Err(expired(entry.expires_at));
            }
            Ok(None) => debug!(short_id, "Cache MISS"),
            Err(e) => warn!("Cache error for {}: {}", short_id, e),
        }

        let mapping = self
            .repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(not_found)?;

        let Some(remaining) = mapping.remaining_at(now) else {
            return Err(expired(mapping.expires_at));
        };

        let ttl = remaining
            .to_std()
            .unwrap_or_default()
            .min(self.settings.cache_ttl);
        let entry = CachedUrl::new(mapping.full_url, mapping.expires_at);
        if let Err(e) = self.cache.set_url(short_id, &entry, ttl).await {
            warn!("Failed to cache {}: {}", short_id, e);
        }

        Ok(entry.full_url)
    }

    /// Lists every mapping that is active now, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    pub async fn list_active(&self) -> Result<Vec<Mapping>, AppError> {
        let now = self.now();
        self.repository.list_active(now).await
    }

    /// Counts total, active, and expired mappings at one instant.
    pub async fn stats(&self) -> Result<MappingStats, AppError> {
        let now = self.now();
        let total = self.repository.count_all().await?;
        let active = self.repository.count_active(now).await?;

        Ok(MappingStats {
            total,
            active,
            expired: total - active,
        })
    }

    /// Verifies the backing store is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Cache backend used by this service.
    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(3)
    }

    fn effective_expiry_minutes(&self, requested: Option<i64>) -> Result<i64, AppError> {
        match requested {
            None | Some(0) => Ok(self.settings.default_expiry_minutes),
            Some(m) if m < 0 => Err(AppError::bad_request(
                "Expiry minutes must be positive",
                json!({ "expiry_minutes": m }),
            )),
            Some(m) if m > MAX_EXPIRY_MINUTES => Err(AppError::bad_request(
                "Expiry minutes exceeds the maximum",
                json!({ "expiry_minutes": m, "max": MAX_EXPIRY_MINUTES }),
            )),
            Some(m) => Ok(m),
        }
    }
}
