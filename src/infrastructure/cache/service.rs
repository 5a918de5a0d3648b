//! Cache service trait and error types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A cached resolve result: the full URL and the instant its mapping expires.
///
/// The expiry travels with the URL so a hit can be checked against the
/// caller's clock instead of trusting the backend's TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedUrl {
    pub full_url: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedUrl {
    pub fn new(full_url: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            full_url: full_url.into(),
            expires_at,
        }
    }

    /// True while the mapping is still active at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Serialises as `<expires_at unix millis>|<full_url>`.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.expires_at.timestamp_millis(), self.full_url)
    }

    /// Parses a value written by [`CachedUrl::encode`].
    pub fn decode(raw: &str) -> CacheResult<Self> {
        let corrupt = || CacheError::OperationError(format!("corrupt cache entry: '{}'", raw));

        let (millis, full_url) = raw.split_once('|').ok_or_else(corrupt)?;
        let expires_at = millis
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .ok_or_else(corrupt)?;

        Ok(Self::new(full_url, expires_at))
    }
}

/// Trait for caching short-id → full-url lookups.
///
/// Implementations must be thread-safe and fail open: a cache failure
/// degrades to a store read, never to a client error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached entry for a short id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entry))` on cache hit, possibly already past `expires_at`
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<CachedUrl>>;

    /// Stores `entry` under `short_id` for at most `ttl`.
    ///
    /// The TTL only bounds memory use. Readers still compare
    /// [`CachedUrl::expires_at`] with their own clock.
    async fn set_url(&self, short_id: &str, entry: &CachedUrl, ttl: Duration) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reporting.
    fn backend(&self) -> &'static str;
}
