//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService, CachedUrl};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache for resolve lookups.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Values are
/// [`CachedUrl::encode`]d strings written with millisecond-precision expiry
/// (`PSETEX`). Command failures and undecodable values are returned as
/// [`CacheError::OperationError`]; callers fall back to the store.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "mapping:".to_string(),
        })
    }

    fn build_key(&self, short_id: &str) -> String {
        format!("{}{}", self.key_prefix, short_id)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_id: &str) -> CacheResult<Option<CachedUrl>> {
        let key = self.build_key(short_id);
        let mut conn = self.client.clone();

        let raw = conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(|e| CacheError::OperationError(format!("GET {} failed: {}", key, e)))?;
        debug!(short_id, hit = raw.is_some(), "Cache lookup");

        raw.as_deref().map(CachedUrl::decode).transpose()
    }

    async fn set_url(&self, short_id: &str, entry: &CachedUrl, ttl: Duration) -> CacheResult<()> {
        let ttl_millis = ttl.as_millis() as u64;
        if ttl_millis == 0 {
            return Ok(());
        }

        let key = self.build_key(short_id);
        let mut conn = self.client.clone();

        match conn.pset_ex::<_, _, ()>(&key, entry.encode(), ttl_millis).await {
            Ok(()) => {
                debug!(short_id, ttl_millis, "Cache SET");
                Ok(())
            }
            Err(e) => Err(CacheError::OperationError(format!(
                "PSETEX {} failed: {}",
                key, e
            ))),
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
