//! Caching layer for fast resolve lookups.
//!
//! Provides a [`CacheService`] trait with two implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`NullCache`] - No-op implementation for testing/disabled caching
//!
//! Entries carry their mapping's expiry ([`CachedUrl`]). Backend TTLs only
//! bound memory; a hit is checked against the reader's clock before use.

mod null_cache;
mod redis_cache;
mod service;

pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService, CachedUrl};
