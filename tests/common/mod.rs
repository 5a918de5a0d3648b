#![allow(dead_code)]

use chrono::{DateTime, Duration, SubsecRound, Utc};
use expiring_shortener::application::services::{MappingService, MappingSettings};
use expiring_shortener::domain::clock::{Clock, ManualClock, SystemClock};
use expiring_shortener::infrastructure::cache::NullCache;
use expiring_shortener::infrastructure::persistence::{SqliteMappingRepository, to_db_timestamp};
use expiring_shortener::state::{AppMappingService, AppState};
use sqlx::SqlitePool;
use std::sync::Arc;

pub async fn insert_mapping(
    pool: &SqlitePool,
    short_id: &str,
    url: &str,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_mappings (short_id, full_url, created_at, expires_at) \
         VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(short_id)
    .bind(url)
    .bind(to_db_timestamp(created_at))
    .bind(to_db_timestamp(expires_at))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Inserts a mapping that expired an hour ago.
pub async fn create_expired_mapping(pool: &SqlitePool, short_id: &str, url: &str) -> i64 {
    let now = Utc::now().trunc_subsecs(3);
    insert_mapping(
        pool,
        short_id,
        url,
        now - Duration::hours(2),
        now - Duration::hours(1),
    )
    .await
}

/// Inserts a mapping that stays active for another day.
pub async fn create_active_mapping(pool: &SqlitePool, short_id: &str, url: &str) -> i64 {
    let now = Utc::now().trunc_subsecs(3);
    insert_mapping(pool, short_id, url, now, now + Duration::days(1)).await
}

pub async fn count_mappings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_service(pool: SqlitePool, clock: Arc<dyn Clock>) -> Arc<AppMappingService> {
    let repository = Arc::new(SqliteMappingRepository::new(Arc::new(pool)));

    Arc::new(MappingService::new(
        repository,
        Arc::new(NullCache),
        clock,
        MappingSettings::default(),
    ))
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(
        create_test_service(pool, Arc::new(SystemClock)),
        None,
        false,
    )
}

pub fn create_test_state_with_clock(pool: SqlitePool, clock: Arc<ManualClock>) -> AppState {
    AppState::new(create_test_service(pool, clock), None, false)
}
