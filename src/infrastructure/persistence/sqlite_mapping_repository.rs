//! SQLite implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{InsertOutcome, MappingRepository};
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_short_id;

/// Renders a timestamp in the stored form: fixed-width RFC 3339 UTC with
/// millisecond precision (`2025-01-01T00:00:00.000Z`).
///
/// Fixed width keeps lexicographic order equal to chronological order, so
/// expiry comparisons run as plain text comparisons in SQL.
pub fn to_db_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// SQLite repository for mapping storage and retrieval.
///
/// Uses bound parameters for every query.
pub struct SqliteMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for SqliteMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url_mappings (short_id, full_url, created_at, expires_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&new_mapping.short_id)
        .bind(&new_mapping.full_url)
        .bind(to_db_timestamp(new_mapping.created_at))
        .bind(to_db_timestamp(new_mapping.expires_at))
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(id) => Ok(InsertOutcome::Inserted(new_mapping.into_mapping(id))),
            Err(e) if is_unique_violation_on_short_id(&e) => Ok(InsertOutcome::ShortIdTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Mapping>, AppError> {
        let mapping = sqlx::query_as::<_, Mapping>(
            r#"
            SELECT id, short_id, full_url, created_at, expires_at
            FROM url_mappings
            WHERE short_id = ?1
            "#,
        )
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Mapping>, AppError> {
        let mappings = sqlx::query_as::<_, Mapping>(
            r#"
            SELECT id, short_id, full_url, created_at, expires_at
            FROM url_mappings
            WHERE expires_at > ?1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(to_db_timestamp(now))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(mappings)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings WHERE expires_at > ?1")
                .bind(to_db_timestamp(now))
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_db_timestamp_is_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 59).unwrap();
        let fractional = whole + Duration::milliseconds(500);

        assert_eq!(to_db_timestamp(whole), "2025-01-01T00:00:59.000Z");
        assert_eq!(to_db_timestamp(fractional), "2025-01-01T00:00:59.500Z");
        assert!(to_db_timestamp(whole) < to_db_timestamp(fractional));
    }
}
