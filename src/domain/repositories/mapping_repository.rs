//! Repository trait for mapping data access.

use crate::domain::entities::{Mapping, NewMapping};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Result of an insert attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Inserted(Mapping),
    /// Another mapping (active or expired) already owns the short id.
    ShortIdTaken,
}

/// Durable, unique-keyed storage of mappings.
///
/// The repository is the sole writer of mapping rows. Rows are inserted once
/// and never updated or deleted.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Inserts a new mapping as a single atomic row write.
    ///
    /// A collision on `short_id` is reported as [`InsertOutcome::ShortIdTaken`]
    /// so the caller can retry with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on any other database error.
    async fn insert(&self, new_mapping: NewMapping) -> Result<InsertOutcome, AppError>;

    /// Finds a mapping by exact short id, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Mapping>, AppError>;

    /// Lists mappings with `expires_at > now`, oldest first.
    ///
    /// Ordering is `created_at` ascending, then `id` ascending.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn list_active(&self, now: DateTime<Utc>) -> Result<Vec<Mapping>, AppError>;

    /// Counts all stored mappings, including expired ones.
    async fn count_all(&self) -> Result<i64, AppError>;

    /// Counts mappings with `expires_at > now`.
    async fn count_active(&self, now: DateTime<Utc>) -> Result<i64, AppError>;

    /// Verifies the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
