//! SQLite persistence for mappings.
//!
//! - [`SqliteMappingRepository`] - Mapping storage and retrieval
//! - [`connect_pool`] - Pool construction with startup retry

pub mod pool;
pub mod sqlite_mapping_repository;

pub use pool::{PoolSettings, connect_pool, run_migrations};
pub use sqlite_mapping_repository::{SqliteMappingRepository, to_db_timestamp};
