//! SQLite connection pool setup.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::warn;

/// Connection attempts made before giving up at startup.
const CONNECT_ATTEMPTS: usize = 5;

/// Pool tuning derived from configuration.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Opens a SQLite pool, creating the database file if missing.
///
/// Uses WAL journaling so readers never observe a partially written row and
/// do not block the writer. Failed connection attempts are retried with
/// jittered exponential backoff.
///
/// # Errors
///
/// Returns an error if the URL is malformed or every attempt fails.
pub async fn connect_pool(database_url: &str, settings: &PoolSettings) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(settings.connect_timeout);

    let strategy = ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1);

    Retry::start(strategy, || {
        let options = options.clone();
        async move {
            SqlitePoolOptions::new()
                .max_connections(settings.max_connections)
                .acquire_timeout(settings.connect_timeout)
                .connect_with(options)
                .await
                .inspect_err(|e| warn!("Database connection attempt failed: {}", e))
        }
    })
    .await
}

/// Applies the embedded schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
