//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortener.db"
//! export LISTEN="0.0.0.0:3000"
//! export DEFAULT_EXPIRY_MINUTES="1440"
//! export REDIS_URL="redis://localhost:6379/0"   # optional
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://shortener.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`); `PORT` alone also works
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DEFAULT_EXPIRY_MINUTES` / `DEFAULT_EXPIRATION_HOURS` - Default expiry window (default: 1440 minutes)
//! - `PUBLIC_BASE_URL` - Base for composed short URLs (default: derived from the request)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-Proto` / `X-Forwarded-Host` (default: false)
//! - `REDIS_URL` / `REDIS_HOST` - Redis connection (enables caching if set)
//! - `CACHE_TTL_SECONDS` - Upper bound for cache entry lifetime (default: 3600)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT` - Acquire and busy timeout in seconds (default: 30)
//! - `CORS_ALLOW_ORIGIN` - Allowed CORS origin, `*` for any (default: `*`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::MappingSettings;
use crate::application::services::mapping_service::{DEFAULT_EXPIRY_MINUTES, MAX_EXPIRY_MINUTES};
use crate::infrastructure::persistence::PoolSettings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Expiry window used when a create request omits one.
    pub default_expiry_minutes: i64,
    /// When set, short URLs are composed as `{public_base_url}/{short_id}`
    /// instead of from the request's scheme and host.
    pub public_base_url: Option<String>,
    /// When true, the request origin is read from `X-Forwarded-Proto` /
    /// `X-Forwarded-Host`. Enable only behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Upper bound (seconds) on how long a resolved URL stays in Redis.
    /// Has no effect when Redis is not configured.
    pub cache_ttl_seconds: u64,
    pub cors_allow_origin: String,

    // ── Pool settings ───────────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 10).
    pub db_max_connections: u32,
    /// Timeout for acquiring a connection, also used as SQLite busy timeout
    /// (`DB_CONNECT_TIMEOUT`, default: 30).
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unset variables fall back to their defaults. A numeric variable that is
    /// set but unparsable is an error rather than a silent default.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env_or("DATABASE_URL", "sqlite://shortener.db".to_string())?,
            redis_url: Self::load_redis_url(),
            listen_addr: Self::load_listen_addr(),
            log_level: env_or("RUST_LOG", "info".to_string())?,
            log_format: env_or("LOG_FORMAT", "text".to_string())?,
            default_expiry_minutes: Self::load_default_expiry_minutes()?,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            behind_proxy: env_flag("BEHIND_PROXY"),
            cache_ttl_seconds: env_or("CACHE_TTL_SECONDS", 3600)?,
            cors_allow_origin: env_or("CORS_ALLOW_ORIGIN", "*".to_string())?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 10)?,
            db_connect_timeout: env_or("DB_CONNECT_TIMEOUT", 30)?,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN`
    /// 2. `0.0.0.0:$PORT`
    /// 3. `0.0.0.0:3000`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Loads the default expiry window in minutes.
    ///
    /// Priority:
    /// 1. `DEFAULT_EXPIRY_MINUTES`
    /// 2. `DEFAULT_EXPIRATION_HOURS` × 60
    /// 3. 1440 (24 hours)
    fn load_default_expiry_minutes() -> Result<i64> {
        if env::var_os("DEFAULT_EXPIRY_MINUTES").is_some() {
            return env_or("DEFAULT_EXPIRY_MINUTES", DEFAULT_EXPIRY_MINUTES);
        }

        match env_opt::<i64>("DEFAULT_EXPIRATION_HOURS")? {
            Some(hours) => Ok(hours.saturating_mul(60)),
            None => Ok(DEFAULT_EXPIRY_MINUTES),
        }
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env_opt::<u16>("REDIS_PORT").ok().flatten().unwrap_or(6379);
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let mut url = url::Url::parse(&format!("redis://{}:{}/{}", host, port, db)).ok()?;
        if let Some(password) = env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()) {
            url.set_password(Some(&password)).ok()?;
        }

        Some(url.to_string())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - `default_expiry_minutes` is outside `1..=MAX_EXPIRY_MINUTES`
    /// - `public_base_url` is not an absolute http(s) URL
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            matches!(self.log_format.as_str(), "text" | "json"),
            "LOG_FORMAT must be one of text, json (got '{}')",
            self.log_format
        );
        anyhow::ensure!(
            self.listen_addr.rsplit_once(':').is_some(),
            "LISTEN must look like host:port (got '{}')",
            self.listen_addr
        );
        anyhow::ensure!(
            self.database_url.starts_with("sqlite:"),
            "DATABASE_URL must be a sqlite: URL (got '{}')",
            self.database_url
        );

        if let Some(redis_url) = self.redis_url.as_deref() {
            let scheme = redis_url.split_once("://").map(|(scheme, _)| scheme);
            anyhow::ensure!(
                matches!(scheme, Some("redis" | "rediss")),
                "REDIS_URL must use the redis:// or rediss:// scheme (got '{}')",
                mask_connection_string(redis_url)
            );
        }

        anyhow::ensure!(
            (1..=MAX_EXPIRY_MINUTES).contains(&self.default_expiry_minutes),
            "Default expiry must be between 1 and {} minutes (got {})",
            MAX_EXPIRY_MINUTES,
            self.default_expiry_minutes
        );

        if let Some(base) = self.public_base_url.as_deref() {
            let parsed = url::Url::parse(base)
                .with_context(|| format!("PUBLIC_BASE_URL is not a valid URL: '{}'", base))?;
            anyhow::ensure!(
                matches!(parsed.scheme(), "http" | "https"),
                "PUBLIC_BASE_URL must use http or https (got '{}')",
                base
            );
        }

        for (name, value) in [
            ("CACHE_TTL_SECONDS", self.cache_ttl_seconds),
            ("DB_MAX_CONNECTIONS", u64::from(self.db_max_connections)),
            ("DB_CONNECT_TIMEOUT", self.db_connect_timeout),
        ] {
            anyhow::ensure!(value > 0, "{} must be positive", name);
        }

        Ok(())
    }

    /// Settings for the mapping service.
    pub fn mapping_settings(&self) -> MappingSettings {
        MappingSettings {
            default_expiry_minutes: self.default_expiry_minutes,
            cache_ttl: Duration::from_secs(self.cache_ttl_seconds),
        }
    }

    /// Settings for the database pool.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            connect_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Logs the effective configuration with secrets masked.
    pub fn print_summary(&self) {
        let redis = self
            .redis_url
            .as_deref()
            .map(mask_connection_string)
            .unwrap_or_else(|| "disabled".to_string());

        tracing::info!(
            listen = %self.listen_addr,
            database = %self.database_url,
            redis = %redis,
            default_expiry_minutes = self.default_expiry_minutes,
            public_base_url = self.public_base_url.as_deref().unwrap_or("from request"),
            behind_proxy = self.behind_proxy,
            cors_allow_origin = %self.cors_allow_origin,
            log_level = %self.log_level,
            log_format = %self.log_format,
            "Configuration loaded"
        );
    }
}

/// Reads and parses an optional variable. Unset or blank is `None`.
fn env_opt<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        _ => Ok(None),
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_opt(key)?.unwrap_or(default))
}

/// `true`/`1` (any case) enables a flag; anything else disables it.
fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Replaces the password of a connection URL with `***` for logging.
///
/// Strings that do not parse as URLs are returned unchanged.
fn mask_connection_string(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_err() {
                return raw.to_string();
            }
            parsed.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects `.env` to be already loaded (e.g., via `dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
