//! CLI administration tool for expiring-shortener.
//!
//! Works directly against the database, without the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a mapping that expires in an hour
//! cargo run --bin admin -- mapping create https://example.com --expiry-minutes 60
//!
//! # Resolve a short id
//! cargo run --bin admin -- mapping resolve Ab3dE5gH
//!
//! # List active mappings
//! cargo run --bin admin -- mapping active
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (optional): SQLite database, default `sqlite://shortener.db`
//! - `DEFAULT_EXPIRY_MINUTES` (optional): default expiry for `mapping create`

use expiring_shortener::AppError;
use expiring_shortener::application::services::MappingService;
use expiring_shortener::config::Config;
use expiring_shortener::domain::clock::SystemClock;
use expiring_shortener::infrastructure::cache::NullCache;
use expiring_shortener::infrastructure::persistence::{
    SqliteMappingRepository, connect_pool, run_migrations,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::SqlitePool;
use std::sync::Arc;

type Service = MappingService<SqliteMappingRepository>;

/// CLI tool for managing expiring-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Create, resolve, and list mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Mapping subcommands.
#[derive(Subcommand)]
enum MappingAction {
    /// Create a new mapping
    Create {
        /// The full URL to shorten
        url: String,

        /// Minutes until expiry (default from configuration)
        #[arg(short, long)]
        expiry_minutes: Option<i64>,
    },

    /// Resolve a short id to its full URL
    Resolve {
        /// The short id to look up
        short_id: String,
    },

    /// List active mappings
    Active,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    config.validate()?;

    let pool = connect_pool(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let pool = Arc::new(pool);
    let service = MappingService::new(
        Arc::new(SqliteMappingRepository::new(pool.clone())),
        Arc::new(NullCache::new()),
        Arc::new(SystemClock),
        config.mapping_settings(),
    );

    let outcome = match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, &service).await,
        Commands::Stats => handle_stats(&service).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    outcome
}

/// Dispatches mapping commands.
async fn handle_mapping_action(action: MappingAction, service: &Service) -> Result<()> {
    match action {
        MappingAction::Create {
            url,
            expiry_minutes,
        } => create_mapping(service, url, expiry_minutes).await,
        MappingAction::Resolve { short_id } => resolve_mapping(service, &short_id).await,
        MappingAction::Active => list_active(service).await,
    }
}

async fn create_mapping(service: &Service, url: String, expiry_minutes: Option<i64>) -> Result<()> {
    println!("{}", "Create mapping".bright_blue().bold());
    println!();

    let mapping = service
        .create(url, expiry_minutes)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))?;

    println!("  Short id: {}", mapping.short_id.bright_yellow().bold());
    println!("  URL:      {}", mapping.full_url.cyan());
    println!(
        "  Expires:  {}",
        mapping
            .expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_white()
    );
    println!();

    Ok(())
}

/// Resolves a short id, distinguishing unknown from expired ids.
async fn resolve_mapping(service: &Service, short_id: &str) -> Result<()> {
    match service.resolve(short_id).await {
        Ok(full_url) => {
            println!("{} {}", "✓".green().bold(), full_url.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{} {}", "Not found:".yellow().bold(), short_id);
            Ok(())
        }
        Err(AppError::Expired { .. }) => {
            println!("{} {}", "Expired:".red().bold(), short_id);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to resolve {}: {}", short_id, e)),
    }
}

/// Lists active mappings.
///
/// # Output Format
///
/// ```text
/// Active mappings
///
///   Short id   Expires              URL
///   ──────────────────────────────────────────────────────────────
///   Ab3dE5gH   2025-01-02 10:30     https://example.com
/// ```
async fn list_active(service: &Service) -> Result<()> {
    println!("{}", "Active mappings".bright_blue().bold());
    println!();

    let mappings = service
        .list_active()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list mappings: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No active mappings".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<20} {}",
        "Short id".bright_white().bold(),
        "Expires".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<10} {:<20} {}",
            mapping.short_id.bright_yellow(),
            mapping
                .expires_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.full_url.cyan()
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Displays mapping counts.
async fn handle_stats(service: &Service) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let stats = service
        .stats()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Mappings: {}",
        stats.total.to_string().bright_white().bold()
    );
    println!(
        "  Active:   {}",
        stats.active.to_string().bright_green().bold()
    );
    println!(
        "  Expired:  {}",
        stats.expired.to_string().bright_red().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✓ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!();
        }
    }

    Ok(())
}
