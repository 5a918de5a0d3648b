//! # Expiring Shortener
//!
//! A URL shortening service whose short links expire, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Mapping entity, repository trait, clock
//! - **Application Layer** ([`application`]) - The mapping store's create/resolve/list logic
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence and Redis cache
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Behaviour
//!
//! - Short ids are 8 random base62 characters, unique for the lifetime of the store
//! - Each mapping expires `expiryMinutes` after creation (default 24 hours)
//! - Resolving an expired id is reported as `410 Gone`, distinct from `404`
//! - Expired mappings are retained and excluded from lookups and listings
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shortener.db"
//! cargo run
//!
//! curl -X POST localhost:3000/shorten -H 'content-type: application/json' \
//!      -d '{"url":"https://example.com","expiryMinutes":60}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{MappingService, MappingSettings, MappingStats};
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{Mapping, NewMapping};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
