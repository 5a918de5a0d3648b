//! HTTP request handlers for API endpoints.

pub mod active;
pub mod health;
pub mod resolve;
pub mod shorten;

pub use active::active_handler;
pub use health::health_handler;
pub use resolve::resolve_handler;
pub use shorten::shorten_handler;
