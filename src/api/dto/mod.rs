//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire.

pub mod active;
pub mod health;
pub mod resolve;
pub mod shorten;
