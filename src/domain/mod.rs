//! Domain layer containing the mapping entity and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Time source abstraction
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits are implemented in [`crate::infrastructure`].

pub mod clock;
pub mod entities;
pub mod repositories;
