//! Core domain entities.
//!
//! - [`Mapping`] - A short identifier bound to a full URL until it expires
//! - [`NewMapping`] - Insert payload for a mapping

pub mod mapping;

pub use mapping::{Mapping, NewMapping};
