//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short id generation
//! - [`db_error`] - Database error classification
//! - [`request_origin`] - Public origin derivation from HTTP headers

pub mod code_generator;
pub mod db_error;
pub mod request_origin;
