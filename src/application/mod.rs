//! Application layer services implementing the mapping store's behaviour.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::mapping_service::MappingService`] - Create, resolve, and list mappings

pub mod services;
