//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::MappingService;
use crate::infrastructure::persistence::SqliteMappingRepository;

/// Mapping service wired to the SQLite repository.
pub type AppMappingService = MappingService<SqliteMappingRepository>;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<AppMappingService>,
    /// Overrides the request-derived origin when composing short URLs.
    pub public_base_url: Option<String>,
    /// Trust `X-Forwarded-*` headers when deriving the request origin.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        mapping_service: Arc<AppMappingService>,
        public_base_url: Option<String>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            mapping_service,
            public_base_url,
            behind_proxy,
        }
    }
}
