use std::sync::Arc;

use crate::config::Config;
use crate::matching::catalog::RoleCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only role catalog, built once at startup. Never mutated, so no lock.
    pub catalog: Arc<RoleCatalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: RoleCatalog) -> Self {
        Self {
            config,
            catalog: Arc::new(catalog),
        }
    }
}
