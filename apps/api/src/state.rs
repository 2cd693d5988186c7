use std::sync::Arc;

use crate::config::Config;
use crate::store::JobStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend. Postgres in production, in-memory without `DATABASE_URL`.
    pub store: Arc<dyn JobStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn JobStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
