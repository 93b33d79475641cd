use std::sync::Arc;

use folio_core::config::Config;
use folio_duckdb::DuckDbBackend;

/// Shared application state injected into every Axum handler via
/// [`axum::extract::State`].
///
/// The store already serialises access internally, so there is no other
/// shared mutable state here; aggregation reads always see the latest
/// committed writes.
pub struct AppState {
    pub db: Arc<DuckDbBackend>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DuckDbBackend, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}
