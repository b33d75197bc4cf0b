//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Durable note store.
    pub store: Arc<SqliteStore>,
}
