use std::sync::Arc;

use commerce_db::PgStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backed by the database connection pool.
    pub storage: PgStorage,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: commerce_db::DbPool, config: ServerConfig) -> Self {
        Self {
            storage: PgStorage::new(pool),
            config: Arc::new(config),
        }
    }
}
