use std::sync::Arc;

use shelter_core::uploads::UploadDir;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shelter_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Directory holding uploaded dog photos.
    pub uploads: Arc<UploadDir>,
}

impl AppState {
    pub fn new(pool: shelter_db::DbPool, config: ServerConfig) -> Self {
        let uploads = Arc::new(UploadDir::new(config.upload_dir.clone()));
        Self {
            pool,
            config: Arc::new(config),
            uploads,
        }
    }
}
