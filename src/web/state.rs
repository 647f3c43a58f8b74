use serde::Serialize;
use std::sync::Arc;

use super::config::ServerConfig;
use crate::storage::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = UploadStore::new(config.upload_dir.clone());
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
