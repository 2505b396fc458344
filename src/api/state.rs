use std::sync::Arc;

use reqwest::Client;
use tokio_rusqlite::Connection;

use crate::assets::AssetService;
use crate::core::AppConfig;

pub struct AppState {
    pub db: Connection,
    pub config: AppConfig,
    // Shared by the asset sources, downloads and token checks
    pub http: Client,
    pub assets: Arc<AssetService>,
}

impl AppState {
    pub fn new(db: Connection, config: AppConfig) -> Self {
        let http = Client::new();
        let assets = Arc::new(AssetService::from_config(&config, http.clone()));
        Self {
            db,
            config,
            http,
            assets,
        }
    }
}
