use anyhow::Result;
use reqwest::Client;

use crate::assets::AssetService;
use crate::assets::models::{AssetType, Orientation, SearchParams};
use crate::core::AppConfig;

pub struct SearchOptions {
    pub asset_type: AssetType,
    pub page: u32,
    pub per_page: u32,
    pub orientation: Option<Orientation>,
}

pub async fn run(query: &str, options: SearchOptions, config: &AppConfig) -> Result<()> {
    let service = AssetService::from_config(config, Client::new());

    let mut params = SearchParams::new(query);
    params.asset_type = options.asset_type;
    params.page = options.page.max(1);
    params.per_page = options.per_page;
    params.orientation = options.orientation;

    let results = service.search(&params).await;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
