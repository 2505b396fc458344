//! Asset search across curated, generated and third-party sources
pub mod curated;
pub mod download;
pub mod icons;
pub mod models;
pub mod pexels;
pub mod placeholder;
pub mod similarity;
pub mod unsplash;

use anyhow::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::core::AppConfig;
use models::{Asset, AssetKind, SearchParams, SearchResponse, page_count};

/// One upstream that can answer a search
#[async_trait]
pub trait AssetProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;
    fn kind(&self) -> AssetKind;
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error>;
}

pub struct AssetService {
    providers: Vec<Box<dyn AssetProvider>>,
}

impl AssetService {
    pub fn new(providers: Vec<Box<dyn AssetProvider>>) -> Self {
        Self { providers }
    }

    /// Build the provider list from config. The paid photo APIs are only
    /// added when their key is set.
    pub fn from_config(config: &AppConfig, client: Client) -> Self {
        let mut providers: Vec<Box<dyn AssetProvider>> = vec![
            Box::new(curated::CuratedImages::new(&config.picsum_url)),
            Box::new(placeholder::ThemedImages::new(&config.picsum_url)),
            Box::new(placeholder::UnsplashSourceImages::new(
                &config.unsplash_source_url,
            )),
        ];
        if let Some(key) = &config.unsplash_access_key {
            providers.push(Box::new(unsplash::UnsplashImages::new(
                client.clone(),
                &config.unsplash_api_url,
                key,
            )));
        }
        if let Some(key) = &config.pexels_api_key {
            providers.push(Box::new(pexels::PexelsImages::new(
                client,
                &config.pexels_api_url,
                key,
            )));
        }
        providers.push(Box::new(icons::SimpleIcons));

        Self::new(providers)
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Query each provider in turn and merge what comes back.
    ///
    /// A failing provider is logged and skipped. Totals are summed and
    /// `has_more` is true if any provider has another page; results are
    /// not re-paginated across providers.
    pub async fn search(&self, params: &SearchParams) -> SearchResponse {
        let mut assets = Vec::new();
        let mut total = 0;
        let mut has_more = false;

        for provider in self
            .providers
            .iter()
            .filter(|p| params.asset_type.includes(p.kind()))
        {
            match provider.search(params).await {
                Ok(resp) => {
                    tracing::debug!(
                        "Source {} returned {} of {} assets",
                        provider.name(),
                        resp.assets.len(),
                        resp.total
                    );
                    assets.extend(resp.assets);
                    total += resp.total;
                    has_more |= resp.has_more;
                }
                Err(err) => {
                    tracing::warn!("Source {} failed: {:#}", provider.name(), err);
                }
            }
        }

        assets.retain(|asset| meets_min_dimensions(asset, params));

        SearchResponse {
            assets,
            total,
            total_pages: page_count(total, params.per_page),
            current_page: params.page,
            has_more,
        }
    }
}

fn meets_min_dimensions(asset: &Asset, params: &SearchParams) -> bool {
    match asset {
        Asset::Image(image) => {
            params.min_width.is_none_or(|w| image.width >= w)
                && params.min_height.is_none_or(|h| image.height >= h)
        }
        Asset::Icon(_) => true,
    }
}
