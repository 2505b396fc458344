//! Pexels photo search API client
use anyhow::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::AssetProvider;
use super::models::{
    Asset, AssetKind, SearchParams, SearchResponse, SizeVariants, Source, StockImage, page_count,
};

#[derive(Debug, Deserialize)]
pub struct PexelsSrc {
    pub original: String,
    pub large: String,
    pub medium: String,
    pub small: String,
}

#[derive(Debug, Deserialize)]
pub struct PexelsPhoto {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub photographer: String,
    pub photographer_url: String,
    pub avg_color: Option<String>,
    pub alt: Option<String>,
    pub src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
pub struct PexelsSearchResponse {
    pub total_results: u64,
    pub photos: Vec<PexelsPhoto>,
    pub next_page: Option<String>,
}

impl From<PexelsPhoto> for StockImage {
    fn from(photo: PexelsPhoto) -> Self {
        let aspect_ratio = if photo.height == 0 {
            0.0
        } else {
            photo.width as f64 / photo.height as f64
        };
        StockImage {
            id: photo.id.to_string(),
            url: photo.src.large.clone(),
            thumbnail_url: Some(photo.src.small.clone()),
            preview_url: Some(photo.src.medium.clone()),
            alt: photo.alt.filter(|alt| !alt.is_empty()),
            tags: vec![],
            source: Source::Pexels,
            width: photo.width,
            height: photo.height,
            aspect_ratio,
            attribution: Some(format!("Photo by {} on Pexels", photo.photographer)),
            photographer: Some(photo.photographer),
            photographer_url: Some(photo.photographer_url),
            download_url: photo.src.original.clone(),
            sizes: SizeVariants {
                small: photo.src.small,
                medium: photo.src.medium,
                large: photo.src.large,
                original: photo.src.original,
            },
            colors: photo.avg_color.into_iter().collect(),
            description: None,
            license: Some(String::from("Pexels License")),
        }
    }
}

pub struct PexelsImages {
    client: Client,
    api_url: String,
    api_key: String,
}

impl PexelsImages {
    pub fn new(client: Client, api_url: &str, api_key: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl AssetProvider for PexelsImages {
    fn name(&self) -> &'static str {
        "pexels"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let mut url = reqwest::Url::parse(&format!("{}/search", self.api_url))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("query", &params.query)
                .append_pair("per_page", &params.per_page.to_string())
                .append_pair("page", &params.page.to_string());
            if let Some(orientation) = params.orientation {
                query.append_pair("orientation", orientation.as_str());
            }
            if let Some(color) = &params.color {
                query.append_pair("color", color);
            }
        }

        let resp: PexelsSearchResponse = self
            .client
            .get(url)
            .header("Authorization", &self.api_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let assets = resp
            .photos
            .into_iter()
            .map(|photo| Asset::Image(photo.into()))
            .collect();

        Ok(SearchResponse {
            assets,
            total: resp.total_results,
            total_pages: page_count(resp.total_results, params.per_page),
            current_page: params.page,
            has_more: resp.next_page.is_some(),
        })
    }
}
