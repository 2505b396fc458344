//! Unsplash photo search API client
use anyhow::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::AssetProvider;
use super::models::{
    Asset, AssetKind, SearchParams, SearchResponse, SizeVariants, Source, StockImage,
};

#[derive(Debug, Deserialize)]
pub struct UnsplashUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashTag {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUserLinks {
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashUser {
    pub name: String,
    pub links: UnsplashUserLinks,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashPhotoLinks {
    pub download: String,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    pub urls: UnsplashUrls,
    pub width: u32,
    pub height: u32,
    pub color: Option<String>,
    pub alt_description: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<UnsplashTag>,
    pub user: UnsplashUser,
    pub links: UnsplashPhotoLinks,
}

#[derive(Debug, Deserialize)]
pub struct UnsplashSearchResponse {
    pub total: u64,
    pub total_pages: u64,
    pub results: Vec<UnsplashPhoto>,
}

impl From<UnsplashPhoto> for StockImage {
    fn from(photo: UnsplashPhoto) -> Self {
        let aspect_ratio = if photo.height == 0 {
            0.0
        } else {
            photo.width as f64 / photo.height as f64
        };
        StockImage {
            id: photo.id,
            url: photo.urls.regular.clone(),
            thumbnail_url: Some(photo.urls.thumb),
            preview_url: Some(photo.urls.small.clone()),
            alt: Some(photo.alt_description.unwrap_or_default()),
            tags: photo.tags.into_iter().map(|t| t.title).collect(),
            source: Source::Unsplash,
            width: photo.width,
            height: photo.height,
            aspect_ratio,
            attribution: Some(format!("Photo by {} on Unsplash", photo.user.name)),
            photographer: Some(photo.user.name),
            photographer_url: Some(photo.user.links.html),
            download_url: photo.links.download,
            sizes: SizeVariants {
                small: photo.urls.small,
                medium: photo.urls.regular,
                large: photo.urls.full,
                original: photo.urls.raw,
            },
            colors: photo.color.into_iter().collect(),
            description: photo.description,
            license: Some(String::from("Unsplash License")),
        }
    }
}

pub struct UnsplashImages {
    client: Client,
    api_url: String,
    access_key: String,
}

impl UnsplashImages {
    pub fn new(client: Client, api_url: &str, access_key: &str) -> Self {
        Self {
            client,
            api_url: api_url.to_string(),
            access_key: access_key.to_string(),
        }
    }
}

#[async_trait]
impl AssetProvider for UnsplashImages {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let mut url = reqwest::Url::parse(&format!("{}/search/photos", self.api_url))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("query", &params.query)
                .append_pair("per_page", &params.per_page.to_string())
                .append_pair("page", &params.page.to_string())
                .append_pair(
                    "content_filter",
                    if params.safe_search { "high" } else { "low" },
                );
            if let Some(orientation) = params.orientation {
                query.append_pair("orientation", orientation.as_str());
            }
            if let Some(color) = &params.color {
                query.append_pair("color", color);
            }
        }

        let resp: UnsplashSearchResponse = self
            .client
            .get(url)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let assets = resp
            .results
            .into_iter()
            .map(|photo| Asset::Image(photo.into()))
            .collect();

        Ok(SearchResponse {
            assets,
            total: resp.total,
            total_pages: resp.total_pages,
            current_page: params.page,
            has_more: (params.page as u64) < resp.total_pages,
        })
    }
}
