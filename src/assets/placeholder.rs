//! Generated placeholder sources that need no API key
use anyhow::{Error, Result};
use async_trait::async_trait;

use super::AssetProvider;
use super::models::{
    Asset, AssetKind, SearchParams, SearchResponse, SizeVariants, Source, StockImage,
};

/// URLs for one picsum-backed image at every size the client asks for
pub(crate) struct PicsumUrls {
    pub url: String,
    pub thumbnail: String,
    pub preview: String,
    pub sizes: SizeVariants,
}

pub(crate) fn picsum_urls(base_url: &str, seed: &str, width: u32, height: u32) -> PicsumUrls {
    let at = |w: u32, h: u32| format!("{}/{}/{}?random={}", base_url, w, h, seed);
    let url = at(width, height);
    PicsumUrls {
        url: url.clone(),
        thumbnail: at(200, 150),
        preview: at(400, 300),
        sizes: SizeVariants {
            small: at(400, 300),
            medium: url,
            large: at(width * 3 / 2, height * 3 / 2),
            original: at(width * 2, height * 2),
        },
    }
}

/// Seeded picsum photos themed on the query text
pub struct ThemedImages {
    base_url: String,
}

impl ThemedImages {
    const MAX_PER_PAGE: u32 = 10;
    const TOTAL: u64 = 800;
    const TOTAL_PAGES: u64 = 80;
    const ID_OFFSET: u64 = 100;

    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl AssetProvider for ThemedImages {
    fn name(&self) -> &'static str {
        "themed"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let per_page = params.per_page.min(Self::MAX_PER_PAGE);
        let page = params.page;
        let (width, height) = params.placeholder_dimensions();
        let compact_query: String = params.query.split_whitespace().collect();

        let assets = (0..per_page)
            .map(|i| {
                let image_id =
                    (page as u64).saturating_sub(1) * per_page as u64 + i as u64 + Self::ID_OFFSET;
                let seed = urlencoding::encode(&format!("{}-{}", compact_query, image_id))
                    .into_owned();
                let urls = picsum_urls(&self.base_url, &seed, width, height);
                Asset::Image(StockImage {
                    id: format!("themed-{}", image_id),
                    url: urls.url.clone(),
                    thumbnail_url: Some(urls.thumbnail),
                    preview_url: Some(urls.preview),
                    alt: Some(format!("{} themed photo {}", params.query, image_id)),
                    tags: vec![
                        params.query.clone(),
                        String::from("stock"),
                        String::from("free"),
                        String::from("themed"),
                    ],
                    source: Source::ThemedSource,
                    width,
                    height,
                    aspect_ratio: width as f64 / height as f64,
                    photographer: None,
                    photographer_url: None,
                    download_url: urls.url,
                    sizes: urls.sizes,
                    colors: vec![String::from("#777777")],
                    description: None,
                    attribution: Some(String::from("Free themed stock photo")),
                    license: Some(String::from("Free for commercial and personal use")),
                })
            })
            .collect();

        Ok(SearchResponse {
            assets,
            total: Self::TOTAL,
            total_pages: Self::TOTAL_PAGES,
            current_page: page,
            has_more: (page as u64) < Self::TOTAL_PAGES,
        })
    }
}

/// Keyword-addressed Unsplash Source URLs
pub struct UnsplashSourceImages {
    base_url: String,
}

impl UnsplashSourceImages {
    const MAX_PER_PAGE: u32 = 8;
    const TOTAL: u64 = 500;
    const TOTAL_PAGES: u64 = 50;

    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn sized(&self, width: u32, height: u32, query: &str) -> String {
        format!("{}/{}x{}/?{}", self.base_url, width, height, query)
    }
}

#[async_trait]
impl AssetProvider for UnsplashSourceImages {
    fn name(&self) -> &'static str {
        "unsplash-source"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let per_page = params.per_page.min(Self::MAX_PER_PAGE);
        let page = params.page;
        let (width, height) = params.placeholder_dimensions();
        let query = urlencoding::encode(&params.query).into_owned();

        let assets = (0..per_page)
            .map(|i| {
                let image_id = page as u64 * 1000 + i as u64;
                let url = self.sized(width, height, &query);
                Asset::Image(StockImage {
                    id: format!("unsplash-source-{}", image_id),
                    url: url.clone(),
                    thumbnail_url: Some(self.sized(200, 150, &query)),
                    preview_url: Some(self.sized(400, 300, &query)),
                    alt: Some(format!("{} from Unsplash", params.query)),
                    tags: vec![
                        params.query.clone(),
                        String::from("unsplash"),
                        String::from("free"),
                        String::from("stock"),
                    ],
                    source: Source::UnsplashSource,
                    width,
                    height,
                    aspect_ratio: width as f64 / height as f64,
                    photographer: None,
                    photographer_url: None,
                    download_url: url.clone(),
                    sizes: SizeVariants {
                        small: self.sized(400, 300, &query),
                        medium: url,
                        large: self.sized(width * 3 / 2, height * 3 / 2, &query),
                        original: self.sized(width * 2, height * 2, &query),
                    },
                    colors: vec![String::from("#999999")],
                    description: None,
                    attribution: Some(String::from("Photo from Unsplash Source")),
                    license: Some(String::from("Unsplash License")),
                })
            })
            .collect();

        Ok(SearchResponse {
            assets,
            total: Self::TOTAL,
            total_pages: Self::TOTAL_PAGES,
            current_page: page,
            has_more: (page as u64) < Self::TOTAL_PAGES,
        })
    }
}
