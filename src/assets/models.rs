//! Common asset model shared by every source
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which upstream produced an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Unsplash,
    Pexels,
    UnsplashSource,
    ThemedSource,
    CuratedDemo,
    SimpleIcons,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeVariants {
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockImage {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub tags: Vec<String>,
    pub source: Source,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photographer_url: Option<String>,
    pub download_url: String,
    pub sizes: SizeVariants,
    pub colors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconStyle {
    Solid,
    Outline,
    Filled,
    TwoTone,
    Brand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconFormat {
    Svg,
    Png,
    Ico,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IconDownloads {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub png: Option<BTreeMap<u32, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub id: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub tags: Vec<String>,
    pub source: Source,
    pub category: String,
    pub style: IconStyle,
    pub format: IconFormat,
    pub sizes: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_url: Option<String>,
    pub download_urls: IconDownloads,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// A single search result, tagged on the wire by `"type"`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Asset {
    Image(StockImage),
    Icon(Icon),
}

impl Asset {
    pub fn id(&self) -> &str {
        match self {
            Asset::Image(i) => &i.id,
            Asset::Icon(i) => &i.id,
        }
    }

    pub fn source(&self) -> Source {
        match self {
            Asset::Image(i) => i.source,
            Asset::Icon(i) => i.source,
        }
    }

    pub fn alt(&self) -> Option<&str> {
        match self {
            Asset::Image(i) => i.alt.as_deref(),
            Asset::Icon(i) => i.alt.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Icon,
    #[default]
    All,
}

impl AssetType {
    pub fn includes(&self, kind: AssetKind) -> bool {
        match self {
            AssetType::All => true,
            AssetType::Image => kind == AssetKind::Image,
            AssetType::Icon => kind == AssetKind::Icon,
        }
    }
}

/// What a single source produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Square => "square",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeFilter {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub asset_type: AssetType,
    pub category: Option<String>,
    pub color: Option<String>,
    pub orientation: Option<Orientation>,
    pub size: Option<SizeFilter>,
    pub per_page: u32,
    pub page: u32,
    pub safe_search: bool,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub style: Option<String>,
}

impl SearchParams {
    pub const DEFAULT_PER_PAGE: u32 = 20;
    pub const MAX_PER_PAGE: u32 = 50;

    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            asset_type: AssetType::All,
            category: None,
            color: None,
            orientation: None,
            size: None,
            per_page: Self::DEFAULT_PER_PAGE,
            page: 1,
            safe_search: true,
            min_width: None,
            min_height: None,
            style: None,
        }
    }

    /// Pixel dimensions used by the generated placeholder sources
    pub fn placeholder_dimensions(&self) -> (u32, u32) {
        let height = match self.orientation {
            Some(Orientation::Portrait) => 1200,
            Some(Orientation::Square) => 800,
            _ => 600,
        };
        (800, height)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub assets: Vec<Asset>,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u32,
    pub has_more: bool,
}

impl SearchResponse {
    pub fn empty(page: u32) -> Self {
        Self {
            assets: vec![],
            total: 0,
            total_pages: 0,
            current_page: page,
            has_more: false,
        }
    }
}

/// Number of pages needed to show `total` items `per_page` at a time
pub fn page_count(total: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_tags_assets_by_type() {
        let icon = Asset::Icon(Icon {
            id: String::from("icon-home-0"),
            url: String::from("data:image/svg+xml;charset=utf-8,"),
            thumbnail_url: None,
            preview_url: None,
            alt: Some(String::from("home icon")),
            tags: vec![String::from("home")],
            source: Source::SimpleIcons,
            category: String::from("general"),
            style: IconStyle::TwoTone,
            format: IconFormat::Svg,
            sizes: vec![24],
            vector_url: None,
            download_urls: IconDownloads::default(),
            attribution: None,
            license: None,
        });

        let value = serde_json::to_value(&icon).unwrap();
        assert_eq!(value["type"], json!("icon"));
        assert_eq!(value["source"], json!("simple-icons"));
        assert_eq!(value["style"], json!("two-tone"));
        assert_eq!(value["downloadUrls"], json!({}));
        assert!(value.get("thumbnailUrl").is_none());
    }

    #[test]
    fn it_counts_pages() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(5, 0), 0);
    }

    #[test]
    fn it_picks_placeholder_dimensions_by_orientation() {
        let mut params = SearchParams::new("cat");
        assert_eq!(params.placeholder_dimensions(), (800, 600));
        params.orientation = Some(Orientation::Portrait);
        assert_eq!(params.placeholder_dimensions(), (800, 1200));
        params.orientation = Some(Orientation::Square);
        assert_eq!(params.placeholder_dimensions(), (800, 800));
    }
}
