//! Public types for the assets API
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::api::public::{ApiError, FieldError};
use crate::api::utils::ParamReader;
use crate::assets::models::{AssetType, Orientation, SearchParams, SizeFilter};

pub use crate::assets::models::SearchResponse;

const ASSET_TYPES: &[&str] = &["image", "icon", "all"];
const ORIENTATIONS: &[&str] = &["landscape", "portrait", "square"];
const SIZES: &[&str] = &["small", "medium", "large"];
const DOWNLOAD_SIZES: &[&str] = &["small", "medium", "large", "original"];

/// Validate search parameters from a query string or JSON body
pub fn parse_search_params(values: &Map<String, Value>) -> Result<SearchParams, ApiError> {
    let mut reader = ParamReader::new(values);

    let query = reader.required_string("query", "Query is required");
    let asset_type = reader.choice::<AssetType>("type", ASSET_TYPES);
    let category = reader.string("category");
    let color = reader.string("color");
    let orientation = reader.choice::<Orientation>("orientation", ORIENTATIONS);
    let size = reader.choice::<SizeFilter>("size", SIZES);
    let per_page = reader.integer("per_page", 1, SearchParams::MAX_PER_PAGE);
    let page = reader.integer("page", 1, u32::MAX);
    let safe_search = reader.boolean("safe_search");
    let min_width = reader.integer("min_width", 0, u32::MAX);
    let min_height = reader.integer("min_height", 0, u32::MAX);
    let style = reader.string("style");
    reader.finish()?;

    let Some(query) = query else {
        return Err(ApiError::InvalidParams(vec![FieldError::new(
            "query", "Required",
        )]));
    };

    let mut params = SearchParams::new(&query);
    params.asset_type = asset_type.unwrap_or_default();
    params.category = category;
    params.color = color;
    params.orientation = orientation;
    params.size = size;
    params.per_page = per_page.unwrap_or(SearchParams::DEFAULT_PER_PAGE);
    params.page = page.unwrap_or(1);
    params.safe_search = safe_search.unwrap_or(true);
    params.min_width = min_width;
    params.min_height = min_height;
    params.style = style;
    Ok(params)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadSize {
    Small,
    Medium,
    Large,
    Original,
}

#[derive(Debug)]
pub struct DownloadRequest {
    pub url: String,
    pub filename: Option<String>,
    // Unused, the URL already names the variant
    pub size: Option<DownloadSize>,
}

fn is_web_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}

/// Validate download parameters from a query string or JSON body
pub fn parse_download_request(values: &Map<String, Value>) -> Result<DownloadRequest, ApiError> {
    let mut reader = ParamReader::new(values);

    let url = reader.required_string("url", "Valid URL is required");
    if let Some(url) = &url
        && !is_web_url(url)
    {
        reader.reject("url", "Valid URL is required");
    }
    let filename = reader.string("filename");
    let size = reader.choice::<DownloadSize>("size", DOWNLOAD_SIZES);
    reader.finish()?;

    let Some(url) = url else {
        return Err(ApiError::InvalidParams(vec![FieldError::new(
            "url", "Required",
        )]));
    };

    Ok(DownloadRequest {
        url,
        filename,
        size,
    })
}
