//! Fetching asset bytes and naming downloaded files
use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;
use reqwest::Client;

use super::models::{Asset, StockImage};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").expect("Invalid filename regex"));

pub struct DownloadedAsset {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Largest asset body that will be buffered for a download
pub const MAX_DOWNLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Fetch the body of `url`. Non-success responses and bodies over
/// `max_bytes` are errors.
pub async fn fetch_asset(client: &Client, url: &str, max_bytes: usize) -> Result<DownloadedAsset> {
    let mut resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("Failed to download {}: {}", url, status));
    }
    if let Some(len) = resp.content_length()
        && len > max_bytes as u64
    {
        return Err(anyhow!("Asset {} is too large: {} bytes", url, len));
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    // Content-Length can be missing or wrong so the body is capped too
    let mut bytes = Vec::new();
    while let Some(chunk) = resp.chunk().await? {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(anyhow!("Asset {} is larger than {} bytes", url, max_bytes));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(DownloadedAsset {
        bytes,
        content_type,
    })
}

/// Strip anything that could break out of a `Content-Disposition`
/// filename or name a path. Header values must be visible ASCII.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| {
            c.is_ascii() && !c.is_ascii_control() && !matches!(c, '"' | '\\' | '/')
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn extension_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let (_, ext) = last_segment.rsplit_once('.')?;
    let valid =
        !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_lowercase())
}

fn extension_from_content_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next()?.trim().to_lowercase();
    let ext = match essence.as_str() {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        other => mime_guess::get_mime_extensions_str(other)?.first()?,
    };
    Some(ext.to_string())
}

/// Extension for a downloaded file, from the URL path first and the
/// response content type second.
pub fn file_extension(url: &str, content_type: Option<&str>) -> String {
    extension_from_url(url)
        .or_else(|| content_type.and_then(extension_from_content_type))
        .unwrap_or_else(|| String::from("bin"))
}

/// Name for the `Content-Disposition` header of a download
pub fn download_filename(
    url: &str,
    requested: Option<&str>,
    content_type: Option<&str>,
    timestamp_millis: i64,
) -> String {
    requested.and_then(sanitize_filename).unwrap_or_else(|| {
        format!(
            "asset-{}.{}",
            timestamp_millis,
            file_extension(url, content_type)
        )
    })
}

/// Descriptive file name for saving `asset`, e.g.
/// `misty-forest-landscape-curated-forest-1-1700000000000.jpg`
pub fn asset_filename(asset: &Asset, extension: Option<&str>, timestamp_millis: i64) -> String {
    let stem = asset
        .alt()
        .filter(|alt| !alt.is_empty())
        .map(|alt| NON_ALPHANUMERIC.replace_all(alt, "-").to_lowercase())
        .unwrap_or_else(|| String::from("asset"));
    let ext = extension.unwrap_or(match asset {
        Asset::Icon(_) => "svg",
        Asset::Image(_) => "jpg",
    });
    format!("{}-{}-{}.{}", stem, asset.id(), timestamp_millis, ext)
}

/// Pick the largest size variant that fits within the bounds, allowing
/// some upscaling for the smaller variants.
pub fn optimal_image_size(image: &StockImage, max_width: u32, max_height: u32) -> &str {
    let fits = |factor: f64| {
        image.width as f64 <= max_width as f64 * factor
            && image.height as f64 <= max_height as f64 * factor
    };
    if fits(1.0) {
        &image.sizes.original
    } else if fits(1.5) {
        &image.sizes.large
    } else if fits(2.0) {
        &image.sizes.medium
    } else {
        &image.sizes.small
    }
}
