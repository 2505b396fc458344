//! Built-in outline icon set rendered as inline SVG
use anyhow::{Error, Result};
use async_trait::async_trait;

use super::AssetProvider;
use super::models::{
    Asset, AssetKind, Icon, IconDownloads, IconFormat, IconStyle, SearchParams, SearchResponse,
    Source, page_count,
};

pub const ICON_CATEGORIES: &[&str] = &[
    "arrow", "check", "close", "home", "user", "settings", "search", "heart", "star", "plus",
    "minus", "edit", "delete", "save", "share", "download", "upload", "refresh", "play", "pause",
    "stop", "next", "previous", "volume", "mute", "wifi", "battery", "location", "calendar",
    "clock", "mail", "phone", "message", "camera", "image", "video", "file", "folder",
];

/// Icon prefix served by the built-in set
pub const SIMPLE_PREFIX: &str = "simple";

const DEFAULT_GLYPH: &str = r#"<circle cx="12" cy="12" r="10"/><path d="M8 12h8m-4-4v8"/>"#;

fn glyph(name: &str) -> &'static str {
    match name {
        "arrow" => r#"<path d="M5 12h14m-7-7l7 7-7 7"/>"#,
        "check" => r#"<path d="M20 6L9 17l-5-5"/>"#,
        "close" => r#"<path d="M18 6L6 18M6 6l12 12"/>"#,
        "home" => {
            r#"<path d="M3 9l9-7 9 7v11a2 2 0 01-2 2H5a2 2 0 01-2-2z"/><polyline points="9,22 9,12 15,12 15,22"/>"#
        }
        "user" => {
            r#"<path d="M20 21v-2a4 4 0 00-4-4H8a4 4 0 00-4 4v2"/><circle cx="12" cy="7" r="4"/>"#
        }
        "settings" => {
            r#"<circle cx="12" cy="12" r="3"/><path d="M19.4 15a1.65 1.65 0 00.33 1.82l.06.06a2 2 0 010 2.83 2 2 0 01-2.83 0l-.06-.06a1.65 1.65 0 00-1.82-.33 1.65 1.65 0 00-1 1.51V21a2 2 0 01-2 2 2 2 0 01-2-2v-.09A1.65 1.65 0 009 19.4a1.65 1.65 0 00-1.82.33l-.06.06a2 2 0 01-2.83 0 2 2 0 010-2.83l.06-.06a1.65 1.65 0 00.33-1.82 1.65 1.65 0 00-1.51-1H3a2 2 0 01-2-2 2 2 0 012-2h.09A1.65 1.65 0 004.6 9a1.65 1.65 0 00-.33-1.82l-.06-.06a2 2 0 010-2.83 2 2 0 012.83 0l.06.06a1.65 1.65 0 001.82.33H9a1.65 1.65 0 001-1.51V3a2 2 0 012-2 2 2 0 012 2v.09a1.65 1.65 0 001 1.51 1.65 1.65 0 001.82-.33l.06-.06a2 2 0 012.83 0 2 2 0 010 2.83l-.06.06a1.65 1.65 0 00-.33 1.82V9a1.65 1.65 0 001.51 1H21a2 2 0 012 2 2 2 0 01-2 2h-.09a1.65 1.65 0 00-1.51 1z"/>"#
        }
        "search" => r#"<circle cx="11" cy="11" r="8"/><path d="M21 21l-4.35-4.35"/>"#,
        "heart" => {
            r#"<path d="M20.84 4.61a5.5 5.5 0 00-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 00-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 000-7.78z"/>"#
        }
        "star" => {
            r#"<polygon points="12,2 15.09,8.26 22,9.27 17,14.14 18.18,21.02 12,17.77 5.82,21.02 7,14.14 2,9.27 8.91,8.26"/>"#
        }
        "plus" => r#"<path d="M12 5v14m-7-7h14"/>"#,
        "minus" => r#"<path d="M5 12h14"/>"#,
        "edit" => {
            r#"<path d="M11 4H4a2 2 0 00-2 2v14a2 2 0 002 2h14a2 2 0 002-2v-7"/><path d="M18.5 2.5a2.12 2.12 0 013 3L12 15l-4 1 1-4 9.5-9.5z"/>"#
        }
        "delete" => {
            r#"<polyline points="3,6 5,6 21,6"/><path d="M19 6v14a2 2 0 01-2 2H7a2 2 0 01-2-2V6m3 0V4a2 2 0 012-2h4a2 2 0 012 2v2"/>"#
        }
        "save" => {
            r#"<path d="M19 21H5a2 2 0 01-2-2V5a2 2 0 012-2h11l5 5v11a2 2 0 01-2 2z"/><polyline points="17,21 17,13 7,13 7,21"/><polyline points="7,3 7,8 15,8"/>"#
        }
        "share" => {
            r#"<circle cx="18" cy="5" r="3"/><circle cx="6" cy="12" r="3"/><circle cx="18" cy="19" r="3"/><path d="M8.59 13.51l6.83 3.98m-.01-10.98l-6.82 3.98"/>"#
        }
        "download" => {
            r#"<path d="M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4m4-5l5 5 5-5m-5-5v12"/>"#
        }
        "upload" => {
            r#"<path d="M21 15v4a2 2 0 01-2 2H5a2 2 0 01-2-2v-4m4-7l5-5 5 5m-5 10V3"/>"#
        }
        _ => DEFAULT_GLYPH,
    }
}

/// Render the named icon as a standalone 24x24 SVG document. Unknown
/// names get the default glyph.
pub fn render_svg(name: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">{}</svg>"#,
        glyph(name)
    )
}

/// SVG for an icon addressed by `{prefix}/{name}`
pub fn icon_svg(prefix: &str, name: &str) -> String {
    if prefix == SIMPLE_PREFIX {
        render_svg(name)
    } else {
        render_svg("default")
    }
}

pub fn svg_data_url(svg: &str) -> String {
    format!(
        "data:image/svg+xml;charset=utf-8,{}",
        urlencoding::encode(svg)
    )
}

/// Categories whose name overlaps the query. Falls back to the whole
/// set so an icon search never comes back empty.
pub fn matching_categories(query: &str) -> Vec<&'static str> {
    let query = query.to_lowercase();
    let matches: Vec<&'static str> = ICON_CATEGORIES
        .iter()
        .copied()
        .filter(|c| c.contains(query.as_str()) || query.contains(c))
        .collect();

    if matches.is_empty() {
        ICON_CATEGORIES.to_vec()
    } else {
        matches
    }
}

#[derive(Default)]
pub struct SimpleIcons;

impl SimpleIcons {
    const MAX_PER_PAGE: u32 = 20;
}

#[async_trait]
impl AssetProvider for SimpleIcons {
    fn name(&self) -> &'static str {
        "simple-icons"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Icon
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        // Every built-in icon is an outline icon
        if let Some(style) = &params.style
            && !style.eq_ignore_ascii_case("outline")
        {
            return Ok(SearchResponse::empty(params.page));
        }

        let per_page = params.per_page.min(Self::MAX_PER_PAGE) as usize;
        let page = params.page;
        let categories = matching_categories(&params.query);

        let start = (page as usize).saturating_sub(1) * per_page;
        let end = (start + per_page).min(categories.len());

        let assets = categories
            .iter()
            .enumerate()
            .skip(start)
            .take(per_page)
            .map(|(i, category)| {
                let data_url = svg_data_url(&render_svg(category));
                Asset::Icon(Icon {
                    id: format!("icon-{}-{}", category, i),
                    url: data_url.clone(),
                    thumbnail_url: None,
                    preview_url: None,
                    alt: Some(format!("{} icon", category)),
                    tags: vec![
                        category.to_string(),
                        String::from("icon"),
                        String::from("simple"),
                        params.query.clone(),
                    ],
                    source: Source::SimpleIcons,
                    category: String::from("general"),
                    style: IconStyle::Outline,
                    format: IconFormat::Svg,
                    sizes: vec![24],
                    vector_url: Some(data_url.clone()),
                    download_urls: IconDownloads {
                        svg: Some(data_url),
                        png: None,
                    },
                    attribution: Some(String::from("Built-in icon collection")),
                    license: Some(String::from("Free for commercial and personal use")),
                })
            })
            .collect();

        let total = categories.len() as u64;
        Ok(SearchResponse {
            assets,
            total,
            total_pages: page_count(total, per_page as u32),
            current_page: page,
            has_more: end < categories.len(),
        })
    }
}
