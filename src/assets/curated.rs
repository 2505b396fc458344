//! Curated demo photos matched against the query by keyword
use anyhow::{Error, Result};
use async_trait::async_trait;

use super::AssetProvider;
use super::models::{
    Asset, AssetKind, SearchParams, SearchResponse, Source, StockImage, page_count,
};
use super::placeholder::picsum_urls;
use super::similarity::similarity;

/// Minimum keyword similarity for a fuzzy match
pub const FUZZY_THRESHOLD: f64 = 0.6;

#[derive(Debug)]
pub struct CuratedEntry {
    pub id: &'static str,
    pub keywords: &'static [&'static str],
    pub description: &'static str,
    pub picsum_seed: u32,
}

const fn entry(
    id: &'static str,
    keywords: &'static [&'static str],
    description: &'static str,
    picsum_seed: u32,
) -> CuratedEntry {
    CuratedEntry {
        id,
        keywords,
        description,
        picsum_seed,
    }
}

#[rustfmt::skip]
pub static COLLECTION: &[(&str, &[CuratedEntry])] = &[
    (
        "nature",
        &[
            entry("forest-1", &["forest", "tree", "green", "nature", "woods"], "Misty forest landscape", 1015),
            entry("mountain-1", &["mountain", "landscape", "nature", "sky", "peak"], "Mountain peak at sunrise", 1018),
            entry("ocean-1", &["ocean", "sea", "water", "blue", "waves"], "Ocean waves crashing", 1022),
            entry("flower-1", &["flower", "bloom", "nature", "colorful", "garden"], "Colorful wildflowers", 1061),
            entry("sunset-1", &["sunset", "sun", "sky", "nature", "golden"], "Golden sunset over lake", 1073),
            entry("waterfall-1", &["waterfall", "water", "nature", "rocks"], "Cascading waterfall", 433),
        ],
    ),
    (
        "animals",
        &[
            entry("cat-1", &["cat", "pet", "animal", "cute", "feline"], "Adorable orange cat", 1074),
            entry("dog-1", &["dog", "pet", "animal", "cute", "canine"], "Happy golden retriever", 1025),
            entry("bird-1", &["bird", "animal", "wildlife", "flying"], "Bird in flight", 1069),
            entry("butterfly-1", &["butterfly", "insect", "colorful", "nature"], "Colorful butterfly", 1063),
            entry("ant-1", &["ant", "insect", "bug", "tiny", "worker"], "Ant carrying food", 1070),
            entry("elephant-1", &["elephant", "animal", "wildlife", "large"], "Majestic elephant", 1071),
        ],
    ),
    (
        "technology",
        &[
            entry("laptop-1", &["laptop", "computer", "technology", "work"], "Modern laptop on desk", 1181),
            entry("phone-1", &["phone", "mobile", "smartphone", "technology"], "Smartphone with apps", 1051),
            entry("coding-1", &["code", "programming", "developer", "screen"], "Code on screen", 1194),
            entry("robot-1", &["robot", "ai", "artificial", "intelligence"], "Futuristic robot", 1065),
            entry("circuit-1", &["circuit", "electronics", "technology", "board"], "Circuit board close-up", 1066),
        ],
    ),
    (
        "business",
        &[
            entry("office-1", &["office", "business", "work", "corporate"], "Modern office space", 1072),
            entry("meeting-1", &["meeting", "business", "teamwork", "discussion"], "Business meeting", 1180),
            entry("handshake-1", &["handshake", "business", "deal", "partnership"], "Professional handshake", 1184),
            entry("chart-1", &["chart", "graph", "data", "analytics"], "Business analytics", 1067),
        ],
    ),
    (
        "food",
        &[
            entry("pizza-1", &["pizza", "food", "italian", "delicious"], "Fresh pizza slice", 1080),
            entry("coffee-1", &["coffee", "drink", "cafe", "morning"], "Perfect coffee cup", 1058),
            entry("salad-1", &["salad", "healthy", "vegetables", "fresh"], "Fresh garden salad", 1059),
            entry("fruit-1", &["fruit", "healthy", "colorful", "fresh"], "Colorful fruit bowl", 1060),
        ],
    ),
    (
        "travel",
        &[
            entry("city-1", &["city", "urban", "skyline", "buildings"], "Modern city skyline", 1190),
            entry("beach-1", &["beach", "vacation", "sand", "tropical"], "Tropical beach paradise", 1076),
            entry("bridge-1", &["bridge", "architecture", "travel", "landmark"], "Iconic bridge view", 1077),
            entry("road-1", &["road", "travel", "journey", "adventure"], "Open road adventure", 1078),
        ],
    ),
];

fn all_entries() -> impl Iterator<Item = &'static CuratedEntry> {
    COLLECTION.iter().flat_map(|(_, entries)| entries.iter())
}

/// Entries relevant to `query`, exact keyword hits first.
///
/// Substring matches in either direction win. Only when nothing matches
/// that way are keywords compared by edit-distance similarity.
pub fn rank_entries(query: &str) -> Vec<&'static CuratedEntry> {
    let query = query.to_lowercase();

    let mut matches: Vec<&CuratedEntry> = all_entries()
        .filter(|e| {
            e.keywords
                .iter()
                .any(|k| k.contains(query.as_str()) || query.contains(k))
        })
        .collect();

    if matches.is_empty() {
        matches = all_entries()
            .filter(|e| {
                e.keywords
                    .iter()
                    .any(|k| similarity(k, &query) > FUZZY_THRESHOLD)
            })
            .collect();
    }

    // Stable, so ties keep collection order
    matches.sort_by_key(|e| !e.keywords.contains(&query.as_str()));
    matches
}

pub struct CuratedImages {
    picsum_url: String,
}

impl CuratedImages {
    const MAX_PER_PAGE: u32 = 12;

    pub fn new(picsum_url: &str) -> Self {
        Self {
            picsum_url: picsum_url.to_string(),
        }
    }

    fn to_image(&self, entry: &CuratedEntry, width: u32, height: u32) -> StockImage {
        let urls = picsum_urls(
            &self.picsum_url,
            &entry.picsum_seed.to_string(),
            width,
            height,
        );
        let mut tags: Vec<String> = entry.keywords.iter().map(|k| k.to_string()).collect();
        tags.push(String::from("curated"));
        tags.push(String::from("demo"));

        StockImage {
            id: format!("curated-{}", entry.id),
            url: urls.url.clone(),
            thumbnail_url: Some(urls.thumbnail),
            preview_url: Some(urls.preview),
            alt: Some(entry.description.to_string()),
            tags,
            source: Source::CuratedDemo,
            width,
            height,
            aspect_ratio: width as f64 / height as f64,
            photographer: None,
            photographer_url: None,
            download_url: urls.url,
            sizes: urls.sizes,
            colors: vec![String::from("#888888")],
            description: None,
            attribution: Some(format!("Demo: {}", entry.description)),
            license: Some(String::from("Free for demo purposes")),
        }
    }
}

#[async_trait]
impl AssetProvider for CuratedImages {
    fn name(&self) -> &'static str {
        "curated"
    }

    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, Error> {
        let per_page = params.per_page.min(Self::MAX_PER_PAGE) as usize;
        let page = params.page;
        let matches = rank_entries(&params.query);
        let (width, height) = params.placeholder_dimensions();

        let start = (page as usize).saturating_sub(1) * per_page;
        let end = start + per_page;
        let assets = matches
            .iter()
            .skip(start)
            .take(per_page)
            .map(|e| Asset::Image(self.to_image(e, width, height)))
            .collect();

        let total = matches.len() as u64;
        Ok(SearchResponse {
            assets,
            total,
            total_pages: page_count(total, per_page as u32),
            current_page: page,
            has_more: end < matches.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::models::Orientation;

    fn ids(entries: &[&CuratedEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn it_has_every_curated_entry() {
        assert_eq!(all_entries().count(), 29);
    }

    #[test]
    fn it_ranks_exact_matches_first() {
        let ranked = rank_entries("sun");
        assert_eq!(ranked[0].id, "sunset-1");

        let ranked = rank_entries("Water");
        assert_eq!(ids(&ranked[..2]), vec!["ocean-1", "waterfall-1"]);
    }

    #[test]
    fn it_ranks_exact_before_substring_matches() {
        // "ant" is exact for ant-1 and a substring of "elephant"
        let ranked = rank_entries("ant");
        assert!(ranked.len() > 1);
        assert_eq!(ranked[0].id, "ant-1");
        for e in &ranked[1..] {
            assert!(!e.keywords.contains(&"ant"));
        }
    }

    #[test]
    fn it_falls_back_to_fuzzy_matches() {
        let ranked = rank_entries("forrest");
        assert_eq!(ids(&ranked), vec!["forest-1"]);

        let ranked = rank_entries("elephent");
        assert_eq!(ids(&ranked), vec!["elephant-1"]);
    }

    #[test]
    fn it_returns_nothing_for_unrelated_queries() {
        assert!(rank_entries("zzzzqqqq").is_empty());
    }

    #[tokio::test]
    async fn it_paginates_matches() {
        let source = CuratedImages::new("https://picsum.photos");
        assert_eq!(rank_entries("nature").len(), 6);

        let mut params = SearchParams::new("nature");
        params.per_page = 4;

        let first = source.search(&params).await.unwrap();
        assert_eq!(first.assets.len(), 4);
        assert_eq!(first.total, 6);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_more);

        params.page = 2;
        let last = source.search(&params).await.unwrap();
        assert_eq!(last.assets.len(), 2);
        assert_eq!(last.assets[0].id(), "curated-waterfall-1");
        assert!(!last.has_more);

        params.page = 3;
        let past_end = source.search(&params).await.unwrap();
        assert!(past_end.assets.is_empty());
        assert!(!past_end.has_more);
    }

    #[tokio::test]
    async fn it_caps_page_size_at_twelve() {
        let source = CuratedImages::new("https://picsum.photos");
        // A single letter matches nearly every entry by substring
        let params = SearchParams::new("e");
        let resp = source.search(&params).await.unwrap();
        assert_eq!(resp.assets.len(), 12);
        assert!(resp.has_more);
    }

    #[tokio::test]
    async fn it_builds_picsum_urls_for_orientation() {
        let source = CuratedImages::new("https://picsum.photos");
        let mut params = SearchParams::new("cat");
        params.orientation = Some(Orientation::Portrait);

        let resp = source.search(&params).await.unwrap();
        let Asset::Image(image) = &resp.assets[0] else {
            panic!("expected an image");
        };
        assert_eq!(image.id, "curated-cat-1");
        assert_eq!(image.url, "https://picsum.photos/800/1200?random=1074");
        assert_eq!(
            image.thumbnail_url.as_deref(),
            Some("https://picsum.photos/200/150?random=1074")
        );
        assert_eq!(
            image.sizes.original,
            "https://picsum.photos/1600/2400?random=1074"
        );
        assert!(image.tags.contains(&String::from("curated")));
        assert_eq!(image.source, Source::CuratedDemo);
    }
}
