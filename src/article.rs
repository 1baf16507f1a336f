use serde::{Deserialize, Serialize};

use crate::mapping::{article_from_shared, article_from_standard, section_from_entry};
use crate::selector::LatestSection;
use crate::types::{lenient_items, RawResponse, SectionEntry, SharedArticle, StandardArticle};

/// Which wire layout an article was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleShape {
    Standard,
    Shared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    pub title: String,
    pub byline: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub url: String,
    pub media: Vec<Media>,
    pub shape: ArticleShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Media {
    pub caption: Option<String>,
    pub width: u32,
    pub height: u32,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of every article endpoint.
///
/// `results` is decoded as standard articles first; if any element fails, the
/// whole list is decoded again as shared (metrics) articles.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawResponse")]
pub struct ArticleResponse {
    pub status: String,
    pub results: Vec<Article>,
}

impl TryFrom<RawResponse> for ArticleResponse {
    type Error = serde_json::Error;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let results = match Vec::<StandardArticle>::deserialize(&raw.results) {
            Ok(list) => list.into_iter().map(article_from_standard).collect(),
            Err(_) => Vec::<SharedArticle>::deserialize(&raw.results)?.into_iter().map(article_from_shared).collect(),
        };
        Ok(Self { status: raw.status, results })
    }
}

/// Body of the section list endpoint. `results` always starts with [`LatestSection::All`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawResponse")]
pub struct SectionResponse {
    pub status: String,
    pub results: Vec<LatestSection>,
}

impl From<RawResponse> for SectionResponse {
    fn from(raw: RawResponse) -> Self {
        let entries = lenient_items::<SectionEntry>(raw.results).unwrap_or_default();
        let results = std::iter::once(LatestSection::All).chain(entries.into_iter().map(section_from_entry)).collect();
        Self { status: raw.status, results }
    }
}
