use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Topic sections accepted by the top stories API.
/// Wire names are path segments in the API and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSection {
    Arts,
    Automobiles,
    Books,
    Business,
    Fashion,
    Food,
    Health,
    Home,
    Insider,
    Magazine,
    Movies,
    Nyregion,
    Obituaries,
    Opinion,
    Politics,
    Realestate,
    Science,
    Sports,
    Sundayreview,
    Technology,
    Theater,
    Travel,
    Upshot,
    Us,
    World,
}

impl ArticleSection {
    pub const ALL: [ArticleSection; 25] = [
        Self::Arts, Self::Automobiles, Self::Books, Self::Business, Self::Fashion,
        Self::Food, Self::Health, Self::Home, Self::Insider, Self::Magazine,
        Self::Movies, Self::Nyregion, Self::Obituaries, Self::Opinion, Self::Politics,
        Self::Realestate, Self::Science, Self::Sports, Self::Sundayreview, Self::Technology,
        Self::Theater, Self::Travel, Self::Upshot, Self::Us, Self::World,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Arts => "arts",
            Self::Automobiles => "automobiles",
            Self::Books => "books",
            Self::Business => "business",
            Self::Fashion => "fashion",
            Self::Food => "food",
            Self::Health => "health",
            Self::Home => "home",
            Self::Insider => "insider",
            Self::Magazine => "magazine",
            Self::Movies => "movies",
            Self::Nyregion => "nyregion",
            Self::Obituaries => "obituaries",
            Self::Opinion => "opinion",
            Self::Politics => "politics",
            Self::Realestate => "realestate",
            Self::Science => "science",
            Self::Sports => "sports",
            Self::Sundayreview => "sundayreview",
            Self::Technology => "technology",
            Self::Theater => "theater",
            Self::Travel => "travel",
            Self::Upshot => "upshot",
            Self::Us => "us",
            Self::World => "world",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Arts => "Arts",
            Self::Automobiles => "Automobiles",
            Self::Books => "Books",
            Self::Business => "Business",
            Self::Fashion => "Fashion",
            Self::Food => "Food",
            Self::Health => "Health",
            Self::Home => "Home",
            Self::Insider => "Insider",
            Self::Magazine => "Magazine",
            Self::Movies => "Movies",
            Self::Nyregion => "NY Region",
            Self::Obituaries => "Obituaries",
            Self::Opinion => "Opinion",
            Self::Politics => "Politics",
            Self::Realestate => "Real Estate",
            Self::Science => "Science",
            Self::Sports => "Sports",
            Self::Sundayreview => "Sunday Review",
            Self::Technology => "Tech",
            Self::Theater => "Theater",
            Self::Travel => "Travel",
            Self::Upshot => "Upshot",
            Self::Us => "US",
            Self::World => "World",
        }
    }
}

impl FromStr for ArticleSection {
    type Err = ParseSelectorError;

    /// Accepts either the wire name or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s) || v.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError::UnknownSection(s.to_string()))
    }
}

impl fmt::Display for ArticleSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.display_name()) }
}

/// Social share breakdowns offered by the most-shared API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    #[default]
    All,
    Facebook,
    Twitter,
}

impl ShareType {
    pub const ALL: [ShareType; 3] = [Self::All, Self::Facebook, Self::Twitter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
        }
    }
}

impl FromStr for ShareType {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError::UnknownShareType(s.to_string()))
    }
}

/// Entry of the section catalog used by the "latest" feeds.
/// The catalog is loaded from the API; `All` is the sentinel that is always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub enum LatestSection {
    #[default]
    All,
    Section { name: String, display_name: String },
}

impl LatestSection {
    pub fn section(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::Section { name: name.into(), display_name: display_name.into() }
    }

    /// Path segment for the latest-news endpoint.
    pub fn slug(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Section { name, .. } => name,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Section { display_name, .. } => display_name,
        }
    }
}

/// Identifies which article feed is being viewed. Used as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum ContentSelector {
    Top { section: ArticleSection },
    Latest { section: LatestSection },
    MostViewed,
    MostShared { share: ShareType },
}

impl Default for ContentSelector {
    fn default() -> Self { Self::Top { section: ArticleSection::Home } }
}

impl ContentSelector {
    pub fn top(section: ArticleSection) -> Self { Self::Top { section } }
    pub fn latest(section: LatestSection) -> Self { Self::Latest { section } }
    pub fn most_shared(share: ShareType) -> Self { Self::MostShared { share } }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Latest { .. } => "Latest",
            Self::Top { .. } => "Top",
            Self::MostViewed => "Most Viewed",
            Self::MostShared { .. } => "Most Shared",
        }
    }
}

impl fmt::Display for ContentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top { section } => write!(f, "top/{}", section.as_str()),
            Self::Latest { section } => write!(f, "latest/{}", section.slug()),
            Self::MostViewed => f.write_str("most-viewed"),
            Self::MostShared { share } => write!(f, "most-shared/{}", share.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSelectorError {
    #[error("unknown section: {0}")]
    UnknownSection(String),
    #[error("unknown share type: {0} (expected all, facebook or twitter)")]
    UnknownShareType(String),
}
