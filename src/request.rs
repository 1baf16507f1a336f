use serde::de::DeserializeOwned;
use url::Url;

use crate::api::ApiError;
use crate::article::{ArticleResponse, SectionResponse};
use crate::selector::{ArticleSection, ContentSelector, LatestSection, ShareType};

const POPULAR_PATH: &str = "svc/mostpopular/v2";
const NEWS_PATH: &str = "svc/news/v3/content";
const TOP_PATH: &str = "svc/topstories/v2";

/// A concrete GET request against the API, relative to the API root.
///
/// The path is kept as segments so that a segment taken from server data (a
/// catalog slug) is percent-encoded as a whole and cannot change the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Fixed path; `/` separates segments.
    pub fn new(path: &str) -> Self {
        Self { segments: path.split('/').map(str::to_string).collect(), query: Vec::new() }
    }

    /// Append one segment verbatim.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Unencoded path, for logging and lookups.
    pub fn path(&self) -> String { self.segments.join("/") }

    /// Resolve against `base`, appending the request's query and the api key (if any).
    pub fn url(&self, base: &Url, api_key: Option<&str>) -> Result<Url, ApiError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{base} cannot carry a path")))?
            .pop_if_empty()
            .extend(&self.segments);
        if !self.query.is_empty() || api_key.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query { pairs.append_pair(k, v); }
            if let Some(key) = api_key { pairs.append_pair("api-key", key); }
        }
        Ok(url)
    }
}

/// A request with a known response body type.
pub trait ApiRequest {
    type Response: DeserializeOwned;
    fn descriptor(&self) -> RequestDescriptor;
}

/// Article sources for the latest-news API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArticleSource {
    #[default]
    All,
    Nyt,
    Inyt,
}

impl ArticleSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nyt => "nyt",
            Self::Inyt => "inyt",
        }
    }
}

/// Look-back window for the most-popular APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArticleInterval {
    Day,
    #[default]
    Week,
    Month,
}

impl ArticleInterval {
    pub fn days(&self) -> u32 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleRequest {
    TopStories { section: ArticleSection },
    MostViewed { last: ArticleInterval },
    MostShared { share: ShareType, last: ArticleInterval },
    MostEmailed { last: ArticleInterval },
    Latest { source: ArticleSource, section: LatestSection },
}

impl From<&ContentSelector> for ArticleRequest {
    fn from(selector: &ContentSelector) -> Self {
        match selector {
            ContentSelector::Top { section } => Self::TopStories { section: *section },
            ContentSelector::Latest { section } => Self::Latest { source: ArticleSource::All, section: section.clone() },
            ContentSelector::MostViewed => Self::MostViewed { last: ArticleInterval::Week },
            ContentSelector::MostShared { share } => Self::MostShared { share: *share, last: ArticleInterval::Week },
        }
    }
}

impl ApiRequest for ArticleRequest {
    type Response = ArticleResponse;

    fn descriptor(&self) -> RequestDescriptor {
        let path = match self {
            Self::TopStories { section } => format!("{TOP_PATH}/{}.json", section.as_str()),
            Self::MostViewed { last } => format!("{POPULAR_PATH}/viewed/{}.json", last.days()),
            Self::MostShared { share: ShareType::All, last } => format!("{POPULAR_PATH}/shared/{}.json", last.days()),
            Self::MostShared { share, last } => format!("{POPULAR_PATH}/shared/{}/{}.json", last.days(), share.as_str()),
            Self::MostEmailed { last } => format!("{POPULAR_PATH}/emailed/{}.json", last.days()),
            // slug comes from the section catalog
            Self::Latest { source, section } => {
                return RequestDescriptor::new(&format!("{NEWS_PATH}/{}", source.as_str()))
                    .segment(format!("{}.json", section.slug()));
            }
        };
        RequestDescriptor::new(&path)
    }
}

/// Request for the catalog of sections available to the latest-news API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionRequest;

impl ApiRequest for SectionRequest {
    type Response = SectionResponse;

    fn descriptor(&self) -> RequestDescriptor { RequestDescriptor::new(&format!("{NEWS_PATH}/section-list.json")) }
}

/// Translate the selected feed into the request that fetches it.
pub fn translate(selector: &ContentSelector) -> RequestDescriptor { ArticleRequest::from(selector).descriptor() }
