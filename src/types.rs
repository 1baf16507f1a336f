//! Wire shapes returned by the API.
//!
//! Several endpoints return the same logical article in different layouts. The
//! API also returns `""` where an empty array is meant, so list fields are read
//! leniently: a field that is not an array reads as absent, and elements that fail
//! to decode are dropped instead of failing the whole article.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Shape used by top stories and latest news.
#[derive(Debug, Deserialize)]
pub(crate) struct StandardArticle {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub byline: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    pub url: String,
    #[allow(dead_code)]
    pub item_type: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub multimedia: Option<Vec<StandardMedia>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandardMedia {
    pub caption: Option<String>,
    pub height: u32,
    pub width: u32,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Shape used by the most-popular (viewed/shared/emailed) metrics endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct SharedArticle {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub byline: Option<String>,
    #[serde(default, rename = "abstract", deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    pub url: String,
    #[serde(default, rename = "media", deserialize_with = "lenient_list")]
    pub media: Option<Vec<SharedMedia>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SharedMedia {
    #[serde(default, deserialize_with = "lenient_string")]
    pub caption: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, rename = "media-metadata", deserialize_with = "lenient_list")]
    pub metadata: Option<Vec<SharedMetadata>>,
}

/// One rendition (size) of a shared media item.
#[derive(Debug, Deserialize)]
pub(crate) struct SharedMetadata {
    pub height: u32,
    pub width: u32,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SectionEntry {
    pub section: String,
    pub display_name: String,
}

/// Response envelope before the `results` array has been interpreted.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    pub status: String,
    #[serde(default)]
    pub results: Value,
}

fn lenient_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? { Value::String(s) => Some(s), _ => None })
}

fn lenient_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_items(Value::deserialize(d)?))
}

/// Decode each element of a JSON array on its own, dropping those that fail.
/// Returns `None` if `value` is not an array.
pub(crate) fn lenient_items<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    match value {
        Value::Array(items) => Some(items.into_iter().filter_map(|item| serde_json::from_value(item).ok()).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_article_tolerates_bad_media_elements() {
        let a: StandardArticle = serde_json::from_value(json!({
            "title": "T", "url": "https://nyt.com/a", "item_type": "Article",
            "byline": "By Someone", "abstract": "A",
            "multimedia": [
                {"caption": "c", "height": 100, "width": 200, "url": "https://img/1", "type": "image"},
                {"caption": "c", "height": 100, "width": 200, "type": "image"},
                {"caption": null, "height": 50, "width": 75, "url": "https://img/2", "type": "image"}
            ]
        }))
        .unwrap();
        let media = a.multimedia.unwrap();
        assert_eq!(media.len(), 2);
        assert_eq!(media[1].url, "https://img/2");
        assert!(media[1].caption.is_none());
    }

    #[test]
    fn empty_string_media_reads_as_absent() {
        let a: StandardArticle = serde_json::from_value(json!({
            "title": "T", "url": "u", "item_type": "Article", "byline": 12, "multimedia": ""
        }))
        .unwrap();
        assert!(a.multimedia.is_none());
        assert!(a.byline.is_none());
        assert!(a.summary.is_none());
    }

    #[test]
    fn standard_article_requires_item_type() {
        let r = serde_json::from_value::<StandardArticle>(json!({"title": "T", "url": "u"}));
        assert!(r.is_err());
    }

    #[test]
    fn shared_media_keeps_valid_renditions() {
        let m: SharedMedia = serde_json::from_value(json!({
            "type": "image", "caption": 5,
            "media-metadata": [{"url": "x"}, {"height": 1, "width": 2, "url": "y"}]
        }))
        .unwrap();
        assert!(m.caption.is_none());
        let meta = m.metadata.unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].url, "y");
    }

    #[test]
    fn lenient_items_rejects_non_arrays() {
        assert!(lenient_items::<SectionEntry>(json!({"section": "x"})).is_none());
        assert!(lenient_items::<SectionEntry>(Value::Null).is_none());
        let some = lenient_items::<SectionEntry>(json!([{"section": "a", "display_name": "A"}, {"section": 1}])).unwrap();
        assert_eq!(some.len(), 1);
    }
}
