//! Test doubles and response fixtures.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::watch;

use crate::api::{ApiClient, ApiError};
use crate::request::RequestDescriptor;

/// Serves canned bodies keyed by request path. Unknown paths answer 400 like an
/// unmocked endpoint. Paths can be held so their responses wait until released.
pub(crate) struct MockApiClient {
    responses: Mutex<HashMap<String, Result<String, u16>>>,
    calls: Mutex<Vec<String>>,
    held: watch::Sender<HashSet<String>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        let (held, _) = watch::channel(HashSet::new());
        Self { responses: Mutex::new(HashMap::new()), calls: Mutex::new(Vec::new()), held }
    }

    pub fn respond(&self, path: &str, body: String) {
        self.responses.lock().unwrap().insert(path.to_string(), Ok(body));
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.responses.lock().unwrap().insert(path.to_string(), Err(status));
    }

    pub fn calls(&self, path: &str) -> usize { self.calls.lock().unwrap().iter().filter(|p| *p == path).count() }

    pub fn total_calls(&self) -> usize { self.calls.lock().unwrap().len() }

    pub fn hold(&self, path: &str) {
        self.held.send_modify(|held| {
            held.insert(path.to_string());
        });
    }

    pub fn release(&self, path: &str) {
        self.held.send_modify(|held| {
            held.remove(path);
        });
    }
}

#[async_trait]
impl ApiClient for MockApiClient {
    async fn get(&self, request: &RequestDescriptor) -> Result<String, ApiError> {
        self.calls.lock().unwrap().push(request.path());
        let mut rx = self.held.subscribe();
        let _ = rx.wait_for(|held| !held.contains(&request.path())).await;
        let response = self.responses.lock().unwrap().get(&request.path()).cloned();
        match response {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(ApiError::HttpStatus { status, body: "mock failure".into() }),
            None => Err(ApiError::HttpStatus { status: 400, body: "Unmocked URL".into() }),
        }
    }
}

fn standard_media(i: usize) -> Value {
    json!({
        "url": format!("https://static01.nyt.com/images/{i}/thumb.jpg"),
        "format": "thumbLarge",
        "height": 150,
        "width": 150,
        "type": "image",
        "subtype": "photo",
        "caption": format!("Photo {i}")
    })
}

/// Top stories / latest news body with `count` articles titled `{prefix} {i}`.
pub(crate) fn standard_body(prefix: &str, count: usize) -> String {
    let results: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "section": "home",
                "title": format!("{prefix} {i}"),
                "abstract": format!("Abstract {i}"),
                "url": format!("https://www.nytimes.com/2020/02/17/{}/{i}.html", prefix.to_lowercase()),
                "byline": format!("By Reporter {i}"),
                "item_type": "Article",
                "multimedia": [standard_media(i)]
            })
        })
        .collect();
    json!({"status": "OK", "num_results": count, "results": results}).to_string()
}

/// Most-popular body with `count` articles; the article at `no_media` carries `""`
/// instead of a media list, as the API does.
pub(crate) fn shared_body(count: usize, no_media: Option<usize>) -> String {
    let results: Vec<Value> = (0..count)
        .map(|i| {
            let media = if Some(i) == no_media {
                json!("")
            } else {
                json!([{
                    "type": "image",
                    "subtype": "photo",
                    "caption": format!("Shared {i}"),
                    "media-metadata": [
                        {"url": format!("https://static01.nyt.com/{i}/thumbStandard.jpg"), "format": "Standard Thumbnail", "height": 75, "width": 75},
                        {"url": format!("https://static01.nyt.com/{i}/mediumThreeByTwo440.jpg"), "format": "mediumThreeByTwo440", "height": 293, "width": 440}
                    ]
                }])
            };
            json!({
                "url": format!("https://www.nytimes.com/2020/02/16/shared/{i}.html"),
                "type": "Article",
                "title": format!("Shared {i}"),
                "byline": format!("By Columnist {i}"),
                "abstract": format!("Shared abstract {i}"),
                "media": media
            })
        })
        .collect();
    json!({"status": "OK", "num_results": count, "results": results}).to_string()
}

/// Section list with `valid` entries followed by one entry lacking `display_name`.
pub(crate) fn sections_body(valid: usize) -> String {
    let mut results: Vec<Value> =
        (0..valid).map(|i| json!({"section": format!("section-{i}"), "display_name": format!("Section {i}")})).collect();
    results.push(json!({"section": "broken"}));
    json!({"status": "OK", "num_results": results.len(), "results": results}).to_string()
}
