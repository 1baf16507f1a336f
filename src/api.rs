use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::request::{ApiRequest, RequestDescriptor};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
    #[error("unexpected http status {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("empty response body")]
    EmptyResponse,
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self { ApiError::Transport(e.to_string()) }
}

/// Performs GET requests against the article API and returns the raw body.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, request: &RequestDescriptor) -> Result<String, ApiError>;
}

/// Issue `request` through `client` and decode its typed response.
pub async fn fetch<R: ApiRequest + ?Sized>(client: &dyn ApiClient, request: &R) -> Result<R::Response, ApiError> {
    let body = client.get(&request.descriptor()).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Production client for api.nytimes.com.
pub struct NytClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Option<String>,
}

impl NytClient {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).with_context(|| format!("invalid base url: {}", config.base_url))?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .context("building http client")?;
        Ok(Self { http, base_url, api_key: config.api_key.clone() })
    }

    pub fn base_url(&self) -> &Url { &self.base_url }
}

#[async_trait]
impl ApiClient for NytClient {
    async fn get(&self, request: &RequestDescriptor) -> Result<String, ApiError> {
        let url = request.url(&self.base_url, self.api_key.as_deref())?;
        // url carries the api key; log the path only
        debug!(path = %request.path(), "GET");
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ApiError::HttpStatus { status: status.as_u16(), body });
        }
        if body.is_empty() { return Err(ApiError::EmptyResponse); }
        Ok(body)
    }
}
