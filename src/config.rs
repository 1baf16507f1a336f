use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::controller::CACHE_DEBOUNCE;

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Minimum age before a cached feed is refetched in the background.
    pub debounce_secs: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_secs: CACHE_DEBOUNCE.as_secs(),
            request_timeout_ms: 5_000,
            user_agent: concat!("nyt-viewer/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the platform config dir when `path` is None, then
    /// apply `NYT_VIEWER_*` environment overrides. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        cfg.apply_overrides(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("NYT_VIEWER_API_KEY").filter(|s| !s.trim().is_empty()) { self.api_key = Some(key); }
        if let Some(url) = lookup("NYT_VIEWER_BASE_URL").filter(|s| !s.trim().is_empty()) { self.base_url = url; }
        if let Some(secs) = lookup("NYT_VIEWER_DEBOUNCE_SECS").and_then(|s| s.parse().ok()) { self.debounce_secs = secs; }
        if let Some(ms) = lookup("NYT_VIEWER_TIMEOUT_MS").and_then(|s| s.parse().ok()) { self.request_timeout_ms = ms; }
    }

    pub fn debounce(&self) -> Duration { Duration::from_secs(self.debounce_secs) }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "nyt-viewer", "nyt-viewer").map(|p| p.config_dir().join("config.toml"))
}
