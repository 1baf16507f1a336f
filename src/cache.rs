use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::article::Article;
use crate::selector::ContentSelector;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: Instant,
    pub articles: Vec<Article>,
}

impl CacheEntry {
    /// True once the entry is strictly older than `debounce`.
    pub fn is_stale(&self, now: Instant, debounce: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) > debounce
    }
}

/// Last successful result per selector.
///
/// Entries are overwritten on every successful load and never evicted; the
/// number of distinct selectors a session visits is small.
#[derive(Debug, Default)]
pub struct ArticleCache {
    entries: HashMap<ContentSelector, CacheEntry>,
}

impl ArticleCache {
    pub fn get(&self, selector: &ContentSelector) -> Option<&CacheEntry> { self.entries.get(selector) }

    pub fn insert(&mut self, selector: ContentSelector, articles: Vec<Article>, now: Instant) {
        self.entries.insert(selector, CacheEntry { fetched_at: now, articles });
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn selectors(&self) -> impl Iterator<Item = &ContentSelector> { self.entries.keys() }
}
