use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use futures::Stream;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{fetch, ApiClient, ApiError};
use crate::article::Article;
use crate::cache::ArticleCache;
use crate::observable::Observable;
use crate::request::{ApiRequest, ArticleRequest, SectionRequest};
use crate::selector::{ContentSelector, LatestSection};

/// Default minimum age before a cached feed is refetched.
pub const CACHE_DEBOUNCE: Duration = Duration::from_secs(30);

/// Keeps the article list for the selected feed, backed by a per-feed cache.
///
/// Operations never wait on the network: loads run as spawned tasks on the
/// current Tokio runtime and their results are applied when they complete. At
/// most one request per selector is in flight at any time. A response that
/// arrives after the user moved to another feed only updates the cache.
///
/// Failed loads are logged and otherwise only visible as the loading flag
/// clearing without new articles.
#[derive(Clone)]
pub struct ArticleListController {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn ApiClient>,
    debounce: Duration,
    state: Mutex<State>,
    articles: Observable<Vec<Article>>,
    loading: Observable<bool>,
    sections: Observable<Vec<LatestSection>>,
    idle: Notify,
}

struct State {
    selector: ContentSelector,
    cache: ArticleCache,
    in_flight: HashMap<ContentSelector, JoinHandle<()>>,
    section_request: Option<JoinHandle<()>>,
}

impl State {
    fn pending(&self) -> usize { self.in_flight.len() + usize::from(self.section_request.is_some()) }
}

impl ArticleListController {
    /// Must be called from within a Tokio runtime. Nothing is fetched until the
    /// selector is set or [`reload_content`](Self::reload_content) is called.
    pub fn new(api: Arc<dyn ApiClient>, debounce: Duration) -> Self {
        let inner = Inner {
            api,
            debounce,
            state: Mutex::new(State {
                selector: ContentSelector::default(),
                cache: ArticleCache::default(),
                in_flight: HashMap::new(),
                section_request: None,
            }),
            articles: Observable::new(Vec::new()),
            loading: Observable::new(false),
            sections: Observable::new(vec![LatestSection::All]),
            idle: Notify::new(),
        };
        Self { inner: Arc::new(inner) }
    }

    pub fn selector(&self) -> ContentSelector { self.inner.lock().selector.clone() }

    /// Select a feed. Cached articles (even stale ones) are published right away;
    /// an unknown feed publishes an empty list. Missing or stale entries are loaded.
    pub fn set_selector(&self, selector: ContentSelector) {
        let mut state = self.inner.lock();
        state.selector = selector.clone();
        self.inner.loading.publish_if_changed(state.in_flight.contains_key(&selector));

        let stale = match state.cache.get(&selector) {
            Some(entry) => {
                self.inner.articles.publish(entry.articles.clone());
                entry.is_stale(Instant::now(), self.inner.debounce)
            }
            None => {
                self.inner.articles.publish(Vec::new());
                true
            }
        };
        if stale { Inner::load(&self.inner, &mut state, selector); }
    }

    /// Reload the current feed regardless of cache age and refresh the section
    /// catalog. Requests already in flight are not duplicated.
    pub fn reload_content(&self) {
        let mut state = self.inner.lock();
        let selector = state.selector.clone();
        Inner::load(&self.inner, &mut state, selector);
        Inner::load_sections(&self.inner, &mut state);
    }

    pub fn articles(&self) -> watch::Receiver<Vec<Article>> { self.inner.articles.subscribe() }
    pub fn loading(&self) -> watch::Receiver<bool> { self.inner.loading.subscribe() }
    pub fn latest_sections(&self) -> watch::Receiver<Vec<LatestSection>> { self.inner.sections.subscribe() }

    pub fn current_articles(&self) -> Vec<Article> { self.inner.articles.get() }
    pub fn is_loading(&self) -> bool { self.inner.loading.get() }
    pub fn current_sections(&self) -> Vec<LatestSection> { self.inner.sections.get() }

    pub fn article_updates(&self) -> impl Stream<Item = Vec<Article>> + Send + 'static { self.inner.articles.updates() }

    /// Requests in flight, including the section catalog request.
    pub fn pending_requests(&self) -> usize { self.inner.lock().pending() }

    pub fn cached_selectors(&self) -> Vec<ContentSelector> { self.inner.lock().cache.selectors().cloned().collect() }

    /// Wait until no request is in flight.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.idle.notified();
            if self.pending_requests() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

    fn load(this: &Arc<Self>, state: &mut State, selector: ContentSelector) {
        if state.in_flight.contains_key(&selector) {
            debug!(%selector, "request already in flight");
            return;
        }
        let request = ArticleRequest::from(&selector);
        debug!(%selector, path = %request.descriptor().path(), "loading articles");

        let api = this.api.clone();
        let weak = Arc::downgrade(this);
        let key = selector.clone();
        let handle = tokio::spawn(async move {
            let result = fetch(api.as_ref(), &request).await.map(|r| r.results);
            Self::finish_load(weak, key, result);
        });
        state.in_flight.insert(selector, handle);
        this.update_loading(state);
    }

    fn finish_load(weak: Weak<Self>, selector: ContentSelector, result: Result<Vec<Article>, ApiError>) {
        let Some(this) = weak.upgrade() else { return };
        {
            let mut state = this.lock();
            state.in_flight.remove(&selector);
            match result {
                Ok(articles) => {
                    info!(%selector, count = articles.len(), "articles loaded");
                    if state.selector == selector {
                        this.articles.publish(articles.clone());
                    } else {
                        debug!(%selector, current = %state.selector, "selection moved on; cached only");
                    }
                    state.cache.insert(selector, articles, Instant::now());
                }
                Err(e) => warn!(%selector, error = %e, "article request failed"),
            }
            this.update_loading(&state);
        }
        this.idle.notify_waiters();
    }

    fn load_sections(this: &Arc<Self>, state: &mut State) {
        if state.section_request.is_some() {
            debug!("section request already in flight");
            return;
        }
        let api = this.api.clone();
        let weak = Arc::downgrade(this);
        state.section_request = Some(tokio::spawn(async move {
            let result = fetch(api.as_ref(), &SectionRequest).await.map(|r| r.results);
            Self::finish_sections(weak, result);
        }));
    }

    fn finish_sections(weak: Weak<Self>, result: Result<Vec<LatestSection>, ApiError>) {
        let Some(this) = weak.upgrade() else { return };
        {
            let mut state = this.lock();
            state.section_request = None;
            match result {
                Ok(sections) => {
                    info!(count = sections.len(), "section catalog loaded");
                    this.sections.publish(sections);
                }
                Err(e) => {
                    warn!(error = %e, "section request failed; falling back to All");
                    this.sections.publish(vec![LatestSection::All]);
                }
            }
        }
        this.idle.notify_waiters();
    }

    fn update_loading(&self, state: &State) {
        self.loading.publish_if_changed(state.in_flight.contains_key(&state.selector));
    }
}
