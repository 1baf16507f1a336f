pub mod api;
pub mod article;
pub mod cache;
pub mod config;
pub mod controller;
pub(crate) mod mapping;
pub mod observable;
pub mod request;
pub mod selector;
pub(crate) mod types;

#[cfg(test)]
mod testing;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::{ApiClient, ApiError, NytClient};
    pub use crate::article::{Article, ArticleShape, Media};
    pub use crate::config::Config;
    pub use crate::controller::{ArticleListController, CACHE_DEBOUNCE};
    pub use crate::selector::{ArticleSection, ContentSelector, LatestSection, ShareType};
}

pub use api::{ApiClient, ApiError, NytClient};
pub use article::{Article, ArticleShape, Media};
pub use config::Config;
pub use controller::{ArticleListController, CACHE_DEBOUNCE};
pub use request::translate;
pub use selector::{ArticleSection, ContentSelector, LatestSection, ParseSelectorError, ShareType};
