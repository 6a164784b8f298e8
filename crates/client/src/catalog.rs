//! Cached category listings.
//!
//! A [`Catalog`] ties the fetcher, the extractor and the category cache
//! together. Build one per process and hand it to whatever needs listings.

use std::time::Duration;

use digiglass_core::{ALL_CATEGORIES_KEY, AppConfig, CacheDb, CategoryRecord, Error, keyword_key};

use crate::extract::extract_categories;
use crate::fetch::Fetcher;

/// Query parameter that narrows the index to one keyword.
const KEYWORDS_PARAM: &str = "keywords";

/// Category listings backed by a fetcher and the on-disk cache.
pub struct Catalog<F> {
    fetcher: F,
    cache: CacheDb,
    base_url: String,
    ttl: Duration,
}

impl<F: Fetcher> Catalog<F> {
    pub fn new(fetcher: F, cache: CacheDb, base_url: impl Into<String>, ttl: Duration) -> Self {
        Self { fetcher, cache, base_url: base_url.into(), ttl }
    }

    pub fn from_config(fetcher: F, cache: CacheDb, config: &AppConfig) -> Self {
        Self::new(fetcher, cache, config.base_url.clone(), config.cache_ttl())
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every category on the index page, in page order.
    pub async fn all_categories(&self) -> Result<Vec<CategoryRecord>, Error> {
        self.cache
            .get_or_create(ALL_CATEGORIES_KEY, self.ttl, || self.scrape(&[]))
            .await
    }

    /// Categories containing parts for `keyword`, largest first.
    ///
    /// The keyword is used verbatim for both the request and the cache key.
    /// A blank keyword is rejected with [`Error::InvalidInput`].
    pub async fn categories_for_keyword(&self, keyword: &str) -> Result<Vec<CategoryRecord>, Error> {
        if keyword.trim().is_empty() {
            return Err(Error::InvalidInput("keyword must not be empty".into()));
        }
        self.cache
            .get_or_create(&keyword_key(keyword), self.ttl, || self.scrape_keyword(keyword))
            .await
    }

    /// Drop every cached listing. Returns the number of entries removed.
    pub async fn clear_cache(&self) -> Result<u64, Error> {
        self.cache.clear().await
    }

    async fn scrape(&self, query: &[(&str, &str)]) -> Result<Vec<CategoryRecord>, Error> {
        let html = self.fetcher.fetch(&self.base_url, query).await?;
        extract_categories(&html)
    }

    async fn scrape_keyword(&self, keyword: &str) -> Result<Vec<CategoryRecord>, Error> {
        let mut records = self.scrape(&[(KEYWORDS_PARAM, keyword)]).await?;
        sort_by_quantity(&mut records);
        Ok(records)
    }
}

/// Sort by descending quantity. Equal quantities keep their order.
pub fn sort_by_quantity(records: &mut [CategoryRecord]) {
    records.sort_by(|a, b| b.quantity.cmp(&a.quantity));
}
