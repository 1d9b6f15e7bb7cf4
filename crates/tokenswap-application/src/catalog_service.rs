//! Catalog Service
//!
//! Fetches the catalog for the configured accounts, keeps the latest
//! snapshot in the owned cache, and opens browser sessions over it.

use std::sync::Arc;

use chrono::Utc;
use tokenswap_core::browser::{BrowserState, HeroListEntry, hero_list};
use tokenswap_core::catalog::{CatalogCache, CatalogSnapshot, Normalizer, parse_auth_keys};
use tokenswap_core::error::Result;
use tokenswap_core::swap::Notifier;
use tokenswap_core::{SwapError, resolve_cached};
use tokenswap_interaction::CatalogClient;

/// Service for catalog browsing and reference resolution.
pub struct CatalogService {
    client: CatalogClient,
    cache: CatalogCache,
    normalizer: Normalizer,
    notifier: Arc<dyn Notifier>,
}

impl CatalogService {
    pub fn new(client: CatalogClient, cache: CatalogCache, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            cache,
            normalizer: Normalizer::default(),
            notifier,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Re-fetches every account behind `auth_key` and commits the result.
    ///
    /// A missing key is reported before any request is made. The cache is
    /// only touched when the fetch succeeds.
    pub async fn refresh(&self, auth_key: &str) -> Result<Arc<CatalogSnapshot>> {
        let tokens = parse_auth_keys(auth_key).inspect_err(|err| {
            self.notifier.error(&err.to_string());
        })?;

        let snapshot = self.client.fetch_catalog(&tokens).await?;
        Ok(self.cache.commit(snapshot))
    }

    /// Returns the cached snapshot while it is fresh, fetching otherwise.
    pub async fn ensure_fresh(&self, auth_key: &str) -> Result<Arc<CatalogSnapshot>> {
        if self.cache.is_fresh(Utc::now()) {
            if let Some(snapshot) = self.cache.current() {
                return Ok(snapshot);
            }
        }
        self.refresh(auth_key).await
    }

    /// Opens a browser session. Every open re-fetches the catalog.
    pub async fn open_browser(&self, auth_key: &str) -> Result<BrowserState> {
        let snapshot = self.refresh(auth_key).await?;
        let items = self.normalizer.normalize(&snapshot.goods);
        tracing::debug!(miniatures = items.len(), "Opened catalog browser");
        Ok(BrowserState::new(items))
    }

    /// Resolves a reference against the cached snapshot; never fails.
    pub fn resolve(&self, reference: &str) -> String {
        resolve_cached(&self.cache, reference)
    }

    /// Entries for the host's generic model picker.
    pub fn hero_list(&self) -> Vec<HeroListEntry> {
        let snapshot = self.cache.current();
        hero_list(snapshot.as_deref())
    }

    /// Confirms `browser` and reports an empty selection to the user.
    pub fn confirm_selection(&self, browser: BrowserState) -> Result<String> {
        browser
            .confirm()
            .map(|reference| reference.to_string())
            .inspect_err(|err| {
                if matches!(err, SwapError::NoSelection) {
                    self.notifier.error(&err.to_string());
                }
            })
    }
}
