//! Catalog loader: cache hit, or a sequential paged fetch into the cache.
//!
//! **Fail-soft**: a failed page ends pagination and whatever was collected
//! is used. Only a failure before the first item, or an empty catalog,
//! yields `None`, and nothing is cached in that case.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::Mutex;

use super::models::{Catalog, Collection};
use super::CollectionSource;
use crate::services::config::CatalogSettings;
use crate::services::core::MemoryCache;

/// Cache key under which the full catalog is stored.
pub const CATALOG_CACHE_KEY: &str = "magic-eden:all-collections";

pub struct CatalogLoader<S> {
    source: Arc<S>,
    cache: Arc<MemoryCache<Arc<Catalog>>>,
    page_size: usize,
    ttl: Duration,
    /// Serialises cold loads so concurrent callers share one paged fetch.
    load_gate: Mutex<()>,
}

impl<S: CollectionSource> CatalogLoader<S> {
    pub fn new(
        source: Arc<S>,
        cache: Arc<MemoryCache<Arc<Catalog>>>,
        settings: &CatalogSettings,
    ) -> Self {
        Self {
            source,
            cache,
            page_size: settings.page_size.max(1),
            ttl: settings.ttl(),
            load_gate: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// The cached catalog, if present, fresh and non-empty. Never fetches.
    pub fn cached(&self) -> Option<Arc<Catalog>> {
        self.cache
            .get(CATALOG_CACHE_KEY)
            .filter(|catalog| !catalog.is_empty())
    }

    /// Drop the cached catalog so the next load fetches again.
    pub fn invalidate(&self) {
        if self.cache.remove(CATALOG_CACHE_KEY).is_some() {
            info!("Catalog: cache invalidated");
        }
    }

    /// Return the catalog, fetching up to `max_pages` pages on a cache miss.
    pub async fn load(&self, max_pages: usize) -> Option<Arc<Catalog>> {
        if let Some(catalog) = self.cached() {
            debug!("Catalog: cache hit ({} collections)", catalog.len());
            return Some(catalog);
        }

        let _gate = self.load_gate.lock().await;

        // Double-check after wait: another caller may have loaded it
        if let Some(catalog) = self.cached() {
            debug!("Catalog: loaded by concurrent caller");
            return Some(catalog);
        }

        let collections = self.fetch_all(max_pages.max(1)).await?;
        let catalog = Arc::new(Catalog::new(collections));
        self.cache
            .set(CATALOG_CACHE_KEY, Arc::clone(&catalog), self.ttl);
        info!(
            "Catalog: cached {} collections for {:?}",
            catalog.len(),
            self.ttl
        );
        Some(catalog)
    }

    async fn fetch_all(&self, max_pages: usize) -> Option<Vec<Collection>> {
        let mut all = Vec::new();

        for page in 0..max_pages {
            let offset = page * self.page_size;
            debug!("Catalog: fetching page {} (offset {})", page, offset);

            match self.source.fetch_page(offset, self.page_size).await {
                Ok(items) => {
                    let count = items.len();
                    all.extend(items);
                    if count < self.page_size {
                        debug!("Catalog: short page {} ({} items), end of data", page, count);
                        break;
                    }
                }
                Err(e) if all.is_empty() => {
                    warn!("Catalog: page {} failed before any data: {}", page, e);
                    return None;
                }
                Err(e) => {
                    warn!(
                        "Catalog: page {} failed, keeping partial catalog of {}: {}",
                        page,
                        all.len(),
                        e
                    );
                    break;
                }
            }
        }

        if all.is_empty() {
            warn!("Catalog: source returned no collections");
            return None;
        }
        Some(all)
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
