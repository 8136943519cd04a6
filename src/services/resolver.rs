//! Collection resolution: turn a loose, user-typed collection name into a
//! single marketplace collection.
//!
//! Ensures the catalog is loaded (cache hit or paged fetch), then runs the
//! fuzzy matcher. Both "no catalog" and "no match" come back as `None`.

use std::sync::Arc;

use log::{debug, info};

use crate::services::catalog::{Catalog, CatalogLoader, Collection, CollectionSource};
use crate::services::config::ResolverSettings;
use crate::services::core::MemoryCache;
use crate::services::matcher::normalizer::normalize_key;
use crate::services::matcher::{find_best_match, MatchCandidate};

pub struct CollectionResolver<S> {
    loader: CatalogLoader<S>,
    similarity_threshold: usize,
    default_max_pages: usize,
}

impl<S: CollectionSource> CollectionResolver<S> {
    /// Build a resolver over `source`, caching the catalog in `cache`.
    pub fn new(
        source: Arc<S>,
        cache: Arc<MemoryCache<Arc<Catalog>>>,
        settings: &ResolverSettings,
    ) -> Self {
        Self {
            loader: CatalogLoader::new(source, cache, &settings.catalog),
            similarity_threshold: settings.matcher.similarity_threshold,
            default_max_pages: settings.catalog.default_max_pages,
        }
    }

    pub fn loader(&self) -> &CatalogLoader<S> {
        &self.loader
    }

    /// Resolve `user_input` to a collection.
    ///
    /// `similarity_threshold` and `max_pages` fall back to the configured
    /// defaults (3 and 20 out of the box).
    pub async fn resolve_collection(
        &self,
        user_input: &str,
        similarity_threshold: Option<usize>,
        max_pages: Option<usize>,
    ) -> Option<Collection> {
        self.resolve_candidate(user_input, similarity_threshold, max_pages)
            .await
            .map(|candidate| candidate.collection)
    }

    /// Like `resolve_collection`, keeping the distance and winning strategy.
    pub async fn resolve_candidate(
        &self,
        user_input: &str,
        similarity_threshold: Option<usize>,
        max_pages: Option<usize>,
    ) -> Option<MatchCandidate> {
        if normalize_key(user_input).is_empty() {
            debug!("Resolve: empty input after normalization");
            return None;
        }

        let threshold = similarity_threshold.unwrap_or(self.similarity_threshold);
        let pages = max_pages.unwrap_or(self.default_max_pages);

        let Some(catalog) = self.loader.load(pages).await else {
            info!("Resolve: no catalog available for \"{}\"", user_input);
            return None;
        };

        let result = find_best_match(user_input, &catalog, threshold);
        match &result {
            Some(candidate) => info!(
                "Resolve: \"{}\" → {} ({} via {}, distance {})",
                user_input,
                candidate.collection.symbol,
                candidate.collection.name,
                candidate.match_type,
                candidate.distance
            ),
            None => info!("Resolve: no match for \"{}\"", user_input),
        }
        result
    }

    /// Pre-load the catalog. Returns the number of collections available.
    pub async fn warm_up(&self, max_pages: usize) -> usize {
        self.loader
            .load(max_pages)
            .await
            .map(|catalog| catalog.len())
            .unwrap_or(0)
    }

    pub fn invalidate(&self) {
        self.loader.invalidate();
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
