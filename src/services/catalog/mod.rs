//! Collection directory: the data model, the paged source seam and the loader
//! that keeps a fresh copy in the shared cache.

pub mod loader;
pub mod models;

pub use loader::{CatalogLoader, CATALOG_CACHE_KEY};
pub use models::{Catalog, Collection, CollectionKeys};

use std::future::Future;

use crate::types::errors::ResolverResult;

/// A remote, offset-paged listing of collections.
///
/// A page shorter than `limit` (including an empty one) means there is no
/// more data.
pub trait CollectionSource: Send + Sync {
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl Future<Output = ResolverResult<Vec<Collection>>> + Send;
}
