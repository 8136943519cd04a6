//! Fuzzy resolution of NFT collection names against the Magic Eden catalog.
//!
//! The catalog is fetched page by page under a shared rate limit, cached for
//! a few hours, and searched with a layered edit-distance matcher.

pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::catalog::{Catalog, CatalogLoader, Collection, CollectionSource};
pub use services::config::{load_settings, ResolverSettings};
pub use services::core::{MemoryCache, SlidingWindowLimiter};
pub use services::marketplace::{
    CollectionStats, FloorPrice, MagicEdenClient, TimeRange, TrendingCollection,
};
pub use services::matcher::{find_best_match, MatchCandidate, MatchType};
pub use services::query::{parse_query, ParsedQuery, QueryIntent};
pub use services::resolver::CollectionResolver;
pub use types::{ResolverError, ResolverResult};
