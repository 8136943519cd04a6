//! Magic Eden REST client.
//!
//! Serves as the paged `CollectionSource` for the catalog loader and answers
//! per-collection stats / floor-price lookups. Every request shares the
//! injected `SlidingWindowLimiter`.

use std::sync::Arc;
use std::time::Duration;

use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::services::catalog::{Collection, CollectionSource};
use crate::services::config::ResolverSettings;
use crate::services::core::{MemoryCache, SlidingWindowLimiter};
use crate::services::http::{fetch_json, retry_on_rate_limit, RetryPolicy};
use crate::types::errors::{ResolverError, ResolverResult};

const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Stats payload as returned by `/collections/{symbol}/stats` (lamports).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCollectionStats {
    symbol: Option<String>,
    floor_price: Option<f64>,
    listed_count: Option<u64>,
    listed_total_value: Option<f64>,
    avg_price24hr: Option<f64>,
    volume24hr: Option<f64>,
    volume_all: Option<f64>,
}

/// Collection statistics with all prices in SOL. Missing values are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub symbol: String,
    pub floor_price: f64,
    pub listed_count: u64,
    pub listed_total_value: f64,
    pub avg_price_24hr: f64,
    pub volume_24hr: f64,
    pub volume_all: f64,
}

impl CollectionStats {
    fn from_raw(symbol: &str, raw: RawCollectionStats) -> Self {
        let sol = |lamports: Option<f64>| lamports.unwrap_or(0.0) / LAMPORTS_PER_SOL;
        Self {
            symbol: raw.symbol.unwrap_or_else(|| symbol.to_string()),
            floor_price: sol(raw.floor_price),
            listed_count: raw.listed_count.unwrap_or(0),
            listed_total_value: sol(raw.listed_total_value),
            avg_price_24hr: sol(raw.avg_price24hr),
            volume_24hr: sol(raw.volume24hr),
            volume_all: sol(raw.volume_all),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPrice {
    /// Floor in SOL; `None` when the marketplace reports no floor.
    pub floor_price: Option<f64>,
    pub listed: u64,
    pub currency: String,
    pub updated_at: String,
}

impl FloorPrice {
    pub fn from_stats(stats: &CollectionStats) -> Self {
        Self {
            floor_price: (stats.floor_price > 0.0).then_some(stats.floor_price),
            listed: stats.listed_count,
            currency: "SOL".to_string(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Popularity window for the trending list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::SevenDays => "7d",
            TimeRange::ThirtyDays => "30d",
        }
    }
}

/// Entry of `/marketplace/popular_collections` (lamports).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPopularCollection {
    symbol: String,
    name: Option<String>,
    image: Option<String>,
    description: Option<String>,
    floor_price: Option<f64>,
    volume_all: Option<f64>,
}

/// A popular collection with prices in SOL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingCollection {
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub description: String,
    /// Not reported by the popular-collections endpoint; always 0.
    pub volume_24hr: f64,
    pub volume_all: f64,
    pub floor_price: f64,
}

impl From<RawPopularCollection> for TrendingCollection {
    fn from(raw: RawPopularCollection) -> Self {
        let sol = |lamports: Option<f64>| lamports.unwrap_or(0.0) / LAMPORTS_PER_SOL;
        Self {
            symbol: raw.symbol,
            name: raw.name.unwrap_or_default(),
            image: raw.image,
            description: raw.description.unwrap_or_default(),
            volume_24hr: 0.0,
            volume_all: sol(raw.volume_all),
            floor_price: sol(raw.floor_price),
        }
    }
}

pub struct MagicEdenClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    limiter: Arc<SlidingWindowLimiter>,
    retry: RetryPolicy,
    stats_cache: MemoryCache<CollectionStats>,
    stats_ttl: Duration,
}

impl MagicEdenClient {
    pub fn new(settings: &ResolverSettings, limiter: Arc<SlidingWindowLimiter>) -> ResolverResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api.api_key.clone(),
            limiter,
            retry: RetryPolicy::from_settings(&settings.api),
            stats_cache: MemoryCache::new(),
            stats_ttl: settings.catalog.stats_ttl(),
        })
    }

    pub fn limiter(&self) -> &Arc<SlidingWindowLimiter> {
        &self.limiter
    }

    pub fn collections_url(&self, offset: usize, limit: usize) -> String {
        format!("{}/collections?offset={}&limit={}", self.base_url, offset, limit)
    }

    pub fn stats_url(&self, symbol: &str) -> String {
        format!(
            "{}/collections/{}/stats",
            self.base_url,
            urlencoding::encode(symbol)
        )
    }

    pub fn popular_collections_url(&self, time_range: TimeRange) -> String {
        format!(
            "{}/marketplace/popular_collections?timeRange={}",
            self.base_url,
            time_range.as_str()
        )
    }

    /// Popular collections for `time_range`, windowed by `offset`/`limit`.
    ///
    /// Always hits the marketplace (no cache). An empty list is `NotFound`.
    pub async fn trending_collections(
        &self,
        limit: usize,
        offset: usize,
        time_range: TimeRange,
    ) -> ResolverResult<Vec<TrendingCollection>> {
        let url = self.popular_collections_url(time_range);
        let raw: Vec<RawPopularCollection> = retry_on_rate_limit(self.retry, || {
            fetch_json(&self.http, &self.limiter, &url, self.api_key.as_deref())
        })
        .await?;

        if raw.is_empty() {
            return Err(ResolverError::NotFound(format!(
                "popular collections ({})",
                time_range.as_str()
            )));
        }

        let total = raw.len();
        let trending: Vec<TrendingCollection> = raw
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(TrendingCollection::from)
            .collect();
        info!(
            "Trending ({}): {} of {} collections",
            time_range.as_str(),
            trending.len(),
            total
        );
        Ok(trending)
    }

    /// Stats for one collection, cached per symbol and retried on HTTP 429.
    pub async fn collection_stats(&self, symbol: &str) -> ResolverResult<CollectionStats> {
        let cache_key = format!("collection-stats-{symbol}");
        if let Some(stats) = self.stats_cache.get(&cache_key) {
            return Ok(stats);
        }

        let url = self.stats_url(symbol);
        let raw: RawCollectionStats = retry_on_rate_limit(self.retry, || {
            fetch_json(&self.http, &self.limiter, &url, self.api_key.as_deref())
        })
        .await?;

        let stats = CollectionStats::from_raw(symbol, raw);
        info!(
            "Stats for {}: floor {} SOL, {} listed",
            stats.symbol, stats.floor_price, stats.listed_count
        );
        self.stats_cache.set(&cache_key, stats.clone(), self.stats_ttl);
        Ok(stats)
    }

    pub async fn floor_price(&self, symbol: &str) -> ResolverResult<FloorPrice> {
        let stats = self.collection_stats(symbol).await?;
        Ok(FloorPrice::from_stats(&stats))
    }
}

impl CollectionSource for MagicEdenClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> ResolverResult<Vec<Collection>> {
        let url = self.collections_url(offset, limit);
        fetch_json(&self.http, &self.limiter, &url, self.api_key.as_deref()).await
    }
}

#[cfg(test)]
#[path = "tests/marketplace_tests.rs"]
mod tests;
