use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api-mainnet.magiceden.dev/v2";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Total attempts for single-resource calls that hit HTTP 429.
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            timeout_secs: 10,
            max_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RateLimitSettings {
    pub max_requests: usize,
    pub window_ms: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_ms: 1000,
        }
    }
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub page_size: usize,
    pub default_max_pages: usize,
    pub ttl_secs: u64,
    pub stats_ttl_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: 500,
            default_max_pages: 20,
            ttl_secs: 4 * 60 * 60,
            stats_ttl_secs: 60,
        }
    }
}

impl CatalogSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_secs)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatcherSettings {
    /// Largest edit distance accepted by the full-name and symbol strategies.
    pub similarity_threshold: usize,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 3,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ResolverSettings {
    pub api: ApiSettings,
    pub rate_limit: RateLimitSettings,
    pub catalog: CatalogSettings,
    pub matcher: MatcherSettings,
}
