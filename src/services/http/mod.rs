//! Rate-limited JSON GET plus a backoff wrapper for HTTP 429.
//!
//! Paged catalog requests go through `fetch_json` only. Single-resource
//! lookups (stats, floor price) additionally wrap it in `retry_on_rate_limit`.

use std::future::Future;
use std::time::Duration;

use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::services::config::ApiSettings;
use crate::services::core::SlidingWindowLimiter;
use crate::types::errors::{ResolverError, ResolverResult};

/// Backoff schedule for rate-limited calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(api: &ApiSettings) -> Self {
        Self {
            max_attempts: api.max_attempts.max(1),
            base_delay: Duration::from_millis(api.retry_base_delay_ms),
        }
    }

    /// Delay before retrying after the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Run `op`, retrying with exponential backoff while it reports `RateLimited`.
///
/// Any other error is returned immediately.
pub async fn retry_on_rate_limit<T, F, Fut>(policy: RetryPolicy, mut op: F) -> ResolverResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ResolverResult<T>>,
{
    let max_attempts = policy.max_attempts.max(1);

    for attempt in 0..max_attempts {
        match op().await {
            Err(e) if e.is_rate_limited() => {
                if attempt + 1 < max_attempts {
                    let delay = policy.delay_for(attempt);
                    warn!(
                        "Rate limited (429), retry {}/{} in {:?}",
                        attempt + 1,
                        max_attempts - 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
            other => return other,
        }
    }

    Err(ResolverError::RateLimited {
        attempts: max_attempts,
    })
}

/// GET `url` as JSON once a limiter slot is free.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    limiter: &SlidingWindowLimiter,
    url: &str,
    api_key: Option<&str>,
) -> ResolverResult<T> {
    limiter.acquire_slot().await;
    debug!("GET {}", url);

    let mut req = client.get(url).header("Content-Type", "application/json");
    if let Some(key) = api_key {
        req = req.header("Authorization", format!("Bearer {key}"));
    }

    let response = req.send().await?;
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ResolverError::RateLimited { attempts: 1 });
    }
    if !status.is_success() {
        return Err(ResolverError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    Ok(response.json::<T>().await?)
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
