//! Resolver settings, read from `.env` and the process environment.
//!
//! Every field has a default, so an empty environment yields a working
//! configuration against the public Magic Eden API.

pub mod models;

pub use models::*;

use crate::types::errors::{ResolverError, ResolverResult};
use std::str::FromStr;

/// Load settings from a `.env` file (if any) and the process environment.
pub fn load_settings() -> ResolverResult<ResolverSettings> {
    let _ = dotenvy::dotenv(); // Try to load .env, ignore if missing
    settings_from_lookup(|key| std::env::var(key).ok())
}

/// Build settings from an arbitrary key lookup, falling back to defaults.
pub fn settings_from_lookup<F>(lookup: F) -> ResolverResult<ResolverSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = ResolverSettings::default();
    let read = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(url) = read("MAGIC_EDEN_BASE_URL") {
        settings.api.base_url = url.trim_end_matches('/').to_string();
    }
    settings.api.api_key = read("MAGIC_EDEN_API_KEY");

    if let Some(v) = read("HTTP_TIMEOUT_SECS") {
        settings.api.timeout_secs = parse_positive("HTTP_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = read("HTTP_MAX_ATTEMPTS") {
        settings.api.max_attempts = parse_positive("HTTP_MAX_ATTEMPTS", &v)?;
    }
    if let Some(v) = read("HTTP_RETRY_BASE_DELAY_MS") {
        settings.api.retry_base_delay_ms = parse_positive("HTTP_RETRY_BASE_DELAY_MS", &v)?;
    }
    if let Some(v) = read("RATE_LIMIT_MAX_REQUESTS") {
        settings.rate_limit.max_requests = parse_positive("RATE_LIMIT_MAX_REQUESTS", &v)?;
    }
    if let Some(v) = read("RATE_LIMIT_WINDOW_MS") {
        settings.rate_limit.window_ms = parse_positive("RATE_LIMIT_WINDOW_MS", &v)?;
    }
    if let Some(v) = read("CATALOG_PAGE_SIZE") {
        settings.catalog.page_size = parse_positive("CATALOG_PAGE_SIZE", &v)?;
    }
    if let Some(v) = read("CATALOG_MAX_PAGES") {
        settings.catalog.default_max_pages = parse_positive("CATALOG_MAX_PAGES", &v)?;
    }
    if let Some(v) = read("CATALOG_TTL_SECS") {
        settings.catalog.ttl_secs = parse_positive("CATALOG_TTL_SECS", &v)?;
    }
    if let Some(v) = read("STATS_TTL_SECS") {
        settings.catalog.stats_ttl_secs = parse_positive("STATS_TTL_SECS", &v)?;
    }
    if let Some(v) = read("MATCH_SIMILARITY_THRESHOLD") {
        settings.matcher.similarity_threshold = v.parse().map_err(|_| {
            ResolverError::Config(format!("MATCH_SIMILARITY_THRESHOLD: invalid number \"{v}\""))
        })?;
    }

    Ok(settings)
}

fn parse_positive<T>(key: &str, value: &str) -> ResolverResult<T>
where
    T: FromStr + PartialEq + Default,
{
    let parsed: T = value
        .parse()
        .map_err(|_| ResolverError::Config(format!("{key}: invalid number \"{value}\"")))?;
    if parsed == T::default() {
        return Err(ResolverError::Config(format!("{key}: must be greater than zero")));
    }
    Ok(parsed)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
