use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
    #[error("Rate limited after {attempts} attempt(s)")]
    RateLimited { attempts: u32 },
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ResolverError {
    /// True for errors a backoff-and-retry can recover from (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ResolverError::RateLimited { .. })
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ResolverError::Decode(error.to_string())
        } else {
            ResolverError::Http(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ResolverError {
    fn from(error: serde_json::Error) -> Self {
        ResolverError::Decode(error.to_string())
    }
}

impl Serialize for ResolverError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type ResolverResult<T> = Result<T, ResolverError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
