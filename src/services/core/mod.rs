pub mod memory_cache;
pub mod rate_limiter;

pub use memory_cache::MemoryCache;
pub use rate_limiter::SlidingWindowLimiter;
