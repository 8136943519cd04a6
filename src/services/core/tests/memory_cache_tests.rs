use super::*;

#[tokio::test(start_paused = true)]
async fn test_get_returns_value_within_ttl() {
    let cache = MemoryCache::new();
    cache.set("floor-price-mad_lads", 42u64, Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(cache.get("floor-price-mad_lads"), Some(42));
    assert!(cache.contains("floor-price-mad_lads"));
}

#[tokio::test(start_paused = true)]
async fn test_expired_entry_is_evicted_on_read() {
    let cache = MemoryCache::new();
    cache.set("k", "v".to_string(), Duration::from_secs(60));

    tokio::time::advance(Duration::from_secs(61)).await;
    assert_eq!(cache.len(), 1, "expired entry stays until touched");
    assert_eq!(cache.get("k"), None);
    assert!(cache.is_empty(), "read evicts the expired entry");
}

#[tokio::test(start_paused = true)]
async fn test_entry_at_exact_expiry_is_still_valid() {
    let cache = MemoryCache::new();
    cache.set("k", 1u8, Duration::from_secs(10));

    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(cache.get("k"), Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_set_overwrites_and_refreshes_ttl() {
    let cache = MemoryCache::new();
    cache.set("k", 1u8, Duration::from_secs(10));
    tokio::time::advance(Duration::from_secs(8)).await;
    cache.set("k", 2u8, Duration::from_secs(10));
    tokio::time::advance(Duration::from_secs(8)).await;

    assert_eq!(cache.get("k"), Some(2));
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired_removes_only_stale_entries() {
    let cache = MemoryCache::new();
    cache.set("short", 1u8, Duration::from_secs(5));
    cache.set("long", 2u8, Duration::from_secs(500));

    tokio::time::advance(Duration::from_secs(6)).await;
    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("long"), Some(2));
}

#[test]
fn test_remove_and_clear() {
    let cache = MemoryCache::new();
    cache.set("a", 1u8, Duration::from_secs(60));
    cache.set("b", 2u8, Duration::from_secs(60));

    assert_eq!(cache.remove("a"), Some(1));
    assert_eq!(cache.get("a"), None);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_capacity_evicts_least_recently_used() {
    let cache = MemoryCache::with_capacity(2);
    cache.set("a", 1u8, Duration::from_secs(60));
    cache.set("b", 2u8, Duration::from_secs(60));
    // Touch "a" so "b" becomes the eviction candidate
    assert_eq!(cache.get("a"), Some(1));
    cache.set("c", 3u8, Duration::from_secs(60));

    assert_eq!(cache.get("b"), None);
    assert_eq!(cache.get("a"), Some(1));
    assert_eq!(cache.get("c"), Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_huge_ttl_is_clamped_instead_of_overflowing() {
    let cache = MemoryCache::new();
    cache.set("forever", 7u32, Duration::from_secs(u64::MAX));
    cache.set("max", 8u32, Duration::MAX);

    tokio::time::advance(Duration::from_secs(365 * 24 * 60 * 60)).await;
    assert_eq!(cache.get("forever"), Some(7));
    assert_eq!(cache.get("max"), Some(8));
}
