use super::*;
use std::sync::Arc;

#[tokio::test(start_paused = true)]
async fn test_first_requests_pass_immediately() {
    let limiter = SlidingWindowLimiter::default();
    let start = Instant::now();

    for _ in 0..10 {
        limiter.acquire_slot().await;
    }

    assert_eq!(Instant::now(), start, "ten requests fit in an empty window");
    assert_eq!(limiter.in_flight().await, 10);
}

#[tokio::test(start_paused = true)]
async fn test_fifteen_requests_never_exceed_ten_per_second() {
    let limiter = SlidingWindowLimiter::new(10, Duration::from_secs(1));
    let mut dispatched = Vec::new();

    for _ in 0..15 {
        limiter.acquire_slot().await;
        dispatched.push(Instant::now());
    }

    // Any 11 consecutive starts must span at least one full window
    for i in 0..dispatched.len() - 10 {
        let span = dispatched[i + 10].duration_since(dispatched[i]);
        assert!(
            span >= Duration::from_secs(1),
            "requests {i}..={} started within {span:?}",
            i + 10
        );
    }

    // Requests 11..15 waited for the first window to drain
    assert!(dispatched[10].duration_since(dispatched[0]) >= Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_the_window() {
    let limiter = Arc::new(SlidingWindowLimiter::new(3, Duration::from_millis(500)));
    let start = Instant::now();

    let mut handles = Vec::new();
    for _ in 0..6 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            limiter.acquire_slot().await;
            Instant::now()
        }));
    }

    let mut times = Vec::new();
    for handle in handles {
        times.push(handle.await.unwrap());
    }
    times.sort();

    let immediate = times.iter().filter(|&&t| t == start).count();
    assert_eq!(immediate, 3, "only max_requests start without waiting");
    assert!(times[3].duration_since(start) >= Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn test_window_drains_after_idle_period() {
    let limiter = SlidingWindowLimiter::new(2, Duration::from_secs(1));
    limiter.acquire_slot().await;
    limiter.acquire_slot().await;

    tokio::time::advance(Duration::from_millis(1500)).await;
    assert_eq!(limiter.in_flight().await, 0);

    let before = Instant::now();
    limiter.acquire_slot().await;
    assert_eq!(Instant::now(), before);
}

#[test]
fn test_zero_capacity_is_clamped() {
    let limiter = SlidingWindowLimiter::new(0, Duration::from_secs(1));
    assert_eq!(limiter.max_requests(), 1);
}
