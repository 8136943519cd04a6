//! Sliding-window limiter shared by every outbound marketplace request.
//!
//! At most `max_requests` requests may *start* within any trailing `window`.
//! Callers that find the window full sleep until the oldest recorded start
//! leaves it, then re-check.

use std::collections::VecDeque;
use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct SlidingWindowLimiter {
    max_requests: usize,
    window: Duration,
    /// Start times of the most recent requests, oldest first.
    starts: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            max_requests,
            window,
            starts: Mutex::new(VecDeque::with_capacity(max_requests)),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait until a request may start, then record it.
    pub async fn acquire_slot(&self) {
        loop {
            let wait = {
                let mut starts = self.starts.lock().await;
                let now = Instant::now();

                while let Some(&oldest) = starts.front() {
                    if now.duration_since(oldest) >= self.window {
                        starts.pop_front();
                    } else {
                        break;
                    }
                }

                if starts.len() < self.max_requests {
                    starts.push_back(now);
                    return;
                }

                match starts.front() {
                    Some(&oldest) => self.window.saturating_sub(now.duration_since(oldest)),
                    None => Duration::ZERO,
                }
            };

            debug!("Rate limit window full, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of request starts still inside the window.
    pub async fn in_flight(&self) -> usize {
        let starts = self.starts.lock().await;
        let now = Instant::now();
        starts
            .iter()
            .filter(|&&start| now.duration_since(start) < self.window)
            .count()
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(10, Duration::from_secs(1))
    }
}

#[cfg(test)]
#[path = "tests/rate_limiter_tests.rs"]
mod tests;
