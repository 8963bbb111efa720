use std::time::Duration;

use tokio::time::Instant;

use crate::config::RateLimit;

/// Token bucket over requests issued. The whole bucket is refilled once per window,
/// so at most `capacity` requests start within any one window.
///
/// The wait happens before the request that finds the bucket empty: with a capacity
/// of 40, the 41st request pauses, and a run of exactly 80 requests pauses once.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    window: Duration,
    tokens: u32,
    window_start: Option<Instant>,
    issued: u64,
    pauses: u32,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        let capacity = limit.requests.max(1);
        Self {
            capacity,
            window: limit.window,
            tokens: capacity,
            window_start: None,
            issued: 0,
            pauses: 0,
        }
    }

    /// Waits until a request may be issued and counts it as issued.
    pub async fn acquire(&mut self) {
        let now = Instant::now();
        let start = match self.window_start {
            Some(start) if now.duration_since(start) < self.window => start,
            _ => {
                self.tokens = self.capacity;
                self.window_start = Some(now);
                now
            }
        };

        if self.tokens == 0 {
            let resume = start + self.window;
            tracing::info!(
                "Pausing {}s, issued {} requests...",
                resume.saturating_duration_since(now).as_secs(),
                self.issued
            );
            self.pauses += 1;
            tokio::time::sleep_until(resume).await;

            self.tokens = self.capacity;
            self.window_start = Some(Instant::now());
        }

        self.tokens -= 1;
        self.issued += 1;
    }

    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn pauses(&self) -> u32 {
        self.pauses
    }
}
