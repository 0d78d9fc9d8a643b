//! Per-host minimum-interval rate limiting.
//!
//! Unlike a token-bucket limiter this never bursts: each host gets its own
//! mutex guarding a single "last acquired at" timestamp, so N concurrent
//! callers for the same host are paced strictly sequentially while different
//! hosts stay fully independent.

use dashmap::DashMap;
use seo_types::HostRateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

struct HostState {
    last_acquired: Mutex<Option<Instant>>,
}

/// Enforces `acquire(host)` ≥ `1/rate` seconds apart for each host.
pub struct DomainRateLimiter {
    min_interval: Duration,
    hosts: DashMap<String, Arc<HostState>>,
}

impl DomainRateLimiter {
    /// `rate_per_sec` is clamped to a safe minimum so a zero or negative
    /// config value can never produce an infinite interval.
    pub fn new(rate_per_sec: f64) -> Self {
        let safe_rate = rate_per_sec.max(0.01);
        Self {
            min_interval: Duration::from_secs_f64(1.0 / safe_rate),
            hosts: DashMap::new(),
        }
    }

    fn state_for(&self, host: &str) -> Arc<HostState> {
        self.hosts
            .entry(host.to_string())
            .or_insert_with(|| {
                Arc::new(HostState {
                    last_acquired: Mutex::new(None),
                })
            })
            .clone()
    }
}

#[async_trait::async_trait]
impl HostRateLimiter for DomainRateLimiter {
    async fn acquire(&self, host: &str) {
        let state = self.state_for(host);
        let mut last = state.last_acquired.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(host, wait_ms = wait.as_millis(), "rate limiter waiting");
                tokio::time::sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }

    fn tracked_hosts_count(&self) -> usize {
        self.hosts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sequential_acquires_are_paced_apart() {
        let limiter = DomainRateLimiter::new(10.0); // 100ms interval
        let start = Instant::now();
        limiter.acquire("example.test").await;
        limiter.acquire("example.test").await;
        limiter.acquire("example.test").await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(190), "elapsed={elapsed:?}");
    }

    #[tokio::test]
    async fn different_hosts_do_not_block_each_other() {
        let limiter = DomainRateLimiter::new(1.0); // 1s interval
        let start = Instant::now();
        limiter.acquire("a.test").await;
        limiter.acquire("b.test").await;
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(limiter.tracked_hosts_count(), 2);
    }

    #[tokio::test]
    async fn zero_rate_is_clamped_to_a_safe_minimum() {
        let limiter = DomainRateLimiter::new(0.0);
        assert!(limiter.min_interval <= Duration::from_secs(100));
    }
}
