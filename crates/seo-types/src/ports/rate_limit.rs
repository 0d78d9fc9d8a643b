use async_trait::async_trait;

/// Per-host pacing primitive. `acquire` blocks cooperatively until the
/// configured minimum interval since the host's last acquire has elapsed.
#[async_trait]
pub trait HostRateLimiter: Send + Sync {
    async fn acquire(&self, host: &str);
    fn tracked_hosts_count(&self) -> usize;
}

#[derive(Debug, Clone, Default)]
pub struct RateLimiterStats {
    pub tracked_hosts: usize,
    pub rate_rps: f64,
}
