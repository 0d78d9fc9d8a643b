use async_trait::async_trait;
use std::collections::HashMap;

/// The shared result contract for the HTTP and browser fetcher implementations.
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub url: String,
    pub final_url: String,
    pub status_code: u16,
    pub html: String,
    pub headers: HashMap<String, String>,
    pub load_time_ms: u64,
    pub page_size_bytes: u64,
    pub error: Option<String>,
}

impl CrawlResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..400).contains(&self.status_code)
    }
}

/// A single GET-and-time operation, satisfied by the HTTP fetcher or the
/// optional headless-browser fetcher. The crawler is generic over this trait
/// so it never depends on a concrete transport.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> CrawlResult;
}
