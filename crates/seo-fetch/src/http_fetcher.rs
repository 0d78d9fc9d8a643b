//! HTTP fetcher: one GET with redirect-following, timeouts, and
//! exponential-backoff retry on transport errors.

use reqwest::Client;
use seo_types::{CrawlResult, PageFetcher};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Retry policy for transport/timeout failures. HTTP error statuses are
/// reported on the `CrawlResult` rather than retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.initial_delay.as_millis() as f64 * 2f64.powi(attempt as i32);
        Duration::from_millis(scaled as u64).min(self.max_delay)
    }
}

pub struct HttpFetcher {
    client: Client,
    retry: RetryConfig,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, retry: RetryConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .pool_max_idle_per_host(50)
            .build()?;
        Ok(Self { client, retry })
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_once(&self, url: &str) -> CrawlResult {
        let start = Instant::now();
        let mut last_error: Option<String> = None;

        for attempt in 0..self.retry.max_attempts {
            match self
                .client
                .get(url)
                .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("Accept-Language", "en-US,en;q=0.5")
                .header("Accept-Encoding", "gzip, deflate, br")
                .send()
                .await
            {
                Ok(response) => {
                    let final_url = response.url().to_string();
                    let status = response.status().as_u16();
                    let headers = extract_headers(&response);
                    let body = response.text().await.unwrap_or_default();
                    let load_time_ms = start.elapsed().as_millis() as u64;
                    return CrawlResult {
                        url: url.to_string(),
                        final_url,
                        status_code: status,
                        page_size_bytes: body.len() as u64,
                        html: body,
                        headers,
                        load_time_ms,
                        error: None,
                    };
                }
                Err(err) => {
                    last_error = Some(err.to_string());
                    if !is_retryable(&err) || attempt + 1 == self.retry.max_attempts {
                        break;
                    }
                    let delay = self.retry.delay_for(attempt);
                    debug!(url, attempt, delay_ms = delay.as_millis(), "retrying fetch");
                    tokio::time::sleep(delay).await;
                }
            }
        }

        warn!(url, error = ?last_error, "fetch failed after retries");
        CrawlResult {
            url: url.to_string(),
            final_url: url.to_string(),
            status_code: 0,
            html: String::new(),
            headers: HashMap::new(),
            load_time_ms: start.elapsed().as_millis() as u64,
            page_size_bytes: 0,
            error: last_error,
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult {
        self.fetch_once(url).await
    }
}

fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
    response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect()
}

/// Transport/timeout errors are retryable; HTTP status errors are not
/// (status codes are reported on `CrawlResult` instead).
fn is_retryable(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_request()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_grows_exponentially_and_is_capped() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_for(0), Duration::from_secs(1));
        assert_eq!(retry.delay_for(1), Duration::from_secs(2));
        assert_eq!(retry.delay_for(2), Duration::from_secs(4));
        assert_eq!(retry.delay_for(10), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn fetch_against_unroutable_host_reports_error_with_zero_status() {
        let fetcher = HttpFetcher::new(
            "SEOBot/1.0 (+test)",
            Duration::from_millis(200),
            RetryConfig {
                max_attempts: 1,
                ..RetryConfig::default()
            },
        )
        .unwrap();
        let result = fetcher.fetch("http://127.0.0.1:1/unreachable").await;
        assert_eq!(result.status_code, 0);
        assert!(result.error.is_some());
        assert!(!result.is_success());
    }
}
