//! Optional headless-browser fetcher, compiled only under the `browser`
//! feature. Shares the `PageFetcher` contract with [`crate::HttpFetcher`] so
//! the crawler never knows which transport it's driving.

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use seo_types::{CrawlResult, PageFetcher};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

/// A settle delay applied after `networkidle` before reading page content,
/// giving any trailing DOM mutations (lazy-loaded images, late script
/// insertions) a chance to finish.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

pub struct BrowserFetcher {
    browser: Browser,
    _handler: JoinHandle<()>,
    nav_timeout: Duration,
}

impl BrowserFetcher {
    /// Launches one headless Chromium instance scoped to the crawler's run.
    /// The event-handler task is kept alive for the fetcher's lifetime and
    /// aborted on drop.
    pub async fn launch(user_agent: &str, nav_timeout: Duration) -> anyhow::Result<Self> {
        let config = BrowserConfig::builder()
            .user_agent(user_agent)
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    warn!(error = %err, "browser event handler error");
                }
            }
        });

        Ok(Self {
            browser,
            _handler: handler_task,
            nav_timeout,
        })
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_once(&self, url: &str) -> CrawlResult {
        let start = Instant::now();
        match timeout(self.nav_timeout, self.navigate(url)).await {
            Ok(Ok((final_url, html))) => CrawlResult {
                url: url.to_string(),
                final_url,
                status_code: 200,
                page_size_bytes: html.len() as u64,
                html,
                headers: HashMap::new(),
                load_time_ms: start.elapsed().as_millis() as u64,
                error: None,
            },
            Ok(Err(err)) => {
                warn!(url, error = %err, "browser navigation failed");
                CrawlResult {
                    url: url.to_string(),
                    final_url: url.to_string(),
                    status_code: 0,
                    html: String::new(),
                    headers: HashMap::new(),
                    load_time_ms: start.elapsed().as_millis() as u64,
                    page_size_bytes: 0,
                    error: Some(err.to_string()),
                }
            }
            Err(_) => {
                debug!(url, timeout_ms = self.nav_timeout.as_millis(), "browser navigation timed out");
                CrawlResult {
                    url: url.to_string(),
                    final_url: url.to_string(),
                    status_code: 0,
                    html: String::new(),
                    headers: HashMap::new(),
                    load_time_ms: start.elapsed().as_millis() as u64,
                    page_size_bytes: 0,
                    error: Some(format!("navigation timed out after {:?}", self.nav_timeout)),
                }
            }
        }
    }

    /// A fresh page per fetch is this fetcher's unit of browsing-context
    /// isolation: no cookies or storage carry over between pages, and the
    /// page is closed on every exit path, including navigation failure.
    async fn navigate(&self, url: &str) -> anyhow::Result<(String, String)> {
        let page = self.browser.new_page("about:blank").await?;
        let result = async {
            page.goto(url).await?;
            page.wait_for_navigation().await?;
            tokio::time::sleep(SETTLE_DELAY).await;
            let final_url = page
                .url()
                .await?
                .unwrap_or_else(|| url.to_string());
            let html = page.content().await?;
            Ok::<_, anyhow::Error>((final_url, html))
        }
        .await;
        let _ = page.close().await;
        result
    }
}

#[async_trait::async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch(&self, url: &str) -> CrawlResult {
        self.fetch_once(url).await
    }
}
