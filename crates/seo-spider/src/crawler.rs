//! The breadth-first crawl orchestrator: queue, dedup, depth and page
//! budgets, per-batch concurrency, and page-crawled callback dispatch.

use crate::link_extract::extract_hrefs;
use crate::sink::{CancellationPoll, PageSink};
use crate::url_utils::{is_crawlable, is_internal, normalize};
use chrono::{DateTime, Utc};
use seo_config::CrawlerConfig;
use seo_fetch::{RobotsPolicy, SitemapDiscovery};
use seo_types::{CrawlResult, HostRateLimiter, PageFetcher};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

#[derive(Debug)]
pub struct CrawlOptions {
    pub start_url: String,
    pub job_id: Uuid,
    pub site_id: Uuid,
    pub max_depth: u32,
    pub max_pages: u32,
    pub max_concurrent: usize,
    pub respect_robots: bool,
}

impl CrawlOptions {
    /// Builds options with a default concurrency cap of 20, hard-capped by
    /// the job's configured `max_concurrent` ceiling.
    pub fn new(
        start_url: impl Into<String>,
        job_id: Uuid,
        site_id: Uuid,
        max_depth: u32,
        max_pages: u32,
        respect_robots: bool,
        cfg: &CrawlerConfig,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            job_id,
            site_id,
            max_depth,
            max_pages,
            max_concurrent: 20usize.min(cfg.max_concurrent as usize),
            respect_robots,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub pages_crawled: u32,
    pub pages_failed: u32,
    pub pages_queued: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Orchestrates one BFS crawl run against whatever fetcher/rate-limiter the
/// caller supplies, dispatching each crawled page to a [`PageSink`].
pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    rate_limiter: Arc<dyn HostRateLimiter>,
    discovery_client: reqwest::Client,
    user_agent: String,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        rate_limiter: Arc<dyn HostRateLimiter>,
        user_agent: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let user_agent = user_agent.into();
        let discovery_client = reqwest::Client::builder()
            .user_agent(user_agent.clone())
            .build()?;
        Ok(Self {
            fetcher,
            rate_limiter,
            discovery_client,
            user_agent,
        })
    }

    #[instrument(skip(self, sink, cancellation), fields(job_id = %options.job_id, site_id = %options.site_id))]
    pub async fn run(
        &self,
        options: CrawlOptions,
        sink: Arc<dyn PageSink>,
        cancellation: Arc<dyn CancellationPoll>,
    ) -> anyhow::Result<CrawlStats> {
        let started_at = Utc::now();
        let start_url =
            normalize(&options.start_url).ok_or_else(|| anyhow::anyhow!("invalid start url: {}", options.start_url))?;
        let start_host = start_url
            .host_str()
            .ok_or_else(|| anyhow::anyhow!("start url has no host"))?
            .to_string();

        let robots = if options.respect_robots {
            RobotsPolicy::fetch(&self.discovery_client, &start_url, &self.user_agent).await
        } else {
            RobotsPolicy::default()
        };

        let sitemap_urls = self.discover_sitemaps(&start_url, &robots).await;

        let mut queue: VecDeque<(Url, u32)> = VecDeque::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut queued: HashSet<String> = HashSet::new();

        queued.insert(start_url.to_string());
        queue.push_back((start_url, 0));

        for candidate in sitemap_urls {
            let Some(url) = normalize(&candidate) else { continue };
            if is_internal(&url, &start_host) && is_crawlable(&url) && queued.insert(url.to_string()) {
                queue.push_back((url, 0));
            }
        }

        let mut pages_crawled = 0u32;
        let mut pages_failed = 0u32;

        'outer: while !queue.is_empty() && pages_crawled + pages_failed < options.max_pages {
            if cancellation.is_cancelled().await {
                info!("job observed cancelled, tearing down crawl loop");
                break;
            }

            let mut batch = Vec::new();
            while batch.len() < options.max_concurrent.max(1) {
                let Some((url, depth)) = queue.pop_front() else { break };
                let key = url.to_string();
                if visited.contains(&key) {
                    continue;
                }
                visited.insert(key);
                batch.push((url, depth));
            }
            if batch.is_empty() {
                break;
            }

            let fetches = batch
                .into_iter()
                .map(|(url, depth)| self.crawl_one(url, depth, &robots, options.respect_robots));
            let results = futures::future::join_all(fetches).await;

            for (outcome, depth) in results {
                let Some(result) = outcome else {
                    continue;
                };
                if !result.is_success() {
                    pages_failed += 1;
                } else {
                    pages_crawled += 1;
                }

                let mut discovered = Vec::new();
                if result.is_success() && depth < options.max_depth {
                    if let Ok(base) = Url::parse(&result.final_url) {
                        discovered = extract_hrefs(&result.html, &base);
                    }
                }

                sink.on_page_crawled(result, depth).await;

                for link in discovered {
                    if !is_internal(&link, &start_host) || !is_crawlable(&link) {
                        continue;
                    }
                    let key = link.to_string();
                    if !visited.contains(&key) && queued.insert(key) {
                        queue.push_back((link, depth + 1));
                    }
                }

                if pages_crawled + pages_failed >= options.max_pages {
                    break 'outer;
                }
            }
        }

        let pages_queued = queued.difference(&visited).count() as u32;
        Ok(CrawlStats {
            pages_crawled,
            pages_failed,
            pages_queued,
            started_at,
            completed_at: Utc::now(),
        })
    }

    async fn discover_sitemaps(&self, start_url: &Url, robots: &RobotsPolicy) -> Vec<String> {
        let origin = start_url.origin().ascii_serialization();
        let discovery = SitemapDiscovery::new(self.discovery_client.clone());
        let mut candidates = discovery.probe_common_paths(&origin).await;
        candidates.extend(robots.sitemaps().iter().cloned());
        discovery.parse_all(candidates).await
    }

    async fn crawl_one(
        &self,
        url: Url,
        depth: u32,
        robots: &RobotsPolicy,
        respect_robots: bool,
    ) -> (Option<CrawlResult>, u32) {
        let Some(host) = url.host_str().map(str::to_string) else {
            warn!(url = %url, "url has no host, skipping");
            return (None, depth);
        };
        self.rate_limiter.acquire(&host).await;
        if respect_robots && !robots.is_allowed(&url) {
            debug!(url = %url, "robots denied, skipping");
            return (None, depth);
        }
        let result = self.fetcher.fetch(url.as_str()).await;
        (Some(result), depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NeverCancelled;
    use async_trait::async_trait;
    use std::collections::HashMap as StdHashMap;
    use tokio::sync::Mutex as AsyncMutex;

    struct FakeFetcher {
        pages: StdHashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> CrawlResult {
            match self.pages.get(url) {
                Some(html) => CrawlResult {
                    url: url.to_string(),
                    final_url: url.to_string(),
                    status_code: 200,
                    html: html.clone(),
                    headers: StdHashMap::new(),
                    load_time_ms: 1,
                    page_size_bytes: html.len() as u64,
                    error: None,
                },
                None => CrawlResult {
                    url: url.to_string(),
                    final_url: url.to_string(),
                    status_code: 404,
                    html: String::new(),
                    headers: StdHashMap::new(),
                    load_time_ms: 1,
                    page_size_bytes: 0,
                    error: None,
                },
            }
        }
    }

    struct NoopRateLimiter;

    #[async_trait]
    impl HostRateLimiter for NoopRateLimiter {
        async fn acquire(&self, _host: &str) {}
        fn tracked_hosts_count(&self) -> usize {
            0
        }
    }

    struct RecordingSink {
        visited: AsyncMutex<Vec<(String, u32)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                visited: AsyncMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSink for RecordingSink {
        async fn on_page_crawled(&self, result: CrawlResult, depth: u32) {
            self.visited.lock().await.push((result.url, depth));
        }
    }

    fn crawler_with(pages: &[(&str, &str)]) -> Crawler {
        let pages = pages
            .iter()
            .map(|(url, html)| (url.to_string(), html.to_string()))
            .collect();
        Crawler::new(
            Arc::new(FakeFetcher { pages }),
            Arc::new(NoopRateLimiter),
            "SEOBot/1.0 (+test)",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn depth_cutoff_stops_enqueueing_beyond_max_depth() {
        let crawler = crawler_with(&[
            ("https://example.test/", r#"<a href="/a">a</a>"#),
            ("https://example.test/a", r#"<a href="/b">b</a>"#),
            ("https://example.test/b", "leaf"),
        ]);
        let sink = Arc::new(RecordingSink::new());
        let stats = crawler
            .run(
                CrawlOptions {
                    start_url: "https://example.test/".to_string(),
                    job_id: Uuid::new_v4(),
                    site_id: Uuid::new_v4(),
                    max_depth: 1,
                    max_pages: 100,
                    max_concurrent: 10,
                    respect_robots: false,
                },
                sink.clone(),
                Arc::new(NeverCancelled),
            )
            .await
            .unwrap();

        let visited = sink.visited.lock().await;
        let urls: Vec<&str> = visited.iter().map(|(u, _)| u.as_str()).collect();
        assert!(urls.contains(&"https://example.test/"));
        assert!(urls.contains(&"https://example.test/a"));
        assert!(!urls.contains(&"https://example.test/b"));
        assert_eq!(stats.pages_crawled, 2);
    }

    #[tokio::test]
    async fn max_pages_bounds_total_attempts() {
        let crawler = crawler_with(&[
            ("https://example.test/", r#"<a href="/a">a</a><a href="/b">b</a>"#),
            ("https://example.test/a", "leaf"),
            ("https://example.test/b", "leaf"),
        ]);
        let sink = Arc::new(RecordingSink::new());
        let stats = crawler
            .run(
                CrawlOptions {
                    start_url: "https://example.test/".to_string(),
                    job_id: Uuid::new_v4(),
                    site_id: Uuid::new_v4(),
                    max_depth: 5,
                    max_pages: 1,
                    max_concurrent: 10,
                    respect_robots: false,
                },
                sink,
                Arc::new(NeverCancelled),
            )
            .await
            .unwrap();

        assert_eq!(stats.pages_crawled + stats.pages_failed, 1);
    }

    #[tokio::test]
    async fn failed_fetches_are_counted_but_still_dispatched() {
        let crawler = crawler_with(&[("https://example.test/", "leaf")]);
        let sink = Arc::new(RecordingSink::new());
        let stats = crawler
            .run(
                CrawlOptions {
                    start_url: "https://example.test/missing".to_string(),
                    job_id: Uuid::new_v4(),
                    site_id: Uuid::new_v4(),
                    max_depth: 0,
                    max_pages: 10,
                    max_concurrent: 10,
                    respect_robots: false,
                },
                sink.clone(),
                Arc::new(NeverCancelled),
            )
            .await
            .unwrap();

        assert_eq!(stats.pages_failed, 1);
        assert_eq!(stats.pages_crawled, 0);
        assert_eq!(sink.visited.lock().await.len(), 1);
    }

    #[test]
    fn crawl_options_default_concurrency_is_capped_by_configuration() {
        let mut cfg = CrawlerConfig::default();
        cfg.max_concurrent = 5;
        let options = CrawlOptions::new(
            "https://example.test/",
            Uuid::new_v4(),
            Uuid::new_v4(),
            10,
            1000,
            true,
            &cfg,
        );
        assert_eq!(options.max_concurrent, 5);

        cfg.max_concurrent = 100;
        let options = CrawlOptions::new(
            "https://example.test/",
            Uuid::new_v4(),
            Uuid::new_v4(),
            10,
            1000,
            true,
            &cfg,
        );
        assert_eq!(options.max_concurrent, 20);
    }
}
