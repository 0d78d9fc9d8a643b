//! # SEO Fetch
//!
//! The network layer of the crawl-analyze-score pipeline: per-host rate
//! limiting, robots.txt policy, sitemap discovery, and the HTTP fetcher.
//! Kept separate from the crawler so each collaborator can be tested and
//! swapped independently (e.g. a browser-backed fetcher behind the same
//! `PageFetcher` trait).

#[cfg(feature = "browser")]
pub mod browser_fetcher;
pub mod http_fetcher;
pub mod rate_limit;
pub mod robots;
pub mod sitemap;

#[cfg(feature = "browser")]
pub use browser_fetcher::BrowserFetcher;
pub use http_fetcher::{HttpFetcher, RetryConfig};
pub use rate_limit::DomainRateLimiter;
pub use robots::RobotsPolicy;
pub use sitemap::SitemapDiscovery;
