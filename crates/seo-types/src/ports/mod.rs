mod fetcher;
mod rate_limit;
mod repository;

pub use fetcher::{CrawlResult, PageFetcher};
pub use rate_limit::{HostRateLimiter, RateLimiterStats};
pub use repository::{
    CrawlJobRepo, IssueRepo, KeywordRepo, LinkRepo, PageRepo, PageUpsert, ScoreRepo, SiteRepo,
};
