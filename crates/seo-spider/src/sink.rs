//! The crawler's two collaboration seams: where crawled pages go, and how
//! it learns a job has been cancelled. Kept as traits so the pipeline can
//! supply a persisting implementation while tests supply an in-memory one.

use async_trait::async_trait;
use seo_types::CrawlResult;

/// Receives one `CrawlResult` per crawled URL, in the batch order the
/// crawler produced it. A production implementation analyzes, scores, and
/// persists; a test implementation just records.
#[async_trait]
pub trait PageSink: Send + Sync {
    async fn on_page_crawled(&self, result: CrawlResult, depth: u32);
}

/// Lets the crawler observe an externally-driven job-status transition to
/// `cancelled` without owning the job record itself.
#[async_trait]
pub trait CancellationPoll: Send + Sync {
    async fn is_cancelled(&self) -> bool;
}

/// A poll that never reports cancellation, for callers that don't support it.
pub struct NeverCancelled;

#[async_trait]
impl CancellationPoll for NeverCancelled {
    async fn is_cancelled(&self) -> bool {
        false
    }
}
