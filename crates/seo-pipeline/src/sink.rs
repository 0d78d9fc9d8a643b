//! The crawler's `PageSink` implementation: the one place a crawled page
//! turns into a persisted Page, Link, Score, and Issue rows. Per-page
//! callback errors are logged and swallowed rather than propagated — a lost
//! page does not fail the job.

use crate::mapping::{issue_row, link_rows, page_score_row, page_upsert};
use async_trait::async_trait;
use seo_config::ScoreWeights;
use seo_extraction::AnalyzedPage;
use seo_scoring::PageScore;
use seo_spider::PageSink;
use seo_types::{CrawlJobRepo, CrawlResult, Issue, IssueRepo, LinkRepo, PageRepo, ScoreRepo};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct Accumulator {
    pub page_scores: Vec<PageScore>,
    pub page_keyword_data: Vec<(String, HashMap<String, u32>)>,
    pub analyzed_pages: Vec<AnalyzedPage>,
}

/// Holds everything the crawl callback needs to analyze, score, and persist
/// one page, plus a shared accumulator for the signals the end-of-job
/// aggregation stage needs (site score mean, keyword rollup, site-wide
/// recommendations). Matches the source pipeline's literal behavior of
/// holding these in memory for the duration of one job rather than
/// re-deriving them from the store afterward.
pub struct PersistingSink {
    site_id: Uuid,
    job_id: Uuid,
    page_repo: Arc<dyn PageRepo>,
    link_repo: Arc<dyn LinkRepo>,
    score_repo: Arc<dyn ScoreRepo>,
    issue_repo: Arc<dyn IssueRepo>,
    job_repo: Arc<dyn CrawlJobRepo>,
    weights: ScoreWeights,
    accumulator: Arc<Mutex<Accumulator>>,
}

impl PersistingSink {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site_id: Uuid,
        job_id: Uuid,
        page_repo: Arc<dyn PageRepo>,
        link_repo: Arc<dyn LinkRepo>,
        score_repo: Arc<dyn ScoreRepo>,
        issue_repo: Arc<dyn IssueRepo>,
        job_repo: Arc<dyn CrawlJobRepo>,
        weights: ScoreWeights,
        accumulator: Arc<Mutex<Accumulator>>,
    ) -> Self {
        Self {
            site_id,
            job_id,
            page_repo,
            link_repo,
            score_repo,
            issue_repo,
            job_repo,
            weights,
            accumulator,
        }
    }
}

#[async_trait]
impl PageSink for PersistingSink {
    async fn on_page_crawled(&self, result: CrawlResult, depth: u32) {
        let url = result.url.clone();
        let success = result.is_success();
        let analyzed = seo_extraction::analyze(&result, depth);

        let upsert = page_upsert(&analyzed, self.job_id);
        let page = match self.page_repo.upsert(self.site_id, &analyzed.url, upsert).await {
            Ok(page) => page,
            Err(err) => {
                tracing::error!(url = %url, error = %err, "failed to persist page, dropping it from this job");
                if let Err(err) = self.job_repo.increment_crawled(self.job_id, success).await {
                    tracing::error!(url = %url, error = %err, "failed to increment job counters");
                }
                return;
            }
        };

        let links = link_rows(self.site_id, page.id, &analyzed);
        if !links.is_empty() {
            if let Err(err) = self.link_repo.bulk_insert(links).await {
                tracing::error!(url = %url, error = %err, "failed to persist links");
            }
        }

        let page_score = seo_scoring::score_page(&analyzed, 0, &self.weights);
        let score_row = page_score_row(self.site_id, page.id, self.job_id, &page_score);
        if let Err(err) = self.score_repo.create_page_score(score_row).await {
            tracing::error!(url = %url, error = %err, "failed to persist page score");
        }

        let recs = seo_recommendations::generate_page_recommendations(&analyzed);
        let issues: Vec<Issue> = recs
            .into_iter()
            .map(|rec| issue_row(self.site_id, Some(page.id), Some(self.job_id), rec))
            .collect();
        if !issues.is_empty() {
            if let Err(err) = self.issue_repo.bulk_create(issues).await {
                tracing::error!(url = %url, error = %err, "failed to persist page issues");
            }
        }

        if let Err(err) = self.job_repo.increment_crawled(self.job_id, success).await {
            tracing::error!(url = %url, error = %err, "failed to increment job counters");
        }

        let mut accumulator = self.accumulator.lock().await;
        accumulator.page_keyword_data.push((analyzed.url.clone(), analyzed.keyword_frequencies.clone()));
        accumulator.analyzed_pages.push(analyzed);
        accumulator.page_scores.push(page_score);
    }
}
