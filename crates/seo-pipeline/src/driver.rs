//! Drives one crawl job end-to-end: mark running, crawl with a persisting
//! callback, aggregate and persist site-level signals, mark completed. The
//! only component in the workspace that mutates persistent state.

use crate::error::PipelineError;
use crate::mapping::{keyword_row, site_score_row};
use crate::sink::{Accumulator, PersistingSink};
use async_trait::async_trait;
use chrono::Utc;
use seo_config::{CrawlerConfig, ScoreWeights};
use seo_keywords::KeywordEngine;
use seo_spider::{CancellationPoll, CrawlOptions, Crawler};
use seo_types::{CrawlJobRepo, IssueRepo, JobStatus, KeywordRepo, LinkRepo, PageRepo, ScoreRepo, SiteRepo};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

const MAX_PERSISTED_OPPORTUNITIES: usize = 300;

/// The repository handles the driver needs, one `Arc<dyn _>` per port. A
/// single concrete store may back all seven — see [`crate::memory::InMemoryStore`].
#[derive(Clone)]
pub struct PipelineRepos {
    pub site_repo: Arc<dyn SiteRepo>,
    pub job_repo: Arc<dyn CrawlJobRepo>,
    pub page_repo: Arc<dyn PageRepo>,
    pub link_repo: Arc<dyn LinkRepo>,
    pub score_repo: Arc<dyn ScoreRepo>,
    pub issue_repo: Arc<dyn IssueRepo>,
    pub keyword_repo: Arc<dyn KeywordRepo>,
}

#[derive(Debug, Clone)]
pub struct JobOutcome {
    pub job_id: Uuid,
    pub site_id: Uuid,
    pub pages_crawled: u32,
    pub pages_failed: u32,
    pub pages_queued: u32,
    pub overall_score: f64,
}

struct JobCancellationPoll {
    job_repo: Arc<dyn CrawlJobRepo>,
    job_id: Uuid,
}

#[async_trait]
impl CancellationPoll for JobCancellationPoll {
    async fn is_cancelled(&self) -> bool {
        matches!(
            self.job_repo.get_by_id(self.job_id).await,
            Ok(Some(job)) if job.status == JobStatus::Cancelled
        )
    }
}

/// Runs one job to completion. On success or failure, the job row reflects
/// the terminal state before this returns. On failure, the original error is
/// still returned to the caller with full context.
#[tracing::instrument(skip(repos, crawler, crawler_cfg, score_weights), fields(job_id = %job_id))]
pub async fn run_crawl_job(
    repos: &PipelineRepos,
    crawler: &Crawler,
    job_id: Uuid,
    crawler_cfg: &CrawlerConfig,
    score_weights: &ScoreWeights,
) -> anyhow::Result<JobOutcome> {
    match run_inner(repos, crawler, job_id, crawler_cfg, score_weights).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => {
            let anyhow_err: anyhow::Error = err.into();
            if let Err(mark_err) = mark_job_failed(repos, job_id, &anyhow_err).await {
                tracing::error!(job_id = %job_id, error = %mark_err, "failed to persist job failure");
            }
            Err(anyhow_err)
        }
    }
}

async fn mark_job_failed(repos: &PipelineRepos, job_id: Uuid, err: &anyhow::Error) -> Result<(), PipelineError> {
    let message = seo_types::CrawlJob::truncate_error(&err.to_string());
    repos
        .job_repo
        .update_status(job_id, JobStatus::Failed, None, Some(Utc::now()), Some(message))
        .await
        .map_err(PipelineError::from)
}

async fn run_inner(
    repos: &PipelineRepos,
    crawler: &Crawler,
    job_id: Uuid,
    crawler_cfg: &CrawlerConfig,
    score_weights: &ScoreWeights,
) -> Result<JobOutcome, PipelineError> {
    let job = repos.job_repo.get_by_id(job_id).await?.ok_or(PipelineError::JobNotFound(job_id))?;
    let site = repos.site_repo.get_by_id(job.site_id).await?.ok_or(PipelineError::SiteNotFound(job.site_id))?;

    repos
        .job_repo
        .update_status(job.id, JobStatus::Running, Some(Utc::now()), None, None)
        .await?;

    let accumulator = Arc::new(Mutex::new(Accumulator::default()));
    let sink = Arc::new(PersistingSink::new(
        site.id,
        job.id,
        repos.page_repo.clone(),
        repos.link_repo.clone(),
        repos.score_repo.clone(),
        repos.issue_repo.clone(),
        repos.job_repo.clone(),
        *score_weights,
        accumulator.clone(),
    ));
    let cancellation: Arc<dyn CancellationPoll> = Arc::new(JobCancellationPoll {
        job_repo: repos.job_repo.clone(),
        job_id: job.id,
    });

    let options = CrawlOptions::new(
        site.root_url.clone(),
        job.id,
        site.id,
        job.max_depth,
        job.max_pages,
        job.respect_robots,
        crawler_cfg,
    );
    let stats = crawler
        .run(options, sink, cancellation)
        .await
        .map_err(PipelineError::Crawl)?;

    repos.job_repo.set_pages_queued(job.id, stats.pages_queued).await?;

    let Accumulator { page_scores, page_keyword_data, analyzed_pages } = Arc::try_unwrap(accumulator)
        .map_err(|_| PipelineError::Internal("crawl callback accumulator still shared after crawl completion".to_string()))?
        .into_inner();

    let site_score = seo_scoring::aggregate_site_score(&page_scores);
    repos
        .score_repo
        .upsert_site_score(site.id, job.id, site_score_row(site.id, job.id, &site_score))
        .await?;

    let mut opportunities = KeywordEngine::default().aggregate_site_keywords(&page_keyword_data);
    opportunities.truncate(MAX_PERSISTED_OPPORTUNITIES);
    let keyword_rows = opportunities.into_iter().map(|o| keyword_row(site.id, job.id, o)).collect();
    repos.keyword_repo.bulk_upsert(site.id, keyword_rows).await?;

    let site_recs = seo_recommendations::generate_site_recommendations(&analyzed_pages);
    let issue_rows = site_recs
        .into_iter()
        .map(|rec| crate::mapping::issue_row(site.id, None, Some(job.id), rec))
        .collect();
    repos.issue_repo.bulk_create(issue_rows).await?;

    repos.site_repo.update_page_count(site.id).await?;

    repos
        .job_repo
        .update_status(job.id, JobStatus::Completed, None, Some(Utc::now()), None)
        .await?;

    Ok(JobOutcome {
        job_id: job.id,
        site_id: site.id,
        pages_crawled: stats.pages_crawled,
        pages_failed: stats.pages_failed,
        pages_queued: stats.pages_queued,
        overall_score: site_score.overall_score,
    })
}
