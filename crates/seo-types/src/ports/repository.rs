//! Backend-agnostic persistence ports for the crawl-analyze-score pipeline.
//!
//! Each trait models one entity's contract from the data model; semantics
//! (upsert keys, aggregation side-effects) are what matters, not the SQL.
//! A production implementation sits behind a real store; an in-memory
//! implementation exercises the same contract in tests.

use crate::error::SeoResult;
use crate::model::{CrawlJob, Issue, IssueSeverity, JobStatus, Keyword, Link, Page, Score, Site};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait SiteRepo: Send + Sync {
    async fn get_by_domain(&self, domain: &str) -> SeoResult<Option<Site>>;
    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<Site>>;
    async fn create(&self, domain: &str, root_url: &str) -> SeoResult<Site>;

    /// Sets `total_pages` to the count of Page rows for this site and
    /// `last_crawled_at` to now.
    async fn update_page_count(&self, site_id: Uuid) -> SeoResult<()>;

    async fn get_all(&self, skip: usize, limit: usize) -> SeoResult<Vec<Site>>;
}

#[async_trait]
pub trait CrawlJobRepo: Send + Sync {
    async fn create(&self, site_id: Uuid, max_depth: u32, max_pages: u32) -> SeoResult<CrawlJob>;
    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<CrawlJob>>;

    /// Transitions `status` and sets whichever of `started_at`/`completed_at`/
    /// `error_message` apply to the target state.
    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        started_at: Option<DateTime<Utc>>,
        completed_at: Option<DateTime<Utc>>,
        error_message: Option<String>,
    ) -> SeoResult<()>;

    /// Increments `pages_crawled` or `pages_failed` depending on `success`.
    async fn increment_crawled(&self, id: Uuid, success: bool) -> SeoResult<()>;

    async fn set_pages_queued(&self, id: Uuid, pages_queued: u32) -> SeoResult<()>;
    async fn get_recent_for_site(&self, site_id: Uuid, limit: usize) -> SeoResult<Vec<CrawlJob>>;
}

/// Field-level input to [`PageRepo::upsert`], mirroring the analyzed signal set.
#[derive(Debug, Clone, Default)]
pub struct PageUpsert {
    pub crawl_job_id: Option<Uuid>,
    pub canonical_url: Option<String>,
    pub status_code: Option<u16>,
    pub depth: u32,
    pub is_indexable: bool,
    pub is_canonical: bool,
    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub meta_robots: Option<String>,
    pub canonical_tag: Option<String>,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub h3_tags: Vec<String>,
    pub h4_tags: Vec<String>,
    pub h5_tags: Vec<String>,
    pub h6_tags: Vec<String>,
    pub word_count: usize,
    pub content_text: Option<String>,
    pub reading_time_seconds: u32,
    pub text_html_ratio: f64,
    pub language: Option<String>,
    pub load_time_ms: Option<u64>,
    pub page_size_bytes: Option<u64>,
    pub has_schema_markup: bool,
    pub schema_types: Vec<String>,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub has_hreflang: bool,
    pub is_https: bool,
    pub has_viewport_meta: bool,
    pub total_images: u32,
    pub images_missing_alt: u32,
    pub images_with_alt: u32,
    pub internal_links_count: u32,
    pub external_links_count: u32,
    pub structured_data: serde_json::Value,
    pub open_graph_data: std::collections::HashMap<String, String>,
    pub twitter_card_data: std::collections::HashMap<String, String>,
    pub keyword_frequencies: std::collections::HashMap<String, u32>,
}

#[async_trait]
pub trait PageRepo: Send + Sync {
    /// Upserts keyed on `(site_id, url)`.
    async fn upsert(&self, site_id: Uuid, url: &str, fields: PageUpsert) -> SeoResult<Page>;
    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<Page>>;
    async fn get_for_site(&self, site_id: Uuid, skip: usize, limit: usize) -> SeoResult<Vec<Page>>;
    async fn count_for_site(&self, site_id: Uuid) -> SeoResult<usize>;
}

#[async_trait]
pub trait LinkRepo: Send + Sync {
    async fn bulk_insert(&self, links: Vec<Link>) -> SeoResult<()>;
    /// Count of internal inbound links pointing at a resolved page.
    async fn count_inbound(&self, page_id: Uuid) -> SeoResult<u32>;
    async fn get_broken_links(&self, site_id: Uuid) -> SeoResult<Vec<Link>>;
}

#[async_trait]
pub trait ScoreRepo: Send + Sync {
    /// Upserts the site-level row, unique key `(site_id, page_id = NULL)`.
    async fn upsert_site_score(&self, site_id: Uuid, job_id: Uuid, score: Score) -> SeoResult<()>;
    async fn create_page_score(&self, score: Score) -> SeoResult<()>;
    async fn get_site_score(&self, site_id: Uuid) -> SeoResult<Option<Score>>;
}

#[async_trait]
pub trait IssueRepo: Send + Sync {
    async fn bulk_create(&self, issues: Vec<Issue>) -> SeoResult<()>;
    async fn get_for_site(
        &self,
        site_id: Uuid,
        severity: Option<IssueSeverity>,
        resolved: Option<bool>,
        skip: usize,
        limit: usize,
    ) -> SeoResult<Vec<Issue>>;
    /// Count of unresolved issues grouped by severity.
    async fn count_by_severity(
        &self,
        site_id: Uuid,
    ) -> SeoResult<std::collections::HashMap<IssueSeverity, usize>>;
    async fn delete_for_job(&self, job_id: Uuid) -> SeoResult<()>;
}

#[async_trait]
pub trait KeywordRepo: Send + Sync {
    /// Upserts keyed on `(site_id, keyword)`.
    async fn bulk_upsert(&self, site_id: Uuid, keywords: Vec<Keyword>) -> SeoResult<()>;
    /// Sorted by `opportunity_score` descending over `is_opportunity = true`.
    async fn get_opportunities(
        &self,
        site_id: Uuid,
        limit: usize,
        min_score: f64,
    ) -> SeoResult<Vec<Keyword>>;
    /// Sorted by `frequency` descending.
    async fn get_all_for_site(&self, site_id: Uuid, limit: usize) -> SeoResult<Vec<Keyword>>;
}
