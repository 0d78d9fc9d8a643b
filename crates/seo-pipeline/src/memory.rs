//! An in-memory implementation of every repository port, for tests and for
//! the CLI entry point when no real store is configured. Mutations are
//! applied under one `std::sync::Mutex` guard per call, modeling the "one
//! short transaction per batch of rows" contract without a real database.

use async_trait::async_trait;
use chrono::Utc;
use seo_types::{
    CrawlJob, CrawlJobRepo, Issue, IssueRepo, IssueSeverity, JobStatus, Keyword, KeywordRepo,
    Link, LinkRepo, Page, PageRepo, PageUpsert, Score, ScoreRepo, Site, SiteRepo,
};
use seo_types::{SeoError, SeoResult};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct StoreInner {
    sites: Vec<Site>,
    jobs: Vec<CrawlJob>,
    pages: Vec<Page>,
    links: Vec<Link>,
    page_scores: Vec<Score>,
    site_scores: Vec<Score>,
    issues: Vec<Issue>,
    keywords: Vec<Keyword>,
}

/// A single shared store satisfying all seven repository traits. Every
/// accessor in the pipeline driver holds the same `Arc<InMemoryStore>` cast
/// to whichever trait object it needs, so the whole graph shares one lock.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Test-only escape hatch: the `CrawlJobRepo` port has no way to flip
    /// `respect_robots` after creation, so fixtures that need it reach in
    /// here directly instead of growing the port for one field.
    #[doc(hidden)]
    pub fn set_respect_robots(&self, job_id: Uuid, respect_robots: bool) {
        if let Some(job) = self.lock().jobs.iter_mut().find(|j| j.id == job_id) {
            job.respect_robots = respect_robots;
        }
    }
}

fn page_field_from(site_id: Uuid, url: &str, id: Uuid, crawled_at: chrono::DateTime<Utc>, fields: PageUpsert) -> Page {
    Page {
        id,
        site_id,
        crawl_job_id: fields.crawl_job_id,
        url: url.to_string(),
        canonical_url: fields.canonical_url,
        status_code: fields.status_code,
        depth: fields.depth,
        is_indexable: fields.is_indexable,
        is_canonical: fields.is_canonical,
        title: fields.title,
        title_length: fields.title_length,
        meta_description: fields.meta_description,
        meta_description_length: fields.meta_description_length,
        meta_robots: fields.meta_robots,
        canonical_tag: fields.canonical_tag,
        h1_tags: fields.h1_tags,
        h2_tags: fields.h2_tags,
        h3_tags: fields.h3_tags,
        h4_tags: fields.h4_tags,
        h5_tags: fields.h5_tags,
        h6_tags: fields.h6_tags,
        word_count: fields.word_count,
        content_text: fields.content_text,
        reading_time_seconds: fields.reading_time_seconds,
        text_html_ratio: fields.text_html_ratio,
        language: fields.language,
        load_time_ms: fields.load_time_ms,
        page_size_bytes: fields.page_size_bytes,
        has_schema_markup: fields.has_schema_markup,
        schema_types: fields.schema_types,
        has_open_graph: fields.has_open_graph,
        has_twitter_card: fields.has_twitter_card,
        has_hreflang: fields.has_hreflang,
        is_https: fields.is_https,
        has_viewport_meta: fields.has_viewport_meta,
        total_images: fields.total_images,
        images_missing_alt: fields.images_missing_alt,
        images_with_alt: fields.images_with_alt,
        internal_links_count: fields.internal_links_count,
        external_links_count: fields.external_links_count,
        broken_links_count: 0,
        structured_data: fields.structured_data,
        open_graph_data: fields.open_graph_data,
        twitter_card_data: fields.twitter_card_data,
        keyword_frequencies: fields.keyword_frequencies,
        crawled_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl SiteRepo for InMemoryStore {
    async fn get_by_domain(&self, domain: &str) -> SeoResult<Option<Site>> {
        Ok(self.lock().sites.iter().find(|s| s.domain == domain).cloned())
    }

    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<Site>> {
        Ok(self.lock().sites.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, domain: &str, root_url: &str) -> SeoResult<Site> {
        let site = Site::new(domain, root_url);
        self.lock().sites.push(site.clone());
        Ok(site)
    }

    async fn update_page_count(&self, site_id: Uuid) -> SeoResult<()> {
        let mut store = self.lock();
        let total_pages = store.pages.iter().filter(|p| p.site_id == site_id).count() as i64;
        let now = Utc::now();
        let site = store
            .sites
            .iter_mut()
            .find(|s| s.id == site_id)
            .ok_or_else(|| SeoError::SiteNotFound(site_id.to_string()))?;
        site.total_pages = total_pages;
        site.last_crawled_at = Some(now);
        site.updated_at = now;
        Ok(())
    }

    async fn get_all(&self, skip: usize, limit: usize) -> SeoResult<Vec<Site>> {
        Ok(self.lock().sites.iter().skip(skip).take(limit).cloned().collect())
    }
}

#[async_trait]
impl CrawlJobRepo for InMemoryStore {
    async fn create(&self, site_id: Uuid, max_depth: u32, max_pages: u32) -> SeoResult<CrawlJob> {
        let job = CrawlJob::new(site_id, max_depth, max_pages);
        self.lock().jobs.push(job.clone());
        Ok(job)
    }

    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<CrawlJob>> {
        Ok(self.lock().jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
        started_at: Option<chrono::DateTime<Utc>>,
        completed_at: Option<chrono::DateTime<Utc>>,
        error_message: Option<String>,
    ) -> SeoResult<()> {
        let mut store = self.lock();
        let job = store
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| SeoError::JobNotFound(id.to_string()))?;
        job.status = status;
        if let Some(started_at) = started_at {
            job.started_at = Some(started_at);
        }
        if let Some(completed_at) = completed_at {
            job.completed_at = Some(completed_at);
        }
        if let Some(error_message) = error_message {
            job.error_message = Some(CrawlJob::truncate_error(&error_message));
        }
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn increment_crawled(&self, id: Uuid, success: bool) -> SeoResult<()> {
        let mut store = self.lock();
        let job = store
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| SeoError::JobNotFound(id.to_string()))?;
        if success {
            job.pages_crawled += 1;
        } else {
            job.pages_failed += 1;
        }
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn set_pages_queued(&self, id: Uuid, pages_queued: u32) -> SeoResult<()> {
        let mut store = self.lock();
        let job = store
            .jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| SeoError::JobNotFound(id.to_string()))?;
        job.pages_queued = pages_queued;
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn get_recent_for_site(&self, site_id: Uuid, limit: usize) -> SeoResult<Vec<CrawlJob>> {
        let store = self.lock();
        let mut jobs: Vec<CrawlJob> = store.jobs.iter().filter(|j| j.site_id == site_id).cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs.truncate(limit);
        Ok(jobs)
    }
}

#[async_trait]
impl PageRepo for InMemoryStore {
    async fn upsert(&self, site_id: Uuid, url: &str, fields: PageUpsert) -> SeoResult<Page> {
        let mut store = self.lock();
        let existing = store.pages.iter().position(|p| p.site_id == site_id && p.url == url);
        let page = match existing {
            Some(index) => {
                let id = store.pages[index].id;
                let crawled_at = store.pages[index].crawled_at;
                let page = page_field_from(site_id, url, id, crawled_at, fields);
                store.pages[index] = page.clone();
                page
            }
            None => {
                let page = page_field_from(site_id, url, Uuid::new_v4(), Utc::now(), fields);
                store.pages.push(page.clone());
                page
            }
        };
        Ok(page)
    }

    async fn get_by_id(&self, id: Uuid) -> SeoResult<Option<Page>> {
        Ok(self.lock().pages.iter().find(|p| p.id == id).cloned())
    }

    async fn get_for_site(&self, site_id: Uuid, skip: usize, limit: usize) -> SeoResult<Vec<Page>> {
        Ok(self
            .lock()
            .pages
            .iter()
            .filter(|p| p.site_id == site_id)
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_for_site(&self, site_id: Uuid) -> SeoResult<usize> {
        Ok(self.lock().pages.iter().filter(|p| p.site_id == site_id).count())
    }
}

#[async_trait]
impl LinkRepo for InMemoryStore {
    async fn bulk_insert(&self, links: Vec<Link>) -> SeoResult<()> {
        self.lock().links.extend(links);
        Ok(())
    }

    async fn count_inbound(&self, page_id: Uuid) -> SeoResult<u32> {
        Ok(self
            .lock()
            .links
            .iter()
            .filter(|l| l.target_page_id == Some(page_id) && l.is_internal)
            .count() as u32)
    }

    async fn get_broken_links(&self, site_id: Uuid) -> SeoResult<Vec<Link>> {
        Ok(self
            .lock()
            .links
            .iter()
            .filter(|l| l.site_id == site_id && l.is_broken)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ScoreRepo for InMemoryStore {
    async fn upsert_site_score(&self, site_id: Uuid, job_id: Uuid, mut score: Score) -> SeoResult<()> {
        let mut store = self.lock();
        score.site_id = site_id;
        score.page_id = None;
        score.crawl_job_id = Some(job_id);
        match store.site_scores.iter().position(|s| s.site_id == site_id) {
            Some(index) => store.site_scores[index] = score,
            None => store.site_scores.push(score),
        }
        Ok(())
    }

    async fn create_page_score(&self, score: Score) -> SeoResult<()> {
        self.lock().page_scores.push(score);
        Ok(())
    }

    async fn get_site_score(&self, site_id: Uuid) -> SeoResult<Option<Score>> {
        Ok(self.lock().site_scores.iter().find(|s| s.site_id == site_id).cloned())
    }
}

#[async_trait]
impl IssueRepo for InMemoryStore {
    async fn bulk_create(&self, issues: Vec<Issue>) -> SeoResult<()> {
        self.lock().issues.extend(issues);
        Ok(())
    }

    async fn get_for_site(
        &self,
        site_id: Uuid,
        severity: Option<IssueSeverity>,
        resolved: Option<bool>,
        skip: usize,
        limit: usize,
    ) -> SeoResult<Vec<Issue>> {
        Ok(self
            .lock()
            .issues
            .iter()
            .filter(|i| i.site_id == site_id)
            .filter(|i| severity.map_or(true, |s| i.severity == s))
            .filter(|i| resolved.map_or(true, |r| i.is_resolved == r))
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count_by_severity(&self, site_id: Uuid) -> SeoResult<HashMap<IssueSeverity, usize>> {
        let mut counts = HashMap::new();
        for issue in self.lock().issues.iter().filter(|i| i.site_id == site_id && !i.is_resolved) {
            *counts.entry(issue.severity).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn delete_for_job(&self, job_id: Uuid) -> SeoResult<()> {
        self.lock().issues.retain(|i| i.crawl_job_id != Some(job_id));
        Ok(())
    }
}

#[async_trait]
impl KeywordRepo for InMemoryStore {
    async fn bulk_upsert(&self, site_id: Uuid, keywords: Vec<Keyword>) -> SeoResult<()> {
        let mut store = self.lock();
        for mut keyword in keywords {
            keyword.site_id = site_id;
            match store
                .keywords
                .iter()
                .position(|k| k.site_id == site_id && k.keyword == keyword.keyword)
            {
                Some(index) => {
                    keyword.created_at = store.keywords[index].created_at;
                    store.keywords[index] = keyword;
                }
                None => store.keywords.push(keyword),
            }
        }
        Ok(())
    }

    async fn get_opportunities(&self, site_id: Uuid, limit: usize, min_score: f64) -> SeoResult<Vec<Keyword>> {
        let mut keywords: Vec<Keyword> = self
            .lock()
            .keywords
            .iter()
            .filter(|k| k.site_id == site_id && k.is_opportunity && k.opportunity_score >= min_score)
            .cloned()
            .collect();
        keywords.sort_by(|a, b| b.opportunity_score.partial_cmp(&a.opportunity_score).unwrap());
        keywords.truncate(limit);
        Ok(keywords)
    }

    async fn get_all_for_site(&self, site_id: Uuid, limit: usize) -> SeoResult<Vec<Keyword>> {
        let mut keywords: Vec<Keyword> = self
            .lock()
            .keywords
            .iter()
            .filter(|k| k.site_id == site_id)
            .cloned()
            .collect();
        keywords.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        keywords.truncate(limit);
        Ok(keywords)
    }
}
