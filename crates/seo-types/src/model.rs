use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A crawled and analyzed website, identified by its registered domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: Uuid,
    pub domain: String,
    pub root_url: String,
    pub sitemap_url: Option<String>,
    pub robots_txt: Option<String>,
    pub last_crawled_at: Option<DateTime<Utc>>,
    pub total_pages: i64,
    pub is_active: bool,
    pub settings: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Site {
    pub fn new(domain: impl Into<String>, root_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            domain: domain.into(),
            root_url: root_url.into(),
            sitemap_url: None,
            robots_txt: None,
            last_crawled_at: None,
            total_pages: 0,
            is_active: true,
            settings: serde_json::Value::Object(Default::default()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lifecycle state of a [`CrawlJob`]. Exactly one transition leaves `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// Tracks the execution and progress of one crawl job against a [`Site`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlJob {
    pub id: Uuid,
    pub site_id: Uuid,
    pub external_task_id: Option<String>,
    pub status: JobStatus,
    pub max_depth: u32,
    pub max_pages: u32,
    pub use_js_rendering: bool,
    pub respect_robots: bool,
    pub pages_crawled: u32,
    pub pages_failed: u32,
    pub pages_queued: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub config: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CrawlJob {
    pub fn new(site_id: Uuid, max_depth: u32, max_pages: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            site_id,
            external_task_id: None,
            status: JobStatus::Pending,
            max_depth,
            max_pages,
            use_js_rendering: false,
            respect_robots: true,
            pages_crawled: 0,
            pages_failed: 0,
            pages_queued: 0,
            started_at: None,
            completed_at: None,
            error_message: None,
            config: serde_json::Value::Object(Default::default()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Truncates an error message to the persisted error-field limit.
    pub fn truncate_error(message: &str) -> String {
        const LIMIT: usize = 2000;
        if message.chars().count() <= LIMIT {
            message.to_string()
        } else {
            message.chars().take(LIMIT).collect()
        }
    }
}

/// The full analyzed signal set for one crawled page, unique by `(site_id, url)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub site_id: Uuid,
    pub crawl_job_id: Option<Uuid>,
    pub url: String,
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
    pub broken_links_count: u32,

    pub structured_data: serde_json::Value,
    pub open_graph_data: HashMap<String, String>,
    pub twitter_card_data: HashMap<String, String>,
    pub keyword_frequencies: HashMap<String, u32>,

    pub crawled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Directed edge from a source page to a resolved or unresolved target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: Uuid,
    pub site_id: Uuid,
    pub source_page_id: Uuid,
    pub target_page_id: Option<Uuid>,
    pub target_url: String,
    pub anchor_text: String,
    pub is_internal: bool,
    pub is_nofollow: bool,
    pub is_broken: bool,
    pub link_type: LinkType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    Hyperlink,
    Image,
    Canonical,
    Redirect,
}

/// Per-component breakdown retained alongside a dimension score for observability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub score: f64,
    pub max: f64,
    pub value: serde_json::Value,
}

/// A 0-100 score for either one page or the whole site, scoped by `page_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Score {
    pub id: Uuid,
    pub site_id: Uuid,
    pub page_id: Option<Uuid>,
    pub crawl_job_id: Option<Uuid>,

    pub overall_score: f64,
    pub technical_score: f64,
    pub content_score: f64,
    pub authority_score: f64,
    pub linking_score: f64,
    pub ai_visibility_score: f64,

    pub technical_breakdown: HashMap<String, ScoreComponent>,
    pub content_breakdown: HashMap<String, ScoreComponent>,
    pub linking_breakdown: HashMap<String, ScoreComponent>,

    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// A remediable SEO issue detected on a page or across the site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub site_id: Uuid,
    pub page_id: Option<Uuid>,
    pub crawl_job_id: Option<Uuid>,

    pub issue_type: String,
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    pub recommendation: Option<String>,
    pub fix_instructions: Option<String>,
    pub impact_description: Option<String>,
    pub affected_element: Option<String>,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A keyword opportunity derived from aggregate term frequencies, unique by `(site_id, keyword)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub id: Uuid,
    pub site_id: Uuid,
    pub page_id: Option<Uuid>,
    pub crawl_job_id: Option<Uuid>,

    pub keyword: String,
    pub frequency: u32,
    pub density: f64,
    pub estimated_volume: u32,
    pub estimated_difficulty: f64,
    pub estimated_ctr: f64,
    pub current_rank: Option<u32>,
    pub rank_gap: Option<i32>,
    pub opportunity_score: f64,
    pub is_opportunity: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_error_respects_limit() {
        let long = "x".repeat(2500);
        assert_eq!(CrawlJob::truncate_error(&long).chars().count(), 2000);
    }

    #[test]
    fn truncate_error_leaves_short_messages_untouched() {
        assert_eq!(CrawlJob::truncate_error("boom"), "boom");
    }

    #[test]
    fn new_job_starts_pending_with_zero_counters() {
        let job = CrawlJob::new(Uuid::new_v4(), 10, 1000);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.pages_crawled, 0);
        assert!(!job.status.is_terminal());
    }
}
