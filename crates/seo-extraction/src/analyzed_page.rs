//! The analyzer's output shape: every signal extracted from one crawled
//! page, before it's mapped onto a persisted `seo_types::Page` row.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ExtractedLink {
    pub url: String,
    pub anchor_text: String,
    pub is_nofollow: bool,
    pub is_internal: bool,
}

#[derive(Debug, Clone)]
pub struct AnalyzedPage {
    pub url: String,
    pub status_code: u16,
    pub depth: u32,

    pub title: Option<String>,
    pub title_length: usize,
    pub meta_description: Option<String>,
    pub meta_description_length: usize,
    pub meta_robots: Option<String>,
    pub is_indexable: bool,
    pub canonical_tag: Option<String>,
    pub canonical_url: Option<String>,
    pub is_canonical: bool,
    pub language: Option<String>,
    pub has_hreflang: bool,

    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub h3_tags: Vec<String>,
    pub h4_tags: Vec<String>,
    pub h5_tags: Vec<String>,
    pub h6_tags: Vec<String>,

    pub content_text: Option<String>,
    pub word_count: usize,
    pub reading_time_seconds: u32,
    pub text_html_ratio: f64,

    pub load_time_ms: u64,
    pub page_size_bytes: u64,
    pub is_https: bool,
    pub has_viewport_meta: bool,

    pub has_schema_markup: bool,
    pub schema_types: Vec<String>,
    pub structured_data: serde_json::Value,
    pub has_open_graph: bool,
    pub open_graph_data: HashMap<String, String>,
    pub has_twitter_card: bool,
    pub twitter_card_data: HashMap<String, String>,

    pub total_images: u32,
    pub images_with_alt: u32,
    pub images_missing_alt: u32,

    pub internal_links: Vec<ExtractedLink>,
    pub external_links: Vec<ExtractedLink>,
    pub internal_links_count: u32,
    pub external_links_count: u32,

    pub keyword_frequencies: HashMap<String, u32>,
}

impl AnalyzedPage {
    /// A page shell for a crawl result with no HTML (fetch failure, empty
    /// body) — every textual signal defaults empty, matching the source's
    /// early-return-on-empty-html behavior.
    pub fn empty(url: String, status_code: u16, depth: u32, is_https: bool) -> Self {
        Self {
            url,
            status_code,
            depth,
            title: None,
            title_length: 0,
            meta_description: None,
            meta_description_length: 0,
            meta_robots: None,
            is_indexable: true,
            canonical_tag: None,
            canonical_url: None,
            is_canonical: true,
            language: None,
            has_hreflang: false,
            h1_tags: Vec::new(),
            h2_tags: Vec::new(),
            h3_tags: Vec::new(),
            h4_tags: Vec::new(),
            h5_tags: Vec::new(),
            h6_tags: Vec::new(),
            content_text: None,
            word_count: 0,
            reading_time_seconds: 1,
            text_html_ratio: 0.0,
            load_time_ms: 0,
            page_size_bytes: 0,
            is_https,
            has_viewport_meta: false,
            has_schema_markup: false,
            schema_types: Vec::new(),
            structured_data: serde_json::Value::Object(Default::default()),
            has_open_graph: false,
            open_graph_data: HashMap::new(),
            has_twitter_card: false,
            twitter_card_data: HashMap::new(),
            total_images: 0,
            images_with_alt: 0,
            images_missing_alt: 0,
            internal_links: Vec::new(),
            external_links: Vec::new(),
            internal_links_count: 0,
            external_links_count: 0,
            keyword_frequencies: HashMap::new(),
        }
    }
}
