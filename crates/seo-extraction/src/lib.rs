//! # SEO Extraction
//!
//! Turns a raw [`seo_types::CrawlResult`] into the full signal set an SEO
//! page analysis needs: title/meta/canonical, headings, main-body text,
//! images, links, structured data, social meta, technical signals, and
//! per-page keyword frequencies.

pub mod analyzed_page;
pub mod analyzer;
pub mod keywords;
pub mod readability;
pub mod schema_types;
pub mod stop_words;
pub mod structured_data;

pub use analyzed_page::{AnalyzedPage, ExtractedLink};
pub use analyzer::analyze;
