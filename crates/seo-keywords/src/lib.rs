//! # SEO Keywords
//!
//! Site-wide keyword opportunity scoring: aggregates per-page keyword
//! frequencies (from `seo_extraction::keywords::compute_frequencies`) and
//! estimates volume, difficulty, and rank gap to surface the best
//! opportunities to target.

pub mod ctr;
pub mod engine;
pub mod estimate;
pub mod opportunity;

pub use ctr::ctr_for_position;
pub use engine::{KeywordEngine, KeywordOpportunity};
pub use opportunity::compute_opportunity_score;
