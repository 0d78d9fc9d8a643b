//! # SEO Config
//!
//! Environment-driven configuration for the crawl-analyze-score pipeline.
//! Components take an explicit configuration record at construction rather
//! than reaching into global state, so tests can instantiate overrides
//! without touching the process environment.

pub mod env;

mod crawler;
mod scoring;

pub use crawler::CrawlerConfig;
pub use env::{EnvConfigLoader, EnvError};
pub use scoring::ScoreWeights;
