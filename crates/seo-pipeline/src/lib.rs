//! # SEO Pipeline
//!
//! Wires the rate limiter, fetcher, crawler, analyzer, scorer, recommendation
//! engine, and keyword engine into one job driver: the only component that
//! mutates persistent state.

pub mod driver;
pub mod error;
pub mod memory;
mod mapping;
mod sink;

pub use driver::{run_crawl_job, JobOutcome, PipelineRepos};
pub use error::PipelineError;
pub use memory::InMemoryStore;
