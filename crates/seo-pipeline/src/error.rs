//! The pipeline driver's own error boundary. Crate-level errors from the
//! collaborators it drives (`SeoError` from repository calls, `anyhow::Error`
//! from the crawler) convert in here; the driver's public entry point still
//! returns `anyhow::Result` so callers see the full context chain.

use seo_types::SeoError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("crawl job not found: {0}")]
    JobNotFound(Uuid),

    #[error("site not found: {0}")]
    SiteNotFound(Uuid),

    #[error("repository error: {0}")]
    Repository(#[from] SeoError),

    #[error("crawl failed: {0}")]
    Crawl(#[source] anyhow::Error),

    #[error("internal pipeline error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_convert_via_from() {
        let err: PipelineError = SeoError::Config("bad weights".to_string()).into();
        assert!(matches!(err, PipelineError::Repository(_)));
    }
}
