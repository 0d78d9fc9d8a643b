use thiserror::Error;

/// Shared error taxonomy for the crawl-analyze-score pipeline.
///
/// Crate-specific errors (`FetchError`, `AnalysisError`, ...) convert into this
/// enum at the pipeline boundary via `#[from]`; each variant's `is_retryable`
/// mirrors the fetch-retry table in the fetcher component.
#[derive(Debug, Error)]
pub enum SeoError {
    #[error("site not found: {0}")]
    SiteNotFound(String),

    #[error("crawl job not found: {0}")]
    JobNotFound(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("robots fetch timed out")]
    RobotsTimeout,

    #[error("analysis error: {0}")]
    Analysis(String),

    #[error("scoring error: {0}")]
    Scoring(String),

    #[error("repository error: {0}")]
    Repository(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SeoResult<T> = Result<T, SeoError>;

impl SeoError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Other(anyhow::anyhow!(message.into()))
    }

    /// Whether a retry at the fetch layer is warranted for this error kind.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::RobotsTimeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_retryable() {
        assert!(SeoError::Fetch("timeout".into()).is_retryable());
    }

    #[test]
    fn config_errors_are_not_retryable() {
        assert!(!SeoError::Config("bad weight sum".into()).is_retryable());
    }
}
