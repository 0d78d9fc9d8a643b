use crate::env::{EnvConfigLoader, EnvError};
use std::time::Duration;

/// The crawler's configuration surface, loaded from `CRAWLER_*` environment
/// variables with the same defaults the pipeline has always shipped with.
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlerConfig {
    pub max_concurrent: u32,
    pub max_depth: u32,
    pub request_timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: String,
    pub rate_limit_rps: f64,
    pub js_render_timeout: Duration,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 100,
            max_depth: 10,
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            user_agent: "SEOBot/1.0 (+https://yourdomain.com/bot)".to_string(),
            rate_limit_rps: 10.0,
            js_render_timeout: Duration::from_millis(15_000),
        }
    }
}

impl CrawlerConfig {
    pub fn from_env() -> Result<Self, EnvError> {
        let defaults = Self::default();
        let loader = EnvConfigLoader::new()
            .with_prefix("CRAWLER_")
            .default("max_concurrent", defaults.max_concurrent.to_string())
            .default("max_depth", defaults.max_depth.to_string())
            .default("request_timeout", defaults.request_timeout.as_secs().to_string())
            .default("max_retries", defaults.max_retries.to_string())
            .default("retry_delay", defaults.retry_delay.as_secs().to_string())
            .default("user_agent", defaults.user_agent.clone())
            .default("rate_limit_rps", defaults.rate_limit_rps.to_string())
            .default(
                "js_render_timeout",
                defaults.js_render_timeout.as_millis().to_string(),
            );

        Ok(Self {
            max_concurrent: loader.get_u32("max_concurrent")?,
            max_depth: loader.get_u32("max_depth")?,
            request_timeout: Duration::from_secs(loader.get_u32("request_timeout")?.into()),
            max_retries: loader.get_u32("max_retries")?,
            retry_delay: Duration::from_secs(loader.get_u32("retry_delay")?.into()),
            user_agent: loader.get("user_agent")?,
            rate_limit_rps: loader.get_f64("rate_limit_rps")?,
            js_render_timeout: Duration::from_millis(loader.get_u32("js_render_timeout")?.into()),
        })
    }
}
