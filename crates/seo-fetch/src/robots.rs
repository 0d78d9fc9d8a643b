//! Robots.txt fetch + evaluation.
//!
//! On first use for a host this fetches `/robots.txt` once; on any non-200
//! response or network error the policy degrades to allow-all and is not
//! retried again within the job, matching the source's fail-open design.

use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct RobotsPolicy {
    disallow_rules: Vec<String>,
    sitemaps: Vec<String>,
    crawl_delay: Option<f64>,
    allow_all: bool,
}

impl RobotsPolicy {
    fn allow_all() -> Self {
        Self {
            allow_all: true,
            ..Default::default()
        }
    }

    /// Fetches and parses robots.txt for `base_url`'s origin, under `user_agent`.
    pub async fn fetch(client: &reqwest::Client, base_url: &Url, user_agent: &str) -> Self {
        let robots_url = format!("{}/robots.txt", base_url.origin().ascii_serialization());

        let response = match tokio::time::timeout(FETCH_TIMEOUT, client.get(&robots_url).send()).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                debug!(robots_url, error = %err, "robots.txt fetch failed, allowing all");
                return Self::allow_all();
            }
            Err(_) => {
                warn!(robots_url, "robots.txt fetch timed out, allowing all");
                return Self::allow_all();
            }
        };

        if !response.status().is_success() {
            debug!(robots_url, status = %response.status(), "robots.txt non-200, allowing all");
            return Self::allow_all();
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(robots_url, error = %err, "robots.txt body read failed, allowing all");
                return Self::allow_all();
            }
        };

        Self::parse(&body, user_agent)
    }

    fn parse(body: &str, user_agent: &str) -> Self {
        let mut sitemaps = Vec::new();
        let mut crawl_delay = None;
        let mut disallow_rules = Vec::new();

        let mut applies_to_us = false;
        let mut applies_to_wildcard = false;
        let target_ua = user_agent.to_lowercase();

        for raw_line in body.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if let Some(value) = strip_directive(line, "sitemap:") {
                if let Ok(parsed) = Url::parse(value) {
                    if parsed.scheme() == "http" || parsed.scheme() == "https" {
                        sitemaps.push(value.to_string());
                    }
                }
                continue;
            }

            if let Some(value) = strip_directive(line, "user-agent:") {
                let ua = value.to_lowercase();
                applies_to_wildcard = ua == "*";
                applies_to_us = target_ua.contains(&ua) || ua == "*";
                continue;
            }

            if !(applies_to_us || applies_to_wildcard) {
                continue;
            }

            if let Some(value) = strip_directive(line, "disallow:") {
                if !value.is_empty() {
                    disallow_rules.push(value.to_string());
                }
                continue;
            }

            if let Some(value) = strip_directive(line, "crawl-delay:") {
                if let Ok(seconds) = value.parse::<f64>() {
                    crawl_delay = Some(seconds.max(0.0));
                }
            }
        }

        Self {
            disallow_rules,
            sitemaps,
            crawl_delay,
            allow_all: false,
        }
    }

    pub fn is_allowed(&self, url: &Url) -> bool {
        if self.allow_all {
            return true;
        }
        let path = url.path();
        !self
            .disallow_rules
            .iter()
            .any(|rule| path.starts_with(rule.as_str()))
    }

    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay
    }
}

fn strip_directive<'a>(line: &'a str, directive: &str) -> Option<&'a str> {
    let lower = line.to_lowercase();
    if lower.starts_with(directive) {
        Some(line[directive.len()..].trim())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disallow_rule_blocks_matching_prefix() {
        let policy = RobotsPolicy::parse(
            "User-agent: *\nDisallow: /private\nSitemap: https://example.test/sitemap.xml\nCrawl-delay: 2",
            "SEOBot/1.0",
        );
        assert!(!policy.is_allowed(&Url::parse("https://example.test/private/a").unwrap()));
        assert!(policy.is_allowed(&Url::parse("https://example.test/public").unwrap()));
        assert_eq!(policy.sitemaps(), &["https://example.test/sitemap.xml".to_string()]);
        assert_eq!(policy.crawl_delay(), Some(2.0));
    }

    #[test]
    fn allow_all_permits_everything() {
        let policy = RobotsPolicy::allow_all();
        assert!(policy.is_allowed(&Url::parse("https://example.test/anything").unwrap()));
        assert!(policy.sitemaps().is_empty());
        assert_eq!(policy.crawl_delay(), None);
    }

    #[test]
    fn crawl_delay_is_clamped_non_negative() {
        let policy = RobotsPolicy::parse("User-agent: *\nCrawl-delay: -5", "SEOBot/1.0");
        assert_eq!(policy.crawl_delay(), Some(0.0));
    }

    #[test]
    fn sitemap_directive_is_case_insensitive() {
        let policy = RobotsPolicy::parse("SITEMAP: https://example.test/s.xml", "SEOBot/1.0");
        assert_eq!(policy.sitemaps().len(), 1);
    }
}
