//! URL normalization and the internal/crawlable classification filters
//! shared by the crawler and the analyzer's link classification.

use url::Url;

const NON_HTML_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".ico", ".pdf", ".zip", ".tar", ".gz",
    ".mp4", ".mp3", ".avi", ".css", ".js", ".woff", ".woff2", ".ttf", ".eot", ".xlsx", ".docx",
    ".pptx", ".csv",
];

const EXCLUDED_SUBSTRINGS: &[&str] = &[
    "wp-json", "wp-admin", ".xml", "feed/", "/api/", "/__", "/cdn-cgi/",
];

/// Parses, drops the fragment, and strips a trailing slash unless the path
/// is exactly `/`. Scheme, host, and query are preserved. Returns `None` on
/// a parse failure.
pub fn normalize(raw_url: &str) -> Option<Url> {
    let mut url = Url::parse(raw_url).ok()?;
    url.set_fragment(None);
    if url.path() != "/" && url.path().ends_with('/') {
        let trimmed = url.path().trim_end_matches('/').to_string();
        url.set_path(&trimmed);
    }
    Some(url)
}

/// Strips a single leading `www.` label, used for host comparisons that
/// should treat `www.example.com` and `example.com` as equivalent.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// The public-suffix-aware registered domain (eTLD+1), e.g.
/// `blog.example.co.uk` -> `example.co.uk`.
pub fn registered_domain(host: &str) -> Option<String> {
    psl::domain(host.as_bytes()).map(|domain| String::from_utf8_lossy(domain.as_bytes()).into_owned())
}

/// A URL is internal iff its eTLD+1 equals the start URL's eTLD+1, ignoring
/// a leading `www.` on either host.
pub fn is_internal(url: &Url, start_host: &str) -> bool {
    let Some(candidate_host) = url.host_str() else {
        return false;
    };
    let candidate = strip_www(candidate_host);
    let start = strip_www(start_host);

    match (registered_domain(candidate), registered_domain(start)) {
        (Some(a), Some(b)) => a == b,
        _ => candidate == start,
    }
}

/// http(s) scheme, non-binary extension, and not matching any of the fixed
/// excluded path substrings.
pub fn is_crawlable(url: &Url) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }
    let path = url.path().to_lowercase();
    if NON_HTML_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }
    let full = url.as_str().to_lowercase();
    !EXCLUDED_SUBSTRINGS.iter().any(|needle| full.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slash_except_root() {
        assert_eq!(normalize("https://example.test/a/").unwrap().path(), "/a");
        assert_eq!(normalize("https://example.test/").unwrap().path(), "/");
    }

    #[test]
    fn normalize_drops_fragment_preserves_query() {
        let url = normalize("https://example.test/a?x=1#section").unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("x=1"));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("https://example.test/a/").unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_returns_none_on_parse_failure() {
        assert!(normalize("not a url").is_none());
    }

    #[test]
    fn internal_ignores_leading_www_for_link_classification() {
        let url = Url::parse("https://www.example.test/page").unwrap();
        assert!(is_internal(&url, "example.test"));
        assert!(is_internal(&url, "www.example.test"));
    }

    #[test]
    fn internal_respects_distinct_registered_domains() {
        let url = Url::parse("https://other.test/page").unwrap();
        assert!(!is_internal(&url, "example.test"));
    }

    #[test]
    fn crawlable_rejects_non_html_extensions() {
        let url = Url::parse("https://example.test/image.jpg").unwrap();
        assert!(!is_crawlable(&url));
    }

    #[test]
    fn crawlable_rejects_excluded_substrings() {
        let url = Url::parse("https://example.test/wp-admin/edit").unwrap();
        assert!(!is_crawlable(&url));
    }

    #[test]
    fn crawlable_rejects_non_http_scheme() {
        let url = Url::parse("mailto:test@example.test").unwrap();
        assert!(!is_crawlable(&url));
    }

    #[test]
    fn crawlable_accepts_ordinary_html_path() {
        let url = Url::parse("https://example.test/blog/post-1").unwrap();
        assert!(is_crawlable(&url));
    }
}
