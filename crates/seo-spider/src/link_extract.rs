//! Crawl-time link extraction: just enough to drive the BFS frontier. The
//! analyzer performs its own, richer pass over the same HTML for anchor
//! text, nofollow, and internal/external classification.

use crate::url_utils::normalize;
use scraper::{Html, Selector};
use url::Url;

/// All `<a href>` targets that aren't a fragment, `mailto:`, or `tel:` link,
/// resolved against `base` and normalized. Resolution or normalization
/// failures are dropped rather than propagated.
pub fn extract_hrefs(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter(|href| {
            let href = href.trim();
            !href.is_empty()
                && !href.starts_with('#')
                && !href.starts_with("mailto:")
                && !href.starts_with("tel:")
        })
        .filter_map(|href| base.join(href).ok())
        .filter_map(|resolved| normalize(resolved.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.test/page").unwrap()
    }

    #[test]
    fn extracts_and_resolves_relative_links() {
        let html = r#"<a href="/a">a</a><a href="b">b</a>"#;
        let links = extract_hrefs(html, &base());
        let urls: Vec<String> = links.iter().map(|u| u.to_string()).collect();
        assert!(urls.contains(&"https://example.test/a".to_string()));
        assert!(urls.contains(&"https://example.test/b".to_string()));
    }

    #[test]
    fn skips_fragment_mailto_and_tel() {
        let html = r##"<a href="#top">x</a><a href="mailto:a@b.test">y</a><a href="tel:+1555">z</a>"##;
        let links = extract_hrefs(html, &base());
        assert!(links.is_empty());
    }

    #[test]
    fn drops_unresolvable_href() {
        let html = r#"<a href="   ">blank</a>"#;
        let links = extract_hrefs(html, &base());
        assert!(links.is_empty());
    }
}
