//! The analyzer: a synchronous `CrawlResult -> AnalyzedPage` transformation.
//! Extraction order is irrelevant except that keyword frequencies depend on
//! the readability pass having already produced `content_text`.

use crate::analyzed_page::{AnalyzedPage, ExtractedLink};
use crate::keywords::compute_frequencies;
use crate::readability::{extract_main_text, full_document_text};
use crate::structured_data;
use scraper::{Html, Selector};
use seo_types::CrawlResult;
use std::collections::HashMap;
use url::Url;

const MAX_TITLE_LEN: usize = 512;
const MAX_HEADING_LEN: usize = 255;
const MAX_ANCHOR_LEN: usize = 255;
const MAX_LANG_LEN: usize = 10;
const MAX_CONTENT_TEXT_LEN: usize = 50_000;

/// Transforms one crawl result into its full analyzed signal set. Returns an
/// empty-shell page (every textual signal defaulted) when the body is empty,
/// matching the source's early-return-on-empty-html behavior.
pub fn analyze(result: &CrawlResult, depth: u32) -> AnalyzedPage {
    let is_https = result.final_url.starts_with("https://");

    if result.html.is_empty() {
        return AnalyzedPage::empty(result.url.clone(), result.status_code, depth, is_https);
    }

    let document = Html::parse_document(&result.html);
    let mut page = AnalyzedPage::empty(result.url.clone(), result.status_code, depth, is_https);
    page.load_time_ms = result.load_time_ms;
    page.page_size_bytes = result.page_size_bytes;

    extract_basic_seo(&mut page, &document, &result.final_url);
    extract_headings(&mut page, &document);
    let main_text = extract_content(&mut page, &document, &result.html);
    extract_images(&mut page, &document);
    extract_links(&mut page, &document, &result.final_url);
    extract_structured_data(&mut page, &document);
    extract_social_meta(&mut page, &document);
    extract_technical_signals(&mut page, &document);

    if !main_text.is_empty() {
        page.keyword_frequencies = compute_frequencies(&main_text);
    }

    page
}

fn select_first<'a>(document: &'a Html, selector_str: &str) -> Option<scraper::ElementRef<'a>> {
    Selector::parse(selector_str)
        .ok()
        .and_then(|selector| document.select(&selector).next())
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn extract_basic_seo(page: &mut AnalyzedPage, document: &Html, page_url: &str) {
    if let Some(title_el) = select_first(document, "title") {
        let text = title_el.text().collect::<String>();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            let title = truncate_chars(trimmed, MAX_TITLE_LEN);
            page.title_length = title.chars().count();
            page.title = Some(title);
        }
    }

    if let Some(meta) = find_meta_by_name(document, "description") {
        if let Some(content) = meta.value().attr("content") {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                page.meta_description_length = trimmed.chars().count();
                page.meta_description = Some(trimmed.to_string());
            }
        }
    }

    if let Some(meta) = find_meta_by_name(document, "robots") {
        if let Some(content) = meta.value().attr("content") {
            let lowered = content.to_lowercase().trim().to_string();
            if !lowered.is_empty() {
                page.is_indexable = !lowered.contains("noindex");
                page.meta_robots = Some(lowered);
            }
        }
    }

    if let Some(canonical) = select_first(document, r#"link[rel="canonical"]"#) {
        if let Some(href) = canonical.value().attr("href") {
            let href = href.trim().to_string();
            if !href.is_empty() {
                page.is_canonical = href == page_url;
                page.canonical_url = Some(href.clone());
                page.canonical_tag = Some(href);
            }
        }
    }

    if let Some(html_el) = select_first(document, "html") {
        if let Some(lang) = html_el.value().attr("lang") {
            page.language = Some(truncate_chars(lang, MAX_LANG_LEN));
        }
    }

    if let Ok(selector) = Selector::parse("link[hreflang]") {
        page.has_hreflang = document.select(&selector).next().is_some();
    }
}

fn find_meta_by_name<'a>(document: &'a Html, name: &str) -> Option<scraper::ElementRef<'a>> {
    let selector = Selector::parse("meta[name]").ok()?;
    document.select(&selector).find(|el| {
        el.value()
            .attr("name")
            .map(|n| n.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    })
}

fn extract_headings(page: &mut AnalyzedPage, document: &Html) {
    for level in 1..=6 {
        let selector_str = format!("h{level}");
        let Ok(selector) = Selector::parse(&selector_str) else {
            continue;
        };
        let texts: Vec<String> = document
            .select(&selector)
            .filter_map(|el| {
                let text = el.text().collect::<String>();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(truncate_chars(trimmed, MAX_HEADING_LEN))
                }
            })
            .collect();
        match level {
            1 => page.h1_tags = texts,
            2 => page.h2_tags = texts,
            3 => page.h3_tags = texts,
            4 => page.h4_tags = texts,
            5 => page.h5_tags = texts,
            6 => page.h6_tags = texts,
            _ => unreachable!(),
        }
    }
}

/// Returns the untruncated main text so the caller can derive keyword
/// frequencies from it; `page.content_text` itself is capped at
/// [`MAX_CONTENT_TEXT_LEN`] chars before being stored.
fn extract_content(page: &mut AnalyzedPage, document: &Html, raw_html: &str) -> String {
    let main_text = extract_main_text(document);
    let word_count = main_text.split_whitespace().count();
    page.word_count = word_count;
    page.reading_time_seconds = ((word_count as f64 / 225.0) * 60.0).round().max(1.0) as u32;
    if !main_text.is_empty() {
        page.content_text = Some(truncate_chars(&main_text, MAX_CONTENT_TEXT_LEN));
    }

    let html_len = raw_html.len();
    if html_len > 0 {
        let text_len = full_document_text(document).len();
        page.text_html_ratio = (text_len as f64 / html_len as f64 * 1000.0).round() / 1000.0;
    }

    main_text
}

fn extract_images(page: &mut AnalyzedPage, document: &Html) {
    let Ok(selector) = Selector::parse("img") else {
        return;
    };
    let mut total = 0u32;
    let mut with_alt = 0u32;
    let mut missing_alt = 0u32;

    for img in document.select(&selector) {
        total += 1;
        match img.value().attr("alt") {
            Some(alt) if !alt.trim().is_empty() => with_alt += 1,
            _ => missing_alt += 1,
        }
    }

    page.total_images = total;
    page.images_with_alt = with_alt;
    page.images_missing_alt = missing_alt;
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

fn extract_links(page: &mut AnalyzedPage, document: &Html, page_url: &str) {
    let Ok(base) = Url::parse(page_url) else { return };
    let base_host = base.host_str().map(strip_www).unwrap_or_default().to_string();

    let Ok(selector) = Selector::parse("a[href]") else {
        return;
    };

    for el in document.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') || href.starts_with("mailto:") || href.starts_with("tel:") {
            continue;
        }
        let Ok(absolute) = base.join(href) else { continue };
        if absolute.scheme() != "http" && absolute.scheme() != "https" {
            continue;
        }

        let anchor_text = truncate_chars(el.text().collect::<String>().trim(), MAX_ANCHOR_LEN);
        let is_nofollow = el
            .value()
            .attr("rel")
            .map(|rel| rel.split_whitespace().any(|token| token.eq_ignore_ascii_case("nofollow")))
            .unwrap_or(false);
        let target_host = absolute.host_str().map(strip_www).unwrap_or_default();
        let is_internal = target_host == base_host;

        let link = ExtractedLink {
            url: absolute.to_string(),
            anchor_text,
            is_nofollow,
            is_internal,
        };

        if is_internal {
            page.internal_links.push(link);
        } else {
            page.external_links.push(link);
        }
    }

    page.internal_links_count = page.internal_links.len() as u32;
    page.external_links_count = page.external_links.len() as u32;
}

fn extract_structured_data(page: &mut AnalyzedPage, document: &Html) {
    let data = structured_data::extract(document);
    page.has_schema_markup = data.has_schema_markup;
    page.schema_types = data.schema_types;
    page.structured_data = data.merged;
}

fn extract_social_meta(page: &mut AnalyzedPage, document: &Html) {
    let Ok(selector) = Selector::parse("meta") else {
        return;
    };

    let mut og_data: HashMap<String, String> = HashMap::new();
    let mut twitter_data: HashMap<String, String> = HashMap::new();

    for meta in document.select(&selector) {
        let value = meta.value();
        let content = value.attr("content").unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        if let Some(property) = value.attr("property") {
            if let Some(key) = property.strip_prefix("og:") {
                og_data.insert(key.to_string(), content.to_string());
            }
        }
        if let Some(name) = value.attr("name") {
            if let Some(key) = name.strip_prefix("twitter:") {
                twitter_data.insert(key.to_string(), content.to_string());
            }
        }
    }

    if !og_data.is_empty() {
        page.has_open_graph = true;
        page.open_graph_data = og_data;
    }
    if !twitter_data.is_empty() {
        page.has_twitter_card = true;
        page.twitter_card_data = twitter_data;
    }
}

fn extract_technical_signals(page: &mut AnalyzedPage, document: &Html) {
    page.has_viewport_meta = find_meta_by_name(document, "viewport").is_some();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;

    fn result(html: &str) -> CrawlResult {
        CrawlResult {
            url: "https://example.test/page".to_string(),
            final_url: "https://example.test/page".to_string(),
            status_code: 200,
            html: html.to_string(),
            headers: StdHashMap::new(),
            load_time_ms: 10,
            page_size_bytes: html.len() as u64,
            error: None,
        }
    }

    #[test]
    fn empty_html_produces_an_empty_shell_page() {
        let page = analyze(
            &CrawlResult {
                html: String::new(),
                ..result("")
            },
            0,
        );
        assert!(page.title.is_none());
        assert_eq!(page.word_count, 0);
    }

    #[test]
    fn happy_path_extracts_title_meta_and_h1() {
        let html = r#"<html lang="en"><head>
            <title>Hello World</title>
            <meta name="description" content="A test page">
            <meta name="viewport" content="width=device-width">
        </head><body><h1>Heading</h1><p>Some body copy here.</p></body></html>"#;
        let page = analyze(&result(html), 0);
        assert_eq!(page.title.as_deref(), Some("Hello World"));
        assert_eq!(page.title_length, 11);
        assert_eq!(page.meta_description.as_deref(), Some("A test page"));
        assert_eq!(page.h1_tags, vec!["Heading".to_string()]);
        assert!(page.has_viewport_meta);
        assert!(page.is_indexable);
        assert_eq!(page.language.as_deref(), Some("en"));
    }

    #[test]
    fn noindex_meta_robots_sets_not_indexable() {
        let html = r#"<html><head><meta name="robots" content="noindex, nofollow"></head></html>"#;
        let page = analyze(&result(html), 0);
        assert!(!page.is_indexable);
    }

    #[test]
    fn word_count_zero_yields_reading_time_of_one_second() {
        let page = analyze(&result("<html><body></body></html>"), 0);
        assert_eq!(page.word_count, 0);
        assert_eq!(page.reading_time_seconds, 1);
    }

    #[test]
    fn fully_empty_html_also_yields_reading_time_of_one_second() {
        let page = analyze(
            &CrawlResult {
                html: String::new(),
                ..result("")
            },
            0,
        );
        assert_eq!(page.word_count, 0);
        assert_eq!(page.reading_time_seconds, 1);
    }

    #[test]
    fn content_text_is_capped_at_fifty_thousand_chars() {
        let paragraph = format!("<p>{}</p>", "word ".repeat(20_000));
        let page = analyze(&result(&format!("<html><body>{paragraph}</body></html>")), 0);
        let content = page.content_text.expect("non-empty body yields content text");
        assert_eq!(content.chars().count(), MAX_CONTENT_TEXT_LEN);
    }

    #[test]
    fn keyword_frequencies_are_derived_from_the_untruncated_text() {
        let words = "uniqueword ".repeat(20_000);
        let page = analyze(&result(&format!("<html><body><p>{words}</p></body></html>")), 0);
        assert_eq!(page.keyword_frequencies.get("uniqueword"), Some(&20_000));
    }

    #[test]
    fn images_are_tallied_by_alt_presence() {
        let html = r#"<img src="a.png" alt="a"><img src="b.png" alt=""><img src="c.png">"#;
        let page = analyze(&result(html), 0);
        assert_eq!(page.total_images, 3);
        assert_eq!(page.images_with_alt, 1);
        assert_eq!(page.images_missing_alt, 2);
    }

    #[test]
    fn links_are_classified_internal_vs_external_ignoring_www() {
        let html = r##"<a href="https://www.example.test/a">a</a><a href="https://other.test/b">b</a><a href="#frag">skip</a>"##;
        let page = analyze(&result(html), 0);
        assert_eq!(page.internal_links_count, 1);
        assert_eq!(page.external_links_count, 1);
    }

    #[test]
    fn og_and_twitter_meta_are_collected_by_stripped_key() {
        let html = r#"<meta property="og:title" content="T">
            <meta name="twitter:card" content="summary">"#;
        let page = analyze(&result(html), 0);
        assert!(page.has_open_graph);
        assert_eq!(page.open_graph_data.get("title").map(String::as_str), Some("T"));
        assert!(page.has_twitter_card);
        assert_eq!(page.twitter_card_data.get("card").map(String::as_str), Some("summary"));
    }
}
