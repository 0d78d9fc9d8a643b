//! Sitemap discovery and parsing.
//!
//! Probes conventional sitemap paths, fetches candidates, gunzips inline
//! content, and distinguishes a sitemap-index from a url-set by tracking
//! element context explicitly rather than matching on bare character data.

use std::collections::HashSet;
use std::io::Read;
use tracing::{debug, info, warn};
use xml::reader::{EventReader, XmlEvent};

const COMMON_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/sitemaps.xml",
    "/sitemap/sitemap.xml",
    "/wp-sitemap.xml",
];

#[derive(Debug, Clone, PartialEq)]
enum SitemapKind {
    UrlSet,
    SitemapIndex,
}

/// Parses either a `<urlset>` or a `<sitemapindex>` document, returning the
/// `<loc>` values found and which shape was parsed.
fn parse_locs(xml_content: &str) -> (SitemapKind, Vec<String>) {
    let parser = EventReader::from_str(xml_content);
    let mut stack: Vec<String> = Vec::new();
    let mut locs = Vec::new();
    let mut kind = SitemapKind::UrlSet;
    let mut current_text = String::new();

    for event in parser {
        match event {
            Ok(XmlEvent::StartElement { name, .. }) => {
                let local = name.local_name.clone();
                if local == "sitemapindex" {
                    kind = SitemapKind::SitemapIndex;
                }
                stack.push(local);
                current_text.clear();
            }
            Ok(XmlEvent::Characters(data)) | Ok(XmlEvent::CData(data)) => {
                current_text.push_str(&data);
            }
            Ok(XmlEvent::EndElement { .. }) => {
                if stack.last().map(String::as_str) == Some("loc") {
                    let text = current_text.trim();
                    if !text.is_empty() {
                        locs.push(text.to_string());
                    }
                }
                stack.pop();
                current_text.clear();
            }
            Err(err) => {
                warn!(error = %err, "sitemap xml parse error, stopping early");
                break;
            }
            _ => {}
        }
    }

    (kind, locs)
}

fn maybe_gunzip(bytes: &[u8], url: &str, content_encoding_gzip: bool) -> String {
    let looks_gzip = url.ends_with(".gz") || content_encoding_gzip || bytes.starts_with(&[0x1f, 0x8b]);
    if looks_gzip {
        let mut decoder = flate2::read::GzDecoder::new(bytes);
        let mut out = String::new();
        if decoder.read_to_string(&mut out).is_ok() {
            return out;
        }
        warn!(url, "gzip decode failed, falling back to raw bytes");
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Discovers and parses sitemaps for a site, returning a deduplicated list
/// of candidate page URLs. A sitemap-index is followed one level deep.
pub struct SitemapDiscovery {
    client: reqwest::Client,
}

impl SitemapDiscovery {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Probes the fixed set of common sitemap paths with HEAD requests.
    pub async fn probe_common_paths(&self, origin: &str) -> Vec<String> {
        let mut found = Vec::new();
        for path in COMMON_PATHS {
            let candidate = format!("{origin}{path}");
            match self.client.head(&candidate).send().await {
                Ok(response) if response.status().is_success() => found.push(candidate),
                _ => {}
            }
        }
        found
    }

    async fn fetch_one(&self, url: &str) -> Option<(SitemapKind, Vec<String>)> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(url, error = %err, "sitemap fetch failed, skipping");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(url, status = %response.status(), "sitemap non-200, skipping");
            return None;
        }
        let is_gzip_header = response
            .headers()
            .get(reqwest::header::CONTENT_ENCODING)
            .map(|v| v.to_str().unwrap_or("").contains("gzip"))
            .unwrap_or(false);
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(url, error = %err, "sitemap body read failed, skipping");
                return None;
            }
        };
        let content = maybe_gunzip(&bytes, url, is_gzip_header);
        Some(parse_locs(&content))
    }

    /// Fetches and parses every candidate in `candidates`, following a
    /// sitemap-index one level deep, and returns the deduplicated url-set
    /// entries across all of them.
    pub async fn parse_all(&self, candidates: Vec<String>) -> Vec<String> {
        let mut processed: HashSet<String> = HashSet::new();
        let mut urls: Vec<String> = Vec::new();
        let mut seen_urls: HashSet<String> = HashSet::new();

        for candidate in candidates {
            if !processed.insert(candidate.clone()) {
                continue;
            }
            let Some((kind, locs)) = self.fetch_one(&candidate).await else {
                continue;
            };

            match kind {
                SitemapKind::UrlSet => {
                    for loc in locs {
                        if seen_urls.insert(loc.clone()) {
                            urls.push(loc);
                        }
                    }
                }
                SitemapKind::SitemapIndex => {
                    for child in locs {
                        if processed.contains(&child) {
                            continue;
                        }
                        processed.insert(child.clone());
                        if let Some((child_kind, child_locs)) = self.fetch_one(&child).await {
                            if child_kind == SitemapKind::SitemapIndex {
                                debug!(child, "ignoring nested sitemap-index beyond one level");
                                continue;
                            }
                            for loc in child_locs {
                                if seen_urls.insert(loc.clone()) {
                                    urls.push(loc);
                                }
                            }
                        }
                    }
                }
            }
        }

        info!(count = urls.len(), "discovered sitemap urls");
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlset_locs_are_extracted_in_context() {
        let xml = r#"<?xml version="1.0"?>
            <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
              <url><loc>https://example.test/a</loc><priority>0.8</priority></url>
              <url><loc>https://example.test/b</loc></url>
            </urlset>"#;
        let (kind, locs) = parse_locs(xml);
        assert_eq!(kind, SitemapKind::UrlSet);
        assert_eq!(locs, vec!["https://example.test/a", "https://example.test/b"]);
    }

    #[test]
    fn sitemap_index_is_distinguished_from_urlset() {
        let xml = r#"<sitemapindex>
              <sitemap><loc>https://example.test/sitemap-1.xml</loc></sitemap>
              <sitemap><loc>https://example.test/sitemap-2.xml</loc></sitemap>
            </sitemapindex>"#;
        let (kind, locs) = parse_locs(xml);
        assert_eq!(kind, SitemapKind::SitemapIndex);
        assert_eq!(locs.len(), 2);
    }

    #[test]
    fn non_loc_character_data_is_not_mistaken_for_a_url() {
        let xml = r#"<urlset>
              <url><lastmod>https://should-not-be-a-url.test/</lastmod><loc>https://example.test/real</loc></url>
            </urlset>"#;
        let (_, locs) = parse_locs(xml);
        assert_eq!(locs, vec!["https://example.test/real"]);
    }

    #[test]
    fn gzip_detection_falls_back_gracefully_on_bad_data() {
        let out = maybe_gunzip(b"not actually gzip", "https://example.test/sitemap.xml.gz", false);
        assert!(out.contains("not actually gzip"));
    }
}
