//! # SEO Recommendations
//!
//! A rule-based recommendation engine: per-page checks against a single
//! [`seo_extraction::AnalyzedPage`], and site-wide checks that fire when a
//! threshold over the full crawled page set is crossed.

mod page_checks;
mod recommendation;
mod site_checks;

pub use recommendation::Recommendation;

use seo_extraction::AnalyzedPage;

/// All per-page recommendations, each tagged with `page.url`.
pub fn generate_page_recommendations(page: &AnalyzedPage) -> Vec<Recommendation> {
    let mut recs = Vec::new();
    recs.extend(page_checks::check_title(page));
    recs.extend(page_checks::check_meta_description(page));
    recs.extend(page_checks::check_headings(page));
    recs.extend(page_checks::check_content(page));
    recs.extend(page_checks::check_images(page));
    recs.extend(page_checks::check_technical(page));
    recs.extend(page_checks::check_structured_data(page));
    recs.extend(page_checks::check_links(page));

    for rec in &mut recs {
        rec.page_url = Some(page.url.clone());
    }
    recs
}

/// Site-wide recommendations derived from aggregate thresholds over every
/// crawled page.
pub fn generate_site_recommendations(pages: &[AnalyzedPage]) -> Vec<Recommendation> {
    site_checks::generate(pages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_recommendations_are_all_tagged_with_the_page_url() {
        let page = AnalyzedPage::empty("https://example.test/missing-everything".to_string(), 200, 0, true);
        let recs = generate_page_recommendations(&page);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.page_url.as_deref() == Some("https://example.test/missing-everything")));
    }
}
