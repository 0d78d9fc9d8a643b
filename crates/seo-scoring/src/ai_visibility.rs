//! AI visibility score: how legible the page is to an LLM or answer-engine
//! crawler, independent of traditional ranking signals.

use seo_extraction::AnalyzedPage;
use std::collections::HashSet;

const HIGH_VALUE_SCHEMAS: &[&str] = &["FAQPage", "HowTo", "Article", "Product", "LocalBusiness"];

pub fn score(page: &AnalyzedPage) -> f64 {
    let mut total = 0.0;

    if page.has_schema_markup {
        total += 40.0;
        let present: HashSet<&str> = page.schema_types.iter().map(String::as_str).collect();
        let matching = HIGH_VALUE_SCHEMAS.iter().filter(|t| present.contains(*t)).count();
        total += matching as f64 * 10.0;
    }

    if page.h1_tags.len() == 1 {
        total += 15.0;
    }
    if page.h2_tags.len() >= 2 {
        total += 15.0;
    }
    if page.has_open_graph {
        total += 10.0;
    }
    if page.word_count >= 1000 {
        total += 10.0;
    }

    crate::clamp(total, 0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_page() -> AnalyzedPage {
        AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true)
    }

    #[test]
    fn bare_page_scores_zero() {
        assert_eq!(score(&base_page()), 0.0);
    }

    #[test]
    fn faq_schema_earns_a_bonus_over_a_generic_type() {
        let mut faq = base_page();
        faq.has_schema_markup = true;
        faq.schema_types = vec!["FAQPage".to_string()];

        let mut generic = base_page();
        generic.has_schema_markup = true;
        generic.schema_types = vec!["WebPage".to_string()];

        assert!(score(&faq) > score(&generic));
    }

    #[test]
    fn score_never_exceeds_100_even_with_every_bonus() {
        let mut page = base_page();
        page.has_schema_markup = true;
        page.schema_types = HIGH_VALUE_SCHEMAS.iter().map(|s| s.to_string()).collect();
        page.h1_tags = vec!["H".to_string()];
        page.h2_tags = vec!["A".to_string(), "B".to_string()];
        page.has_open_graph = true;
        page.word_count = 5000;
        assert!(score(&page) <= 100.0);
    }
}
