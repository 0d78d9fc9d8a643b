//! Internal linking score: outgoing internal link count and quality, plus
//! inbound links as currently known to the scorer.

use seo_extraction::AnalyzedPage;
use seo_types::model::ScoreComponent;
use serde_json::json;
use std::collections::HashMap;

fn component(score: f64, max: f64, value: serde_json::Value) -> ScoreComponent {
    ScoreComponent { score, max, value }
}

/// Already expressed on a 0-100 scale; no renormalization.
pub fn score(page: &AnalyzedPage, inbound_count: u32) -> (f64, HashMap<String, ScoreComponent>) {
    let mut total = 0.0;
    let mut breakdown = HashMap::new();

    let out_count = page.internal_links_count;
    let out_pts = if out_count >= 5 {
        30.0
    } else if out_count >= 2 {
        20.0
    } else if out_count >= 1 {
        10.0
    } else {
        0.0
    };
    total += out_pts;
    breakdown.insert(
        "outgoing_internal".to_string(),
        component(out_pts, 30.0, json!(out_count)),
    );

    let quality_pts = if (1..=50).contains(&out_count) {
        20.0
    } else if out_count > 100 {
        5.0
    } else {
        0.0
    };
    total += quality_pts;
    breakdown.insert("link_count_quality".to_string(), component(quality_pts, 20.0, json!(null)));

    let in_pts = if inbound_count >= 10 {
        50.0
    } else if inbound_count >= 5 {
        35.0
    } else if inbound_count >= 2 {
        20.0
    } else if inbound_count >= 1 {
        10.0
    } else {
        0.0
    };
    total += in_pts;
    breakdown.insert("inbound_links".to_string(), component(in_pts, 50.0, json!(inbound_count)));

    (total, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_page() -> AnalyzedPage {
        AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true)
    }

    #[test]
    fn zero_links_scores_zero() {
        let (total, _) = score(&base_page(), 0);
        assert_eq!(total, 0.0);
    }

    #[test]
    fn excessive_outbound_links_are_penalized_as_link_spam() {
        let mut page = base_page();
        page.internal_links_count = 150;
        let (_, breakdown) = score(&page, 0);
        assert_eq!(breakdown.get("link_count_quality").unwrap().score, 5.0);
    }

    #[test]
    fn ten_or_more_inbound_links_earns_full_inbound_credit() {
        let (_, breakdown) = score(&base_page(), 10);
        assert_eq!(breakdown.get("inbound_links").unwrap().score, 50.0);
    }
}
