//! Technical SEO score: crawlability, indexability, performance, HTTPS, and
//! the other machine-checkable signals a crawler can verify directly.

use seo_extraction::AnalyzedPage;
use seo_types::model::ScoreComponent;
use serde_json::json;
use std::collections::HashMap;

const MAX_POSSIBLE: f64 = 90.0;

fn component(score: f64, max: f64, value: serde_json::Value) -> ScoreComponent {
    ScoreComponent { score, max, value }
}

/// Raw sum out of [`MAX_POSSIBLE`], renormalized to 0-100.
pub fn score(page: &AnalyzedPage) -> (f64, HashMap<String, ScoreComponent>) {
    let mut total = 0.0;
    let mut breakdown = HashMap::new();

    let https_pts = if page.is_https { 10.0 } else { 0.0 };
    total += https_pts;
    breakdown.insert("https".to_string(), component(https_pts, 10.0, json!(page.is_https)));

    let status_pts = if page.status_code == 200 {
        10.0
    } else if page.status_code > 200 && page.status_code < 400 {
        5.0
    } else {
        0.0
    };
    total += status_pts;
    breakdown.insert("status_code".to_string(), component(status_pts, 10.0, json!(page.status_code)));

    let index_pts = if page.is_indexable { 15.0 } else { 0.0 };
    total += index_pts;
    breakdown.insert("indexable".to_string(), component(index_pts, 15.0, json!(page.is_indexable)));

    let viewport_pts = if page.has_viewport_meta { 5.0 } else { 0.0 };
    total += viewport_pts;
    breakdown.insert("viewport".to_string(), component(viewport_pts, 5.0, json!(page.has_viewport_meta)));

    let lt = page.load_time_ms;
    let lt_pts = if lt <= 1000 {
        10.0
    } else if lt <= 2000 {
        7.0
    } else if lt <= 3000 {
        5.0
    } else if lt <= 5000 {
        2.0
    } else {
        0.0
    };
    total += lt_pts;
    breakdown.insert("load_time".to_string(), component(lt_pts, 10.0, json!(lt)));

    let size_kb = page.page_size_bytes as f64 / 1024.0;
    let size_pts = if size_kb < 500.0 {
        10.0
    } else if size_kb < 1024.0 {
        7.0
    } else if size_kb < 2048.0 {
        3.0
    } else {
        0.0
    };
    total += size_pts;
    breakdown.insert(
        "page_size".to_string(),
        component(size_pts, 10.0, json!((size_kb * 10.0).round() / 10.0)),
    );

    let canonical_pts = if page.canonical_tag.is_some() { 5.0 } else { 0.0 };
    total += canonical_pts;
    breakdown.insert(
        "canonical".to_string(),
        component(canonical_pts, 5.0, json!(page.canonical_tag.is_some())),
    );

    let schema_pts = if page.has_schema_markup { 10.0 } else { 0.0 };
    total += schema_pts;
    breakdown.insert(
        "schema_markup".to_string(),
        component(
            schema_pts,
            10.0,
            if page.has_schema_markup { json!(page.schema_types) } else { json!([]) },
        ),
    );

    let og_pts = if page.has_open_graph { 5.0 } else { 0.0 };
    total += og_pts;
    breakdown.insert("open_graph".to_string(), component(og_pts, 5.0, json!(page.has_open_graph)));

    let tc_pts = if page.has_twitter_card { 5.0 } else { 0.0 };
    total += tc_pts;
    breakdown.insert("twitter_card".to_string(), component(tc_pts, 5.0, json!(page.has_twitter_card)));

    let hl_pts = if page.has_hreflang { 5.0 } else { 0.0 };
    total += hl_pts;
    breakdown.insert("hreflang".to_string(), component(hl_pts, 5.0, json!(page.has_hreflang)));

    (total / MAX_POSSIBLE * 100.0, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_page() -> AnalyzedPage {
        AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true)
    }

    #[test]
    fn a_bare_https_200_page_scores_only_https_status_and_indexable() {
        let (normalized, breakdown) = score(&base_page());
        // https(10) + status(10) + indexable(15) = 35 of 90
        assert!((normalized - (35.0 / 90.0 * 100.0)).abs() < 1e-9);
        assert_eq!(breakdown.get("https").unwrap().score, 10.0);
    }

    #[test]
    fn fully_optimized_page_scores_100() {
        let mut page = base_page();
        page.has_viewport_meta = true;
        page.load_time_ms = 500;
        page.page_size_bytes = 100_000;
        page.canonical_tag = Some("https://example.test/".to_string());
        page.has_schema_markup = true;
        page.has_open_graph = true;
        page.has_twitter_card = true;
        page.has_hreflang = true;
        let (normalized, _) = score(&page);
        assert!((normalized - 100.0).abs() < 1e-9);
    }

    #[test]
    fn redirect_status_code_earns_partial_credit() {
        let mut page = base_page();
        page.status_code = 301;
        let (_, breakdown) = score(&page);
        assert_eq!(breakdown.get("status_code").unwrap().score, 5.0);
    }
}
