//! Content quality score: title/meta length, heading structure, word count,
//! image alt coverage, and text/HTML density.

use seo_extraction::AnalyzedPage;
use seo_types::model::ScoreComponent;
use serde_json::json;
use std::collections::HashMap;

const MAX_POSSIBLE: f64 = 95.0;

fn component(score: f64, max: f64, value: serde_json::Value) -> ScoreComponent {
    ScoreComponent { score, max, value }
}

pub fn score(page: &AnalyzedPage) -> (f64, HashMap<String, ScoreComponent>) {
    let mut total = 0.0;
    let mut breakdown = HashMap::new();

    let title_pts = if page.title.is_some() {
        if (50..=60).contains(&page.title_length) {
            20.0
        } else if (30..=70).contains(&page.title_length) {
            15.0
        } else if page.title_length > 0 {
            8.0
        } else {
            0.0
        }
    } else {
        0.0
    };
    total += title_pts;
    breakdown.insert(
        "title".to_string(),
        component(title_pts, 20.0, json!({ "value": page.title, "length": page.title_length })),
    );

    let desc_pts = if page.meta_description.is_some() {
        if (150..=160).contains(&page.meta_description_length) {
            15.0
        } else if (100..=180).contains(&page.meta_description_length) {
            10.0
        } else {
            5.0
        }
    } else {
        0.0
    };
    total += desc_pts;
    breakdown.insert(
        "meta_description".to_string(),
        component(desc_pts, 15.0, json!({ "length": page.meta_description_length })),
    );

    let h1_count = page.h1_tags.len();
    let h1_pts = match h1_count {
        1 => 15.0,
        0 => 0.0,
        _ => 8.0,
    };
    total += h1_pts;
    breakdown.insert(
        "h1".to_string(),
        component(h1_pts, 15.0, json!({ "count": h1_count, "tags": page.h1_tags })),
    );

    let h2_count = page.h2_tags.len();
    let h2_pts = if h2_count >= 2 {
        5.0
    } else if h2_count == 1 {
        2.0
    } else {
        0.0
    };
    total += h2_pts;
    breakdown.insert("h2".to_string(), component(h2_pts, 5.0, json!({ "count": h2_count })));

    let wc = page.word_count;
    let wc_pts = if wc >= 1500 {
        20.0
    } else if wc >= 800 {
        15.0
    } else if wc >= 400 {
        10.0
    } else if wc >= 200 {
        5.0
    } else {
        0.0
    };
    total += wc_pts;
    breakdown.insert("word_count".to_string(), component(wc_pts, 20.0, json!(wc)));

    let alt_pts = if page.total_images > 0 {
        (page.images_with_alt as f64 / page.total_images as f64 * 10.0).round()
    } else {
        10.0
    };
    total += alt_pts;
    breakdown.insert(
        "image_alt".to_string(),
        component(alt_pts, 10.0, json!({ "total": page.total_images, "missing": page.images_missing_alt })),
    );

    let ratio = page.text_html_ratio;
    let ratio_pts = if ratio >= 0.3 {
        10.0
    } else if ratio >= 0.15 {
        5.0
    } else {
        0.0
    };
    total += ratio_pts;
    breakdown.insert("text_ratio".to_string(), component(ratio_pts, 10.0, json!(ratio)));

    (total / MAX_POSSIBLE * 100.0, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_page() -> AnalyzedPage {
        AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true)
    }

    #[test]
    fn no_images_is_not_penalized_for_alt_text() {
        let page = base_page();
        let (_, breakdown) = score(&page);
        assert_eq!(breakdown.get("image_alt").unwrap().score, 10.0);
    }

    #[test]
    fn optimal_title_length_earns_full_marks() {
        let mut page = base_page();
        page.title = Some("x".repeat(55));
        page.title_length = 55;
        let (_, breakdown) = score(&page);
        assert_eq!(breakdown.get("title").unwrap().score, 20.0);
    }

    #[test]
    fn single_h1_beats_multiple_h1_which_beats_none() {
        let mut one = base_page();
        one.h1_tags = vec!["Title".to_string()];
        let mut many = base_page();
        many.h1_tags = vec!["A".to_string(), "B".to_string()];
        let none = base_page();

        let (_, one_b) = score(&one);
        let (_, many_b) = score(&many);
        let (_, none_b) = score(&none);
        assert_eq!(one_b.get("h1").unwrap().score, 15.0);
        assert_eq!(many_b.get("h1").unwrap().score, 8.0);
        assert_eq!(none_b.get("h1").unwrap().score, 0.0);
    }

    #[test]
    fn long_content_earns_full_word_count_marks() {
        let mut page = base_page();
        page.word_count = 2000;
        let (_, breakdown) = score(&page);
        assert_eq!(breakdown.get("word_count").unwrap().score, 20.0);
    }
}
