//! Site-level aggregation: the arithmetic mean of per-page dimension scores
//! and per-component breakdowns across every crawled page.

use crate::PageScore;
use seo_types::model::ScoreComponent;
use serde_json::json;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct SiteScore {
    pub overall_score: f64,
    pub technical_score: f64,
    pub content_score: f64,
    pub authority_score: f64,
    pub linking_score: f64,
    pub ai_visibility_score: f64,
    pub technical_breakdown: HashMap<String, ScoreComponent>,
    pub content_breakdown: HashMap<String, ScoreComponent>,
    pub linking_breakdown: HashMap<String, ScoreComponent>,
    pub page_count: usize,
}

fn mean(values: impl Iterator<Item = f64> + Clone, count: usize) -> f64 {
    (values.sum::<f64>() / count as f64 * 100.0).round() / 100.0
}

/// No exclusion for orphan or non-indexable pages — every crawled page
/// contributes equally to the site mean.
pub fn aggregate_site_score(page_scores: &[PageScore]) -> SiteScore {
    if page_scores.is_empty() {
        return SiteScore::default();
    }

    let count = page_scores.len();
    SiteScore {
        page_count: count,
        overall_score: mean(page_scores.iter().map(|p| p.overall_score), count),
        technical_score: mean(page_scores.iter().map(|p| p.technical_score), count),
        content_score: mean(page_scores.iter().map(|p| p.content_score), count),
        authority_score: mean(page_scores.iter().map(|p| p.authority_score), count),
        linking_score: mean(page_scores.iter().map(|p| p.linking_score), count),
        ai_visibility_score: mean(page_scores.iter().map(|p| p.ai_visibility_score), count),
        technical_breakdown: aggregate_breakdowns(page_scores.iter().map(|p| &p.technical_breakdown)),
        content_breakdown: aggregate_breakdowns(page_scores.iter().map(|p| &p.content_breakdown)),
        linking_breakdown: aggregate_breakdowns(page_scores.iter().map(|p| &p.linking_breakdown)),
    }
}

/// For each component key present in at least one page's breakdown, the
/// average score across the pages that produced it, plus that score as a
/// percentage of the component's max.
fn aggregate_breakdowns<'a>(
    breakdowns: impl Iterator<Item = &'a HashMap<String, ScoreComponent>>,
) -> HashMap<String, ScoreComponent> {
    let mut scores_by_key: HashMap<String, (Vec<f64>, f64)> = HashMap::new();

    for breakdown in breakdowns {
        for (key, value) in breakdown {
            let entry = scores_by_key.entry(key.clone()).or_insert_with(|| (Vec::new(), value.max));
            entry.0.push(value.score);
        }
    }

    scores_by_key
        .into_iter()
        .map(|(key, (scores, max))| {
            let n = scores.len() as f64;
            let avg = (scores.iter().sum::<f64>() / n * 100.0).round() / 100.0;
            let pct = (avg / max.max(1.0) * 100.0 * 10.0).round() / 10.0;
            (
                key,
                ScoreComponent {
                    score: avg,
                    max,
                    value: json!({ "pct": pct }),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_config::ScoreWeights;
    use seo_extraction::AnalyzedPage;

    fn page_score(overall: f64) -> PageScore {
        let page = AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true);
        let mut score = crate::score_page(&page, 0, &ScoreWeights::default());
        score.overall_score = overall;
        score
    }

    #[test]
    fn empty_input_yields_a_default_zeroed_score() {
        let site = aggregate_site_score(&[]);
        assert_eq!(site.page_count, 0);
        assert_eq!(site.overall_score, 0.0);
    }

    #[test]
    fn overall_score_is_the_arithmetic_mean_across_pages() {
        let scores = vec![page_score(50.0), page_score(70.0)];
        let site = aggregate_site_score(&scores);
        assert_eq!(site.page_count, 2);
        assert!((site.overall_score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn breakdowns_average_per_component_across_pages() {
        let scores = vec![page_score(0.0), page_score(0.0)];
        let site = aggregate_site_score(&scores);
        assert!(site.technical_breakdown.contains_key("https"));
    }
}
