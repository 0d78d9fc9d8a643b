//! The per-page scoring entry point, combining all five dimensions into a
//! weighted overall.

use crate::{ai_visibility, authority, clamp, content, linking, technical};
use seo_config::ScoreWeights;
use seo_extraction::AnalyzedPage;
use seo_types::model::ScoreComponent;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct PageScore {
    pub overall_score: f64,
    pub technical_score: f64,
    pub content_score: f64,
    pub authority_score: f64,
    pub linking_score: f64,
    pub ai_visibility_score: f64,
    pub technical_breakdown: HashMap<String, ScoreComponent>,
    pub content_breakdown: HashMap<String, ScoreComponent>,
    pub linking_breakdown: HashMap<String, ScoreComponent>,
}

/// Computes all five dimension scores for one page and combines them into
/// the weighted overall. `inbound_link_count` is an explicit input because
/// the link graph is not resolved at the moment a page is scored during the
/// crawl callback — callers pass 0 there and accept the resulting authority
/// and linking scores as provisional.
pub fn score_page(page: &AnalyzedPage, inbound_link_count: u32, weights: &ScoreWeights) -> PageScore {
    let (technical_score, technical_breakdown) = technical::score(page);
    let (content_score, content_breakdown) = content::score(page);
    let (linking_score, linking_breakdown) = linking::score(page, inbound_link_count);
    let authority_score = authority::score(inbound_link_count);
    let ai_visibility_score = ai_visibility::score(page);

    let technical_score = clamp(technical_score, 0.0, 100.0);
    let content_score = clamp(content_score, 0.0, 100.0);
    let authority_score = clamp(authority_score, 0.0, 100.0);
    let linking_score = clamp(linking_score, 0.0, 100.0);
    let ai_visibility_score = clamp(ai_visibility_score, 0.0, 100.0);

    let overall_score = clamp(
        weights.overall(technical_score, content_score, authority_score, linking_score, ai_visibility_score),
        0.0,
        100.0,
    );

    PageScore {
        overall_score,
        technical_score,
        content_score,
        authority_score,
        linking_score,
        ai_visibility_score,
        technical_breakdown,
        content_breakdown,
        linking_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_score_is_the_configured_weighted_sum() {
        let page = AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true);
        let weights = ScoreWeights::default();
        let score = score_page(&page, 0, &weights);
        let expected = weights.overall(
            score.technical_score,
            score.content_score,
            score.authority_score,
            score.linking_score,
            score.ai_visibility_score,
        );
        assert!((score.overall_score - expected).abs() < 1e-9);
    }

    #[test]
    fn every_dimension_is_clamped_into_0_to_100() {
        let page = AnalyzedPage::empty("https://example.test/".to_string(), 200, 0, true);
        let weights = ScoreWeights::default();
        let score = score_page(&page, 0, &weights);
        for dimension in [
            score.technical_score,
            score.content_score,
            score.authority_score,
            score.linking_score,
            score.ai_visibility_score,
            score.overall_score,
        ] {
            assert!((0.0..=100.0).contains(&dimension));
        }
    }
}
