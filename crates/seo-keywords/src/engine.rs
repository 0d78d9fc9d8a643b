//! Aggregates per-page keyword frequencies into site-wide opportunities.

use crate::ctr::ctr_for_position;
use crate::estimate::{estimate_current_rank, estimate_difficulty, estimate_volume};
use crate::opportunity::compute_opportunity_score;
use std::collections::HashMap;

const MAX_OPPORTUNITIES: usize = 500;
const MAX_SAMPLE_URLS: usize = 5;
const OPPORTUNITY_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct KeywordOpportunity {
    pub keyword: String,
    pub frequency: u32,
    pub density: f64,
    pub estimated_volume: u32,
    pub estimated_difficulty: f64,
    pub estimated_ctr: f64,
    pub current_rank: Option<u32>,
    pub rank_gap: Option<i32>,
    pub opportunity_score: f64,
    pub is_opportunity: bool,
    pub page_urls: Vec<String>,
}

/// In production, volume and difficulty data would come from an external
/// provider; here they're heuristically estimated from on-site frequency.
pub struct KeywordEngine {
    target_rank: u32,
}

impl Default for KeywordEngine {
    fn default() -> Self {
        Self { target_rank: 3 }
    }
}

impl KeywordEngine {
    pub fn new(target_rank: u32) -> Self {
        Self { target_rank }
    }

    /// `page_keyword_data` is one `(page_url, keyword -> frequency)` entry
    /// per crawled page. Returns opportunities sorted by descending score,
    /// keywords under 3 characters or purely numeric are dropped, and only
    /// the top 500 by raw frequency are scored.
    pub fn aggregate_site_keywords(
        &self,
        page_keyword_data: &[(String, HashMap<String, u32>)],
    ) -> Vec<KeywordOpportunity> {
        let mut keyword_pages: HashMap<String, Vec<String>> = HashMap::new();
        let mut total_freq: HashMap<String, u32> = HashMap::new();
        let mut first_seen_order: Vec<String> = Vec::new();
        let mut total_words: u64 = 0;

        for (page_url, kw_freq) in page_keyword_data {
            for (keyword, count) in kw_freq {
                if !total_freq.contains_key(keyword) {
                    first_seen_order.push(keyword.clone());
                }
                keyword_pages.entry(keyword.clone()).or_default().push(page_url.clone());
                *total_freq.entry(keyword.clone()).or_insert(0) += count;
                total_words += *count as u64;
            }
        }

        let mut by_frequency: Vec<String> = first_seen_order;
        by_frequency.sort_by(|a, b| total_freq[b].cmp(&total_freq[a]));
        by_frequency.truncate(MAX_OPPORTUNITIES);

        let target_ctr = ctr_for_position(self.target_rank as i64);

        let mut opportunities: Vec<KeywordOpportunity> = by_frequency
            .into_iter()
            .filter(|keyword| keyword.chars().count() >= 3 && !is_all_digits(keyword))
            .map(|keyword| {
                let freq = total_freq[&keyword];
                let estimated_volume = estimate_volume(&keyword, freq);
                let estimated_difficulty = estimate_difficulty(&keyword);
                let current_rank = estimate_current_rank(freq);

                let rank_gap = current_rank
                    .filter(|&rank| rank > self.target_rank)
                    .map(|rank| rank as i32 - self.target_rank as i32);

                let opportunity_score = match rank_gap {
                    Some(gap) if gap > 0 => {
                        compute_opportunity_score(estimated_volume, target_ctr, gap, estimated_difficulty)
                    }
                    _ => 0.0,
                };

                let density = (freq as f64 / total_words.max(1) as f64 * 100.0 * 10000.0).round() / 10000.0;

                let page_urls = keyword_pages
                    .remove(&keyword)
                    .unwrap_or_default()
                    .into_iter()
                    .take(MAX_SAMPLE_URLS)
                    .collect();

                KeywordOpportunity {
                    keyword,
                    frequency: freq,
                    density,
                    estimated_volume,
                    estimated_difficulty,
                    estimated_ctr: target_ctr,
                    current_rank,
                    rank_gap,
                    opportunity_score,
                    is_opportunity: opportunity_score > OPPORTUNITY_THRESHOLD,
                    page_urls,
                }
            })
            .collect();

        opportunities.sort_by(|a, b| b.opportunity_score.partial_cmp(&a.opportunity_score).unwrap());
        opportunities
    }
}

fn is_all_digits(keyword: &str) -> bool {
    !keyword.is_empty() && keyword.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str, keywords: &[(&str, u32)]) -> (String, HashMap<String, u32>) {
        (url.to_string(), keywords.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn short_and_numeric_keywords_are_dropped() {
        let data = vec![page("https://a.test/", &[("ab", 10), ("12345", 10), ("widgets", 10)])];
        let opps = KeywordEngine::default().aggregate_site_keywords(&data);
        let keywords: Vec<&str> = opps.iter().map(|o| o.keyword.as_str()).collect();
        assert!(!keywords.contains(&"ab"));
        assert!(!keywords.contains(&"12345"));
        assert!(keywords.contains(&"widgets"));
    }

    #[test]
    fn high_frequency_keyword_with_a_rank_gap_is_flagged_an_opportunity() {
        let data = vec![page("https://a.test/", &[("blue widgets", 60)])];
        let opps = KeywordEngine::default().aggregate_site_keywords(&data);
        let widget = opps.iter().find(|o| o.keyword == "blue widgets").unwrap();
        assert_eq!(widget.current_rank, Some(8));
        assert_eq!(widget.rank_gap, Some(5));
        assert!(widget.opportunity_score > 0.0);
    }

    #[test]
    fn results_are_sorted_by_descending_opportunity_score() {
        let data = vec![page(
            "https://a.test/",
            &[("high frequency term", 80), ("low frequency term", 2)],
        )];
        let opps = KeywordEngine::default().aggregate_site_keywords(&data);
        for pair in opps.windows(2) {
            assert!(pair[0].opportunity_score >= pair[1].opportunity_score);
        }
    }

    #[test]
    fn page_urls_are_capped_at_five_samples() {
        let pages: Vec<(String, HashMap<String, u32>)> = (0..10)
            .map(|i| page(&format!("https://a.test/{i}"), &[("widgets", 3)]))
            .collect();
        let opps = KeywordEngine::default().aggregate_site_keywords(&pages);
        let widget = opps.iter().find(|o| o.keyword == "widgets").unwrap();
        assert_eq!(widget.page_urls.len(), 5);
    }

    #[test]
    fn density_is_a_percentage_of_total_observed_word_occurrences() {
        let data = vec![page("https://a.test/", &[("widgets", 25), ("gadgets", 75)])];
        let opps = KeywordEngine::default().aggregate_site_keywords(&data);
        let widgets = opps.iter().find(|o| o.keyword == "widgets").unwrap();
        assert!((widgets.density - 25.0).abs() < 1e-6);
    }

    #[test]
    fn two_pages_each_mentioning_widgets_twenty_times_is_a_ranked_opportunity() {
        let data = vec![
            page("https://a.test/", &[("widgets", 20)]),
            page("https://a.test/other", &[("widgets", 20)]),
        ];
        let opps = KeywordEngine::default().aggregate_site_keywords(&data);

        assert_eq!(opps[0].keyword, "widgets");
        assert_eq!(opps[0].frequency, 40);
        assert_eq!(opps[0].current_rank, Some(15));
        assert_eq!(opps[0].rank_gap, Some(12));
        assert_eq!(opps[0].estimated_difficulty, 75.0);
        assert!((opps[0].estimated_ctr - 0.099).abs() < 1e-9);
        assert!(opps[0].is_opportunity);
    }
}
