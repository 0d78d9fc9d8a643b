//! Per-page keyword frequency computation: the input to the site-wide
//! keyword opportunity engine.

use crate::stop_words::is_stop_word;
use std::collections::HashMap;

const TOP_UNIGRAMS: usize = 150;
const TOP_BIGRAMS: usize = 50;
const MIN_BIGRAM_COUNT: u32 = 2;

/// Lowercases, strips anything outside `[a-z0-9\s\-']`, filters stop words
/// and tokens of length ≤ 2 — checked against the *raw* token before any
/// leading/trailing `'`/`-` is stripped, so e.g. `"the'"` (length 4, not
/// equal to the stop word `"the"`) still passes the raw check and then
/// collapses to the stop word `"the"` once stripped — then combines the top
/// unigrams with the top qualifying bigrams. Later writes win on key
/// collision (bigrams are inserted after unigrams). Empty input yields an
/// empty map.
pub fn compute_frequencies(content_text: &str) -> HashMap<String, u32> {
    if content_text.is_empty() {
        return HashMap::new();
    }

    let cleaned: String = content_text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '\'' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let tokens: Vec<String> = cleaned
        .split_whitespace()
        .filter_map(|raw| {
            if raw.len() <= 2 || is_stop_word(raw) {
                return None;
            }
            let stripped = raw.trim_matches(|c| c == '\'' || c == '-');
            if stripped.is_empty() {
                None
            } else {
                Some(stripped.to_string())
            }
        })
        .collect();

    let mut unigram_counts: HashMap<String, u32> = HashMap::new();
    for token in &tokens {
        *unigram_counts.entry(token.clone()).or_insert(0) += 1;
    }

    let mut bigram_counts: HashMap<String, u32> = HashMap::new();
    for window in tokens.windows(2) {
        let bigram = format!("{} {}", window[0], window[1]);
        *bigram_counts.entry(bigram).or_insert(0) += 1;
    }

    let mut combined = HashMap::new();
    for (term, count) in top_n(unigram_counts, TOP_UNIGRAMS) {
        combined.insert(term, count);
    }
    for (term, count) in top_n(bigram_counts, TOP_BIGRAMS) {
        if count >= MIN_BIGRAM_COUNT {
            combined.insert(term, count);
        }
    }

    combined
}

fn top_n(counts: HashMap<String, u32>, n: usize) -> Vec<(String, u32)> {
    let mut entries: Vec<(String, u32)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_empty_map() {
        assert!(compute_frequencies("").is_empty());
    }

    #[test]
    fn filters_stop_words_and_short_tokens() {
        let freqs = compute_frequencies("the a it is of widgets widgets widgets");
        assert_eq!(freqs.get("widgets"), Some(&3));
        assert!(!freqs.contains_key("the"));
        assert!(!freqs.contains_key("it"));
    }

    #[test]
    fn bigrams_require_at_least_two_occurrences() {
        let freqs = compute_frequencies("blue widget blue widget red gadget");
        assert_eq!(freqs.get("blue widget"), Some(&2));
        assert!(!freqs.contains_key("red gadget"));
    }

    #[test]
    fn strips_non_word_characters_to_spaces() {
        let freqs = compute_frequencies("widgets, widgets! widgets?");
        assert_eq!(freqs.get("widgets"), Some(&3));
    }

    #[test]
    fn raw_token_with_trailing_quote_is_checked_before_stripping() {
        // "the'" has length 4 and isn't itself a stop word, so it survives
        // the length/stop-word filter; only after that does it collapse to
        // the stop word "the" once the trailing quote is stripped.
        let freqs = compute_frequencies("the' the' the' widgets");
        assert_eq!(freqs.get("the"), Some(&3));
    }

    #[test]
    fn raw_token_too_short_after_stripping_alone_is_still_kept() {
        // "ab-" has length 3 (passes the raw length check) but strips down
        // to "ab" (length 2); the raw check is what governs inclusion.
        let freqs = compute_frequencies("ab- ab- ab- widgets");
        assert_eq!(freqs.get("ab"), Some(&3));
    }
}
