//! Heuristic estimates standing in for an external keyword-data API
//! (search volume, difficulty, current rank). Swap for a real provider
//! without touching the opportunity-scoring math.

/// Longer (long-tail) keywords get a lower base volume; a high site
/// frequency bumps the estimate up, capped at +5000.
pub fn estimate_volume(keyword: &str, site_frequency: u32) -> u32 {
    let word_count = keyword.split_whitespace().count();
    let base_volume = 1000u32;
    let multiplier = match word_count {
        1 => 10,
        2 => 4,
        3 => 2,
        _ => 1,
    };
    let freq_bonus = (site_frequency * 50).min(5000);
    base_volume * multiplier + freq_bonus
}

/// Short head terms are harder to rank for than long-tail phrases.
pub fn estimate_difficulty(keyword: &str) -> f64 {
    match keyword.split_whitespace().count() {
        1 => 75.0,
        2 => 55.0,
        3 => 40.0,
        _ => 25.0,
    }
}

/// Higher site frequency for a term is treated as a proxy for the site
/// already ranking reasonably for it.
pub fn estimate_current_rank(site_frequency: u32) -> Option<u32> {
    Some(if site_frequency >= 50 {
        8
    } else if site_frequency >= 20 {
        15
    } else if site_frequency >= 10 {
        25
    } else if site_frequency >= 5 {
        40
    } else {
        60
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_keywords_get_the_highest_volume_multiplier() {
        assert!(estimate_volume("widget", 1) > estimate_volume("blue widget box", 1));
    }

    #[test]
    fn frequency_bonus_is_capped_at_5000() {
        assert_eq!(estimate_volume("x", 1000), 1000 * 10 + 5000);
    }

    #[test]
    fn single_word_keywords_are_rated_hardest() {
        assert!(estimate_difficulty("widget") > estimate_difficulty("blue widget for sale"));
    }

    #[test]
    fn higher_frequency_implies_a_better_estimated_rank() {
        assert!(estimate_current_rank(60).unwrap() < estimate_current_rank(1).unwrap());
    }
}
