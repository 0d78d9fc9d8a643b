//! The opportunity scoring formula: `Volume × CTR × RankGap ÷ Difficulty`,
//! log-compressed and normalized to 0-100.

/// Zero whenever volume, CTR, or rank_gap is non-positive. Difficulty of
/// zero or below is treated as 1 to avoid a division blowup.
pub fn compute_opportunity_score(volume: u32, ctr: f64, rank_gap: i32, difficulty: f64) -> f64 {
    let difficulty = if difficulty <= 0.0 { 1.0 } else { difficulty };
    if volume == 0 || ctr <= 0.0 || rank_gap <= 0 {
        return 0.0;
    }

    let raw_score = (volume as f64) * ctr * (rank_gap as f64) / difficulty;
    let normalized = (raw_score.ln_1p() * 8.0).min(100.0);
    (normalized * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_volume_or_rank_gap_scores_zero() {
        assert_eq!(compute_opportunity_score(0, 0.1, 5, 50.0), 0.0);
        assert_eq!(compute_opportunity_score(1000, 0.1, 0, 50.0), 0.0);
    }

    #[test]
    fn nonzero_inputs_produce_a_positive_score() {
        let score = compute_opportunity_score(5000, 0.099, 12, 40.0);
        assert!(score > 0.0 && score <= 100.0);
    }

    #[test]
    fn score_never_exceeds_100() {
        let score = compute_opportunity_score(10_000_000, 0.284, 50, 1.0);
        assert!(score <= 100.0);
    }

    #[test]
    fn non_positive_difficulty_is_treated_as_one() {
        let a = compute_opportunity_score(5000, 0.1, 10, 1.0);
        let b = compute_opportunity_score(5000, 0.1, 10, 0.0);
        assert_eq!(a, b);
    }
}
