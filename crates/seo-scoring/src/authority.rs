//! Authority score derived from the internal link graph. A stand-in for an
//! external backlink signal, which this platform does not collect.

/// Already expressed on a 0-100 scale.
pub fn score(inbound_link_count: u32) -> f64 {
    if inbound_link_count >= 50 {
        90.0
    } else if inbound_link_count >= 20 {
        75.0
    } else if inbound_link_count >= 10 {
        60.0
    } else if inbound_link_count >= 5 {
        45.0
    } else if inbound_link_count >= 2 {
        30.0
    } else if inbound_link_count >= 1 {
        15.0
    } else {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_inbound_links_still_earns_a_baseline_score() {
        assert_eq!(score(0), 5.0);
    }

    #[test]
    fn fifty_or_more_inbound_links_earns_the_ceiling() {
        assert_eq!(score(50), 90.0);
        assert_eq!(score(1000), 90.0);
    }

    #[test]
    fn score_is_monotonic_in_inbound_count() {
        let counts = [0, 1, 2, 5, 10, 20, 50];
        let scores: Vec<f64> = counts.iter().map(|&c| score(c)).collect();
        for pair in scores.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }
}
