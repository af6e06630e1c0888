/// Elo rating math.
///
/// Ratings are whole numbers. Every update rounds half away from zero
/// (`f64::round`). There is no floor: a long losing run can go negative.
use crate::constants::ELO_SCALE;

/// Expected score of a player rated `rating` against one rated `opponent`.
pub fn expected_score(rating: i64, opponent: i64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / ELO_SCALE))
}

/// Apply one decisive result. Returns `(new_winner, new_loser)`.
pub fn update_ratings(winner: i64, loser: i64, k_factor: f64) -> (i64, i64) {
    let expected_winner = expected_score(winner, loser);
    let expected_loser = expected_score(loser, winner);

    let new_winner = (winner as f64 + k_factor * (1.0 - expected_winner)).round() as i64;
    let new_loser = (loser as f64 + k_factor * (0.0 - expected_loser)).round() as i64;
    (new_winner, new_loser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::K_FACTOR;

    #[test]
    fn test_expected_score_equal_ratings() {
        assert!((expected_score(1000, 1000) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_scores_sum_to_one() {
        for (a, b) in [(1200, 1000), (0, 3000), (1500, 1499), (-50, 800)] {
            let sum = expected_score(a, b) + expected_score(b, a);
            assert!((sum - 1.0).abs() < 1e-12, "{a} vs {b}: {sum}");
        }
    }

    #[test]
    fn test_equal_ratings_swing_half_k() {
        assert_eq!(update_ratings(1000, 1000, K_FACTOR), (1016, 984));
    }

    #[test]
    fn test_favourite_wins_small_gain() {
        let expected = expected_score(1200, 1000);
        assert!((expected - 0.7597).abs() < 1e-4);
        // Loser's expectation is 1 - 0.7597, so it only drops ~7.7 points.
        assert_eq!(update_ratings(1200, 1000, K_FACTOR), (1208, 992));
    }

    #[test]
    fn test_underdog_wins_large_gain() {
        // Mirror of the favourite case: 32 * 0.7597 ≈ 24.3
        assert_eq!(update_ratings(1000, 1200, K_FACTOR), (1024, 1176));
    }

    #[test]
    fn test_ratings_can_go_negative() {
        let (_, loser) = update_ratings(100, 0, K_FACTOR);
        assert!(loser < 0);
    }

    #[test]
    fn test_matches_closed_form_over_range() {
        for rw in (0..=3000).step_by(125) {
            for rl in (0..=3000).step_by(125) {
                let ew = 1.0 / (1.0 + 10f64.powf((rl - rw) as f64 / 400.0));
                let el = 1.0 / (1.0 + 10f64.powf((rw - rl) as f64 / 400.0));
                let want = (
                    (rw as f64 + 32.0 * (1.0 - ew)).round() as i64,
                    (rl as f64 - 32.0 * el).round() as i64,
                );
                assert_eq!(update_ratings(rw, rl, K_FACTOR), want, "rw={rw} rl={rl}");
            }
        }
    }

    #[test]
    fn test_custom_k_factor() {
        assert_eq!(update_ratings(1000, 1000, 64.0), (1032, 968));
    }
}
