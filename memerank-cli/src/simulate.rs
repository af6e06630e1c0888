/// Simulate command: automated voting against hidden ground-truth strengths.
///
/// Each item gets a Bradley-Terry strength. A simulated voter picks the left
/// item with probability s_left / (s_left + s_right), or abstains at the
/// configured skip rate. Afterwards the leaderboard is compared to the true
/// order with Spearman's rank correlation.
use memerank_core::{Decision, EngineError, RatingEngine};
use rand::Rng;
use std::collections::HashMap;

pub struct SimulationReport {
    pub votes: usize,
    pub skips: usize,
    /// Spearman rank correlation between final leaderboard and ground truth.
    pub spearman: f64,
}

/// Strengths 2^z with z ~ N(0, 1), one per item, in catalog order.
pub fn ground_truth_strengths(n: usize, rng: &mut impl Rng) -> Vec<f64> {
    (0..n)
        .map(|_| {
            // Box-Muller
            let u1: f64 = rng.random::<f64>().max(1e-10);
            let u2: f64 = rng.random();
            let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
            2.0_f64.powf(z)
        })
        .collect()
}

/// Cast `votes` simulated votes. `strengths[i]` belongs to the i-th catalog item.
pub fn run_simulation<E: Rng>(
    engine: &mut RatingEngine<E>,
    strengths: &[f64],
    votes: usize,
    skip_rate: f64,
    rng: &mut impl Rng,
) -> Result<SimulationReport, EngineError> {
    let items = engine.items()?;
    assert_eq!(items.len(), strengths.len(), "one strength per item");
    let strength_by_id: HashMap<String, f64> = items
        .iter()
        .zip(strengths)
        .map(|(item, &s)| (item.id.clone(), s))
        .collect();

    let mut skips = 0;
    for _ in 0..votes {
        let (left, right) = engine.current_pair()?;
        let decision = if rng.random::<f64>() < skip_rate {
            skips += 1;
            Decision::NoPreference
        } else {
            let (sl, sr) = (strength_by_id[&left.id], strength_by_id[&right.id]);
            if rng.random::<f64>() < sl / (sl + sr) { Decision::Left } else { Decision::Right }
        };
        engine.record_choice((left.id.as_str(), right.id.as_str()), decision)?;
    }

    let leaderboard = engine.leaderboard(None)?;
    let observed: Vec<f64> = leaderboard.iter().map(|e| strength_by_id[&e.item.id]).collect();

    Ok(SimulationReport {
        votes,
        skips,
        spearman: spearman_against_order(&observed),
    })
}

/// Spearman correlation between leaderboard position and true rank.
///
/// `ordered_strengths` lists the true strengths in leaderboard order (best
/// first). A perfect ranking yields 1.0, a reversed one -1.0.
fn spearman_against_order(ordered_strengths: &[f64]) -> f64 {
    let n = ordered_strengths.len();
    if n < 2 {
        return 1.0;
    }

    // true_rank[p] = rank by strength of the item at leaderboard position p
    let mut by_strength: Vec<usize> = (0..n).collect();
    by_strength.sort_by(|&a, &b| {
        ordered_strengths[b].partial_cmp(&ordered_strengths[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut true_rank = vec![0usize; n];
    for (rank, &pos) in by_strength.iter().enumerate() {
        true_rank[pos] = rank;
    }

    let sum_d2: f64 = true_rank
        .iter()
        .enumerate()
        .map(|(pos, &rank)| {
            let d = pos as f64 - rank as f64;
            d * d
        })
        .sum();
    let n = n as f64;
    1.0 - 6.0 * sum_d2 / (n * (n * n - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use memerank_core::{EngineConfig, Item};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn engine(n: usize, seed: u64) -> RatingEngine<SmallRng> {
        let mut engine = RatingEngine::with_rng(EngineConfig::default(), SmallRng::seed_from_u64(seed));
        let items = (0..n).map(|i| Item::new(format!("m{i}"), format!("Meme {i}"))).collect();
        engine.initialize(items).unwrap();
        engine
    }

    #[test]
    fn test_spearman_extremes() {
        assert!((spearman_against_order(&[4.0, 3.0, 2.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((spearman_against_order(&[1.0, 2.0, 3.0, 4.0]) + 1.0).abs() < 1e-12);
        assert_eq!(spearman_against_order(&[1.0]), 1.0);
    }

    #[test]
    fn test_ground_truth_strengths_positive() {
        let mut rng = SmallRng::seed_from_u64(1);
        let strengths = ground_truth_strengths(50, &mut rng);
        assert_eq!(strengths.len(), 50);
        assert!(strengths.iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_simulation_recovers_order() {
        // Neighbours differ 4x in strength (~240 Elo points), so ratings should sort them.
        let strengths: Vec<f64> = (0..6).map(|i| 4f64.powi(i)).collect();
        let mut engine = engine(6, 2);
        let mut rng = SmallRng::seed_from_u64(3);

        let report = run_simulation(&mut engine, &strengths, 3000, 0.0, &mut rng).unwrap();
        assert_eq!(report.votes, 3000);
        assert_eq!(report.skips, 0);
        assert_eq!(engine.history().unwrap().len(), 3000);
        assert!(report.spearman > 0.8, "spearman {:.3}", report.spearman);

        let board = engine.leaderboard(Some(1)).unwrap();
        assert_eq!(board[0].item.id, "m5");
    }

    #[test]
    fn test_skip_rate_one_keeps_ratings() {
        let strengths = vec![1.0; 4];
        let mut engine = engine(4, 4);
        let mut rng = SmallRng::seed_from_u64(5);

        let report = run_simulation(&mut engine, &strengths, 40, 1.0, &mut rng).unwrap();
        assert_eq!(report.skips, 40);
        assert!(engine.leaderboard(None).unwrap().iter().all(|e| e.rating == 1000));
    }
}
