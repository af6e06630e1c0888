/// Next-pair selection with recent-pair avoidance.
///
/// Public functions work with item IDs. Internal selection uses `usize`
/// indices into the catalog.
use std::collections::HashSet;

use rand::Rng;
use tracing::trace;

use crate::types::{ComparisonEvent, IndexedPair};

/// Unordered ID pairs from the last `window` history entries.
///
/// Each pair is normalized so the lexicographically smaller ID comes first;
/// (a, b) and (b, a) map to the same key.
pub fn recent_pairs(history: &[ComparisonEvent], window: usize) -> HashSet<(String, String)> {
    let start = history.len().saturating_sub(window);
    history[start..]
        .iter()
        .map(|e| unordered(&e.left, &e.right))
        .collect()
}

fn unordered(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Outcome of one selection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PairSelection {
    /// (left, right) indices, always distinct.
    pub pair: IndexedPair,
    /// Number of draws made.
    pub attempts: usize,
    /// True if the attempt cap was reached without finding a non-recent pair.
    pub exhausted: bool,
}

/// Draw random (left, right) pairs until one is not in `excluded`, giving up
/// after `max_attempts` draws and returning the last draw.
///
/// `excluded` holds normalized index pairs (smaller index first). Each draw
/// picks two distinct items uniformly, so the result never pairs an item
/// with itself. Requires `num_items >= 2`.
pub(crate) fn select_pair_indexed(
    num_items: usize,
    excluded: &HashSet<IndexedPair>,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> PairSelection {
    debug_assert!(num_items >= 2, "pair selection needs at least two items");

    let max_attempts = max_attempts.max(1);
    let mut pair = draw_distinct(num_items, rng);
    let mut attempts = 1;

    while excluded.contains(&normalize(pair)) {
        if attempts >= max_attempts {
            return PairSelection { pair, attempts, exhausted: true };
        }
        trace!(left = pair.0, right = pair.1, attempts, "rejected recent pair");
        pair = draw_distinct(num_items, rng);
        attempts += 1;
    }

    PairSelection { pair, attempts, exhausted: false }
}

fn draw_distinct(num_items: usize, rng: &mut impl Rng) -> IndexedPair {
    let left = rng.random_range(0..num_items);
    // Sample from the remaining n-1 slots and skip over `left`.
    let mut right = rng.random_range(0..num_items - 1);
    if right >= left {
        right += 1;
    }
    (left, right)
}

pub(crate) fn normalize((a, b): IndexedPair) -> IndexedPair {
    if a <= b { (a, b) } else { (b, a) }
}
