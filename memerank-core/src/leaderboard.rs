/// Leaderboard view: items ordered by rating.
///
/// Pure function, recomputed on demand. Never cached by the engine.
use crate::types::{Item, LeaderboardEntry};

/// Rank `items` by `ratings` (same order, same length), highest first.
///
/// Ties keep the order in which items appear in `items`: the sort is stable.
/// `limit` keeps only the top entries; `None` returns all of them.
pub fn build_leaderboard(items: &[Item], ratings: &[i64], limit: Option<usize>) -> Vec<LeaderboardEntry> {
    assert_eq!(items.len(), ratings.len(), "every item needs exactly one rating");

    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| ratings[b].cmp(&ratings[a]));

    let take = limit.unwrap_or(order.len());
    order
        .into_iter()
        .take(take)
        .enumerate()
        .map(|(pos, idx)| LeaderboardEntry {
            rank: pos + 1,
            item: items[idx].clone(),
            rating: ratings[idx],
        })
        .collect()
}
