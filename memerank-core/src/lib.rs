/// memerank-core: Pairwise comparison rating engine.
///
/// Head-to-head votes → Elo ratings → leaderboard. No IO, no persistence:
/// all state lives in one `RatingEngine` per session.
///
/// Items are identified by caller-provided string IDs and carry display
/// metadata the engine never reads.
///
/// # Quick start
///
/// ```rust
/// use memerank_core::{Decision, EngineConfig, Item, RatingEngine};
///
/// let mut engine = RatingEngine::new(EngineConfig::default());
/// engine.initialize(vec![
///     Item::new("doge", "Doge"),
///     Item::new("grumpy", "Grumpy Cat"),
///     Item::new("nyan", "Nyan Cat"),
/// ])?;
///
/// let (left, right) = engine.current_pair()?;
/// let outcome = engine.record_choice((left.id.as_str(), right.id.as_str()), Decision::Left)?;
/// println!("next up: {} vs {}", outcome.next_pair.0.title, outcome.next_pair.1.title);
///
/// for entry in engine.leaderboard(Some(3))? {
///     println!("#{} {} ({})", entry.rank, entry.item.title, entry.rating);
/// }
/// # Ok::<(), memerank_core::EngineError>(())
/// ```

pub mod constants;
pub mod elo;
pub mod engine;
pub mod error;
pub mod leaderboard;
pub mod pairing;
pub mod rewards;
pub mod types;

// Re-export primary public API at crate root.
pub use elo::{expected_score, update_ratings};
pub use engine::{EngineConfig, RatingEngine};
pub use error::EngineError;
pub use leaderboard::build_leaderboard;
pub use pairing::recent_pairs;
pub use rewards::{Achievement, RewardOutcome, RewardTracker};
pub use types::{ChoiceOutcome, ComparisonEvent, Decision, Item, LeaderboardEntry, RatingChange};
