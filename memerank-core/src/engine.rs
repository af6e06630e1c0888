/// Rating engine: owns the rating table, history log and current pair.
///
/// Pure in-memory state machine: no IO, no threads. The caller shows pairs
/// to a user and feeds decisions back through `record_choice()`.
///
/// Items are identified by caller-provided string IDs. Internally everything
/// is indexed by catalog position.
use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::constants::{INITIAL_RATING, K_FACTOR, MAX_PAIR_ATTEMPTS, RECENT_PAIR_WINDOW};
use crate::elo::update_ratings;
use crate::error::{EngineError, Result};
use crate::leaderboard::build_leaderboard;
use crate::pairing::{normalize, recent_pairs, select_pair_indexed};
use crate::types::{
    ChoiceOutcome, ComparisonEvent, Decision, IdMap, IndexedPair, Item, LeaderboardEntry,
    RatingChange,
};

/// Tunables for the rating engine. `Default` gives the standard Elo setup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub initial_rating: i64,
    pub k_factor: f64,
    /// Number of trailing history entries whose pairs are avoided.
    pub recent_pair_window: usize,
    /// Draw cap for pair selection before accepting a recent pair.
    pub max_pair_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            initial_rating: INITIAL_RATING,
            k_factor: K_FACTOR,
            recent_pair_window: RECENT_PAIR_WINDOW,
            max_pair_attempts: MAX_PAIR_ATTEMPTS,
        }
    }
}

/// State of one comparison session. Created by `initialize()`, dropped on reset.
struct Session {
    /// Catalog order. Leaderboard ties fall back to this order.
    items: Vec<Item>,
    id_map: IdMap,
    /// `ratings[i]` belongs to `items[i]`.
    ratings: Vec<i64>,
    history: Vec<ComparisonEvent>,
    current_pair: IndexedPair,
    round: usize,
}

impl Session {
    fn pair_items(&self, (left, right): IndexedPair) -> (Item, Item) {
        (self.items[left].clone(), self.items[right].clone())
    }

    /// Replace both ratings in one step.
    fn apply_result(&mut self, winner: usize, loser: usize, k_factor: f64) -> RatingChange {
        let winner_before = self.ratings[winner];
        let loser_before = self.ratings[loser];
        let (winner_after, loser_after) = update_ratings(winner_before, loser_before, k_factor);
        self.ratings[winner] = winner_after;
        self.ratings[loser] = loser_after;

        debug!(
            winner = %self.items[winner].id,
            loser = %self.items[loser].id,
            winner_before, winner_after, loser_before, loser_after,
            "ratings updated"
        );

        RatingChange {
            winner: self.items[winner].id.clone(),
            loser: self.items[loser].id.clone(),
            winner_before,
            winner_after,
            loser_before,
            loser_after,
        }
    }
}

/// Pairwise comparison engine with Elo ratings.
///
/// Two states: uninitialized (no catalog, every operation but `initialize`
/// fails with `NotReady`) and ready. Generic over the random source so tests
/// can inject a seeded RNG.
pub struct RatingEngine<R = StdRng> {
    config: EngineConfig,
    rng: R,
    session: Option<Session>,
}

impl RatingEngine<StdRng> {
    /// Engine seeded from the OS.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }
}

impl<R: Rng> RatingEngine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        RatingEngine { config, rng, session: None }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// Start a new session over `items`, discarding any previous one.
    ///
    /// Shuffles presentation order, rates every item at the initial rating,
    /// clears history and shows the first two shuffled items. On error the
    /// engine is left as it was.
    pub fn initialize(&mut self, items: Vec<Item>) -> Result<()> {
        if items.len() < 2 {
            return Err(EngineError::InsufficientItems { found: items.len() });
        }
        let id_map = IdMap::from_items(&items)?;

        let mut order: Vec<usize> = (0..items.len()).collect();
        order.shuffle(&mut self.rng);
        let current_pair = (order[0], order[1]);

        debug!(
            items = items.len(),
            left = %items[current_pair.0].id,
            right = %items[current_pair.1].id,
            "session started"
        );

        self.session = Some(Session {
            ratings: vec![self.config.initial_rating; items.len()],
            items,
            id_map,
            history: Vec::new(),
            current_pair,
            round: 1,
        });
        Ok(())
    }

    /// Restart the session over the same catalog with a fresh shuffle.
    pub fn reset(&mut self) -> Result<()> {
        let items = self.session.take().ok_or(EngineError::NotReady)?.items;
        self.initialize(items)
    }

    /// Pick a new pair to display, avoiding recently compared pairs.
    ///
    /// The result becomes the current pair. Does not advance the round.
    pub fn select_next_pair(&mut self) -> Result<(Item, Item)> {
        let session = self.session.as_mut().ok_or(EngineError::NotReady)?;
        let pair = select_next(session, &self.config, &mut self.rng);
        Ok(session.pair_items(pair))
    }

    /// Record the user's decision on `pair` (left ID, right ID).
    ///
    /// Appends to history, updates both ratings if one side won, advances the
    /// round and selects the next pair. Both IDs are validated before any
    /// state changes.
    pub fn record_choice(&mut self, pair: (&str, &str), decision: Decision) -> Result<ChoiceOutcome> {
        let session = self.session.as_mut().ok_or(EngineError::NotReady)?;
        let (left_id, right_id) = pair;
        let left = session.id_map.to_idx(left_id)?;
        let right = session.id_map.to_idx(right_id)?;
        if left == right {
            return Err(EngineError::SelfComparison(left_id.to_string()));
        }

        session.history.push(ComparisonEvent {
            left: left_id.to_string(),
            right: right_id.to_string(),
            decision,
        });

        let rating_change = match decision {
            Decision::Left => Some(session.apply_result(left, right, self.config.k_factor)),
            Decision::Right => Some(session.apply_result(right, left, self.config.k_factor)),
            Decision::NoPreference => None,
        };

        session.round += 1;
        let next = select_next(session, &self.config, &mut self.rng);

        Ok(ChoiceOutcome {
            rating_change,
            next_pair: session.pair_items(next),
            round: session.round,
        })
    }

    /// Items by rating, highest first. Ties keep catalog order.
    pub fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>> {
        let session = self.session()?;
        Ok(build_leaderboard(&session.items, &session.ratings, limit))
    }

    pub fn rating(&self, item_id: &str) -> Result<i64> {
        let session = self.session()?;
        let idx = session.id_map.to_idx(item_id)?;
        Ok(session.ratings[idx])
    }

    pub fn current_pair(&self) -> Result<(Item, Item)> {
        let session = self.session()?;
        Ok(session.pair_items(session.current_pair))
    }

    /// Session history, oldest first.
    pub fn history(&self) -> Result<&[ComparisonEvent]> {
        Ok(&self.session()?.history)
    }

    /// Current round number, starting at 1.
    pub fn round(&self) -> Result<usize> {
        Ok(self.session()?.round)
    }

    /// Catalog in load order.
    pub fn items(&self) -> Result<&[Item]> {
        Ok(&self.session()?.items)
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(EngineError::NotReady)
    }
}

fn select_next(session: &mut Session, config: &EngineConfig, rng: &mut impl Rng) -> IndexedPair {
    // History only ever holds validated IDs, so every lookup succeeds.
    let excluded: HashSet<IndexedPair> = recent_pairs(&session.history, config.recent_pair_window)
        .iter()
        .filter_map(|(a, b)| {
            let a = session.id_map.to_idx(a).ok()?;
            let b = session.id_map.to_idx(b).ok()?;
            Some(normalize((a, b)))
        })
        .collect();

    let selection = select_pair_indexed(session.items.len(), &excluded, config.max_pair_attempts, rng);
    debug!(
        left = %session.items[selection.pair.0].id,
        right = %session.items[selection.pair.1].id,
        attempts = selection.attempts,
        exhausted = selection.exhausted,
        "selected next pair"
    );

    session.current_pair = selection.pair;
    selection.pair
}
