/// Rating assigned to every item when a session starts.
pub const INITIAL_RATING: i64 = 1000;

/// Maximum rating swing per decisive comparison.
pub const K_FACTOR: f64 = 32.0;

/// Elo scale: a rating gap of this size means 10:1 expected odds.
pub const ELO_SCALE: f64 = 400.0;

/// How many of the most recent history entries count as "recently seen"
/// when picking the next pair.
pub const RECENT_PAIR_WINDOW: usize = 5;

/// Upper bound on random draws per pair selection.
///
/// Small catalogs can make the recent-pair exclusion unsatisfiable (two items
/// only ever form one pair). After this many draws the last drawn pair is
/// accepted even if it was shown recently.
pub const MAX_PAIR_ATTEMPTS: usize = 20;
