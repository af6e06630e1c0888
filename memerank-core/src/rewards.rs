/// Session rewards for voting: points, XP, levels, streaks and achievements.
///
/// Purely presentational. The tracker only sees `Decision`s and never touches
/// the rating engine; a front-end feeds it the same decisions it forwards to
/// `RatingEngine::record_choice()`.
use tracing::debug;

use crate::types::Decision;

const DECISIVE_POINTS: f64 = 10.0;
const DECISIVE_XP: f64 = 5.0;
const SKIP_POINTS: f64 = 2.0;
const SKIP_XP: f64 = 1.0;

/// Streak length step at which the combo multiplier grows.
const COMBO_STEP: u32 = 3;
const COMBO_INCREMENT: f64 = 0.5;
const MAX_COMBO: f64 = 5.0;
const COMBO_BONUS_POINTS: f64 = 15.0;
const COMBO_BONUS_XP: f64 = 10.0;

/// Streak length step that pays a streak bonus.
const STREAK_BONUS_STEP: u32 = 5;
const STREAK_BONUS_POINTS: f64 = 25.0;
const STREAK_BONUS_XP: f64 = 15.0;

const FIRST_LEVEL_XP: u64 = 100;
const LEVEL_XP_GROWTH: f64 = 1.5;
const LEVEL_UP_POINTS: u64 = 100;

/// Unlockable milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Achievement {
    FirstVote,
    Streak5,
    Streak10,
    Vote25,
    Vote50,
    Vote100,
}

impl Achievement {
    pub const ALL: [Achievement; 6] = [
        Achievement::FirstVote,
        Achievement::Streak5,
        Achievement::Streak10,
        Achievement::Vote25,
        Achievement::Vote50,
        Achievement::Vote100,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Achievement::FirstVote => "First Vote!",
            Achievement::Streak5 => "On Fire!",
            Achievement::Streak10 => "Unstoppable!",
            Achievement::Vote25 => "Opinion Leader",
            Achievement::Vote50 => "Meme Expert",
            Achievement::Vote100 => "Meme Legend",
        }
    }

    fn reached(self, votes: u64, streak: u32) -> bool {
        match self {
            Achievement::FirstVote => votes >= 1,
            Achievement::Streak5 => streak >= 5,
            Achievement::Streak10 => streak >= 10,
            Achievement::Vote25 => votes >= 25,
            Achievement::Vote50 => votes >= 50,
            Achievement::Vote100 => votes >= 100,
        }
    }
}

/// What one decision earned.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardOutcome {
    /// Points added, including streak and level-up bonuses.
    pub points: u64,
    pub xp: u64,
    /// New level if this decision levelled up.
    pub level_up: Option<u32>,
    /// Achievements unlocked by this decision, in `Achievement::ALL` order.
    pub unlocked: Vec<Achievement>,
}

/// Running reward state for one session.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RewardTracker {
    points: u64,
    level: u32,
    /// XP towards the next level.
    xp: u64,
    xp_to_next_level: u64,
    votes: u64,
    streak: u32,
    combo_multiplier: f64,
    last_decision: Option<Decision>,
    unlocked: Vec<Achievement>,
}

impl Default for RewardTracker {
    fn default() -> Self {
        RewardTracker {
            points: 0,
            level: 1,
            xp: 0,
            xp_to_next_level: FIRST_LEVEL_XP,
            votes: 0,
            streak: 0,
            combo_multiplier: 1.0,
            last_decision: None,
            unlocked: Vec::new(),
        }
    }
}

impl RewardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one decision.
    pub fn record(&mut self, decision: Decision) -> RewardOutcome {
        self.votes += 1;

        let (mut points, mut xp) = if decision.is_decisive() {
            (DECISIVE_POINTS * self.combo_multiplier, DECISIVE_XP * self.combo_multiplier)
        } else {
            (SKIP_POINTS, SKIP_XP)
        };

        if decision.is_decisive() && self.last_decision == Some(decision) {
            self.streak += 1;

            if self.streak % COMBO_STEP == 0 {
                self.combo_multiplier = (self.combo_multiplier + COMBO_INCREMENT).min(MAX_COMBO);
                points += COMBO_BONUS_POINTS * self.combo_multiplier;
                xp += COMBO_BONUS_XP;
            }
            if self.streak % STREAK_BONUS_STEP == 0 {
                points += STREAK_BONUS_POINTS * self.combo_multiplier;
                xp += STREAK_BONUS_XP;
            }
        } else if decision.is_decisive() {
            self.streak = 1;
            self.combo_multiplier = 1.0;
        } else {
            self.streak = 0;
            self.combo_multiplier = 1.0;
        }
        self.last_decision = Some(decision);

        let mut points = points.round() as u64;
        let xp = xp.round() as u64;

        self.xp += xp;
        let level_up = if self.xp >= self.xp_to_next_level {
            self.level += 1;
            self.xp -= self.xp_to_next_level;
            self.xp_to_next_level = (self.xp_to_next_level as f64 * LEVEL_XP_GROWTH).floor() as u64;
            points += LEVEL_UP_POINTS * u64::from(self.level);
            debug!(level = self.level, "level up");
            Some(self.level)
        } else {
            None
        };
        self.points += points;

        let unlocked: Vec<Achievement> = Achievement::ALL
            .into_iter()
            .filter(|a| !self.unlocked.contains(a) && a.reached(self.votes, self.streak))
            .collect();
        self.unlocked.extend(&unlocked);

        RewardOutcome { points, xp, level_up, unlocked }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_to_next_level
    }

    pub fn votes(&self) -> u64 {
        self.votes
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn combo_multiplier(&self) -> f64 {
        self.combo_multiplier
    }

    /// Unlocked achievements in unlock order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.unlocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_vote() {
        let mut tracker = RewardTracker::new();
        let outcome = tracker.record(Decision::Left);
        assert_eq!(outcome.points, 10);
        assert_eq!(outcome.xp, 5);
        assert_eq!(outcome.level_up, None);
        assert_eq!(outcome.unlocked, vec![Achievement::FirstVote]);
        assert_eq!(tracker.streak(), 1);
        assert_eq!(tracker.points(), 10);
    }

    #[test]
    fn test_no_preference_resets_streak() {
        let mut tracker = RewardTracker::new();
        tracker.record(Decision::Left);
        tracker.record(Decision::Left);
        assert_eq!(tracker.streak(), 2);

        let outcome = tracker.record(Decision::NoPreference);
        assert_eq!((outcome.points, outcome.xp), (2, 1));
        assert_eq!(tracker.streak(), 0);
        assert_eq!(tracker.combo_multiplier(), 1.0);
    }

    #[test]
    fn test_switching_sides_restarts_streak() {
        let mut tracker = RewardTracker::new();
        tracker.record(Decision::Left);
        tracker.record(Decision::Left);
        tracker.record(Decision::Right);
        assert_eq!(tracker.streak(), 1);
    }

    #[test]
    fn test_no_preference_never_builds_streak() {
        let mut tracker = RewardTracker::new();
        for _ in 0..4 {
            tracker.record(Decision::NoPreference);
        }
        assert_eq!(tracker.streak(), 0);
        assert_eq!(tracker.points(), 8);
    }

    #[test]
    fn test_combo_every_third_streak_step() {
        let mut tracker = RewardTracker::new();
        tracker.record(Decision::Right);
        tracker.record(Decision::Right);
        let third = tracker.record(Decision::Right);

        assert_eq!(tracker.streak(), 3);
        assert_eq!(tracker.combo_multiplier(), 1.5);
        // base 10 at x1, plus 15 * 1.5 combo bonus = 32.5 -> 33
        assert_eq!(third.points, 33);
        assert_eq!(third.xp, 15);

        // Fourth vote pays base at the new multiplier
        let fourth = tracker.record(Decision::Right);
        assert_eq!(fourth.points, 15);
    }

    #[test]
    fn test_streak_bonus_and_achievement_at_five() {
        let mut tracker = RewardTracker::new();
        let mut last = None;
        for _ in 0..5 {
            last = Some(tracker.record(Decision::Left));
        }
        let fifth = last.unwrap();
        // base 10 * 1.5, plus 25 * 1.5 streak bonus
        assert_eq!(fifth.points, 53);
        assert!(fifth.unlocked.contains(&Achievement::Streak5));
        assert_eq!(tracker.streak(), 5);
    }

    #[test]
    fn test_combo_multiplier_capped() {
        let mut tracker = RewardTracker::new();
        for _ in 0..60 {
            tracker.record(Decision::Left);
        }
        assert_eq!(tracker.combo_multiplier(), 5.0);
        assert!(tracker.achievements().contains(&Achievement::Streak10));
    }

    #[test]
    fn test_level_up() {
        let mut tracker = RewardTracker::new();
        let mut level_ups = Vec::new();
        // Alternate sides: 5 XP per vote, no streak bonuses.
        for i in 0..20 {
            let decision = if i % 2 == 0 { Decision::Left } else { Decision::Right };
            if let Some(level) = tracker.record(decision).level_up {
                level_ups.push((i, level));
            }
        }
        // 20 votes * 5 XP = 100 XP -> level 2 on the last vote
        assert_eq!(level_ups, vec![(19, 2)]);
        assert_eq!(tracker.level(), 2);
        assert_eq!(tracker.xp(), 0);
        assert_eq!(tracker.xp_to_next_level(), 150);
        // 20 * 10 base + 100 * 2 level bonus
        assert_eq!(tracker.points(), 400);
    }

    #[test]
    fn test_vote_count_achievements_unlock_once() {
        let mut tracker = RewardTracker::new();
        let mut unlocked = Vec::new();
        for _ in 0..100 {
            unlocked.extend(tracker.record(Decision::NoPreference).unlocked);
        }
        assert_eq!(
            unlocked,
            vec![
                Achievement::FirstVote,
                Achievement::Vote25,
                Achievement::Vote50,
                Achievement::Vote100,
            ]
        );
        assert_eq!(tracker.votes(), 100);
        assert_eq!(tracker.achievements().len(), 4);
    }

    #[test]
    fn test_achievement_names() {
        assert_eq!(Achievement::FirstVote.name(), "First Vote!");
        assert_eq!(Achievement::Vote100.name(), "Meme Legend");
    }
}
