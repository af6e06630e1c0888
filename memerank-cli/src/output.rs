/// Output formatting: terminal table and JSON.
use memerank_core::{Achievement, LeaderboardEntry, RewardTracker};
use serde::Serialize;
use std::fmt::Write;

use crate::bail;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    id: &'a str,
    title: &'a str,
    rating: i64,
}

#[derive(Serialize)]
struct JsonRewards<'a> {
    points: u64,
    level: u32,
    votes: u64,
    achievements: &'a [Achievement],
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    total_votes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    rewards: Option<JsonRewards<'a>>,
}

/// Render the leaderboard as a fixed-width table.
pub fn render_table(entries: &[LeaderboardEntry]) -> String {
    // Widest title for padding, at least "Meme"
    let title_width = entries.iter()
        .map(|e| e.item.title.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut s = String::new();
    let _ = writeln!(s, " # | {:<title_width$} | Rating", "Meme");
    let _ = writeln!(s, "---|-{}-|-------", "-".repeat(title_width));
    for e in entries {
        let _ = writeln!(s, "{:>2} | {:<title_width$} | {:>6}", e.rank, e.item.title, e.rating);
    }
    s
}

/// Print results as a formatted terminal table.
pub fn print_table(entries: &[LeaderboardEntry], total_votes: usize) {
    print!("{}", render_table(entries));
    println!("\n{} memes shown, {} votes cast", entries.len(), total_votes);
}

pub fn print_rewards(rewards: &RewardTracker) {
    println!(
        "Level {} | {} points | {}/{} XP",
        rewards.level(), rewards.points(), rewards.xp(), rewards.xp_to_next_level(),
    );
    if !rewards.achievements().is_empty() {
        let names: Vec<&str> = rewards.achievements().iter().map(|a| a.name()).collect();
        println!("Achievements: {}", names.join(", "));
    }
}

pub fn render_json(entries: &[LeaderboardEntry], total_votes: usize, rewards: Option<&RewardTracker>) -> String {
    let items = entries
        .iter()
        .map(|e| JsonRankedItem {
            rank: e.rank,
            id: &e.item.id,
            title: &e.item.title,
            rating: e.rating,
        })
        .collect();

    let output = JsonOutput {
        items,
        total_votes,
        rewards: rewards.map(|r| JsonRewards {
            points: r.points(),
            level: r.level(),
            votes: r.votes(),
            achievements: r.achievements(),
        }),
    };

    serde_json::to_string_pretty(&output)
        .unwrap_or_else(|e| bail(format!("Failed to serialize results: {e}")))
}

/// Print results as JSON.
pub fn print_json(entries: &[LeaderboardEntry], total_votes: usize, rewards: Option<&RewardTracker>) {
    println!("{}", render_json(entries, total_votes, rewards));
}
