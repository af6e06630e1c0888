/// Interactive voting loop.
///
/// Reads one command per line, forwards votes to the engine and the reward
/// tracker, and writes prompts and feedback to `out`. Generic over input and
/// output so the loop can be driven from tests.
use memerank_core::{Decision, Item, RatingEngine, RewardOutcome, RewardTracker};
use rand::Rng;
use std::io::{self, BufRead, Write};

use crate::output;

/// Number of leaderboard rows shown by the `b` command.
const BOARD_PREVIEW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Vote(Decision),
    Board,
    Skip,
    Reset,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "l" | "left" | "1" => Some(Command::Vote(Decision::Left)),
        "r" | "right" | "2" => Some(Command::Vote(Decision::Right)),
        "n" | "neither" | "0" => Some(Command::Vote(Decision::NoPreference)),
        "b" | "board" => Some(Command::Board),
        "s" | "skip" => Some(Command::Skip),
        "reset" => Some(Command::Reset),
        "h" | "help" | "?" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

const HELP: &str = "\
  l = left wins   r = right wins   n = neither / can't decide
  s = skip pair   b = leaderboard  reset = start over   q = quit";

pub struct SessionStats {
    pub rewards: RewardTracker,
}

pub fn run_session<R: Rng>(
    engine: &mut RatingEngine<R>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<SessionStats> {
    let mut rewards = RewardTracker::new();
    let mut lines = input.lines();

    writeln!(out, "{HELP}")?;

    loop {
        let (left, right) = engine.current_pair().map_err(to_io)?;
        let round = engine.round().map_err(to_io)?;
        write_pair(&mut out, round, &left, &right)?;

        let Some(line) = lines.next() else { break };
        let line = line?;

        let command = match parse_command(&line) {
            Some(c) => c,
            None => {
                writeln!(out, "Unknown command \"{}\"", line.trim())?;
                writeln!(out, "{HELP}")?;
                continue;
            }
        };

        match command {
            Command::Vote(decision) => {
                let outcome = engine
                    .record_choice((left.id.as_str(), right.id.as_str()), decision)
                    .map_err(to_io)?;
                if let Some(change) = &outcome.rating_change {
                    writeln!(
                        out,
                        "  {} {} -> {} | {} {} -> {}",
                        change.winner, change.winner_before, change.winner_after,
                        change.loser, change.loser_before, change.loser_after,
                    )?;
                }
                write_reward(&mut out, &rewards.record(decision))?;
            }
            Command::Skip => {
                engine.select_next_pair().map_err(to_io)?;
            }
            Command::Board => {
                let board = engine.leaderboard(Some(BOARD_PREVIEW)).map_err(to_io)?;
                write!(out, "{}", output::render_table(&board))?;
            }
            Command::Reset => {
                engine.reset().map_err(to_io)?;
                rewards = RewardTracker::new();
                writeln!(out, "Session reset. All ratings back to start.")?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    Ok(SessionStats { rewards })
}

fn write_pair(out: &mut impl Write, round: usize, left: &Item, right: &Item) -> io::Result<()> {
    writeln!(out, "\nRound {round}")?;
    writeln!(out, "  [l] {}", left.title)?;
    writeln!(out, "  [r] {}", right.title)?;
    write!(out, "> ")?;
    out.flush()
}

fn write_reward(out: &mut impl Write, reward: &RewardOutcome) -> io::Result<()> {
    writeln!(out, "  +{} points, +{} XP", reward.points, reward.xp)?;
    if let Some(level) = reward.level_up {
        writeln!(out, "  Level up! You reached level {level}")?;
    }
    for achievement in &reward.unlocked {
        writeln!(out, "  Achievement unlocked: {}", achievement.name())?;
    }
    Ok(())
}

fn to_io(e: memerank_core::EngineError) -> io::Error {
    io::Error::other(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memerank_core::EngineConfig;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn engine(n: usize) -> RatingEngine<SmallRng> {
        let mut engine = RatingEngine::with_rng(EngineConfig::default(), SmallRng::seed_from_u64(1));
        let items = (0..n).map(|i| Item::new(format!("{i}"), format!("Meme {i}"))).collect();
        engine.initialize(items).unwrap();
        engine
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("l"), Some(Command::Vote(Decision::Left)));
        assert_eq!(parse_command("  RIGHT "), Some(Command::Vote(Decision::Right)));
        assert_eq!(parse_command("n"), Some(Command::Vote(Decision::NoPreference)));
        assert_eq!(parse_command("b"), Some(Command::Board));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("maybe"), None);
    }

    #[test]
    fn test_scripted_session() {
        let mut engine = engine(4);
        let input = "l\nr\nn\nwhat\nb\ns\nq\nl\n";
        let mut out = Vec::new();

        let stats = run_session(&mut engine, input.as_bytes(), &mut out).unwrap();

        // Three votes; the unknown command, board and skip record nothing,
        // and nothing after quit is read.
        assert_eq!(engine.history().unwrap().len(), 3);
        assert_eq!(stats.rewards.votes(), 3);
        assert_eq!(engine.round().unwrap(), 4);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Round 1"));
        assert!(text.contains("Unknown command \"what\""));
        assert!(text.contains("Achievement unlocked: First Vote!"));
    }

    #[test]
    fn test_session_ends_on_eof() {
        let mut engine = engine(3);
        let stats = run_session(&mut engine, "l\nl\n".as_bytes(), io::sink()).unwrap();
        assert_eq!(engine.history().unwrap().len(), 2);
        assert_eq!(stats.rewards.streak(), 2);
    }

    #[test]
    fn test_reset_command_clears_session() {
        let mut engine = engine(3);
        let stats = run_session(&mut engine, "l\nr\nreset\n".as_bytes(), io::sink()).unwrap();
        assert!(engine.history().unwrap().is_empty());
        assert_eq!(stats.rewards.votes(), 0);
        for entry in engine.leaderboard(None).unwrap() {
            assert_eq!(entry.rating, 1000);
        }
    }
}
