mod catalog;
mod config;
mod output;
mod session;
mod simulate;

use clap::Parser;
use memerank_core::{EngineConfig, Item, RatingEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::MemerankConfig;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "memerank", version, about = "Rank memes by voting on pairs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Vote on pairs interactively, then print the leaderboard
    Compare(CompareArgs),
    /// Run an automated voting session against hidden ground-truth strengths
    Simulate(SimulateArgs),
    /// Create a default config file at ~/.config/memerank/config.toml
    Init,
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Catalog file: JSON array of items or strings, or one title per line.
    /// Defaults to the built-in demo memes.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Show only the top N leaderboard entries
    #[arg(long)]
    top: Option<usize>,

    /// Elo K-factor (maximum swing per vote)
    #[arg(long)]
    k_factor: Option<f64>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: ~/.config/memerank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct CompareArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Seed the pair shuffler for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser)]
struct SimulateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Number of simulated votes
    #[arg(long, default_value_t = 500)]
    votes: usize,

    /// RNG seed for pairing, ground truth and votes
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Fraction of votes cast as "no preference" (0.0 to 1.0)
    #[arg(long, default_value_t = 0.0)]
    skip_rate: f64,
}

fn init_logging(verbose: bool) {
    let default_directives = if verbose { "warn,memerank_core=debug,memerank=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(verbose)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare(args) => run_compare(args),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default catalog, K-factor, etc.");
        }
    }
}

/// Settings resolved from CLI args, then config file, then built-in defaults.
struct Resolved {
    items: Vec<Item>,
    engine_config: EngineConfig,
    top: Option<usize>,
}

fn resolve(common: &CommonArgs) -> Resolved {
    init_logging(common.verbose);

    let config_path = common.config.clone().unwrap_or_else(config::config_path);
    let cfg: MemerankConfig = config::load_config(&config_path);

    let mut engine_config = cfg.engine_config();
    if let Some(k) = common.k_factor {
        engine_config.k_factor = k;
    }
    if !(engine_config.k_factor > 0.0) {
        bail("--k-factor must be greater than 0");
    }

    let catalog_path = common.catalog.clone().or_else(|| cfg.catalog.clone().map(PathBuf::from));
    let items = catalog::load_catalog(catalog_path.as_deref());
    debug!(
        config = %config_path.display(),
        catalog = ?catalog_path,
        items = items.len(),
        k_factor = engine_config.k_factor,
        "resolved settings"
    );

    Resolved {
        items,
        engine_config,
        top: common.top.or(cfg.top),
    }
}

fn run_compare(args: CompareArgs) {
    let resolved = resolve(&args.common);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut engine = RatingEngine::with_rng(resolved.engine_config, rng);
    engine.initialize(resolved.items).unwrap_or_else(|e| bail(e));

    let stdin = io::stdin();
    let stats = session::run_session(&mut engine, stdin.lock(), io::stderr())
        .unwrap_or_else(|e| bail(format!("Terminal IO failed: {e}")));

    let leaderboard = engine.leaderboard(resolved.top).unwrap_or_else(|e| bail(e));
    let total_votes = engine.history().map(|h| h.len()).unwrap_or(0);

    if args.common.json {
        output::print_json(&leaderboard, total_votes, Some(&stats.rewards));
    } else {
        output::print_table(&leaderboard, total_votes);
        output::print_rewards(&stats.rewards);
    }
}

fn run_simulate(args: SimulateArgs) {
    if !(0.0..=1.0).contains(&args.skip_rate) {
        bail(format!("--skip-rate must be between 0.0 and 1.0, got {}", args.skip_rate));
    }
    let resolved = resolve(&args.common);
    let num_items = resolved.items.len();

    let mut engine = RatingEngine::with_rng(resolved.engine_config, StdRng::seed_from_u64(args.seed));
    engine.initialize(resolved.items).unwrap_or_else(|e| bail(e));

    let mut vote_rng = StdRng::seed_from_u64(args.seed.wrapping_add(1));
    let strengths = simulate::ground_truth_strengths(num_items, &mut vote_rng);

    if args.common.verbose {
        eprintln!("Simulating {} votes over {} items (seed {})", args.votes, num_items, args.seed);
    }

    let report = simulate::run_simulation(&mut engine, &strengths, args.votes, args.skip_rate, &mut vote_rng)
        .unwrap_or_else(|e| bail(e));

    let leaderboard = engine.leaderboard(resolved.top).unwrap_or_else(|e| bail(e));

    if args.common.json {
        output::print_json(&leaderboard, report.votes, None);
    } else {
        output::print_table(&leaderboard, report.votes);
        println!(
            "Skipped: {} | Rank agreement with ground truth (Spearman): {:.3}",
            report.skips, report.spearman,
        );
    }
}
