/// Config file loading and creation for memerank CLI.
///
/// Config lives at ~/.config/memerank/config.toml.
/// All fields are optional. CLI args override config values.
use memerank_core::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MemerankConfig {
    pub catalog: Option<String>,
    pub top: Option<usize>,
    pub initial_rating: Option<i64>,
    pub k_factor: Option<f64>,
    pub recent_pair_window: Option<usize>,
    pub max_pair_attempts: Option<usize>,
}

impl MemerankConfig {
    /// Engine settings with config values layered over the defaults.
    pub fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            initial_rating: self.initial_rating.unwrap_or(defaults.initial_rating),
            k_factor: self.k_factor.unwrap_or(defaults.k_factor),
            recent_pair_window: self.recent_pair_window.unwrap_or(defaults.recent_pair_window),
            max_pair_attempts: self.max_pair_attempts.unwrap_or(defaults.max_pair_attempts),
        }
    }
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# memerank configuration
# All values here can be overridden by CLI flags.

# Catalog file: JSON array of items/strings, or one title per line.
# Leave unset to use the built-in demo memes.
# catalog = \"/path/to/memes.json\"

# Leaderboard rows to print (unset = all)
# top = 10

# Rating every meme starts a session with
# initial_rating = 1000

# Elo K-factor: maximum rating swing per vote
# k_factor = 32.0

# How many recent votes to look back at when avoiding repeat pairs
# recent_pair_window = 5

# Random draws per pair pick before a recent pair is allowed again
# max_pair_attempts = 20
";

/// Returns the default config path: ~/.config/memerank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("memerank").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<MemerankConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> MemerankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            parse_config(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemerankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
