// FILE: src/config.rs | version: 2026-10-18.rc1
//
// CLI configuration (JSON). Every field is optional; absent fields fall back
// to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::round::{MAX_PLAYERS, MIN_PLAYERS};

pub const DEFAULT_LEDGER_PATH: &str = "game_results.txt";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub ledger_path: Option<String>,
    pub player_names: Option<Vec<String>>,
    pub max_players: Option<usize>,
    pub log_level: Option<String>,
    // simulate only; omitted = predefined deal
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub ledger_path: PathBuf,
    pub player_names: Vec<String>,
    pub max_players: usize,
    pub log_level: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            player_names: (0..MAX_PLAYERS).map(default_name).collect(),
            max_players: MAX_PLAYERS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let txt = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Config::from_json(&txt)
    }

    pub fn from_json(txt: &str) -> Result<Config, ConfigError> {
        let raw: FileConfig = serde_json::from_str(txt)?;
        Config::resolve(raw)
    }

    fn resolve(raw: FileConfig) -> Result<Config, ConfigError> {
        let max_players = raw.max_players.unwrap_or(MAX_PLAYERS);
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
            return Err(ConfigError::Invalid(format!(
                "max_players must be {MIN_PLAYERS}..={MAX_PLAYERS} (got {max_players})"
            )));
        }

        let mut names: Vec<String> = raw
            .player_names
            .unwrap_or_default()
            .into_iter()
            .map(|n| n.trim().to_string())
            .collect();
        names.resize_with(max_players, String::new);
        for (i, n) in names.iter_mut().enumerate() {
            if n.is_empty() {
                *n = default_name(i);
            }
        }
        if let Some(dup) = names.iter().enumerate().find_map(|(i, n)| names[..i].contains(n).then_some(n)) {
            return Err(ConfigError::Invalid(format!("player name {dup:?} is used twice")));
        }

        Ok(Config {
            ledger_path: PathBuf::from(raw.ledger_path.unwrap_or_else(|| DEFAULT_LEDGER_PATH.to_string())),
            player_names: names,
            max_players,
            log_level: raw.log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            seed: raw.seed,
        })
    }
}

pub fn default_name(i: usize) -> String {
    format!("Player {}", i + 1)
}
