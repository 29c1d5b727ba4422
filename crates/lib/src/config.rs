//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.casino/config.json`) and environment.
//! Every field has a default, so a missing file or an empty object is a valid config.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::betting::{self, BetRules};
use crate::loading;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Stake, payout, starting balance and RNG seed.
    #[serde(default)]
    pub game: GameConfig,

    /// Loading animation timing.
    #[serde(default)]
    pub loading: LoadingConfig,

    /// Desktop-only settings.
    #[serde(default)]
    pub desktop: DesktopConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Amount deducted per bet (default 100).
    #[serde(default = "default_stake")]
    pub stake: u64,

    /// Gross amount credited on a win (default 200).
    #[serde(default = "default_payout")]
    pub payout: u64,

    /// Balance of the local player when an app starts (default 1000).
    #[serde(default = "default_starting_credits")]
    pub starting_credits: u64,

    /// Fixed RNG seed. Overridden by CASINO_SEED env. Unset = seeded from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingConfig {
    /// Milliseconds between progress steps (default 30).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Progress value at which the dialog finishes (default 100).
    #[serde(default = "default_max_progress")]
    pub max_progress: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesktopConfig {
    /// TTF/OTF font with CJK glyphs; egui's bundled fonts cannot render the Chinese labels.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

fn default_stake() -> u64 {
    betting::STAKE
}

fn default_payout() -> u64 {
    betting::PAYOUT_ON_WIN
}

fn default_starting_credits() -> u64 {
    1000
}

fn default_tick_ms() -> u64 {
    loading::TICK_MS
}

fn default_max_progress() -> u32 {
    loading::MAX_PROGRESS
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stake: default_stake(),
            payout: default_payout(),
            starting_credits: default_starting_credits(),
            seed: None,
        }
    }
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            max_progress: default_max_progress(),
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> Result<BetRules> {
        BetRules::new(self.stake, self.payout).context("invalid game.stake / game.payout")
    }
}

impl LoadingConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Resolve the RNG seed: env CASINO_SEED overrides config. An unparsable env value is
/// ignored with a warning.
pub fn resolve_seed(config: &Config) -> Option<u64> {
    std::env::var("CASINO_SEED")
        .ok()
        .and_then(|s| {
            let t = s.trim();
            if t.is_empty() {
                return None;
            }
            match t.parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    log::warn!("ignoring CASINO_SEED={:?}: {}", t, e);
                    None
                }
            }
        })
        .or(config.game.seed)
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("CASINO_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".casino").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, or the default path (or CASINO_CONFIG_PATH).
/// Missing file => default config. Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
