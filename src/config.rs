//! Game configuration
//!
//! Read from a TOML file. Every key is optional; a missing file means the
//! defaults.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{GameError, Result};

pub const DEFAULT_LOG_FILTER: &str = "quest_chronicles=info";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the quest and item files
    pub data_dir: PathBuf,
    pub save_dir: PathBuf,
    /// Relative to `data_dir`
    pub quests_file: PathBuf,
    /// Relative to `data_dir`
    pub items_file: PathBuf,
    /// Fixed seed for reproducible combat; entropy when unset
    pub rng_seed: Option<u64>,
    pub log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_dir: PathBuf::from("data/save_games"),
            quests_file: PathBuf::from("quests.txt"),
            items_file: PathBuf::from("items.txt"),
            rng_seed: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl GameConfig {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| GameError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        let config = Self::from_toml(&content)
            .map_err(|e| GameError::Config(format!("Failed to parse {:?}: {}", path, e)))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn quests_path(&self) -> PathBuf {
        self.data_dir.join(&self.quests_file)
    }

    pub fn items_path(&self) -> PathBuf {
        self.data_dir.join(&self.items_file)
    }

    /// The shared random source for combat
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
