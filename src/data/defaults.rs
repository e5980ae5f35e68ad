use std::path::Path;
use tracing::info;

use crate::config::GameConfig;
use crate::error::{GameError, Result};

const DEFAULT_QUESTS: &str = "\
QUEST_ID: intro
TITLE: Welcome Adventurer
DESCRIPTION: Your journey begins.
REWARD_XP: 50
REWARD_GOLD: 20
REQUIRED_LEVEL: 1
PREREQUISITE: NONE
";

const DEFAULT_ITEMS: &str = "\
ITEM_ID: basic_sword
NAME: Basic Sword
TYPE: weapon
EFFECT: strength:5
COST: 25
DESCRIPTION: A simple starter weapon.
";

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, content).map_err(|e| {
        GameError::CorruptedData(format!("Could not create {}: {}", path.display(), e))
    })?;
    info!("Created default data file {}", path.display());
    Ok(())
}

/// Create the data directory and starter quest/item files that don't exist yet
pub fn create_default_data_files(config: &GameConfig) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        GameError::CorruptedData(format!(
            "Could not create data directory {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;

    write_if_missing(&config.quests_path(), DEFAULT_QUESTS)?;
    write_if_missing(&config.items_path(), DEFAULT_ITEMS)?;
    Ok(())
}
