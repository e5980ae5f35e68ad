//! Game Errors
//!
//! Every failure the engine reports to its caller. None of these are bugs:
//! callers catch them and decide whether to re-prompt or give up.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    // Character
    #[error("Invalid character class: {0}")]
    InvalidClass(String),

    #[error("Character is dead: {0}")]
    CharacterDead(String),

    // Save files
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    #[error("Save file corrupted: {0}")]
    SaveCorrupted(String),

    #[error("Invalid save data: {0}")]
    InvalidSaveData(String),

    // Inventory
    #[error("Inventory full: {0}")]
    InventoryFull(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Invalid item type: {0}")]
    InvalidItemType(String),

    #[error("Insufficient resources: {0}")]
    InsufficientResources(String),

    // Quests
    #[error("Quest not found: {0}")]
    QuestNotFound(String),

    #[error("Quest already completed: {0}")]
    QuestAlreadyCompleted(String),

    #[error("Quest not active: {0}")]
    QuestNotActive(String),

    #[error("Quest requirements not met: {0}")]
    QuestRequirementsNotMet(String),

    #[error("Insufficient level: {0}")]
    InsufficientLevel(String),

    // Combat
    #[error("Combat not active: {0}")]
    CombatNotActive(String),

    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    // Game data files
    #[error("Missing data file: {0}")]
    MissingDataFile(String),

    #[error("Invalid data format: {0}")]
    InvalidDataFormat(String),

    #[error("Corrupted data: {0}")]
    CorruptedData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
