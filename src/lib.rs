//! Quest Chronicles
//!
//! A single-player text RPG engine: characters with class stats and
//! leveling, an inventory with weapon and armor slots, quests gated by
//! level and prerequisites, and turn-based battles. Characters persist as
//! flat `KEY: value` text files.

pub mod character;
pub mod combat;
pub mod config;
pub mod data;
pub mod error;
pub mod inventory;
pub mod quest;
pub mod store;

pub use character::{Character, CharacterClass, Stat};
pub use combat::{Battle, BattleResult, BattleState, Enemy, EnemyType, PlayerAction};
pub use config::GameConfig;
pub use data::{ItemDefinition, ItemRegistry, ItemType};
pub use error::{GameError, Result};
pub use inventory::{EquipSlot, INVENTORY_SIZE, Inventory};
pub use quest::{QuestDefinition, QuestLog, QuestRegistry};
pub use store::{CharacterStore, FileStore};
