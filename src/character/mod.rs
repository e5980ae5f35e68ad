//! Character Model
//!
//! A character's stats, experience and leveling, gold, and life/death state.
//! Inventory, equipment, and quest operations extend `Character` from their
//! own modules.

pub mod class;
pub mod record;
pub mod stats;

pub use class::{BaseStats, CharacterClass};
pub use stats::Stat;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{GameError, Result};
use crate::inventory::{Equipment, Inventory};
use crate::quest::QuestLog;

pub const STARTING_LEVEL: i32 = 1;
pub const STARTING_GOLD: i32 = 100;

// Level-up bonuses
const LEVEL_UP_MAX_HEALTH: i32 = 10;
const LEVEL_UP_STRENGTH: i32 = 2;
const LEVEL_UP_MAGIC: i32 = 2;

/// Experience needed to advance from `level` to the next one
pub fn xp_threshold(level: i32) -> i32 {
    level.max(STARTING_LEVEL).saturating_mul(100)
}

/// A name is written on a single save line and used as the save file name,
/// so it must be non-empty, unpadded, and free of line breaks.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.trim() != name || name.contains(['\n', '\r']) {
        return Err(GameError::InvalidSaveData(format!(
            "invalid character name '{}'",
            name.escape_debug()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: i32,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub experience: i32,
    pub gold: i32,
    pub inventory: Inventory,
    pub quests: QuestLog,
    pub equipment: Equipment,
}

impl Character {
    /// Create a level 1 character with its class's base stats
    pub fn new(name: &str, class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            name: name.to_string(),
            class,
            level: STARTING_LEVEL,
            health: base.health,
            max_health: base.health,
            strength: base.strength,
            magic: base.magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Inventory::new(),
            quests: QuestLog::new(),
            equipment: Equipment::default(),
        }
    }

    /// Create a character from a class name, failing on unknown classes
    pub fn create(name: &str, class_name: &str) -> Result<Self> {
        validate_name(name)?;
        let class: CharacterClass = class_name.parse()?;
        info!("Created {} the {}", name, class);
        Ok(Self::new(name, class))
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn can_fight(&self) -> bool {
        !self.is_dead()
    }

    fn ensure_alive(&self, action: &str) -> Result<()> {
        if self.is_dead() {
            return Err(GameError::CharacterDead(format!(
                "{} cannot {} while dead",
                self.name, action
            )));
        }
        Ok(())
    }

    /// Add experience and apply every level-up it pays for.
    ///
    /// The threshold is recomputed from the new level after each level-up, so
    /// one large grant can raise several levels. Each level-up fully heals.
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: i32) -> Result<u32> {
        self.ensure_alive("gain experience")?;

        self.experience = self.experience.saturating_add(amount.max(0));

        let mut levels_gained = 0;
        while self.experience >= xp_threshold(self.level) {
            self.experience -= xp_threshold(self.level);
            self.level = self.level.saturating_add(1);
            self.max_health = self.max_health.saturating_add(LEVEL_UP_MAX_HEALTH);
            self.strength = self.strength.saturating_add(LEVEL_UP_STRENGTH);
            self.magic = self.magic.saturating_add(LEVEL_UP_MAGIC);
            self.health = self.max_health;
            levels_gained += 1;

            info!("{} leveled up to {}! (Max HP: {})", self.name, self.level, self.max_health);
        }

        Ok(levels_gained)
    }

    /// Apply any level-ups already paid for by banked experience, such as
    /// quest or battle rewards credited without leveling. A dead character
    /// keeps the experience banked until revived.
    pub fn settle_level_ups(&mut self) -> Result<u32> {
        if self.is_dead() {
            return Ok(0);
        }
        self.gain_experience(0)
    }

    /// Experience still needed for the next level
    pub fn xp_to_next_level(&self) -> i32 {
        (xp_threshold(self.level) - self.experience).max(0)
    }

    /// Heal up to `amount`, never past max_health. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> Result<i32> {
        self.ensure_alive("be healed")?;

        let healed = amount.min(self.max_health - self.health).max(0);
        self.health += healed;
        debug!("{} healed for {} ({}/{})", self.name, healed, self.health, self.max_health);
        Ok(healed)
    }

    /// Add (or with a negative amount, spend) gold. Returns the new total.
    pub fn add_gold(&mut self, amount: i32) -> Result<i32> {
        let new_total = self.gold.saturating_add(amount);
        if new_total < 0 {
            return Err(GameError::InsufficientResources(format!(
                "{} has {} gold, needs {}",
                self.name,
                self.gold,
                amount.unsigned_abs()
            )));
        }
        self.gold = new_total;
        Ok(new_total)
    }

    /// Bring a dead character back at half health (at least 1).
    /// Returns false, changing nothing, if the character is alive.
    pub fn revive(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.health = (self.max_health / 2).max(1);
        info!("{} was revived with {} HP", self.name, self.health);
        true
    }
}
