use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{GameError, Result};

// ============================================================================
// Enemy Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyType {
    Goblin,
    Orc,
    Dragon,
}

/// Fixed stat block for an enemy type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyStats {
    pub health: i32,
    pub strength: i32,
    pub magic: i32,
    pub xp_reward: i32,
    pub gold_reward: i32,
}

impl EnemyType {
    pub const ALL: [EnemyType; 3] = [EnemyType::Goblin, EnemyType::Orc, EnemyType::Dragon];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyType::Goblin => "goblin",
            EnemyType::Orc => "orc",
            EnemyType::Dragon => "dragon",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnemyType::Goblin => "Goblin",
            EnemyType::Orc => "Orc",
            EnemyType::Dragon => "Dragon",
        }
    }

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyType::Goblin => EnemyStats { health: 50, strength: 8, magic: 2, xp_reward: 25, gold_reward: 10 },
            EnemyType::Orc => EnemyStats { health: 80, strength: 12, magic: 5, xp_reward: 50, gold_reward: 25 },
            EnemyType::Dragon => EnemyStats { health: 200, strength: 25, magic: 15, xp_reward: 200, gold_reward: 100 },
        }
    }

    /// Enemy matched to a character level
    pub fn for_level(level: i32) -> Self {
        match level {
            i32::MIN..=2 => EnemyType::Goblin,
            3..=5 => EnemyType::Orc,
            _ => EnemyType::Dragon,
        }
    }
}

impl FromStr for EnemyType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "goblin" => Ok(EnemyType::Goblin),
            "orc" => Ok(EnemyType::Orc),
            "dragon" => Ok(EnemyType::Dragon),
            _ => Err(GameError::InvalidTarget(format!("unknown enemy type '{}'", s))),
        }
    }
}

impl fmt::Display for EnemyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// A single opponent, alive for one battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enemy {
    pub enemy_type: EnemyType,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub xp_reward: i32,
    pub gold_reward: i32,
}

/// Experience and gold paid for a win
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VictoryRewards {
    pub xp: i32,
    pub gold: i32,
}

impl Enemy {
    pub fn new(enemy_type: EnemyType) -> Self {
        let stats = enemy_type.stats();
        Self {
            enemy_type,
            name: enemy_type.display_name().to_string(),
            health: stats.health,
            max_health: stats.health,
            strength: stats.strength,
            magic: stats.magic,
            xp_reward: stats.xp_reward,
            gold_reward: stats.gold_reward,
        }
    }

    /// Create from a type name such as "orc" (any case)
    pub fn create(type_name: &str) -> Result<Self> {
        Ok(Self::new(type_name.parse()?))
    }

    pub fn for_level(level: i32) -> Self {
        Self::new(EnemyType::for_level(level))
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

pub fn victory_rewards(enemy: &Enemy) -> VictoryRewards {
    VictoryRewards { xp: enemy.xp_reward, gold: enemy.gold_reward }
}
