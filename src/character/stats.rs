//! Character stats that items can modify.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::Character;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::MaxHealth => "max_health",
            Stat::Strength => "strength",
            Stat::Magic => "magic",
        }
    }
}

impl FromStr for Stat {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "health" => Ok(Stat::Health),
            "max_health" => Ok(Stat::MaxHealth),
            "strength" => Ok(Stat::Strength),
            "magic" => Ok(Stat::Magic),
            other => Err(GameError::InvalidItemType(format!("unknown stat '{}'", other))),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Character {
    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::MaxHealth => self.max_health,
            Stat::Strength => self.strength,
            Stat::Magic => self.magic,
        }
    }

    /// Add a signed delta to a stat.
    ///
    /// Stats never go below zero and health never exceeds max_health, so
    /// shrinking max_health also trims health to fit.
    pub fn apply_stat_delta(&mut self, stat: Stat, delta: i32) {
        let value = match stat {
            Stat::Health => &mut self.health,
            Stat::MaxHealth => &mut self.max_health,
            Stat::Strength => &mut self.strength,
            Stat::Magic => &mut self.magic,
        };
        *value = value.saturating_add(delta).max(0);
        self.health = self.health.min(self.max_health);
    }
}
