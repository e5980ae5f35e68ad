use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::GameError;

/// Starting stats for a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: i32,
    pub strength: i32,
    pub magic: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Cleric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            CharacterClass::Warrior => BaseStats { health: 120, strength: 15, magic: 5 },
            CharacterClass::Mage => BaseStats { health: 80, strength: 8, magic: 20 },
            CharacterClass::Rogue => BaseStats { health: 90, strength: 12, magic: 10 },
            CharacterClass::Cleric => BaseStats { health: 100, strength: 10, magic: 15 },
        }
    }
}

impl FromStr for CharacterClass {
    type Err = GameError;

    /// Class names are matched exactly ("Warrior", not "warrior").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharacterClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| GameError::InvalidClass(s.to_string()))
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
