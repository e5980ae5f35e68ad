//! Class special abilities
//!
//! One per class, no cooldowns. Used in place of a basic attack.

use rand::Rng;
use serde::Serialize;

use super::enemy::Enemy;
use crate::character::{Character, CharacterClass};
use crate::error::Result;

/// Heal ceiling for the Cleric ability
pub const HEAL_AMOUNT: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpecialAbility {
    PowerStrike,
    Fireball,
    CriticalStrike,
    Heal,
}

impl SpecialAbility {
    pub fn name(&self) -> &'static str {
        match self {
            SpecialAbility::PowerStrike => "Power Strike",
            SpecialAbility::Fireball => "Fireball",
            SpecialAbility::CriticalStrike => "Critical Strike",
            SpecialAbility::Heal => "Heal",
        }
    }
}

impl CharacterClass {
    pub fn special_ability(&self) -> SpecialAbility {
        match self {
            CharacterClass::Warrior => SpecialAbility::PowerStrike,
            CharacterClass::Mage => SpecialAbility::Fireball,
            CharacterClass::Rogue => SpecialAbility::CriticalStrike,
            CharacterClass::Cleric => SpecialAbility::Heal,
        }
    }
}

/// Result of one ability use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    Damage { amount: i32, critical: bool },
    Healed(i32),
}

impl AbilityOutcome {
    pub fn describe(&self, ability: SpecialAbility) -> String {
        match self {
            AbilityOutcome::Damage { amount, critical: true } => {
                format!("{} dealt {} damage", ability.name(), amount)
            }
            AbilityOutcome::Damage { amount, critical: false } => match ability {
                SpecialAbility::CriticalStrike => format!("Attack dealt {} damage", amount),
                _ => format!("{} dealt {} damage", ability.name(), amount),
            },
            AbilityOutcome::Healed(amount) => format!("Healed {} HP", amount),
        }
    }
}

/// Apply `character`'s class ability. Damage floors the enemy's health at 0.
pub(crate) fn perform(
    character: &mut Character,
    enemy: &mut Enemy,
    rng: &mut impl Rng,
) -> Result<AbilityOutcome> {
    let outcome = match character.class.special_ability() {
        SpecialAbility::PowerStrike => AbilityOutcome::Damage {
            amount: character.strength.saturating_mul(2).max(1),
            critical: false,
        },
        SpecialAbility::Fireball => AbilityOutcome::Damage {
            amount: character.magic.saturating_mul(2).max(1),
            critical: false,
        },
        SpecialAbility::CriticalStrike => {
            if rng.gen_bool(0.5) {
                AbilityOutcome::Damage { amount: character.strength.saturating_mul(3).max(1), critical: true }
            } else {
                AbilityOutcome::Damage { amount: character.strength.max(1), critical: false }
            }
        }
        SpecialAbility::Heal => AbilityOutcome::Healed(character.heal(HEAL_AMOUNT)?),
    };

    if let AbilityOutcome::Damage { amount, .. } = outcome {
        enemy.health = enemy.health.saturating_sub(amount).max(0);
    }
    Ok(outcome)
}
