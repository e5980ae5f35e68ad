//! Turn-based battle between one character and one enemy.
//!
//! A round is: player action, end check, enemy attack, end check. The
//! battle stays `Active` until one side reaches 0 health or the player
//! escapes; after that every action fails with `CombatNotActive`.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::ability::{self, AbilityOutcome};
use super::enemy::{Enemy, VictoryRewards, victory_rewards};
use crate::character::Character;
use crate::error::{GameError, Result};

pub const ESCAPE_CHANCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    Active,
    PlayerWon,
    EnemyWon,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    SpecialAbility,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattleResult {
    pub outcome: BattleState,
    pub xp_gained: i32,
    pub gold_gained: i32,
    pub turns: u32,
}

/// Basic attack damage: `max(1, attacker_strength - defender_strength / 4)`
pub fn calculate_damage(attacker_strength: i32, defender_strength: i32) -> i32 {
    (attacker_strength - defender_strength / 4).max(1)
}

pub struct Battle<'a> {
    character: &'a mut Character,
    enemy: Enemy,
    state: BattleState,
    turn: u32,
    rewards: VictoryRewards,
    log: Vec<String>,
}

impl<'a> Battle<'a> {
    /// Start a battle. A dead character cannot fight.
    pub fn new(character: &'a mut Character, enemy: Enemy) -> Result<Self> {
        if !character.can_fight() {
            return Err(GameError::CharacterDead(format!(
                "{} cannot fight with 0 health",
                character.name
            )));
        }

        info!("{} engages a {}", character.name, enemy.name);
        Ok(Self {
            character,
            enemy,
            state: BattleState::Active,
            turn: 0,
            rewards: VictoryRewards::default(),
            log: Vec::new(),
        })
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    /// Everything that happened so far, one line per event
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn result(&self) -> BattleResult {
        BattleResult {
            outcome: self.state,
            xp_gained: self.rewards.xp,
            gold_gained: self.rewards.gold,
            turns: self.turn,
        }
    }

    fn record(&mut self, message: String) {
        debug!("{}", message);
        self.log.push(message);
    }

    fn ensure_active(&self) -> Result<()> {
        if self.state != BattleState::Active {
            return Err(GameError::CombatNotActive(format!(
                "battle already ended ({:?})",
                self.state
            )));
        }
        Ok(())
    }

    /// Settle the battle if either side is down. Rewards are paid here,
    /// exactly once, on the transition to `PlayerWon`.
    fn check_end(&mut self) {
        if self.state != BattleState::Active {
            return;
        }

        if self.enemy.is_dead() {
            self.state = BattleState::PlayerWon;
            self.rewards = victory_rewards(&self.enemy);
            self.character.experience = self.character.experience.saturating_add(self.rewards.xp);
            self.character.gold = self.character.gold.saturating_add(self.rewards.gold);
            info!(
                "{} defeated the {} (+{} XP, +{} gold)",
                self.character.name, self.enemy.name, self.rewards.xp, self.rewards.gold
            );
            self.record(format!("{} is defeated!", self.enemy.name));
        } else if self.character.is_dead() {
            self.state = BattleState::EnemyWon;
            info!("{} was defeated by the {}", self.character.name, self.enemy.name);
            self.record(format!("{} has fallen!", self.character.name));
        }
    }

    /// Basic attack on the enemy. Returns the damage dealt.
    pub fn player_attack(&mut self) -> Result<i32> {
        self.ensure_active()?;

        let damage = calculate_damage(self.character.strength, self.enemy.strength);
        self.enemy.health = (self.enemy.health - damage).max(0);
        self.record(format!(
            "{} attacks for {} damage ({} HP left)",
            self.character.name, damage, self.enemy.health
        ));

        self.check_end();
        Ok(damage)
    }

    /// Use the character's class ability in place of an attack
    pub fn use_special_ability(&mut self, rng: &mut impl Rng) -> Result<String> {
        self.ensure_active()?;

        let ability = self.character.class.special_ability();
        let outcome = ability::perform(&mut *self.character, &mut self.enemy, rng)?;
        let message = outcome.describe(ability);
        match outcome {
            AbilityOutcome::Damage { .. } => self.record(format!(
                "{} uses {}: {} ({} HP left)",
                self.character.name,
                ability.name(),
                message,
                self.enemy.health
            )),
            AbilityOutcome::Healed(_) => {
                self.record(format!("{} uses {}: {}", self.character.name, ability.name(), message))
            }
        }

        self.check_end();
        Ok(message)
    }

    /// Try to run. Succeeds half the time; success ends the battle with no rewards.
    pub fn attempt_escape(&mut self, rng: &mut impl Rng) -> Result<bool> {
        self.ensure_active()?;

        let escaped = rng.gen_bool(ESCAPE_CHANCE);
        if escaped {
            self.state = BattleState::Escaped;
            info!("{} escaped from the {}", self.character.name, self.enemy.name);
            self.record(format!("{} escaped successfully!", self.character.name));
        } else {
            self.record(format!("{} failed to escape!", self.character.name));
        }
        Ok(escaped)
    }

    /// The enemy's basic attack. Returns the damage dealt.
    pub fn enemy_turn(&mut self) -> Result<i32> {
        self.ensure_active()?;

        let damage = calculate_damage(self.enemy.strength, self.character.strength);
        self.character.health = (self.character.health - damage).max(0);
        self.record(format!(
            "{} attacks for {} damage ({} HP left)",
            self.enemy.name, damage, self.character.health
        ));

        self.check_end();
        Ok(damage)
    }

    /// Play one full round with the given player action
    pub fn take_turn(&mut self, action: PlayerAction, rng: &mut impl Rng) -> Result<BattleState> {
        self.ensure_active()?;
        self.turn += 1;

        match action {
            PlayerAction::Attack => {
                self.player_attack()?;
            }
            PlayerAction::SpecialAbility => {
                self.use_special_ability(rng)?;
            }
            PlayerAction::Escape => {
                self.attempt_escape(rng)?;
            }
        }

        if self.state == BattleState::Active {
            self.enemy_turn()?;
        }
        Ok(self.state)
    }

    /// Fight with basic attacks until the battle ends
    pub fn run(&mut self, rng: &mut impl Rng) -> Result<BattleResult> {
        while self.state == BattleState::Active {
            self.take_turn(PlayerAction::Attack, rng)?;
        }
        Ok(self.result())
    }
}
