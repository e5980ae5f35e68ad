//! Quest operations on a character, checked against the quest registry.

use serde::Serialize;
use tracing::info;

use super::definition::QuestDefinition;
use super::registry::QuestRegistry;
use crate::character::Character;
use crate::error::{GameError, Result};

/// What completing a quest paid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuestReward {
    pub xp: i32,
    pub gold: i32,
}

impl Character {
    /// Start a quest.
    ///
    /// Checks run in a fixed order, so when several fail the first one wins:
    /// unknown quest, already completed, already active, prerequisite not
    /// completed, level too low.
    pub fn accept_quest(&mut self, quest_id: &str, quests: &QuestRegistry) -> Result<()> {
        let quest = quests.require(quest_id)?;

        if self.quests.is_completed(quest_id) {
            return Err(GameError::QuestAlreadyCompleted(quest_id.to_string()));
        }
        if self.quests.is_active(quest_id) {
            return Err(GameError::QuestRequirementsNotMet(format!(
                "'{}' is already active",
                quest_id
            )));
        }
        if let Some(prereq) = &quest.prerequisite {
            if !self.quests.is_completed(prereq) {
                return Err(GameError::QuestRequirementsNotMet(format!(
                    "'{}' requires '{}' to be completed first",
                    quest_id, prereq
                )));
            }
        }
        if self.level < quest.required_level {
            return Err(GameError::InsufficientLevel(format!(
                "'{}' requires level {}, {} is level {}",
                quest_id, quest.required_level, self.name, self.level
            )));
        }

        self.quests.start(quest_id);
        info!("{} accepted quest '{}'", self.name, quest.title);
        Ok(())
    }

    /// Same checks as `accept_quest`, without changing anything
    pub fn can_accept_quest(&self, quest: &QuestDefinition) -> bool {
        !self.quests.is_completed(&quest.id)
            && !self.quests.is_active(&quest.id)
            && quest
                .prerequisite
                .as_ref()
                .is_none_or(|prereq| self.quests.is_completed(prereq))
            && self.level >= quest.required_level
    }

    /// Finish an active quest and credit its rewards directly.
    ///
    /// Experience is added without triggering level-ups.
    pub fn complete_quest(&mut self, quest_id: &str, quests: &QuestRegistry) -> Result<QuestReward> {
        let quest = quests.require(quest_id)?;

        if !self.quests.finish(quest_id) {
            return Err(GameError::QuestNotActive(quest_id.to_string()));
        }

        let reward = QuestReward { xp: quest.reward_xp, gold: quest.reward_gold };
        self.experience = self.experience.saturating_add(reward.xp);
        self.gold = self.gold.saturating_add(reward.gold);

        info!(
            "{} completed quest '{}' (+{} XP, +{} gold)",
            self.name, quest.title, reward.xp, reward.gold
        );
        Ok(reward)
    }

    pub fn abandon_quest(&mut self, quest_id: &str) -> Result<()> {
        if !self.quests.remove_active(quest_id) {
            return Err(GameError::QuestNotActive(quest_id.to_string()));
        }
        info!("{} abandoned quest '{}'", self.name, quest_id);
        Ok(())
    }

    /// Quests this character could accept right now
    pub fn available_quests<'a>(&self, quests: &'a QuestRegistry) -> Vec<&'a QuestDefinition> {
        quests.all().filter(|q| self.can_accept_quest(q)).collect()
    }

    pub fn active_quests<'a>(&self, quests: &'a QuestRegistry) -> Vec<&'a QuestDefinition> {
        self.quests.active().iter().filter_map(|id| quests.get(id)).collect()
    }

    pub fn completed_quests<'a>(&self, quests: &'a QuestRegistry) -> Vec<&'a QuestDefinition> {
        self.quests.completed().iter().filter_map(|id| quests.get(id)).collect()
    }

    /// Share of all known quests completed, from 0.0 to 100.0
    pub fn completion_percentage(&self, quests: &QuestRegistry) -> f64 {
        if quests.is_empty() {
            return 0.0;
        }
        let done = self.completed_quests(quests).len();
        done as f64 / quests.len() as f64 * 100.0
    }

    /// Sum of rewards over completed quests still in the registry
    pub fn total_rewards_earned(&self, quests: &QuestRegistry) -> QuestReward {
        self.completed_quests(quests)
            .iter()
            .fold(QuestReward::default(), |total, q| QuestReward {
                xp: total.xp.saturating_add(q.reward_xp),
                gold: total.gold.saturating_add(q.reward_gold),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::quest::registry::tests::{chain_registry, quest};

    fn hero(level: i32) -> Character {
        let mut hero = Character::new("Wren", CharacterClass::Warrior);
        hero.level = level;
        hero
    }

    fn ids(quests: Vec<&QuestDefinition>) -> Vec<String> {
        quests.iter().map(|q| q.id.clone()).collect()
    }

    #[test]
    fn test_accept_then_complete_once() {
        let registry = chain_registry();
        let mut hero = hero(1);

        hero.accept_quest("a", &registry).unwrap();
        assert!(hero.quests.is_active("a"));

        let reward = hero.complete_quest("a", &registry).unwrap();
        assert_eq!(reward, QuestReward { xp: 50, gold: 20 });
        assert_eq!(hero.experience, 50);
        assert_eq!(hero.gold, 120);
        assert_eq!(hero.quests.completed(), &["a".to_string()]);
        assert!(hero.quests.active().is_empty());

        assert!(matches!(hero.complete_quest("a", &registry), Err(GameError::QuestNotActive(_))));
        assert_eq!(hero.gold, 120);
    }

    #[test]
    fn test_completion_rewards_do_not_level_up() {
        let mut registry = QuestRegistry::new();
        let mut big = quest("big", 1, None);
        big.reward_xp = 500;
        registry.insert(big);
        let mut hero = hero(1);

        hero.accept_quest("big", &registry).unwrap();
        hero.complete_quest("big", &registry).unwrap();

        assert_eq!(hero.level, 1);
        assert_eq!(hero.experience, 500);
    }

    #[test]
    fn test_accept_check_order() {
        let registry = chain_registry();

        let mut hero = hero(1);
        assert!(matches!(hero.accept_quest("zzz", &registry), Err(GameError::QuestNotFound(_))));

        // prerequisite and level both unmet: prerequisite reported
        assert!(matches!(
            hero.accept_quest("c", &registry),
            Err(GameError::QuestRequirementsNotMet(_))
        ));

        // prerequisite met, level too low
        hero.accept_quest("a", &registry).unwrap();
        hero.complete_quest("a", &registry).unwrap();
        assert!(matches!(hero.accept_quest("b", &registry), Err(GameError::InsufficientLevel(_))));

        assert!(matches!(
            hero.accept_quest("a", &registry),
            Err(GameError::QuestAlreadyCompleted(_))
        ));

        hero.level = 2;
        hero.accept_quest("b", &registry).unwrap();
        assert!(matches!(
            hero.accept_quest("b", &registry),
            Err(GameError::QuestRequirementsNotMet(_))
        ));
    }

    #[test]
    fn test_abandon() {
        let registry = chain_registry();
        let mut hero = hero(1);
        assert!(matches!(hero.abandon_quest("a"), Err(GameError::QuestNotActive(_))));

        hero.accept_quest("a", &registry).unwrap();
        hero.abandon_quest("a").unwrap();
        assert!(!hero.quests.is_active("a"));
        assert!(!hero.quests.is_completed("a"));
        assert_eq!(hero.experience, 0);
    }

    #[test]
    fn test_available_quests_filters() {
        let registry = chain_registry();
        let mut hero = hero(2);
        assert_eq!(ids(hero.available_quests(&registry)), vec!["a"]);

        hero.accept_quest("a", &registry).unwrap();
        assert!(hero.available_quests(&registry).is_empty());

        hero.complete_quest("a", &registry).unwrap();
        assert_eq!(ids(hero.available_quests(&registry)), vec!["b"]);

        hero.level = 5;
        assert_eq!(ids(hero.available_quests(&registry)), vec!["b", "d"]);
    }

    #[test]
    fn test_progress_queries() {
        let registry = chain_registry();
        let mut hero = hero(5);
        assert_eq!(hero.completion_percentage(&QuestRegistry::new()), 0.0);

        for id in ["a", "d"] {
            hero.accept_quest(id, &registry).unwrap();
            hero.complete_quest(id, &registry).unwrap();
        }
        hero.accept_quest("b", &registry).unwrap();

        assert_eq!(hero.completion_percentage(&registry), 50.0);
        assert_eq!(hero.total_rewards_earned(&registry), QuestReward { xp: 100, gold: 40 });
        assert_eq!(ids(hero.active_quests(&registry)), vec!["b"]);
        assert_eq!(ids(hero.completed_quests(&registry)), vec!["a", "d"]);

        let mut rich = chain_registry();
        for id in ["a", "d"] {
            let mut q = quest(id, 1, None);
            q.reward_xp = i32::MAX;
            rich.insert(q);
        }
        assert_eq!(hero.total_rewards_earned(&rich).xp, i32::MAX);

        // ids missing from the registry are skipped
        hero.quests = crate::quest::QuestLog::from_lists(vec![], vec!["gone".into(), "a".into()]).unwrap();
        assert_eq!(ids(hero.completed_quests(&registry)), vec!["a"]);
    }
}
