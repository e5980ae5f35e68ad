//! Quest Registry
//!
//! Loads quest definitions from the quests file and answers questions about
//! the prerequisite graph.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use super::definition::QuestDefinition;
use crate::data::read_data_blocks;
use crate::error::{GameError, Result};

/// Registry for all quest definitions
#[derive(Debug, Default)]
pub struct QuestRegistry {
    quests: HashMap<String, QuestDefinition>,
    /// Ids in the order first loaded, so listings are stable
    order: Vec<String>,
}

impl QuestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the quests file at `path` and check every prerequisite resolves
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut registry = Self::new();

        for block in read_data_blocks(path)? {
            let lines: Vec<&str> = block.iter().map(String::as_str).collect();
            registry.insert(QuestDefinition::parse_block(&lines)?);
        }
        info!("Loaded {} quest definitions", registry.len());

        registry.validate_prerequisites()?;
        Ok(registry)
    }

    /// Add a quest. A repeated id replaces the earlier one.
    pub fn insert(&mut self, quest: QuestDefinition) {
        if self.quests.contains_key(&quest.id) {
            warn!("Duplicate quest ID '{}', overwriting", quest.id);
        } else {
            self.order.push(quest.id.clone());
        }
        self.quests.insert(quest.id.clone(), quest);
    }

    /// Every prerequisite must name a known quest
    pub fn validate_prerequisites(&self) -> Result<()> {
        for quest in self.all() {
            if let Some(prereq) = &quest.prerequisite {
                if !self.contains(prereq) {
                    return Err(GameError::QuestNotFound(format!(
                        "quest '{}' requires unknown quest '{}'",
                        quest.id, prereq
                    )));
                }
            }
        }
        Ok(())
    }

    /// Ids from the root of `quest_id`'s prerequisite chain down to `quest_id` itself
    pub fn prerequisite_chain(&self, quest_id: &str) -> Result<Vec<String>> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(quest_id.to_string());

        while let Some(id) = current {
            if !visited.insert(id.clone()) {
                return Err(GameError::CorruptedData(format!(
                    "prerequisite cycle through quest '{}'",
                    id
                )));
            }
            let quest = self.require(&id)?;
            current = quest.prerequisite.clone();
            chain.push(id);
        }

        chain.reverse();
        Ok(chain)
    }

    pub fn get(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.get(id)
    }

    /// Like `get`, but an unknown id is `QuestNotFound`
    pub fn require(&self, id: &str) -> Result<&QuestDefinition> {
        self.get(id).ok_or_else(|| GameError::QuestNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.quests.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// All quests in load order
    pub fn all(&self) -> impl Iterator<Item = &QuestDefinition> {
        self.order.iter().filter_map(|id| self.quests.get(id))
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }

    /// Quests whose required level is within `min..=max`
    pub fn quests_by_level(&self, min: i32, max: i32) -> Vec<&QuestDefinition> {
        self.all()
            .filter(|q| (min..=max).contains(&q.required_level))
            .collect()
    }

    /// Quests with no prerequisite
    pub fn starting_quests(&self) -> Vec<&QuestDefinition> {
        self.all().filter(|q| q.prerequisite.is_none()).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    pub(crate) fn quest(id: &str, level: i32, prerequisite: Option<&str>) -> QuestDefinition {
        QuestDefinition {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            reward_xp: 50,
            reward_gold: 20,
            required_level: level,
            prerequisite: prerequisite.map(str::to_string),
        }
    }

    /// a <- b <- c, plus a standalone d
    pub(crate) fn chain_registry() -> QuestRegistry {
        let mut registry = QuestRegistry::new();
        registry.insert(quest("a", 1, None));
        registry.insert(quest("b", 2, Some("a")));
        registry.insert(quest("c", 3, Some("b")));
        registry.insert(quest("d", 5, None));
        registry
    }

    #[test]
    fn test_prerequisite_chain_is_root_first() {
        let registry = chain_registry();
        assert_eq!(registry.prerequisite_chain("c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(registry.prerequisite_chain("a").unwrap(), vec!["a"]);
        assert!(matches!(registry.prerequisite_chain("z"), Err(GameError::QuestNotFound(_))));
    }

    #[test]
    fn test_prerequisite_chain_missing_link() {
        let mut registry = QuestRegistry::new();
        registry.insert(quest("b", 1, Some("ghost")));
        assert!(matches!(registry.prerequisite_chain("b"), Err(GameError::QuestNotFound(ref id)) if id == "ghost"));
        assert!(matches!(registry.validate_prerequisites(), Err(GameError::QuestNotFound(_))));
    }

    #[test]
    fn test_prerequisite_cycle_is_reported() {
        let mut registry = QuestRegistry::new();
        registry.insert(quest("x", 1, Some("y")));
        registry.insert(quest("y", 1, Some("x")));
        let err = registry.prerequisite_chain("x").unwrap_err();
        assert!(matches!(err, GameError::CorruptedData(ref m) if m.contains("'x'")));
    }

    #[test]
    fn test_level_and_starting_filters() {
        let registry = chain_registry();
        let ids = |quests: Vec<&QuestDefinition>| quests.iter().map(|q| q.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(registry.quests_by_level(2, 3)), vec!["b", "c"]);
        assert_eq!(ids(registry.quests_by_level(4, 4)), Vec::<String>::new());
        assert_eq!(ids(registry.starting_quests()), vec!["a", "d"]);
    }

    #[test]
    fn test_load_validates_prerequisites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quests.txt");
        let content = format!(
            "{}\n{}",
            quest("a", 1, None).to_block(),
            quest("b", 1, Some("missing")).to_block()
        );
        std::fs::write(&path, content).unwrap();
        assert!(matches!(QuestRegistry::load_from_file(&path), Err(GameError::QuestNotFound(_))));

        let content = format!("{}\n{}", quest("a", 1, None).to_block(), quest("b", 1, Some("a")).to_block());
        std::fs::write(&path, content).unwrap();
        let registry = QuestRegistry::load_from_file(&path).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicate_keeps_position_and_later_record() {
        let mut registry = chain_registry();
        registry.insert(quest("a", 9, None));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("a").unwrap().required_level, 9);
        assert_eq!(registry.ids().next().unwrap(), "a");
    }

    #[test]
    fn test_bundled_quests_load() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/quests.txt");
        let registry = QuestRegistry::load_from_file(&path).unwrap();
        assert_eq!(
            registry.prerequisite_chain("dragon_slayer").unwrap(),
            vec!["intro", "cellar_rats", "goblin_camp", "orc_warlord", "dragon_slayer"]
        );
    }
}
