//! Per-character quest progress: which quests are active and which are done.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::{GameError, Result};

/// Active and completed quest ids, each in the order they were added.
/// An id is never in both lists, nor twice in one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuestLog {
    active: Vec<String>,
    completed: Vec<String>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved lists, rejecting duplicates and overlap
    pub fn from_lists(active: Vec<String>, completed: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for id in active.iter().chain(completed.iter()) {
            if !seen.insert(id.as_str()) {
                let message = if active.contains(id) && completed.contains(id) {
                    format!("Quest '{}' is both active and completed", id)
                } else {
                    format!("Quest '{}' is listed twice", id)
                };
                return Err(GameError::InvalidSaveData(message));
            }
        }
        Ok(Self { active, completed })
    }

    pub fn active(&self) -> &[String] {
        &self.active
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn is_active(&self, quest_id: &str) -> bool {
        self.active.iter().any(|id| id == quest_id)
    }

    pub fn is_completed(&self, quest_id: &str) -> bool {
        self.completed.iter().any(|id| id == quest_id)
    }

    pub(crate) fn start(&mut self, quest_id: &str) {
        if !self.is_active(quest_id) && !self.is_completed(quest_id) {
            self.active.push(quest_id.to_string());
        }
    }

    /// Drop from the active list. Returns whether it was there.
    pub(crate) fn remove_active(&mut self, quest_id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|id| id != quest_id);
        self.active.len() != before
    }

    /// Move from active to completed. Returns false if it was not active.
    pub(crate) fn finish(&mut self, quest_id: &str) -> bool {
        if !self.remove_active(quest_id) {
            return false;
        }
        self.completed.push(quest_id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_lists_rejects_overlap_and_duplicates() {
        let err = QuestLog::from_lists(ids(&["a"]), ids(&["b", "a"])).unwrap_err();
        assert!(matches!(err, GameError::InvalidSaveData(ref m) if m.contains("both")));

        let err = QuestLog::from_lists(ids(&["a", "a"]), Vec::new()).unwrap_err();
        assert!(matches!(err, GameError::InvalidSaveData(ref m) if m.contains("twice")));

        let log = QuestLog::from_lists(ids(&["b"]), ids(&["a"])).unwrap();
        assert!(log.is_active("b"));
        assert!(log.is_completed("a"));
    }

    #[test]
    fn test_lifecycle() {
        let mut log = QuestLog::new();
        log.start("a");
        log.start("a");
        assert_eq!(log.active(), &["a".to_string()]);

        assert!(log.finish("a"));
        assert!(!log.finish("a"));
        assert!(log.active().is_empty());
        assert_eq!(log.completed(), &["a".to_string()]);

        log.start("a");
        assert!(log.active().is_empty());

        log.start("b");
        assert!(log.remove_active("b"));
        assert!(!log.remove_active("b"));
    }
}
