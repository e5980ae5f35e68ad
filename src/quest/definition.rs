//! Quest Definitions
//!
//! Parsed from blank-line separated blocks of the quests file:
//!
//! ```text
//! QUEST_ID: first_steps
//! TITLE: First Steps
//! DESCRIPTION: Walk to the village.
//! REWARD_XP: 50
//! REWARD_GOLD: 20
//! REQUIRED_LEVEL: 1
//! PREREQUISITE: NONE
//! ```

use serde::Serialize;

use crate::data::record::{Record, is_list_entry, split_block_line};
use crate::error::{GameError, Result};

/// Prerequisite value meaning "no prerequisite"
pub const NO_PREREQUISITE: &str = "NONE";

pub const QUEST_FIELDS: [&str; 7] = [
    "quest_id",
    "title",
    "description",
    "reward_xp",
    "reward_gold",
    "required_level",
    "prerequisite",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: i32,
    pub reward_gold: i32,
    pub required_level: i32,
    /// Quest that must be completed first
    pub prerequisite: Option<String>,
}

fn format_error(message: String) -> GameError {
    GameError::InvalidDataFormat(message)
}

impl QuestDefinition {
    pub fn parse_block(lines: &[&str]) -> Result<Self> {
        let mut record = Record::new();
        for line in lines {
            let (key, value) = split_block_line(line)
                .ok_or_else(|| format_error(format!("Quest line missing ': ' separator: '{}'", line)))?;
            let field = key.to_ascii_lowercase();
            if key != field.to_ascii_uppercase() || !QUEST_FIELDS.contains(&field.as_str()) {
                return Err(format_error(format!("Unknown quest field: {}", key)));
            }
            record.insert_scalar(&field, value);
        }
        Self::from_record(&record)
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        for field in QUEST_FIELDS {
            if !record.contains(field) {
                return Err(format_error(format!("Missing quest field: {}", field)));
            }
        }
        let text = |field: &str| record.scalar(field).unwrap_or_default().to_string();
        let id = text("quest_id");
        if !is_list_entry(&id) {
            return Err(format_error(format!("Invalid quest id: '{}'", id)));
        }
        let number = |field: &str, min: i32| -> Result<i32> {
            let value: i32 = text(field)
                .parse()
                .map_err(|_| format_error(format!("Invalid {} for quest '{}': {}", field, id, text(field))))?;
            if value < min {
                return Err(format_error(format!(
                    "{} for quest '{}' must be at least {}, got {}",
                    field, id, min, value
                )));
            }
            Ok(value)
        };

        let reward_xp = number("reward_xp", 0)?;
        let reward_gold = number("reward_gold", 0)?;
        let required_level = number("required_level", 1)?;
        let prerequisite = match text("prerequisite").as_str() {
            NO_PREREQUISITE => None,
            other => Some(other.to_string()),
        };

        Ok(Self {
            id,
            title: text("title"),
            description: text("description"),
            reward_xp,
            reward_gold,
            required_level,
            prerequisite,
        })
    }

    pub fn to_block(&self) -> String {
        format!(
            "QUEST_ID: {}\nTITLE: {}\nDESCRIPTION: {}\nREWARD_XP: {}\nREWARD_GOLD: {}\nREQUIRED_LEVEL: {}\nPREREQUISITE: {}\n",
            self.id,
            self.title,
            self.description,
            self.reward_xp,
            self.reward_gold,
            self.required_level,
            self.prerequisite.as_deref().unwrap_or(NO_PREREQUISITE)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: [&str; 7] = [
        "QUEST_ID: rat_problem",
        "TITLE: Rat Problem",
        "DESCRIPTION: Clear the cellar.",
        "REWARD_XP: 75",
        "REWARD_GOLD: 30",
        "REQUIRED_LEVEL: 2",
        "PREREQUISITE: first_steps",
    ];

    #[test]
    fn test_parse_block() {
        let quest = QuestDefinition::parse_block(&BLOCK).unwrap();
        assert_eq!(quest.id, "rat_problem");
        assert_eq!(quest.reward_xp, 75);
        assert_eq!(quest.required_level, 2);
        assert_eq!(quest.prerequisite.as_deref(), Some("first_steps"));

        let block = quest.to_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines, BLOCK);
    }

    #[test]
    fn test_empty_description_reloads() {
        let mut lines = BLOCK.to_vec();
        lines[2] = "DESCRIPTION: ";
        let quest = QuestDefinition::parse_block(&lines).unwrap();
        assert_eq!(quest.description, "");

        let block = quest.to_block();
        let blocks = crate::data::record::split_blocks(&block);
        assert_eq!(QuestDefinition::parse_block(&blocks[0]).unwrap(), quest);
    }

    #[test]
    fn test_quest_ids_must_fit_a_list() {
        for bad in ["QUEST_ID: rats,bats", "QUEST_ID:"] {
            let mut lines = BLOCK.to_vec();
            lines[0] = bad;
            let err = QuestDefinition::parse_block(&lines).unwrap_err();
            assert!(matches!(err, GameError::InvalidDataFormat(ref m) if m.contains("quest id")), "{}", bad);
        }
    }

    #[test]
    fn test_none_prerequisite() {
        let mut lines = BLOCK.to_vec();
        lines[6] = "PREREQUISITE: NONE";
        let quest = QuestDefinition::parse_block(&lines).unwrap();
        assert_eq!(quest.prerequisite, None);
        assert!(quest.to_block().ends_with("PREREQUISITE: NONE\n"));
    }

    #[test]
    fn test_format_errors() {
        let mut lines = BLOCK.to_vec();
        lines[3] = "REWARD_XP: many";
        let err = QuestDefinition::parse_block(&lines).unwrap_err();
        assert!(matches!(err, GameError::InvalidDataFormat(ref m) if m.contains("reward_xp")));

        let mut lines = BLOCK.to_vec();
        lines[5] = "REQUIRED_LEVEL: 0";
        assert!(matches!(QuestDefinition::parse_block(&lines), Err(GameError::InvalidDataFormat(_))));

        let mut lines = BLOCK.to_vec();
        lines[1] = "TITLE Rat Problem";
        assert!(matches!(QuestDefinition::parse_block(&lines), Err(GameError::InvalidDataFormat(_))));

        let mut lines = BLOCK.to_vec();
        lines.push("GIVER: Mayor");
        let err = QuestDefinition::parse_block(&lines).unwrap_err();
        assert!(err.to_string().contains("Unknown quest field: GIVER"));

        let err = QuestDefinition::parse_block(&BLOCK[1..]).unwrap_err();
        assert!(err.to_string().contains("Missing quest field: quest_id"));
    }
}
