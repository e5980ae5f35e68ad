use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::record::{Record, is_list_entry, split_block_line};
use crate::character::Stat;
use crate::error::{GameError, Result};

// ============================================================================
// Item Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Consumable => "consumable",
        }
    }
}

impl FromStr for ItemType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "consumable" => Ok(ItemType::Consumable),
            other => Err(GameError::InvalidItemType(format!("unknown item type '{}'", other))),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Item Effects
// ============================================================================

/// A single `stat:delta` modifier, e.g. `strength:5` or `health:-10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemEffect {
    pub stat: Stat,
    pub delta: i32,
}

impl ItemEffect {
    /// The effect that undoes this one
    pub fn reversed(&self) -> Self {
        Self { stat: self.stat, delta: self.delta.saturating_neg() }
    }
}

impl FromStr for ItemEffect {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || GameError::InvalidItemType(format!("invalid effect format '{}'", s));

        let (stat, delta) = s.split_once(':').ok_or_else(malformed)?;
        if delta.contains(':') {
            return Err(malformed());
        }
        let delta: i32 = delta.trim().parse().map_err(|_| malformed())?;
        let stat: Stat = stat.parse()?;

        Ok(Self { stat, delta })
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stat, self.delta)
    }
}

// ============================================================================
// Item Definition
// ============================================================================

/// Keys of an item block, in file order
pub const ITEM_FIELDS: [&str; 6] = ["item_id", "name", "type", "effect", "cost", "description"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub effect: ItemEffect,
    pub cost: i32,
    pub description: String,
}

fn format_error(message: String) -> GameError {
    GameError::InvalidDataFormat(message)
}

impl ItemDefinition {
    /// Parse one blank-line separated block of an items file
    pub fn parse_block(lines: &[&str]) -> Result<Self> {
        let mut record = Record::new();
        for line in lines {
            let (key, value) = split_block_line(line)
                .ok_or_else(|| format_error(format!("Item line missing ': ' separator: '{}'", line)))?;
            let field = key.to_ascii_lowercase();
            if key != field.to_ascii_uppercase() || !ITEM_FIELDS.contains(&field.as_str()) {
                return Err(format_error(format!("Unknown item field: {}", key)));
            }
            record.insert_scalar(&field, value);
        }
        Self::from_record(&record)
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        for field in ITEM_FIELDS {
            if !record.contains(field) {
                return Err(format_error(format!("Missing item field: {}", field)));
            }
        }
        let text = |field: &str| record.scalar(field).unwrap_or_default().to_string();

        let id = text("item_id");
        if !is_list_entry(&id) {
            return Err(format_error(format!("Invalid item id: '{}'", id)));
        }
        let item_type: ItemType = text("type")
            .parse()
            .map_err(|_| format_error(format!("Invalid item type for '{}': {}", id, text("type"))))?;
        let effect: ItemEffect = text("effect")
            .parse()
            .map_err(|_| format_error(format!("Invalid item effect for '{}': {}", id, text("effect"))))?;
        let cost: i32 = text("cost")
            .parse()
            .map_err(|_| format_error(format!("Invalid item cost for '{}': {}", id, text("cost"))))?;
        if cost < 0 {
            return Err(format_error(format!("Negative item cost for '{}': {}", id, cost)));
        }

        Ok(Self {
            id,
            name: text("name"),
            item_type,
            effect,
            cost,
            description: text("description"),
        })
    }

    pub fn is_consumable(&self) -> bool {
        self.item_type == ItemType::Consumable
    }

    /// Gold received when selling this item
    pub fn sell_price(&self) -> i32 {
        self.cost / 2
    }

    /// Serialize back to the items-file block format
    pub fn to_block(&self) -> String {
        format!(
            "ITEM_ID: {}\nNAME: {}\nTYPE: {}\nEFFECT: {}\nCOST: {}\nDESCRIPTION: {}\n",
            self.id, self.name, self.item_type, self.effect, self.cost, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWORD: [&str; 6] = [
        "ITEM_ID: iron_sword",
        "NAME: Iron Sword",
        "TYPE: weapon",
        "EFFECT: strength:5",
        "COST: 100",
        "DESCRIPTION: A sturdy blade.",
    ];

    #[test]
    fn test_effect_parsing() {
        let effect: ItemEffect = "health:20".parse().unwrap();
        assert_eq!(effect, ItemEffect { stat: Stat::Health, delta: 20 });

        let effect: ItemEffect = "max_health:-10".parse().unwrap();
        assert_eq!(effect.delta, -10);
        assert_eq!(effect.reversed().delta, 10);
        assert_eq!(effect.to_string(), "max_health:-10");
    }

    #[test]
    fn test_malformed_effects() {
        for bad in ["health", "health:", "health:abc", "health:1:2", ":5", "luck:3"] {
            assert!(
                matches!(bad.parse::<ItemEffect>(), Err(GameError::InvalidItemType(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_block() {
        let item = ItemDefinition::parse_block(&SWORD).unwrap();
        assert_eq!(item.id, "iron_sword");
        assert_eq!(item.name, "Iron Sword");
        assert_eq!(item.item_type, ItemType::Weapon);
        assert_eq!(item.effect, ItemEffect { stat: Stat::Strength, delta: 5 });
        assert_eq!(item.cost, 100);
        assert_eq!(item.sell_price(), 50);

        let block = item.to_block();
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines, SWORD);
    }

    #[test]
    fn test_empty_description_reloads() {
        let mut lines = SWORD.to_vec();
        lines[5] = "DESCRIPTION: ";
        let item = ItemDefinition::parse_block(&lines).unwrap();
        assert_eq!(item.description, "");

        let block = item.to_block();
        let blocks = crate::data::record::split_blocks(&block);
        assert_eq!(ItemDefinition::parse_block(&blocks[0]).unwrap(), item);

        lines[5] = "DESCRIPTION:";
        assert_eq!(ItemDefinition::parse_block(&lines).unwrap().description, "");
    }

    #[test]
    fn test_item_ids_must_fit_a_list() {
        for bad in ["ITEM_ID: a,b", "ITEM_ID: "] {
            let mut lines = SWORD.to_vec();
            lines[0] = bad;
            let err = ItemDefinition::parse_block(&lines).unwrap_err();
            assert!(matches!(err, GameError::InvalidDataFormat(ref m) if m.contains("item id")), "{}", bad);
        }
    }

    #[test]
    fn test_block_errors() {
        let mut lines = SWORD.to_vec();
        lines[4] = "COST: lots";
        let err = ItemDefinition::parse_block(&lines).unwrap_err();
        assert!(matches!(err, GameError::InvalidDataFormat(ref m) if m.contains("cost")));

        let mut lines = SWORD.to_vec();
        lines[2] = "TYPE: trinket";
        assert!(matches!(ItemDefinition::parse_block(&lines), Err(GameError::InvalidDataFormat(_))));

        let mut lines = SWORD.to_vec();
        lines[3] = "EFFECT: strength";
        assert!(matches!(ItemDefinition::parse_block(&lines), Err(GameError::InvalidDataFormat(_))));

        let mut lines = SWORD.to_vec();
        lines.push("WEIGHT: 3");
        let err = ItemDefinition::parse_block(&lines).unwrap_err();
        assert!(err.to_string().contains("Unknown item field: WEIGHT"));

        let err = ItemDefinition::parse_block(&SWORD[..5]).unwrap_err();
        assert!(err.to_string().contains("Missing item field: description"));

        let err = ItemDefinition::parse_block(&["ITEM_ID iron_sword"]).unwrap_err();
        assert!(matches!(err, GameError::InvalidDataFormat(_)));
    }
}
