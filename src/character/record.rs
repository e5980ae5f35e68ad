//! Conversion between `Character` and its flat record form.
//!
//! Loading a save goes text -> `Record` -> `Character`; every structural
//! check happens in `Character::from_record`, which reports the first
//! violation it finds.

use super::{Character, CharacterClass};
use crate::data::item_def::ItemEffect;
use crate::data::record::{FieldValue, Record};
use crate::error::{GameError, Result};
use crate::inventory::{EquipSlot, EquippedItem, Equipment, INVENTORY_SIZE, Inventory};
use crate::quest::QuestLog;

/// Fields every character record must carry, in save-file order
pub const REQUIRED_FIELDS: [&str; 12] = [
    "name",
    "class",
    "level",
    "health",
    "max_health",
    "strength",
    "magic",
    "experience",
    "gold",
    "inventory",
    "active_quests",
    "completed_quests",
];

pub const NUMERIC_FIELDS: [&str; 7] =
    ["level", "health", "max_health", "strength", "magic", "experience", "gold"];

pub const LIST_FIELDS: [&str; 3] = ["inventory", "active_quests", "completed_quests"];

/// Optional fields: an equip slot is stored as `[item_id, "stat:delta"]`, or empty
pub const EQUIPMENT_FIELDS: [&str; 2] = ["equipped_weapon", "equipped_armor"];

fn invalid(message: String) -> GameError {
    GameError::InvalidSaveData(message)
}

fn numeric(record: &Record, field: &str) -> Result<i32> {
    record
        .scalar(field)
        .and_then(|v| v.trim().parse::<i32>().ok())
        .ok_or_else(|| invalid(format!("Invalid numeric field: {}", field)))
}

fn list(record: &Record, field: &str) -> Result<Vec<String>> {
    record
        .list(field)
        .map(<[String]>::to_vec)
        .ok_or_else(|| invalid(format!("Invalid list field: {}", field)))
}

fn equipped(record: &Record, slot: EquipSlot) -> Result<Option<EquippedItem>> {
    let field = slot.record_field();
    let entries = match record.get(field) {
        None => return Ok(None),
        Some(FieldValue::List(entries)) => entries,
        Some(FieldValue::Scalar(_)) => {
            return Err(invalid(format!("Invalid list field: {}", field)));
        }
    };

    match entries.as_slice() {
        [] => Ok(None),
        [item_id, effect] => {
            let effect: ItemEffect = effect
                .parse()
                .map_err(|_| invalid(format!("Invalid effect in {}: '{}'", field, effect)))?;
            Ok(Some(EquippedItem { item_id: item_id.clone(), effect }))
        }
        _ => Err(invalid(format!("Malformed equipment field: {}", field))),
    }
}

impl Character {
    /// Check a record without building the character
    pub fn validate(record: &Record) -> Result<()> {
        Self::from_record(record).map(|_| ())
    }

    pub fn from_record(record: &Record) -> Result<Self> {
        for field in REQUIRED_FIELDS {
            if !record.contains(field) {
                return Err(invalid(format!("Missing character field: {}", field)));
            }
        }

        let mut numbers = [0; NUMERIC_FIELDS.len()];
        for (slot, field) in numbers.iter_mut().zip(NUMERIC_FIELDS) {
            *slot = numeric(record, field)?;
        }
        let [level, health, max_health, strength, magic, experience, gold] = numbers;

        let inventory = list(record, "inventory")?;
        let active_quests = list(record, "active_quests")?;
        let completed_quests = list(record, "completed_quests")?;

        let class_name = record.scalar("class").unwrap_or_default();
        let class: CharacterClass = class_name
            .parse()
            .map_err(|_| invalid(format!("Invalid character class: {}", class_name)))?;

        let name = record.scalar("name").unwrap_or_default().trim();
        if name.is_empty() {
            return Err(invalid("Character name is empty".to_string()));
        }

        if level < 1 {
            return Err(invalid(format!("Level must be at least 1, got {}", level)));
        }
        if let Some((field, value)) = NUMERIC_FIELDS
            .iter()
            .zip(numbers)
            .find(|(_, value)| *value < 0)
        {
            return Err(invalid(format!("Negative value for {}: {}", field, value)));
        }
        if health > max_health {
            return Err(invalid(format!(
                "Health {} exceeds max health {}",
                health, max_health
            )));
        }
        if inventory.len() > INVENTORY_SIZE {
            return Err(invalid(format!(
                "Inventory holds {} items, capacity is {}",
                inventory.len(),
                INVENTORY_SIZE
            )));
        }

        let quests = QuestLog::from_lists(active_quests, completed_quests)?;

        let equipment = Equipment {
            weapon: equipped(record, EquipSlot::Weapon)?,
            armor: equipped(record, EquipSlot::Armor)?,
        };

        Ok(Self {
            name: name.to_string(),
            class,
            level,
            health,
            max_health,
            strength,
            magic,
            experience,
            gold,
            inventory: Inventory::from_items(inventory),
            quests,
            equipment,
        })
    }

    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert_scalar("name", &self.name);
        record.insert_scalar("class", self.class);
        record.insert_scalar("level", self.level);
        record.insert_scalar("health", self.health);
        record.insert_scalar("max_health", self.max_health);
        record.insert_scalar("strength", self.strength);
        record.insert_scalar("magic", self.magic);
        record.insert_scalar("experience", self.experience);
        record.insert_scalar("gold", self.gold);
        record.insert_list("inventory", self.inventory.items().to_vec());
        record.insert_list("active_quests", self.quests.active().to_vec());
        record.insert_list("completed_quests", self.quests.completed().to_vec());

        for slot in EquipSlot::ALL {
            let entries = match self.equipment.get(slot) {
                Some(item) => vec![item.item_id.clone(), item.effect.to_string()],
                None => Vec::new(),
            };
            record.insert_list(slot.record_field(), entries);
        }

        record
    }
}
