use serde::Serialize;
use std::str::FromStr;
use tracing::info;

use crate::character::Character;
use crate::data::item_def::{ItemDefinition, ItemEffect, ItemType};
use crate::error::{GameError, Result};

// ============================================================================
// Equipment Slots
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 2] = [EquipSlot::Weapon, EquipSlot::Armor];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
        }
    }

    /// Item type this slot accepts
    pub fn item_type(&self) -> ItemType {
        match self {
            EquipSlot::Weapon => ItemType::Weapon,
            EquipSlot::Armor => ItemType::Armor,
        }
    }

    /// Save-file field holding this slot
    pub fn record_field(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "equipped_weapon",
            EquipSlot::Armor => "equipped_armor",
        }
    }
}

impl FromStr for EquipSlot {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon" => Ok(EquipSlot::Weapon),
            "armor" => Ok(EquipSlot::Armor),
            other => Err(GameError::InvalidItemType(format!("unknown equipment slot '{}'", other))),
        }
    }
}

// ============================================================================
// Equipped Items
// ============================================================================

/// An item held in a slot, with the bonus it applied so it can be undone.
/// `effect.delta` is the change that actually landed after clamping, which
/// can be smaller than the item's nominal bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquippedItem {
    pub item_id: String,
    pub effect: ItemEffect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        match slot {
            EquipSlot::Weapon => self.weapon.as_ref(),
            EquipSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }
}

impl Character {
    pub fn equipped(&self, slot: EquipSlot) -> Option<&EquippedItem> {
        self.equipment.get(slot)
    }

    pub fn equip_weapon(&mut self, item_id: &str, item: &ItemDefinition) -> Result<String> {
        self.equip(EquipSlot::Weapon, item_id, item)
    }

    pub fn equip_armor(&mut self, item_id: &str, item: &ItemDefinition) -> Result<String> {
        self.equip(EquipSlot::Armor, item_id, item)
    }

    pub fn unequip_weapon(&mut self) -> Result<Option<String>> {
        self.unequip(EquipSlot::Weapon)
    }

    pub fn unequip_armor(&mut self) -> Result<Option<String>> {
        self.unequip(EquipSlot::Armor)
    }

    /// Equip an inventory item into `slot`.
    ///
    /// Whatever the slot held is unequipped first: its bonus is reversed and
    /// it goes back into the inventory. If that fails the new item is not
    /// equipped. Then the new bonus is applied and the item leaves the inventory.
    pub fn equip(&mut self, slot: EquipSlot, item_id: &str, item: &ItemDefinition) -> Result<String> {
        if !self.inventory.has_item(item_id) {
            return Err(GameError::ItemNotFound(format!("'{}' is not in the inventory", item_id)));
        }
        if item.item_type != slot.item_type() {
            return Err(GameError::InvalidItemType(format!(
                "'{}' is a {}, not a {}",
                item_id,
                item.item_type,
                slot.item_type()
            )));
        }

        self.unequip(slot)?;

        let stat = item.effect.stat;
        let before = self.stat(stat);
        self.apply_stat_delta(stat, item.effect.delta);
        let applied = ItemEffect { stat, delta: self.stat(stat) - before };
        *self.equipment.slot_mut(slot) = Some(EquippedItem {
            item_id: item_id.to_string(),
            effect: applied,
        });
        self.inventory.remove_item(item_id)?;

        info!("{} equipped {} to {} slot", self.name, item_id, slot.as_str());
        Ok(format!("Equipped {}: {}", slot.as_str(), item.name))
    }

    /// Take the item out of `slot` and put it back in the inventory.
    ///
    /// Returns `None` when the slot is empty. Fails with `InventoryFull`,
    /// leaving the character untouched, when there is no room for the item.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<Option<String>> {
        let Some(equipped) = self.equipment.get(slot).cloned() else {
            return Ok(None);
        };

        if self.inventory.is_full() {
            return Err(GameError::InventoryFull(format!(
                "no room to unequip '{}'",
                equipped.item_id
            )));
        }

        let undo = equipped.effect.reversed();
        self.apply_stat_delta(undo.stat, undo.delta);
        self.inventory.add_item(&equipped.item_id)?;
        *self.equipment.slot_mut(slot) = None;

        info!("{} unequipped {} from {} slot", self.name, equipped.item_id, slot.as_str());
        Ok(Some(equipped.item_id))
    }
}
