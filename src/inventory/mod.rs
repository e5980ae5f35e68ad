//! Inventory & Equipment
//!
//! The inventory is an ordered list of item ids, repeats allowed, capped at
//! `INVENTORY_SIZE` entries. Item records stay in the `ItemRegistry`; the
//! character only holds ids.

pub mod equipment;
pub mod trade;
pub mod usage;

pub use equipment::{EquipSlot, EquippedItem, Equipment};

use serde::Serialize;

use crate::data::record::is_list_entry;
use crate::error::{GameError, Result};

// ============================================================================
// Inventory
// ============================================================================

pub const INVENTORY_SIZE: usize = 20;

/// Item ids are saved as a comma-joined list, so they must not be empty,
/// padded or contain commas or line breaks.
pub fn validate_item_id(item_id: &str) -> Result<()> {
    if is_list_entry(item_id) {
        Ok(())
    } else {
        Err(GameError::InvalidItemType(format!("invalid item id '{}'", item_id.escape_debug())))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<String>,
}

/// One line of an inventory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemCount {
    pub item_id: String,
    pub quantity: usize,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-validated item list (e.g. from a save file)
    pub fn from_items(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= INVENTORY_SIZE
    }

    pub fn space_remaining(&self) -> usize {
        INVENTORY_SIZE.saturating_sub(self.items.len())
    }

    pub fn add_item(&mut self, item_id: &str) -> Result<()> {
        validate_item_id(item_id)?;
        if self.is_full() {
            return Err(GameError::InventoryFull(format!(
                "no room for '{}' ({}/{} slots used)",
                item_id,
                self.items.len(),
                INVENTORY_SIZE
            )));
        }
        self.items.push(item_id.to_string());
        Ok(())
    }

    /// Remove one instance of `item_id` (the first one held)
    pub fn remove_item(&mut self, item_id: &str) -> Result<()> {
        let index = self
            .items
            .iter()
            .position(|id| id == item_id)
            .ok_or_else(|| GameError::ItemNotFound(format!("'{}' is not in the inventory", item_id)))?;
        self.items.remove(index);
        Ok(())
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|id| id == item_id)
    }

    pub fn count_item(&self, item_id: &str) -> usize {
        self.items.iter().filter(|id| *id == item_id).count()
    }

    /// Empty the inventory, handing back everything it held
    pub fn clear(&mut self) -> Vec<String> {
        std::mem::take(&mut self.items)
    }

    /// Distinct ids with their counts, in the order first picked up
    pub fn item_summary(&self) -> Vec<ItemCount> {
        let mut counts: Vec<ItemCount> = Vec::new();
        for id in &self.items {
            match counts.iter_mut().find(|c| &c.item_id == id) {
                Some(entry) => entry.quantity += 1,
                None => counts.push(ItemCount { item_id: id.clone(), quantity: 1 }),
            }
        }
        counts
    }
}
