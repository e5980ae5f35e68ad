use tracing::info;

use crate::character::Character;
use crate::data::item_def::ItemDefinition;
use crate::error::{GameError, Result};

impl Character {
    /// Consume one `item_id` from the inventory and apply its effect.
    pub fn use_item(&mut self, item_id: &str, item: &ItemDefinition) -> Result<String> {
        if !self.inventory.has_item(item_id) {
            return Err(GameError::ItemNotFound(format!("'{}' is not in the inventory", item_id)));
        }
        if !item.is_consumable() {
            return Err(GameError::InvalidItemType(format!(
                "'{}' is a {} and cannot be used",
                item_id, item.item_type
            )));
        }

        self.apply_stat_delta(item.effect.stat, item.effect.delta);
        self.inventory.remove_item(item_id)?;

        info!("{} used {} ({})", self.name, item_id, item.effect);
        Ok(format!("Used {} and gained {} {}.", item.name, item.effect.delta, item.effect.stat))
    }
}
