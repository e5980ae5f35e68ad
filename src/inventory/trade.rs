//! Buying and selling against an item's listed cost.

use tracing::info;

use crate::character::Character;
use crate::data::item_def::ItemDefinition;
use crate::error::{GameError, Result};
use crate::inventory::validate_item_id;

impl Character {
    /// Buy one `item_id` at full cost
    pub fn purchase(&mut self, item_id: &str, item: &ItemDefinition) -> Result<()> {
        validate_item_id(item_id)?;
        if self.gold < item.cost {
            return Err(GameError::InsufficientResources(format!(
                "'{}' costs {} gold, {} has {}",
                item_id, item.cost, self.name, self.gold
            )));
        }
        if self.inventory.is_full() {
            return Err(GameError::InventoryFull(format!("no room for '{}'", item_id)));
        }

        self.add_gold(-item.cost)?;
        self.inventory.add_item(item_id)?;

        info!("{} bought {} for {} gold", self.name, item_id, item.cost);
        Ok(())
    }

    /// Sell one `item_id` for half its cost, rounded down. Returns the gold received.
    pub fn sell(&mut self, item_id: &str, item: &ItemDefinition) -> Result<i32> {
        self.inventory.remove_item(item_id)?;

        let price = item.sell_price();
        self.add_gold(price)?;

        info!("{} sold {} for {} gold", self.name, item_id, price);
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterClass, Stat};
    use crate::data::item_def::{ItemEffect, ItemType};
    use crate::inventory::INVENTORY_SIZE;

    fn shield(cost: i32) -> ItemDefinition {
        ItemDefinition {
            id: "wooden_shield".into(),
            name: "Wooden Shield".into(),
            item_type: ItemType::Armor,
            effect: ItemEffect { stat: Stat::MaxHealth, delta: 5 },
            cost,
            description: String::new(),
        }
    }

    #[test]
    fn test_purchase_debits_gold() {
        let mut hero = Character::new("Tam", CharacterClass::Rogue);
        hero.purchase("wooden_shield", &shield(60)).unwrap();
        assert_eq!(hero.gold, 40);
        assert!(hero.inventory.has_item("wooden_shield"));

        let err = hero.purchase("wooden_shield", &shield(60)).unwrap_err();
        assert!(matches!(err, GameError::InsufficientResources(_)));
        assert_eq!(hero.gold, 40);
        assert_eq!(hero.inventory.len(), 1);
    }

    #[test]
    fn test_gold_is_checked_before_space() {
        let mut hero = Character::new("Tam", CharacterClass::Rogue);
        for _ in 0..INVENTORY_SIZE {
            hero.inventory.add_item("rock").unwrap();
        }
        assert!(matches!(
            hero.purchase("wooden_shield", &shield(500)),
            Err(GameError::InsufficientResources(_))
        ));
        assert!(matches!(
            hero.purchase("wooden_shield", &shield(10)),
            Err(GameError::InventoryFull(_))
        ));
        assert_eq!(hero.gold, 100);
    }

    #[test]
    fn test_bad_id_keeps_gold() {
        let mut hero = Character::new("Tam", CharacterClass::Rogue);
        assert!(matches!(
            hero.purchase("shield,sword", &shield(60)),
            Err(GameError::InvalidItemType(_))
        ));
        assert_eq!(hero.gold, 100);
        assert!(hero.inventory.is_empty());
    }

    #[test]
    fn test_sell_rounds_down() {
        let mut hero = Character::new("Tam", CharacterClass::Rogue);
        hero.inventory.add_item("wooden_shield").unwrap();

        assert_eq!(hero.sell("wooden_shield", &shield(45)).unwrap(), 22);
        assert_eq!(hero.gold, 122);
        assert!(hero.inventory.is_empty());

        assert!(matches!(
            hero.sell("wooden_shield", &shield(45)),
            Err(GameError::ItemNotFound(_))
        ));
    }
}
