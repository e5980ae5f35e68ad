use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use super::item_def::ItemDefinition;
use super::read_data_blocks;
use crate::error::{GameError, Result};

/// Every item the game knows about, keyed by item id
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: HashMap<String, ItemDefinition>,
    /// Ids in the order first loaded, so shop listings are stable
    order: Vec<String>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the items file at `path`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut registry = Self::new();

        for block in read_data_blocks(path)? {
            let lines: Vec<&str> = block.iter().map(String::as_str).collect();
            let item = ItemDefinition::parse_block(&lines)?;
            registry.insert(item);
        }

        info!("Loaded {} item definitions", registry.len());
        Ok(registry)
    }

    /// Add a definition. A repeated id replaces the earlier one.
    pub fn insert(&mut self, item: ItemDefinition) {
        if self.items.contains_key(&item.id) {
            warn!("Duplicate item ID '{}', overwriting", item.id);
        } else {
            self.order.push(item.id.clone());
        }
        self.items.insert(item.id.clone(), item);
    }

    pub fn get(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// Like `get`, but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&ItemDefinition> {
        self.get(id)
            .ok_or_else(|| GameError::ItemNotFound(format!("no item definition for '{}'", id)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// All items in load order
    pub fn all(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
