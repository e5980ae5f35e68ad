//! Game data files
//!
//! Quests and items are plain text: blank-line separated blocks of
//! `KEY: value` lines. This module holds the shared line format and the
//! item table; quests live in `crate::quest`.

pub mod defaults;
pub mod item_def;
pub mod item_registry;
pub mod record;

pub use defaults::create_default_data_files;
pub use item_def::{ItemDefinition, ItemEffect, ItemType};
pub use item_registry::ItemRegistry;
pub use record::{FieldValue, Record};

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{GameError, Result};

/// Read a data file and split it into record blocks.
///
/// A missing file is `MissingDataFile`, an unreadable one `CorruptedData`,
/// and a file with no records `InvalidDataFormat`.
pub fn read_data_blocks(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GameError::MissingDataFile(format!("{}", path.display())),
        _ => GameError::CorruptedData(format!("Failed to read {}: {}", path.display(), e)),
    })?;

    let blocks: Vec<Vec<String>> = record::split_blocks(&content)
        .into_iter()
        .map(|block| block.into_iter().map(str::to_string).collect())
        .collect();

    if blocks.is_empty() {
        return Err(GameError::InvalidDataFormat(format!(
            "{} contains no records",
            path.display()
        )));
    }

    Ok(blocks)
}
