//! Character persistence
//!
//! `CharacterStore` is the save/load contract the rest of the game uses;
//! `FileStore` keeps one text file per character in a directory.

pub mod codec;

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::character::{Character, validate_name};
use crate::error::{GameError, Result};

const SAVE_SUFFIX: &str = "_save.txt";

pub trait CharacterStore {
    fn save(&self, character: &Character) -> Result<()>;
    fn load(&self, name: &str) -> Result<Character>;
    /// Saved character names. Never fails; an unreadable store lists nothing.
    fn list(&self) -> Vec<String>;
    fn delete(&self, name: &str) -> Result<()>;
}

pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn save_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(GameError::InvalidSaveData(format!(
                "'{}' cannot be used as a save name",
                name
            )));
        }
        Ok(self.dir.join(format!("{}{}", name, SAVE_SUFFIX)))
    }
}

impl CharacterStore for FileStore {
    fn save(&self, character: &Character) -> Result<()> {
        let path = self.save_path(&character.name)?;
        let text = codec::encode(&character.to_record())?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, text)?;
        debug!("Saved {} to {:?}", character.name, path);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Character> {
        let path = self.save_path(name)?;
        if !path.is_file() {
            return Err(GameError::CharacterNotFound(name.to_string()));
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|e| GameError::SaveCorrupted(format!("{:?}: {}", path, e)))?;
        let record = codec::decode(&text)?;
        Character::from_record(&record)
    }

    fn list(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list saves in {:?}: {}", self.dir, e);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let file_name = entry.file_name().into_string().ok()?;
                file_name.strip_suffix(SAVE_SUFFIX).map(str::to_string)
            })
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.save_path(name)?;
        if !path.is_file() {
            warn!("No save to delete for {}", name);
            return Err(GameError::CharacterNotFound(name.to_string()));
        }
        std::fs::remove_file(&path)?;
        info!("Deleted save for {}", name);
        Ok(())
    }
}
