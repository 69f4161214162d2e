//! Persistent progress.
//!
//! Only two facts survive between runs: the highest unlocked level and the
//! names of the weapons the player owns. The game talks to storage through
//! the [`SaveStore`] trait so that tests can swap the JSON file for memory.
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use log::info;
use serde::{Deserialize, Serialize};

fn first_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SaveData {
    #[serde(default = "first_level")]
    pub max_level: u32,
    #[serde(default)]
    pub weapons: Vec<String>,
}

impl Default for SaveData {
    fn default() -> Self {
        SaveData {
            max_level: first_level(),
            weapons: Vec::new(),
        }
    }
}

pub trait SaveStore: Send + Sync {
    fn load(&self) -> Result<SaveData, String>;
    fn store(&mut self, data: &SaveData) -> Result<(), String>;
}

/// JSON document on disk. Parent directories are created on write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    pub path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Result<SaveData, String> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read save file {:?}: {}", self.path, e))?;
        serde_json::from_str(&text).map_err(|e| format!("Failed to parse save file: {}", e))
    }

    fn store(&mut self, data: &SaveData) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create save directory {:?}: {}", parent, e))?;
        }
        let text = serde_json::to_string_pretty(data)
            .map_err(|e| format!("Failed to encode save data: {}", e))?;
        std::fs::write(&self.path, text)
            .map_err(|e| format!("Failed to write save file {:?}: {}", self.path, e))?;
        info!("Saved progress to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store. `load` fails until something has been stored.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub data: Option<SaveData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(data: SaveData) -> Self {
        MemoryStore { data: Some(data) }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<SaveData, String> {
        self.data.clone().ok_or_else(|| "No save data stored".to_string())
    }

    fn store(&mut self, data: &SaveData) -> Result<(), String> {
        self.data = Some(data.clone());
        Ok(())
    }
}

/// The world's handle to its save backend.
#[derive(Resource)]
pub struct SaveSlot(pub Box<dyn SaveStore>);

impl SaveSlot {
    pub fn new(store: impl SaveStore + 'static) -> Self {
        SaveSlot(Box::new(store))
    }

    /// Load, or `SaveData::default()` with a warning when unreadable.
    pub fn load_or_default(&self) -> SaveData {
        self.0.load().unwrap_or_else(|e| {
            log::warn!("{}; starting fresh", e);
            SaveData::default()
        })
    }

    pub fn store(&mut self, data: &SaveData) -> Result<(), String> {
        self.0.store(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_round_trip_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("save-data").join("data.json"));
        assert!(store.load().is_err());
        let data = SaveData {
            max_level: 2,
            weapons: vec!["pistol".into(), "shotgun".into()],
        };
        store.store(&data).unwrap();
        assert_eq!(store.load().unwrap(), data);
    }

    #[test]
    fn unreadable_save_falls_back_to_level_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();
        let slot = SaveSlot::new(JsonFileStore::new(&path));
        assert_eq!(slot.load_or_default(), SaveData::default());
    }

    #[test]
    fn missing_fields_default() {
        let data: SaveData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.max_level, 1);
        assert!(data.weapons.is_empty());
    }
}
