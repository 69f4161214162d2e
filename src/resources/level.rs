//! Level data and storage.
//!
//! A level is a pre-parsed grid of placements plus optional object layers,
//! stored as `level_<n>.json`. [`LevelLibrary`] loads levels on demand from
//! a directory and caches them; levels can also be inserted directly.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::Resource;
use glam::Vec2;
use log::{info, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::boxcollider::Rect;
use crate::components::collider::Side;

fn default_tile_size() -> u32 {
    16
}

/// Single entity placement, in grid cells.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub tag: String,
    /// Spawner id that arms this placement (hostiles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawner: Option<u32>,
    /// Size override in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 2]>,
}

impl Placement {
    pub fn new(x: i32, y: i32, tag: impl Into<String>) -> Self {
        Placement {
            x,
            y,
            tag: tag.into(),
            spawner: None,
            size: None,
        }
    }

    pub fn with_spawner(mut self, id: u32) -> Self {
        self.spawner = Some(id);
        self
    }

    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Some([w, h]);
        self
    }
}

/// Axis-aligned area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Area {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpawnerData {
    pub id: u32,
    #[serde(flatten)]
    pub area: Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl From<PortalSide> for Side {
    fn from(side: PortalSide) -> Self {
        match side {
            PortalSide::Top => Side::Top,
            PortalSide::Bottom => Side::Bottom,
            PortalSide::Left => Side::Left,
            PortalSide::Right => Side::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PortalData {
    #[serde(flatten)]
    pub area: Area,
    pub side: PortalSide,
    pub link: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NoteData {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GravityWellData {
    #[serde(flatten)]
    pub area: Area,
    pub acc: f32,
}

/// One level file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelData {
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub spawners: Vec<SpawnerData>,
    #[serde(default)]
    pub portals: Vec<PortalData>,
    #[serde(default)]
    pub notes: Vec<NoteData>,
    #[serde(default)]
    pub gravity_wells: Vec<GravityWellData>,
}

impl LevelData {
    pub fn new(width: u32, height: u32) -> Self {
        LevelData {
            tile_size: default_tile_size(),
            width,
            height,
            placements: Vec::new(),
            spawners: Vec::new(),
            portals: Vec::new(),
            notes: Vec::new(),
            gravity_wells: Vec::new(),
        }
    }

    /// Level extents in pixels.
    pub fn bounds(&self) -> Rect {
        let ts = self.tile_size as f32;
        Rect::new(0.0, 0.0, self.width as f32 * ts, self.height as f32 * ts)
    }

    /// Top-left pixel position of a grid cell.
    pub fn cell_origin(&self, x: i32, y: i32) -> Vec2 {
        let ts = self.tile_size as f32;
        Vec2::new(x as f32 * ts, y as f32 * ts)
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Failed to parse level: {}", e))
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level file {:?}: {}", path, e))?;
        Self::from_json(&text)
    }
}

/// Levels by number, loaded lazily from `dir`.
#[derive(Resource, Debug, Default)]
pub struct LevelLibrary {
    pub dir: Option<PathBuf>,
    levels: FxHashMap<u32, LevelData>,
}

impl LevelLibrary {
    /// Library that only serves inserted levels.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        LevelLibrary {
            dir: Some(dir.into()),
            levels: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, number: u32, level: LevelData) {
        self.levels.insert(number, level);
    }

    pub fn file_name(number: u32) -> String {
        format!("level_{}.json", number)
    }

    /// Level `number`, reading it from disk on first use.
    ///
    /// Returns `None` when the level is neither cached nor loadable.
    pub fn get(&mut self, number: u32) -> Option<&LevelData> {
        if !self.levels.contains_key(&number) {
            let dir = self.dir.as_ref()?;
            let path = dir.join(Self::file_name(number));
            match LevelData::load_file(&path) {
                Ok(level) => {
                    info!("Loaded level {} from {:?}", number, path);
                    self.levels.insert(number, level);
                }
                Err(e) => {
                    warn!("{}", e);
                    return None;
                }
            }
        }
        self.levels.get(&number)
    }
}

/// Sizes of placement tags that have no gameplay meaning.
///
/// Kept so cosmetic code can still look them up.
#[derive(Resource, Debug, Default)]
pub struct SpriteCache {
    pub map: FxHashMap<String, Vec2>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>, size: Vec2) {
        self.map.insert(tag.into(), size);
    }

    pub fn get(&self, tag: impl AsRef<str>) -> Option<&Vec2> {
        self.map.get(tag.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "tile_size": 16, "width": 60, "height": 30,
        "placements": [ {"x": 3, "y": 10, "tag": "Player"},
                        {"x": 4, "y": 11, "tag": "Tile"},
                        {"x": 9, "y": 10, "tag": "Filth", "spawner": 1},
                        {"x": 12, "y": 2, "tag": "HellPit", "size": [16, 160]} ],
        "spawners": [ {"id": 1, "x": 96, "y": 96, "w": 64, "h": 64} ],
        "portals": [ {"x": 200, "y": 160, "w": 16, "h": 32, "side": "right", "link": 7} ],
        "notes": [ {"x": 40, "y": 120, "text": "punch fireballs back"} ],
        "gravity_wells": [ {"x": 300, "y": 0, "w": 32, "h": 200, "acc": -150} ]
    }"#;

    #[test]
    fn parses_full_level() {
        let level = LevelData::from_json(SAMPLE).unwrap();
        assert_eq!(level.placements.len(), 4);
        assert_eq!(level.placements[2].spawner, Some(1));
        assert_eq!(level.placements[3].size, Some([16.0, 160.0]));
        assert_eq!(level.spawners[0].area.rect(), Rect::new(96.0, 96.0, 64.0, 64.0));
        assert_eq!(Side::from(level.portals[0].side), Side::Right);
        assert_eq!(level.gravity_wells[0].acc, -150.0);
        assert_eq!(level.bounds(), Rect::new(0.0, 0.0, 960.0, 480.0));
    }

    #[test]
    fn object_layers_are_optional() {
        let level =
            LevelData::from_json(r#"{"width": 2, "height": 2, "placements": []}"#).unwrap();
        assert_eq!(level.tile_size, 16);
        assert!(level.spawners.is_empty());
        assert!(level.portals.is_empty());
        assert!(level.notes.is_empty());
        assert!(level.gravity_wells.is_empty());
    }

    #[test]
    fn library_reads_from_dir_and_misses_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("level_1.json"), SAMPLE).unwrap();
        let mut lib = LevelLibrary::from_dir(dir.path());
        assert!(lib.get(1).is_some());
        assert!(lib.get(2).is_none());
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(LevelData::from_json("{ nope").is_err());
    }
}
