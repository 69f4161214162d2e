//! Per-run progress that outlives a single level.
use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boxcollider::Rect;
use crate::resources::save::SaveData;

/// Last checkpoint touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckpointMark {
    pub level: u32,
    /// Top-left of the checkpoint.
    pub position: Vec2,
}

#[derive(Resource, Debug, Clone)]
pub struct SessionState {
    /// Level loaded on the next enter of `Playing`.
    pub level_no: u32,
    pub checkpoint: Option<CheckpointMark>,
    /// A level-complete event was fired for the current level.
    pub level_complete: bool,
    /// Extents of the current level in pixels.
    pub bounds: Rect,
    /// Tile edge length of the current level in pixels.
    pub tile_size: f32,
    /// Progress read at level start.
    pub save: SaveData,
}

impl SessionState {
    pub fn new(level_no: u32) -> Self {
        SessionState {
            level_no,
            checkpoint: None,
            level_complete: false,
            bounds: Rect::default(),
            tile_size: 16.0,
            save: SaveData::default(),
        }
    }

    /// Checkpoint position for the level being entered, if any.
    pub fn respawn_point(&self) -> Option<Vec2> {
        self.checkpoint
            .filter(|c| c.level == self.level_no)
            .map(|c| c.position)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::new(1)
    }
}
