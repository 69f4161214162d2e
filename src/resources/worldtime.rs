//! Simulation clock.
use bevy_ecs::prelude::Resource;

/// Frame time shared by all systems.
///
/// `delta` is the scaled duration of the current frame in seconds,
/// `elapsed` the accumulated scaled time since the world was built and
/// `frame_count` the number of frames stepped so far.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}
