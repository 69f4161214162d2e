//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Largest frame delta fed to the simulation, in seconds. Longer stalls are
/// clamped so bodies cannot tunnel through tiles.
pub const MAX_FRAME_TIME: f32 = 0.05;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is expected to be the unscaled frame delta in seconds. The system
/// clamps it to `0..=MAX_FRAME_TIME`, applies the current `time_scale` and
/// writes both `elapsed` and `delta`.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = dt.clamp(0.0, MAX_FRAME_TIME) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_stalls_are_clamped() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        update_world_time(&mut world, 2.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, MAX_FRAME_TIME);
        assert_eq!(wt.frame_count, 1);
    }

    #[test]
    fn time_scale_applies() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            time_scale: 0.5,
            ..Default::default()
        });
        update_world_time(&mut world, 0.02);
        assert!((world.resource::<WorldTime>().delta - 0.01).abs() < 1e-7);
    }
}
