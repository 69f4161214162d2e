//! TTL (Time-to-live) system.
//!
//! This module provides the [`ttl_system`] that decrements TTL timers and
//! despawns entities when their time runs out.
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `ttl_system` iterates all entities with [`Ttl`](crate::components::ttl::Ttl)
//! 2. Decrements `remaining` by the frame delta
//! 3. When `remaining <= 0`, despawns the entity
//!
//! The system belongs to the simulation, so projectile lifetimes pause while
//! a hit-flash is on screen.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrements TTL and despawns entities when it reaches zero.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta; // delta is already scaled by time_scale
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::system::RunSystemOnce;

    #[test]
    fn expired_entities_are_despawned() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..Default::default()
        });
        let short = world.spawn(Ttl::new(0.4)).id();
        let long = world.spawn(Ttl::new(2.0)).id();
        world.run_system_once(ttl_system).ok();
        assert!(world.get_entity(short).is_err());
        assert_eq!(world.get::<Ttl>(long).map(|t| t.remaining), Some(1.5));
    }
}
