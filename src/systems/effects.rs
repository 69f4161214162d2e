//! Cosmetic effect lifetimes.
//!
//! Runs even while a hit-flash suspends the simulation, which is what lets
//! the flash itself run out.
use bevy_ecs::prelude::*;

use crate::components::effects::Fade;
use crate::resources::worldtime::WorldTime;

/// Count every [`Fade`] down and despawn the finished ones.
pub fn fade_effects(
    time: Res<WorldTime>,
    mut fades: Query<(Entity, &mut Fade)>,
    mut commands: Commands,
) {
    for (entity, mut fade) in fades.iter_mut() {
        if fade.update(time.delta) {
            commands.entity(entity).try_despawn();
        }
    }
}
