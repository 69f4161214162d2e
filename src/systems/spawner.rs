//! Spawner activation and the hostile spawn flicker.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::environment::Spawner;
use crate::components::hostile::{Activation, Hostile, Soldier};
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::worldtime::WorldTime;

/// Latch spawners the player stands in, then wake and flicker their hostiles.
///
/// A hostile with no spawner, or whose spawner entity is gone, wakes on its
/// first frame. Soldiers start their charge the moment they turn active.
pub fn spawner_activation(
    time: Res<WorldTime>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
    mut spawners: Query<(Entity, &mut Spawner, &MapPosition, &BoxCollider)>,
    mut hostiles: Query<(Entity, &mut Hostile, Option<&mut Soldier>)>,
) {
    if let Ok((position, collider)) = players.single() {
        let rect = collider.rect(position.pos);
        for (entity, mut spawner, s_position, s_collider) in spawners.iter_mut() {
            if !spawner.activated && s_collider.rect(s_position.pos).overlaps(&rect) {
                spawner.activated = true;
                info!("Spawner {} ({:?}) activated", spawner.id, entity);
            }
        }
    }

    for (entity, mut hostile, soldier) in hostiles.iter_mut() {
        if hostile.activation.is_dormant() {
            let armed = match hostile.spawner {
                Some(spawner) => spawners.get(spawner).map(|(_, s, _, _)| s.activated).unwrap_or(true),
                None => true,
            };
            if armed {
                hostile.activation = Activation::flicker();
            }
        }
        if hostile.activation.advance(time.delta) {
            debug!("{:?} {:?} is active", hostile.kind, entity);
            if let Some(mut soldier) = soldier {
                soldier.charge.start();
            }
        }
    }
}
