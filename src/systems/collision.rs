//! Collider registry upkeep and helpers shared by the movement systems.
//!
//! [`update_temp_colliders`] refreshes the temporary list once per frame.
//! Movement systems take a [`snapshot_blockers`] before moving anything, so
//! despawns and moves later in the same system never disturb the candidate
//! set they are resolving against.
use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;

use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::collider::TempSolid;
use crate::components::mapposition::MapPosition;
use crate::resources::colliders::ColliderRegistry;

/// Rebuild the temporary blocker list from every live [`TempSolid`].
pub fn update_temp_colliders(
    mut registry: ResMut<ColliderRegistry>,
    temps: Query<Entity, With<TempSolid>>,
) {
    registry.clear_temp();
    for entity in temps.iter() {
        registry.register_temp(entity);
    }
}

/// World rects of every registered blocker visible to `bodies`, in registry
/// order. Handles whose entity is gone (or filtered out) are skipped.
pub fn snapshot_blockers<F: QueryFilter>(
    registry: &ColliderRegistry,
    bodies: &Query<(&MapPosition, &BoxCollider), F>,
) -> Vec<(Entity, Rect)> {
    registry
        .iter()
        .filter_map(|entity| {
            bodies
                .get(entity)
                .ok()
                .map(|(position, collider)| (entity, collider.rect(position.pos)))
        })
        .collect()
}

/// First static blocker overlapping `rect`.
pub fn solid_overlap<F: QueryFilter>(
    rect: &Rect,
    registry: &ColliderRegistry,
    bodies: &Query<(&MapPosition, &BoxCollider), F>,
) -> Option<Entity> {
    registry.solid().iter().copied().find(|entity| {
        bodies
            .get(*entity)
            .map(|(position, collider)| collider.rect(position.pos).overlaps(rect))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::collider::Solid;
    use bevy_ecs::system::RunSystemOnce;

    #[test]
    fn temp_list_tracks_live_temp_solids() {
        let mut world = World::new();
        world.insert_resource(ColliderRegistry::new());
        let a = world.spawn(TempSolid).id();
        let b = world.spawn(TempSolid).id();
        world.run_system_once(update_temp_colliders).ok();
        assert_eq!(world.resource::<ColliderRegistry>().temp(), &[a, b]);

        world.despawn(a);
        world.run_system_once(update_temp_colliders).ok();
        assert_eq!(world.resource::<ColliderRegistry>().temp(), &[b]);
    }

    #[test]
    fn snapshot_skips_missing_bodies() {
        let mut world = World::new();
        let tile = world
            .spawn((Solid, MapPosition::new(0.0, 16.0), BoxCollider::new(16.0, 16.0)))
            .id();
        let ghost = world.spawn_empty().id();
        let mut registry = ColliderRegistry::new();
        registry.register(ghost);
        registry.register(tile);
        world.insert_resource(registry);

        let blockers = world
            .run_system_once(
                |registry: Res<ColliderRegistry>, bodies: Query<(&MapPosition, &BoxCollider)>| {
                    snapshot_blockers(&registry, &bodies)
                },
            )
            .unwrap();
        assert_eq!(blockers, vec![(tile, Rect::new(0.0, 16.0, 16.0, 16.0))]);
    }
}
