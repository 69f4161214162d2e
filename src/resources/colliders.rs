//! Registry of blocking bodies.
//!
//! The registry holds non-owning handles: the bodies themselves are entities
//! and own their `MapPosition` and `BoxCollider`. Two lists are kept:
//!
//! - `solid`: static blockers registered at level load, in placement order.
//! - `temp`: moving blockers, rebuilt from scratch every frame.
//!
//! Registration and removal are idempotent, so a handle removed twice (or a
//! despawned entity that was never registered) is a silent no-op.
use bevy_ecs::prelude::*;

#[derive(Resource, Debug, Default, Clone)]
pub struct ColliderRegistry {
    solid: Vec<Entity>,
    temp: Vec<Entity>,
}

impl ColliderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a static blocker. Already registered handles are ignored.
    pub fn register(&mut self, entity: Entity) {
        if !self.solid.contains(&entity) {
            self.solid.push(entity);
        }
    }

    /// Remove a static blocker. Returns `false` if it was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        match self.solid.iter().position(|e| *e == entity) {
            Some(index) => {
                self.solid.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn register_temp(&mut self, entity: Entity) {
        if !self.temp.contains(&entity) {
            self.temp.push(entity);
        }
    }

    pub fn clear_temp(&mut self) {
        self.temp.clear();
    }

    /// Drop everything; used on level teardown.
    pub fn clear(&mut self) {
        self.solid.clear();
        self.temp.clear();
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.solid.contains(&entity) || self.temp.contains(&entity)
    }

    /// All blockers in resolution order: solids first, then temporaries.
    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.solid.iter().chain(self.temp.iter()).copied()
    }

    pub fn solid(&self) -> &[Entity] {
        &self.solid
    }

    pub fn temp(&self) -> &[Entity] {
        &self.temp
    }

    pub fn len(&self) -> usize {
        self.solid.len() + self.temp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
