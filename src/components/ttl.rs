//! Time-to-live component for automatic entity despawning.
//!
//! Every projectile is spawned with a [`Ttl`]. The
//! [`ttl_system`](crate::systems::ttl::ttl_system) counts it down with the
//! frame delta and despawns the entity when it runs out. Because the system
//! belongs to the simulation, lifetimes pause while a hit-flash is active.

use bevy_ecs::prelude::Component;

/// Remaining lifetime in seconds.
#[derive(Component, Debug, Clone, Copy)]
pub struct Ttl {
    pub remaining: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl { remaining: seconds }
    }
}
