//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive level teardown. The
//! game marks its observers and registered systems with it; everything built
//! from a level file is left unmarked.

use bevy_ecs::prelude::Component;

/// Tag component used to mark entities that must not be despawned when
/// [`enter_play`](crate::game::enter_play) tears the previous level down.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
