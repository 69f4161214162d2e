//! Debug toggle resource.
//!
//! The mere presence of this resource makes the render pass draw collider
//! and spawner outlines after the world.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, debug overlays are drawn.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}
