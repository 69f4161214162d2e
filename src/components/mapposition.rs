use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space position of an entity.
///
/// For bodies this is the top-left corner of the
/// [`BoxCollider`](crate::components::boxcollider::BoxCollider) unless the
/// collider carries an offset.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        MapPosition {
            pos: Vec2::new(x, y),
        }
    }

    pub fn from_vec(pos: Vec2) -> Self {
        MapPosition { pos }
    }
}

/// Step from `from` toward `to` by at most `max_step`, never overshooting.
pub fn move_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        return to;
    }
    from + delta / dist * max_step
}

/// Screen-space angle (radians, y down) pointing from `from` to `to`.
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for a screen-space angle.
pub fn direction(radians: f32) -> Vec2 {
    Vec2::new(radians.cos(), radians.sin())
}
