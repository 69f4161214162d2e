//! Per-entity vertical velocity accumulator.
use bevy_ecs::prelude::Component;

/// Downward acceleration in px/s².
pub const WORLD_GRAVITY: f32 = 100.0;
/// Terminal fall speed in px/s.
pub const MAX_FALL_VELOCITY: f32 = 300.0;

/// Signed vertical velocity (px/s, positive = down).
///
/// Jump and knockback code writes `velocity` directly; movement code must
/// zero it whenever the resolver reports a TOP or BOTTOM blocker.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Gravity {
    pub velocity: f32,
}

impl Gravity {
    pub fn new() -> Self {
        Gravity { velocity: 0.0 }
    }

    /// Accelerate by one frame and clamp to the terminal fall speed.
    /// Upward velocity is never clamped.
    pub fn update(&mut self, dt: f32) {
        self.velocity += WORLD_GRAVITY * dt;
        if self.velocity > MAX_FALL_VELOCITY {
            self.velocity = MAX_FALL_VELOCITY;
        }
    }
}
