//! Level furniture: tiles, trigger volumes, hazards and decorations.
//!
//! All of these are placed once at level load and carry a `MapPosition`
//! (top-left) and a `BoxCollider` for their area.
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::boxcollider::Rect;
use crate::components::collider::Side;

pub const HELLPIT_SIZE: Vec2 = Vec2::new(16.0, 160.0);
/// Sinking speed of a player caught in a hell-pit.
pub const HELLPIT_SINK_SPEED: f32 = 10.0;
pub const CHECKPOINT_SIZE: Vec2 = Vec2::new(16.0, 16.0);
/// Gravity-well acceleration that maps to the maximum overlay alpha.
pub const GRAVITY_WELL_FULL: f32 = 200.0;
pub const GRAVITY_WELL_MAX_ALPHA: f32 = 150.0;

/// Solid map tile.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Tile;

/// Proximity volume that arms linked hostiles. Latches once entered.
#[derive(Component, Debug, Clone, Copy)]
pub struct Spawner {
    pub id: u32,
    pub activated: bool,
}

impl Spawner {
    pub fn new(id: u32) -> Self {
        Spawner {
            id,
            activated: false,
        }
    }
}

/// Falling into one ends the level.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HellPit;

#[derive(Component, Debug, Clone, Copy)]
pub struct Portal {
    pub link: u32,
    /// Side of this portal a player arriving here is placed on.
    pub side: Side,
    /// Paired portal, resolved after the level is loaded.
    pub partner: Option<Entity>,
}

impl Portal {
    /// Top-left for a body of `size` arriving at the portal occupying `rect`:
    /// flush against `side`, centred on the other axis.
    pub fn exit_position(rect: &Rect, side: Side, size: Vec2) -> Vec2 {
        let center = rect.center();
        match side {
            Side::Top => Vec2::new(center.x - size.x * 0.5, rect.top() - size.y),
            Side::Bottom => Vec2::new(center.x - size.x * 0.5, rect.bottom()),
            Side::Left => Vec2::new(rect.left() - size.x, center.y - size.y * 0.5),
            Side::Right => Vec2::new(rect.right(), center.y - size.y * 0.5),
        }
    }
}

/// Region that adds `acc` (px/s²) to the player's vertical velocity.
#[derive(Component, Debug, Clone, Copy)]
pub struct GravityWell {
    pub acc: f32,
}

impl GravityWell {
    /// Overlay alpha in `0..=255`.
    pub fn alpha(&self) -> u8 {
        (GRAVITY_WELL_MAX_ALPHA * self.acc.abs() / GRAVITY_WELL_FULL).clamp(0.0, 255.0) as u8
    }
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Checkpoint;

#[derive(Component, Debug, Clone)]
pub struct Note {
    pub text: String,
}

/// Drawn behind the actors.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Decoration;

/// Drawn in front of the actors.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FgDecoration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_flush_and_outside() {
        let rect = Rect::new(100.0, 100.0, 16.0, 32.0);
        let size = Vec2::new(10.0, 14.0);
        for side in [Side::Top, Side::Bottom, Side::Left, Side::Right] {
            let pos = Portal::exit_position(&rect, side, size);
            let body = Rect { pos, size };
            assert!(!body.overlaps(&rect), "{:?}", side);
        }
        let right = Portal::exit_position(&rect, Side::Right, size);
        assert_eq!(right, Vec2::new(116.0, 109.0));
        let top = Portal::exit_position(&rect, Side::Top, size);
        assert_eq!(top, Vec2::new(103.0, 86.0));
    }

    #[test]
    fn well_alpha_scales_with_acceleration() {
        assert_eq!(GravityWell { acc: 200.0 }.alpha(), 150);
        assert_eq!(GravityWell { acc: -100.0 }.alpha(), 75);
        assert_eq!(GravityWell { acc: 1000.0 }.alpha(), 255);
    }
}
