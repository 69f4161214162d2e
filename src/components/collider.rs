//! Solid bodies and the axis-separated movement resolver.
//!
//! Entities tagged [`Solid`] block movement. They are listed in the
//! [`ColliderRegistry`](crate::resources::colliders::ColliderRegistry) so
//! that resolution walks them in a stable order. [`TempSolid`] bodies go into
//! the registry's secondary list, which is rebuilt every frame and used for
//! moving blockers such as the player's own body.
//!
//! [`resolve`] is a pure function: given a body's current rect, a proposed
//! displacement and the candidate blockers, it reports which collider
//! constrained each side and the snapped top-left position. It never touches
//! the displacement; callers zero their own velocity per reported side.
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::boxcollider::Rect;

/// Static blocker registered in the solid list.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Solid;

/// Moving blocker re-registered in the temporary list every frame.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TempSolid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Blocker per side; at most one collider per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub left: Option<Entity>,
    pub right: Option<Entity>,
    pub top: Option<Entity>,
    pub bottom: Option<Entity>,
}

impl CollisionResult {
    pub fn get(&self, side: Side) -> Option<Entity> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }

    /// A LEFT or RIGHT blocker was reported.
    pub fn horizontal(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// A TOP or BOTTOM blocker was reported.
    pub fn vertical(&self) -> bool {
        self.top.is_some() || self.bottom.is_some()
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub result: CollisionResult,
    /// Top-left position after snapping each blocked axis.
    pub position: Vec2,
}

impl Resolution {
    /// Apply the usual caller reaction: zero the displacement on each blocked
    /// axis and return `(new_position, dx, dy)`.
    pub fn settle(&self, dx: f32, dy: f32) -> (Vec2, f32, f32) {
        let dx = if self.result.horizontal() { 0.0 } else { dx };
        let dy = if self.result.vertical() { 0.0 } else { dy };
        (self.position + Vec2::new(dx, dy), dx, dy)
    }
}

/// Keep the most restrictive clamp; ties keep the earlier collider.
fn nearest(best: Option<(f32, Entity)>, candidate: f32, entity: Entity, negative: bool) -> Option<(f32, Entity)> {
    match best {
        None => Some((candidate, entity)),
        Some((b, _)) if (negative && candidate > b) || (!negative && candidate < b) => {
            Some((candidate, entity))
        }
        keep => keep,
    }
}

/// Resolve a proposed `(dx, dy)` for the body `me` occupying `rect`.
///
/// Each axis is tested on its own: the rect is moved by `dx` alone and by
/// `dy` alone, and every overlapping collider yields a clamp position on that
/// axis. Moving left clamps to the collider's right edge, moving right to its
/// left edge minus the body width, and likewise vertically. The nearest
/// clamp wins (`max` for negative motion, `min` for positive) and the first
/// collider in iteration order that produced it is the reported blocker.
///
/// `me` is skipped if it appears among `others`.
pub fn resolve<'a, I>(me: Entity, rect: Rect, dx: f32, dy: f32, others: I) -> Resolution
where
    I: IntoIterator<Item = &'a (Entity, Rect)>,
{
    let moved_x = rect.moved(dx, 0.0);
    let moved_y = rect.moved(0.0, dy);
    let mut best_x: Option<(f32, Entity)> = None;
    let mut best_y: Option<(f32, Entity)> = None;

    for (entity, other) in others {
        if *entity == me {
            continue;
        }
        if dx != 0.0 && moved_x.overlaps(other) {
            let candidate = if dx < 0.0 {
                other.right()
            } else {
                other.left() - rect.width()
            };
            best_x = nearest(best_x, candidate, *entity, dx < 0.0);
        }
        if dy != 0.0 && moved_y.overlaps(other) {
            let candidate = if dy < 0.0 {
                other.bottom()
            } else {
                other.top() - rect.height()
            };
            best_y = nearest(best_y, candidate, *entity, dy < 0.0);
        }
    }

    let mut result = CollisionResult::default();
    let mut position = rect.pos;
    if let Some((x, entity)) = best_x {
        position.x = x;
        if dx < 0.0 {
            result.left = Some(entity);
        } else {
            result.right = Some(entity);
        }
    }
    if let Some((y, entity)) = best_y {
        position.y = y;
        if dy < 0.0 {
            result.top = Some(entity);
        } else {
            result.bottom = Some(entity);
        }
    }

    Resolution { result, position }
}
