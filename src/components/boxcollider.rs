//! Axis-aligned rectangles and the body collider component.
//!
//! [`Rect`] is the plain geometry value every overlap test in the game works
//! with. [`BoxCollider`] is attached to entities next to a
//! [`MapPosition`](crate::components::mapposition::MapPosition) and turns that
//! position into a world-space [`Rect`].
use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Axis-aligned rectangle in world or screen space (top-left + size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Rect {
            pos: center - size * 0.5,
            size,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
    pub fn top(&self) -> f32 {
        self.pos.y
    }
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
    pub fn width(&self) -> f32 {
        self.size.x
    }
    pub fn height(&self) -> f32 {
        self.size.y
    }
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Copy of this rect translated by `(dx, dy)`.
    pub fn moved(&self, dx: f32, dy: f32) -> Self {
        Rect {
            pos: self.pos + Vec2::new(dx, dy),
            size: self.size,
        }
    }

    /// Strict overlap test; rects that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// Rectangular body attached to an entity.
///
/// The world-space rect is `position + offset .. position + offset + size`.
/// Most bodies use a zero offset so that `MapPosition` is the top-left
/// corner; projectiles that track their centre use `offset = -size / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Collider whose position is its centre.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(width, height).with_offset(Vec2::new(-width * 0.5, -height * 0.5))
    }

    /// Modify BoxCollider with given size and offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space rect of this collider for an entity at `position`.
    pub fn rect(&self, position: Vec2) -> Rect {
        Rect {
            pos: position + self.offset,
            size: self.size,
        }
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.rect(position).overlaps(&other.rect(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 14.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 26.0);
        assert_eq!(r.center(), Vec2::new(12.0, 23.0));
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 16.0, 16.0);
        let b = Rect::new(16.0, 0.0, 16.0, 16.0);
        assert!(!a.overlaps(&b));
        assert!(a.moved(0.5, 0.0).overlaps(&b));
    }

    #[test]
    fn centered_collider_rect() {
        let c = BoxCollider::centered(10.0, 10.0);
        let r = c.rect(Vec2::new(50.0, 50.0));
        assert_eq!(r.pos, Vec2::new(45.0, 45.0));
        assert_eq!(r.center(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn from_center_round_trips_center() {
        let r = Rect::from_center(Vec2::new(8.0, 8.0), Vec2::new(4.0, 2.0));
        assert_eq!(r.pos, Vec2::new(6.0, 7.0));
        assert!(r.contains_point(Vec2::new(8.0, 8.0)));
        assert!(!r.contains_point(Vec2::new(11.0, 8.0)));
    }
}
