//! Shared 2D camera resource.
//!
//! The camera is a plain viewport offset: world-space geometry is turned into
//! screen space by subtracting [`Camera2D::offset`]. Systems that spawn
//! projectiles use [`Camera2D::screen_to_world`] to aim at the pointer.

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boxcollider::Rect;

/// Smoothed viewport over the level.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// World position of the top-left corner of the view.
    pub offset: Vec2,
    /// Logical screen size.
    pub size: Vec2,
    /// Level extents the view is clamped to.
    pub bounds: Option<Rect>,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Camera2D {
            offset: Vec2::ZERO,
            size: Vec2::new(width, height),
            bounds: None,
        }
    }

    /// Move the view so that `target` drifts to its centre.
    ///
    /// `smoothing` is the fraction of the remaining distance covered this
    /// frame; `1.0` snaps. The screen half-size is truncated to whole pixels.
    pub fn attach_to(&mut self, target: Vec2, smoothing: f32) {
        let half = (self.size * 0.5).floor();
        self.offset += (target - self.offset - half) * smoothing;
        self.bound();
    }

    /// Clamp the offset so the view stays inside [`Camera2D::bounds`].
    pub fn bound(&mut self) {
        let Some(bounds) = self.bounds else {
            return;
        };
        // Left/top win when the level is smaller than the screen.
        self.offset.x = self.offset.x.min(bounds.right() - self.size.x).max(bounds.left());
        self.offset.y = self.offset.y.min(bounds.bottom() - self.size.y).max(bounds.top());
    }

    pub fn transform(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        Rect {
            pos: rect.pos - self.offset,
            size: rect.size,
        }
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        screen + self.offset
    }

    /// Visible world area.
    pub fn view(&self) -> Rect {
        Rect {
            pos: self.offset,
            size: self.size,
        }
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Camera2D::new(480.0, 270.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_centres_the_target() {
        let mut cam = Camera2D::new(480.0, 270.0);
        cam.attach_to(Vec2::new(1000.0, 500.0), 1.0);
        assert_eq!(cam.offset, Vec2::new(760.0, 365.0));
        assert_eq!(cam.transform(Vec2::new(1000.0, 500.0)), Vec2::new(240.0, 135.0));
    }

    #[test]
    fn view_is_clamped_to_bounds() {
        let mut cam = Camera2D::new(480.0, 270.0);
        cam.bounds = Some(Rect::new(0.0, 0.0, 960.0, 480.0));
        cam.attach_to(Vec2::new(10.0, 10.0), 1.0);
        assert_eq!(cam.offset, Vec2::ZERO);
        cam.attach_to(Vec2::new(5000.0, 5000.0), 1.0);
        assert_eq!(cam.offset, Vec2::new(480.0, 210.0));
    }

    #[test]
    fn half_smoothing_covers_half_the_distance() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.attach_to(Vec2::new(150.0, 50.0), 0.5);
        assert_eq!(cam.offset, Vec2::new(50.0, 0.0));
    }
}
