//! Cosmetic effects.
//!
//! These keep running while a [`Flash`] suspends the simulation. Each one
//! carries a [`Fade`] that the effects system counts down; the entity is
//! despawned when the fade completes.
use bevy_ecs::prelude::Component;
use glam::Vec2;

pub const FLASH_DURATION: f32 = 0.1;
pub const CHAIN_LINE_DURATION: f32 = 0.5;

pub const SPLATTER_RADIUS: f32 = 32.0;
pub const SPLATTER_DURATION: f32 = 0.7;
pub const SPLATTER_HEAL: i32 = 100;

pub const POPUP_GROW: f32 = 0.1;
pub const POPUP_DURATION: f32 = 1.5;

/// Linear fade-out.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub remaining: f32,
    pub duration: f32,
}

impl Fade {
    pub fn new(duration: f32) -> Self {
        Fade {
            remaining: duration,
            duration,
        }
    }

    /// Count down; returns `true` once the fade has finished.
    pub fn update(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.remaining <= 0.0
    }

    /// Opacity factor, 1 at the start and 0 at the end.
    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.duration - self.remaining
    }
}

/// Full-screen hit flash. Its presence freezes the simulation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Flash;

/// Trail through a ricochet chain, in world space.
#[derive(Component, Debug, Clone)]
pub struct ChainLine {
    pub points: Vec<Vec2>,
}

/// Blood left by a dead hostile. `MapPosition` is its centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct BloodSplatter {
    pub radius: f32,
    pub heal: i32,
    /// The heal has been collected.
    pub used: bool,
}

impl BloodSplatter {
    pub fn new() -> Self {
        BloodSplatter {
            radius: SPLATTER_RADIUS,
            heal: SPLATTER_HEAL,
            used: false,
        }
    }
}

impl Default for BloodSplatter {
    fn default() -> Self {
        Self::new()
    }
}

/// "Checkpoint!" text above a checkpoint that was just touched.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CheckpointPopup;

impl CheckpointPopup {
    /// Text scale for `elapsed` seconds: grows to 1 over the first 0.1 s.
    pub fn scale(elapsed: f32) -> f32 {
        (elapsed / POPUP_GROW).clamp(0.0, 1.0)
    }

    /// Opacity: full while growing, then fading until the end.
    pub fn alpha(elapsed: f32) -> f32 {
        if elapsed <= POPUP_GROW {
            1.0
        } else {
            (1.0 - (elapsed - POPUP_GROW) / (POPUP_DURATION - POPUP_GROW)).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_completes_and_alpha_drops() {
        let mut f = Fade::new(0.5);
        assert_eq!(f.alpha(), 1.0);
        assert!(!f.update(0.25));
        assert!((f.alpha() - 0.5).abs() < 1e-6);
        assert!(f.update(0.3));
        assert_eq!(f.alpha(), 0.0);
    }

    #[test]
    fn popup_grows_then_fades() {
        assert_eq!(CheckpointPopup::scale(0.05), 0.5);
        assert_eq!(CheckpointPopup::scale(1.0), 1.0);
        assert_eq!(CheckpointPopup::alpha(0.1), 1.0);
        assert_eq!(CheckpointPopup::alpha(1.5), 0.0);
    }
}
