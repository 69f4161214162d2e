//! Colours and the tint component.
//!
//! [`Rgba`] is the colour value carried by draw commands. [`Tint`] colours an
//! entity's body when no texture is available and modulates its sprite when
//! one is.

use bevy_ecs::prelude::Component;

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const RED: Rgba = Rgba::new(230, 41, 55, 255);
    pub const BLUE: Rgba = Rgba::new(0, 121, 241, 255);

    /// Copy with alpha replaced; `alpha` is clamped into `0..=255`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Rgba {
            a: alpha.clamp(0.0, 255.0) as u8,
            ..self
        }
    }

    /// Component-wise multiply.
    pub fn multiply(&self, other: Rgba) -> Rgba {
        Rgba::new(
            ((self.r as u16 * other.r as u16) / 255) as u8,
            ((self.g as u16 * other.g as u16) / 255) as u8,
            ((self.b as u16 * other.b as u16) / 255) as u8,
            ((self.a as u16 * other.a as u16) / 255) as u8,
        )
    }

    /// Linear blend toward `other` by `t` in `0..=1`.
    pub fn lerp(&self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Game palette.
pub mod palette {
    use super::Rgba;

    pub const BLACK: Rgba = Rgba::new(0x20, 0x20, 0x20, 255);
    pub const GREY: Rgba = Rgba::new(0x39, 0x39, 0x39, 255);
    pub const PURPLE: Rgba = Rgba::new(0x72, 0x59, 0x56, 255);
    pub const YELLOW: Rgba = Rgba::new(0xf6, 0xcd, 0x26, 255);
    pub const RED: Rgba = Rgba::new(0x5a, 0x27, 0x21, 255);
    pub const RED2: Rgba = Rgba::new(0x53, 0x18, 0x11, 255);
}

/// Colour used for an entity's body.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Tint {
    pub color: Rgba,
}

impl Tint {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Rgba::new(r, g, b, a),
        }
    }
}

impl From<Rgba> for Tint {
    fn from(color: Rgba) -> Self {
        Tint { color }
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self { color: Rgba::WHITE }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_with_white_is_identity() {
        let c = Rgba::new(100, 150, 200, 255);
        assert_eq!(c.multiply(Rgba::WHITE), c);
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(400.0).a, 255);
        assert_eq!(Rgba::WHITE.with_alpha(-3.0).a, 0);
        assert_eq!(Rgba::WHITE.with_alpha(70.0).a, 70);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgba::WHITE;
        let b = palette::YELLOW;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
