use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key (the level tag it was built from)
/// and its size in world units.
///
/// Renderers that have no texture for `tex_key` fall back to a filled rect
/// in the entity's [`Tint`](crate::components::tint::Tint).
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub flip_h: bool,
}

impl Sprite {
    pub fn new(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Sprite {
            tex_key: tex_key.into(),
            width,
            height,
            flip_h: false,
        }
    }
}
