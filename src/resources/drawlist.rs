//! Frame draw list and the renderer seam.
//!
//! Render systems never touch a graphics API. They append screen-space
//! [`DrawCommand`]s to the [`DrawList`] resource, in the fixed category order
//! of the render pass, and the frontend replays the list through a
//! [`Renderer`] once the schedule has run.
use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::boxcollider::Rect;
use crate::components::tint::Rgba;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    /// Textured quad keyed by entity tag. `rotation` is in degrees, around the centre.
    Sprite {
        key: String,
        rect: Rect,
        rotation: f32,
        flip_h: bool,
        tint: Rgba,
    },
    Rect {
        rect: Rect,
        color: Rgba,
        filled: bool,
    },
    Line {
        from: Vec2,
        to: Vec2,
        thickness: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
        filled: bool,
    },
    /// Outline arc; angles in degrees, clockwise from +x.
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Rgba,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Rgba,
    },
}

/// Consumer of a frame's draw commands.
pub trait Renderer {
    fn draw(&mut self, command: &DrawCommand);
}

#[derive(Resource, Debug, Default, Clone)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn rect(&mut self, rect: Rect, color: Rgba, filled: bool) {
        self.push(DrawCommand::Rect {
            rect,
            color,
            filled,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Rgba) {
        self.push(DrawCommand::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: Rgba, filled: bool) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            color,
            filled,
        });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Rgba) {
        self.push(DrawCommand::Text {
            text: text.into(),
            pos,
            size,
            color,
        });
    }

    /// Replay every command in order.
    pub fn render(&self, renderer: &mut impl Renderer) {
        for command in &self.commands {
            renderer.draw(command);
        }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
