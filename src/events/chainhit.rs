//! Ricochet hit feedback.
//!
//! When a bullet with a redirect history hits a hostile, a [`ChainHitEvent`]
//! is triggered with the full trail. The observer spawns the chain line and
//! the global hit flash; the flash suspends the simulation while it lasts.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::effects::{CHAIN_LINE_DURATION, ChainLine, FLASH_DURATION, Fade, Flash};

/// Trail of a chained hit: player position, each redirect point, then the
/// hit position.
#[derive(Event, Debug, Clone)]
pub struct ChainHitEvent {
    pub points: Vec<Vec2>,
}

pub fn observe_chain_hit(trigger: On<ChainHitEvent>, mut commands: Commands) {
    let points = trigger.event().points.clone();
    debug!("Chain hit through {} points", points.len());
    commands.spawn((ChainLine { points }, Fade::new(CHAIN_LINE_DURATION)));
    commands.spawn((Flash, Fade::new(FLASH_DURATION)));
}
