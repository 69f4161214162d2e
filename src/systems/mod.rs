//! Game systems.
//!
//! This module groups all ECS systems that advance the simulation, sample
//! input and build the frame's draw list. The order they run in is fixed by
//! [`build_update_schedule`](crate::game::build_update_schedule).
//!
//! Submodules overview
//! - [`boss`] – Gabriel's drift, re-roll and attacks
//! - [`collision`] – temporary blocker list and resolver helpers
//! - [`effects`] – fade-out of cosmetic effects
//! - [`environment`] – hell-pits, portals, gravity wells, checkpoints, blood
//! - [`gamestate`] – check for pending state transitions and run conditions
//! - [`hostiles`] – damage intake, death and per-variant behaviour
//! - [`input`] – fold the frame's input sample into [`crate::resources::input::InputState`]
//! - [`player`] – movement, punch, coins and death
//! - [`projectiles`] – spawning and flight of every projectile kind
//! - [`render`] – build the [`crate::resources::drawlist::DrawList`]
//! - [`spawner`] – spawner latching and the spawn flicker
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – lifetime countdown
//! - [`weapons`] – pickup, switching and firing

pub mod boss;
pub mod collision;
pub mod effects;
pub mod environment;
pub mod gamestate;
pub mod hostiles;
pub mod input;
pub mod player;
pub mod projectiles;
pub mod render;
pub mod spawner;
pub mod time;
pub mod ttl;
pub mod weapons;
