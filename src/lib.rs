//! Angelfall game library.
//!
//! The whole simulation lives here: ECS components, resources, systems and
//! events, plus [`game`] which assembles them into a world and a frame
//! schedule. The windowed binary and the integration tests are both thin
//! drivers over [`game::build_world`], [`game::build_update_schedule`] and
//! [`game::step`].

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
