//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, input, the camera, the
//! collider registry, level and save storage, and the frame draw list.
//!
//! Overview
//! - `camera2d` – smoothed viewport used for world/screen transforms
//! - `colliders` – registry of blocking bodies in resolution order
//! - `debugmode` – presence toggles debug overlays
//! - `drawlist` – screen-space draw commands and the renderer trait
//! - `gameconfig` – INI-backed settings
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame input snapshot and action state
//! - `level` – level files, the level library and the sprite cache
//! - `rng` – seedable random source
//! - `save` – persisted progress and its storage backends
//! - `session` – current level number, checkpoint and level bounds
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `worldtime` – simulation time and delta
pub mod camera2d;
pub mod colliders;
pub mod debugmode;
pub mod drawlist;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod level;
pub mod rng;
pub mod save;
pub mod session;
pub mod systemsstore;
pub mod worldtime;
