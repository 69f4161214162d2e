//! ECS components for entities.
//!
//! Every entity category of the game (player, weapons, projectiles, hostiles,
//! the boss, environment pieces and cosmetic effects) is a combination of the
//! components defined here. Bodies share [`mapposition::MapPosition`] and
//! [`boxcollider::BoxCollider`]; the category component on top decides which
//! systems pick the entity up.
//!
//! Submodules overview:
//! - [`boss`] – boss controller and its attack state machine
//! - [`boxcollider`] – rectangles and the body collider
//! - [`collider`] – solid markers and the axis-separated movement resolver
//! - [`effects`] – hit flash, chain lines, blood splatters, pop-ups
//! - [`environment`] – tiles, spawners, portals, hazards, decorations
//! - [`gravity`] – vertical velocity accumulator
//! - [`hostile`] – shared hostile state and the four hostile variants
//! - [`mapposition`] – world-space position and vector helpers
//! - [`persistent`] – marker for entities that survive level teardown
//! - [`player`] – player controller state
//! - [`projectile`] – bullets, coins, cores, magnets, sawblades, fireballs, swords
//! - [`sprite`] – texture key and size for drawing
//! - [`timer`] – repeating and one-shot time gates
//! - [`tint`] – colours
//! - [`ttl`] – lifetime countdown
//! - [`weapon`] – pick-up weapons

pub mod boss;
pub mod boxcollider;
pub mod collider;
pub mod effects;
pub mod environment;
pub mod gravity;
pub mod hostile;
pub mod mapposition;
pub mod persistent;
pub mod player;
pub mod projectile;
pub mod sprite;
pub mod timer;
pub mod tint;
pub mod ttl;
pub mod weapon;
