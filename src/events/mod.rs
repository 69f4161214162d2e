//! Event types and observers.
//!
//! Submodules:
//! - [`chainhit`] – ricochet hit feedback (chain line and hit flash)
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`level`] – level completion, progress saving and reload
//! - [`switchdebug`] – toggle debug overlays on/off
pub mod chainhit;
pub mod gamestate;
pub mod level;
pub mod switchdebug;
