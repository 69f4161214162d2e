//! Player state.
//!
//! The player body is a regular `MapPosition` + `BoxCollider` + `Gravity`
//! entity; [`Player`] holds everything else the controller needs between
//! frames: facing, jump budget, health, the equipped weapon handle, the punch
//! window and the coin stock.
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::timer::{CooldownTimer, Timer};

pub const PLAYER_SIZE: Vec2 = Vec2::new(12.0, 16.0);
pub const JUMP_VELOCITY: f32 = -150.0;
pub const MAX_HORIZONTAL_SPEED: f32 = 40.0;
pub const MAX_HEALTH: i32 = 1000;
pub const MAX_JUMPS: u8 = 2;
/// Extra downward drift while sliding, in px/s.
pub const SLIDE_DRIFT: f32 = 100.0;

/// Length of the active punch window.
pub const PUNCH_WINDOW: f32 = 0.1;
pub const PUNCH_COOLDOWN: f32 = 0.4;
pub const PUNCH_RADIUS: f32 = 32.0;
pub const PUNCH_DAMAGE: i32 = 100;
/// Distance from the player's centre to the punch point.
pub const PUNCH_REACH: f32 = 8.0;
/// Speed multiplier applied to a punched-back fireball.
pub const PARRY_SPEED_FACTOR: f32 = 2.0;

pub const MAX_COINS: u8 = 4;
pub const COIN_RECHARGE: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Component, Debug, Clone)]
pub struct Player {
    pub facing: Facing,
    pub sliding: bool,
    /// Jumps used since the last ground contact.
    pub jump_count: u8,
    pub health: i32,
    pub equipped: Option<Entity>,
    /// Active punch window.
    pub punch_timer: CooldownTimer,
    /// Gate between punches.
    pub punch_cooldown: CooldownTimer,
    /// Increments on every punch; hostiles remember the last id that hit them.
    pub punch_id: u32,
    /// Screen-space aim angle captured when the punch started.
    pub punch_angle: f32,
    pub coins: u8,
    pub coin_recharge: Timer,
    /// Set by a hell-pit; suspends all player control.
    pub frozen: bool,
}

impl Player {
    pub fn new() -> Self {
        Player {
            facing: Facing::Right,
            sliding: false,
            jump_count: 0,
            health: MAX_HEALTH,
            equipped: None,
            punch_timer: CooldownTimer::new(PUNCH_WINDOW),
            punch_cooldown: CooldownTimer::new(PUNCH_COOLDOWN),
            punch_id: 0,
            punch_angle: 0.0,
            coins: MAX_COINS,
            coin_recharge: Timer::new(COIN_RECHARGE),
            frozen: false,
        }
    }

    pub fn is_punching(&self) -> bool {
        self.punch_timer.is_cooling_down
    }

    /// Subtract `amount` from health. Health may go below zero; the death
    /// check treats anything `<= 0` as dead.
    pub fn damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    /// Add `amount` of health, capped at [`MAX_HEALTH`].
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(MAX_HEALTH);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
