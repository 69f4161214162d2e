//! Projectiles and blasts.
//!
//! Every projectile is a plain ballistic body: a `MapPosition`, a
//! `BoxCollider`, a [`Ttl`](crate::components::ttl::Ttl) for its lifetime and
//! one of the components below for its flight rules. All live projectiles are
//! found by querying these components; no weapon keeps its own list.
//!
//! Submodules of behaviour live in [`crate::systems::projectiles`].
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::gravity::WORLD_GRAVITY;
use crate::components::mapposition::direction;

pub const BULLET_SIZE: f32 = 10.0;
pub const BULLET_SPEED: f32 = 200.0;
pub const BULLET_LIFETIME: f32 = 1.0;
pub const PISTOL_DAMAGE: i32 = 200;

pub const PELLET_COUNT: usize = 5;
pub const PELLET_SPREAD: f32 = std::f32::consts::PI / 128.0;
pub const PELLET_DAMAGE: i32 = 70;

pub const COIN_SIZE: f32 = 8.0;
pub const COIN_SPEED: f32 = 50.0;
pub const COIN_LIFETIME: f32 = 3.0;
pub const COIN_GRAVITY: f32 = WORLD_GRAVITY / 10.0;

pub const CORE_SIZE: f32 = 6.0;
pub const CORE_MAX_SPEED: f32 = 100.0;
pub const CORE_LIFETIME: f32 = 0.5;
pub const CORE_GRAVITY: f32 = WORLD_GRAVITY / 4.0;

pub const EXPLOSION_RADIUS: f32 = 80.0;
pub const EXPLOSION_DAMAGE: i32 = 500;
pub const EXPLOSION_FADE: f32 = 2.0;

pub const MAGNET_SIZE: f32 = 8.0;
pub const MAGNET_SPEED: f32 = 50.0;
pub const MAGNET_LIFETIME: f32 = 7.0;
pub const MAGNET_GRAVITY: f32 = WORLD_GRAVITY / 8.0;
/// Sawblades within this distance of a magnet start orbiting it.
pub const MAGNET_ORBIT_RADIUS: f32 = 48.0;

pub const SAWBLADE_SIZE: f32 = 8.0;
pub const SAWBLADE_SPEED: f32 = 200.0;
pub const SAWBLADE_LIFETIME: f32 = 0.2;
pub const SAWBLADE_DAMAGE: i32 = 30;
/// Orbit angular velocity in rad/s.
pub const SAWBLADE_ORBIT_SPEED: f32 = 1.0;

pub const FIREBALL_SIZE: f32 = 8.0;
pub const FIREBALL_DAMAGE: i32 = 100;

pub const FALLING_SWORD_SIZE: Vec2 = Vec2::new(6.0, 16.0);
pub const FALLING_SWORD_GRAVITY: f32 = WORLD_GRAVITY * 2.0;
pub const FALLING_SWORD_DAMAGE: i32 = 100;
/// Falling swords vanish this far below the level bottom.
pub const FALLING_SWORD_DESPAWN_MARGIN: f32 = 200.0;

/// How a bullet's damage grows on each coin redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainScaling {
    /// `damage += base_damage`
    Additive,
    /// `damage *= 2`
    Doubling,
}

/// Player bullet or shotgun pellet. `MapPosition` is its centre.
#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub radians: f32,
    pub speed: f32,
    pub damage: i32,
    pub base_damage: i32,
    pub scaling: ChainScaling,
    /// Entity chosen by the last redirect; followed while it lives.
    pub target_entity: Option<Entity>,
    /// Homing point: the target's last known centre.
    pub target: Option<Vec2>,
    /// Redirect points in order.
    pub chain: SmallVec<[Vec2; 4]>,
}

impl Bullet {
    pub fn new(radians: f32, speed: f32, damage: i32, scaling: ChainScaling) -> Self {
        Bullet {
            radians,
            speed,
            damage,
            base_damage: damage,
            scaling,
            target_entity: None,
            target: None,
            chain: SmallVec::new(),
        }
    }

    /// Aim at `target`, currently centred on `point`, scale damage and
    /// record the redirect.
    pub fn redirect(&mut self, from: Vec2, target: Entity, point: Vec2) {
        self.target_entity = Some(target);
        self.target = Some(point);
        self.radians = crate::components::mapposition::angle_to(from, point);
        self.damage = match self.scaling {
            ChainScaling::Additive => self.damage + self.base_damage,
            ChainScaling::Doubling => self.damage * 2,
        };
        self.chain.push(point);
    }

    /// Drop the homing target and fly straight on.
    pub fn release_target(&mut self) {
        self.target_entity = None;
        self.target = None;
    }
}

/// Tossed coin; bullets that touch it get redirected. `MapPosition` is its centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct Coin {
    pub velocity: Vec2,
}

/// Charged shotgun core; bursts into an [`Explosion`]. `MapPosition` is its centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct CoreEject {
    pub velocity: Vec2,
    /// Seconds until it bursts on its own.
    pub remaining: f32,
}

/// Blast area. `MapPosition` is its centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct Explosion {
    pub radius: f32,
    /// Damage has been dealt.
    pub detonated: bool,
}

impl Explosion {
    pub fn new() -> Self {
        Explosion {
            radius: EXPLOSION_RADIUS,
            detonated: false,
        }
    }
}

impl Default for Explosion {
    fn default() -> Self {
        Self::new()
    }
}

/// Magnet that sticks to the first body it touches.
#[derive(Component, Debug, Clone, Copy)]
pub struct Magnet {
    pub velocity: Vec2,
    /// Anchor body and the magnet's offset from the anchor's `MapPosition`.
    pub anchor: Option<(Entity, Vec2)>,
}

/// Spinning blade; flies straight or orbits a magnet.
#[derive(Component, Debug, Clone, Copy)]
pub struct Sawblade {
    pub radians: f32,
    pub speed: f32,
    pub damage: i32,
    pub magnet: Option<Entity>,
}

/// Hostile projectile. `boosted` marks one punched back by the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct Fireball {
    pub radians: f32,
    pub speed: f32,
    pub boosted: bool,
    /// Re-aims at the player every frame until boosted.
    pub homing: bool,
}

impl Fireball {
    pub fn new(radians: f32, speed: f32) -> Self {
        Fireball {
            radians,
            speed,
            boosted: false,
            homing: false,
        }
    }

    pub fn homing(mut self) -> Self {
        self.homing = true;
        self
    }

    pub fn velocity(&self) -> Vec2 {
        direction(self.radians) * self.speed
    }
}

/// Sword dropped by the boss's rain attack.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FallingSword {
    pub velocity: f32,
}
