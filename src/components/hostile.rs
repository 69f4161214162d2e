//! Hostile actors.
//!
//! Every hostile carries a [`Hostile`] (health, activation and the bookkeeping
//! for the shared damage rules) plus exactly one variant component that drives
//! its own behaviour. The boss also carries a [`Hostile`] so that damage
//! intake is shared; it is spawned already [`Activation::Active`].
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::components::timer::{CooldownTimer, Timer};

/// Total length of the spawn flicker.
pub const FLICKER_DURATION: f32 = 0.7;
/// Tint toggle interval during the flicker.
pub const FLICKER_INTERVAL: f32 = 0.2;
/// Minimum time between two sawblade hits on the same hostile.
pub const SAWBLADE_HIT_COOLDOWN: f32 = 0.1;

pub const FILTH_HEALTH: i32 = 100;
pub const FILTH_SPEED: f32 = 30.0;
pub const FILTH_RETARGET: f32 = 0.5;
pub const FILTH_JUMP_VELOCITY: f32 = -70.0;
pub const FILTH_JUMP_RANGE: f32 = 100.0;
pub const FILTH_CONTACT_DAMAGE: i32 = 100;
pub const FILTH_CONTACT_COOLDOWN: f32 = 1.0;

pub const SOLDIER_HEALTH: i32 = 100;
pub const SOLDIER_CHARGE: f32 = 3.0;
pub const SOLDIER_FIREBALL_SPEED: f32 = 30.0;

pub const VIRTUE_HEALTH: i32 = 1000;
pub const VIRTUE_SPEED: f32 = 3.0;
pub const VIRTUE_STRIKE_TIME: f32 = 6.0;
/// The footprint stops following the player at this point of the cycle.
pub const VIRTUE_LOCK_TIME: f32 = 5.7;
pub const VIRTUE_CYCLE: f32 = 8.0;
pub const VIRTUE_STRIKE_DAMAGE: i32 = 500;
pub const VIRTUE_STRIKE_WIDTH: f32 = 32.0;

pub const MAURICE_HEALTH: i32 = 500;
pub const MAURICE_SPEED: f32 = 2.0;
pub const MAURICE_FIREBALL_SPEED: f32 = 40.0;
/// Volley shot times within one cycle; the last one closes the cycle.
pub const MAURICE_VOLLEY: [f32; 3] = [3.0, 3.25, 3.5];
/// Wing rotation in degrees per second.
pub const WING_SPEED: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostileKind {
    Filth,
    Soldier,
    Virtue,
    Maurice,
    Gabriel,
}

impl HostileKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Filth" => Some(HostileKind::Filth),
            "Soldier" => Some(HostileKind::Soldier),
            "Virtue" => Some(HostileKind::Virtue),
            "Maurice" => Some(HostileKind::Maurice),
            "Gabriel" => Some(HostileKind::Gabriel),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            HostileKind::Filth => "Filth",
            HostileKind::Soldier => "Soldier",
            HostileKind::Virtue => "Virtue",
            HostileKind::Maurice => "Maurice",
            HostileKind::Gabriel => "Gabriel",
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            HostileKind::Filth => FILTH_HEALTH,
            HostileKind::Soldier => SOLDIER_HEALTH,
            HostileKind::Virtue => VIRTUE_HEALTH,
            HostileKind::Maurice => MAURICE_HEALTH,
            HostileKind::Gabriel => crate::components::boss::BOSS_HEALTH,
        }
    }

    /// Default body size in pixels.
    pub fn size(&self) -> Vec2 {
        match self {
            HostileKind::Filth => Vec2::new(16.0, 16.0),
            HostileKind::Soldier => Vec2::new(12.0, 16.0),
            HostileKind::Virtue => Vec2::new(16.0, 16.0),
            HostileKind::Maurice => Vec2::new(20.0, 20.0),
            HostileKind::Gabriel => Vec2::new(24.0, 40.0),
        }
    }
}

/// Dormant until its spawner is entered, then a short flicker, then live.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    Dormant,
    Flickering {
        elapsed: f32,
        toggle: Timer,
        tinted: bool,
    },
    Active,
}

impl Activation {
    pub fn flicker() -> Self {
        Activation::Flickering {
            elapsed: 0.0,
            toggle: Timer::new(FLICKER_INTERVAL),
            tinted: false,
        }
    }

    /// Advance the flicker. Returns `true` on the frame it turns `Active`.
    pub fn advance(&mut self, dt: f32) -> bool {
        if let Activation::Flickering {
            elapsed,
            toggle,
            tinted,
        } = self
        {
            *elapsed += dt;
            if *elapsed >= FLICKER_DURATION {
                *self = Activation::Active;
                return true;
            }
            if toggle.tick(dt) {
                *tinted = !*tinted;
            }
        }
        false
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Activation::Active)
    }

    pub fn is_dormant(&self) -> bool {
        matches!(self, Activation::Dormant)
    }

    /// Draw with the damage tint this frame.
    pub fn is_tinted(&self) -> bool {
        matches!(self, Activation::Flickering { tinted: true, .. })
    }
}

/// Shared hostile state.
#[derive(Component, Debug, Clone)]
pub struct Hostile {
    pub kind: HostileKind,
    pub health: i32,
    pub activation: Activation,
    /// Spawner volume that arms this hostile. `None` means armed from the start.
    pub spawner: Option<Entity>,
    /// Id of the last punch that landed.
    pub last_punch: Option<u32>,
    pub sawblade_cooldown: CooldownTimer,
}

impl Hostile {
    pub fn new(kind: HostileKind, spawner: Option<Entity>) -> Self {
        Hostile {
            kind,
            health: kind.max_health(),
            activation: Activation::Dormant,
            spawner,
            last_punch: None,
            sawblade_cooldown: CooldownTimer::new(SAWBLADE_HIT_COOLDOWN),
        }
    }

    pub fn active(mut self) -> Self {
        self.activation = Activation::Active;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply the punch `id` unless it already landed.
    pub fn punch(&mut self, id: u32, damage: i32) -> bool {
        if self.last_punch == Some(id) {
            return false;
        }
        self.last_punch = Some(id);
        self.health -= damage;
        true
    }

    /// Apply a sawblade hit unless one landed in the last 0.1 s.
    pub fn saw(&mut self, damage: i32) -> bool {
        if self.sawblade_cooldown.is_cooling_down {
            return false;
        }
        self.health -= damage;
        self.sawblade_cooldown.start();
        true
    }
}

/// Melee jumper.
#[derive(Component, Debug, Clone)]
pub struct Filth {
    /// Current horizontal drift direction (-1 or 1).
    pub heading: f32,
    pub retarget: Timer,
    pub grounded: bool,
    pub contact: CooldownTimer,
}

impl Filth {
    pub fn new() -> Self {
        Filth {
            heading: 1.0,
            retarget: Timer::new(FILTH_RETARGET),
            grounded: true,
            contact: CooldownTimer::new(FILTH_CONTACT_COOLDOWN),
        }
    }
}

impl Default for Filth {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranged unit.
#[derive(Component, Debug, Clone)]
pub struct Soldier {
    pub charge: CooldownTimer,
}

impl Soldier {
    pub fn new() -> Self {
        Soldier {
            charge: CooldownTimer::new(SOLDIER_CHARGE),
        }
    }
}

impl Default for Soldier {
    fn default() -> Self {
        Self::new()
    }
}

/// Flying striker.
#[derive(Component, Debug, Clone, Default)]
pub struct Virtue {
    /// Seconds into the current strike cycle.
    pub cycle: f32,
    /// Centre x of the strike footprint.
    pub strike_x: f32,
    /// The strike of this cycle has been resolved.
    pub struck: bool,
}

impl Virtue {
    /// Strike footprint: 32 px wide column, `height` tall, centred on
    /// `strike_x` and on `center_y`.
    pub fn footprint(&self, center_y: f32, height: f32) -> crate::components::boxcollider::Rect {
        crate::components::boxcollider::Rect::from_center(
            Vec2::new(self.strike_x, center_y),
            Vec2::new(VIRTUE_STRIKE_WIDTH, height),
        )
    }

    /// Opacity of the footprint in `0..=1` for the current cycle.
    pub fn strike_alpha(&self) -> f32 {
        if self.cycle < VIRTUE_STRIKE_TIME {
            0.8 * self.cycle / VIRTUE_STRIKE_TIME
        } else {
            (1.0 - (self.cycle - VIRTUE_STRIKE_TIME)).clamp(0.0, 1.0)
        }
    }
}

/// Floating volley shooter.
#[derive(Component, Debug, Clone, Default)]
pub struct Maurice {
    pub cycle: f32,
    /// Volley shots already fired this cycle.
    pub fired: usize,
}

impl Maurice {
    /// Advance the volley clock and return how many fireballs to launch.
    pub fn advance(&mut self, dt: f32) -> usize {
        self.cycle += dt;
        let mut shots = 0;
        while self.fired < MAURICE_VOLLEY.len() && self.cycle > MAURICE_VOLLEY[self.fired] {
            self.fired += 1;
            shots += 1;
        }
        if self.fired == MAURICE_VOLLEY.len() {
            self.cycle = 0.0;
            self.fired = 0;
        }
        shots
    }
}

/// Two decorative wings rotating in opposite directions, in degrees.
#[derive(Component, Debug, Clone, Copy)]
pub struct Wings {
    pub first: f32,
    pub second: f32,
}

impl Wings {
    pub fn new() -> Self {
        Wings {
            first: 45.0,
            second: -45.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.first = (self.first + WING_SPEED * dt).rem_euclid(360.0);
        self.second = (self.second - WING_SPEED * dt).rem_euclid(360.0);
    }
}

impl Default for Wings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flicker_ends_after_duration() {
        let mut a = Activation::flicker();
        let mut tints = 0;
        let mut frames = 0;
        while !a.advance(0.05) {
            if a.is_tinted() {
                tints += 1;
            }
            frames += 1;
            assert!(frames < 100);
        }
        assert!(a.is_active());
        assert!(tints > 0);
        assert!(!a.is_tinted());
    }

    #[test]
    fn punch_lands_once_per_id() {
        let mut h = Hostile::new(HostileKind::Filth, None);
        assert!(h.punch(1, 40));
        assert!(!h.punch(1, 40));
        assert!(h.punch(2, 40));
        assert_eq!(h.health, 20);
    }

    #[test]
    fn sawblade_hits_are_rate_limited() {
        let mut h = Hostile::new(HostileKind::Virtue, None);
        assert!(h.saw(30));
        assert!(!h.saw(30));
        h.sawblade_cooldown.update(0.11);
        assert!(h.saw(30));
        assert_eq!(h.health, VIRTUE_HEALTH - 60);
    }

    #[test]
    fn maurice_volley_is_three_then_pause() {
        let mut m = Maurice::default();
        let mut shots = Vec::new();
        for frame in 0..80 {
            let n = m.advance(0.05);
            if n > 0 {
                shots.push((frame, n));
            }
        }
        let total: usize = shots.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 3);
        assert!(shots.first().map(|(f, _)| *f >= 59).unwrap_or(false));
    }
}
