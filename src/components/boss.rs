//! Gabriel, the boss.
//!
//! The boss is a [`Hostile`](crate::components::hostile::Hostile) with a
//! [`Gabriel`] controller on top. The controller owns exactly one
//! [`BossAttack`] at a time. An attack value carries all of its own timing and
//! geometry and is replaced as a whole on every transition, so no state leaks
//! from one attack into the next.
//!
//! Transitions:
//! - the re-roll timer fires while the current attack is interruptible
//!   (`Fireballs` or `RainOfSwords`)
//! - `Dropping` lands on a tile or on the player
//! - `DualSwordToss` finishes its third phase
//!
//! `RainOfSwords` only becomes selectable once the boss is enraged.
use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::components::boxcollider::Rect;
use crate::components::mapposition::move_towards;
use crate::components::timer::{CooldownTimer, Timer};

pub const BOSS_HEALTH: i32 = 10_000;
pub const BOSS_SPEED: f32 = 1.5;
pub const SWAY_INTERVAL: f32 = 5.0;
pub const FIRST_REROLL: f32 = 3.0;
pub const REROLL_MIN: f32 = 3.0;
pub const REROLL_MAX: f32 = 7.0;

pub const DROP_WAIT: f32 = 0.2;
/// Height above the player's top the boss is placed at before a drop, in tiles.
pub const DROP_HEIGHT_TILES: f32 = 7.0;

pub const TOSS_PHASE_TIME: f32 = 0.8;
pub const TOSS_FLANK: f32 = 24.0;
pub const TOSS_ANCHOR: f32 = 64.0;
pub const TOSS_DAMAGE: i32 = 150;
pub const TOSS_SPIN: f32 = 12.0;

pub const BOSS_FIREBALL_SPEED: f32 = 100.0;
pub const BOSS_BURST: u8 = 3;

/// The boss is held this far below the level top during the rain.
pub const RAIN_HEIGHT: f32 = 32.0;
pub const RAIN_INTERVAL: f32 = 0.15;
pub const RAIN_SPREAD: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackKind {
    Dropping,
    DualSwordToss,
    Fireballs,
    RainOfSwords,
}

impl AttackKind {
    const CALM: [AttackKind; 3] = [AttackKind::Dropping, AttackKind::DualSwordToss, AttackKind::Fireballs];
    const ENRAGED: [AttackKind; 4] = [
        AttackKind::Dropping,
        AttackKind::DualSwordToss,
        AttackKind::Fireballs,
        AttackKind::RainOfSwords,
    ];

    /// Attacks the boss may pick from.
    pub fn options(enraged: bool) -> &'static [AttackKind] {
        if enraged { &Self::ENRAGED } else { &Self::CALM }
    }

    /// Uniform pick among [`AttackKind::options`].
    pub fn choose(rng: &mut fastrand::Rng, enraged: bool) -> AttackKind {
        let options = Self::options(enraged);
        options[rng.usize(..options.len())]
    }
}

/// Drop from above the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Dropping {
    pub waited: f32,
    pub positioned: bool,
    pub velocity: f32,
    pub acceleration: f32,
    pub damage: i32,
}

/// Three-phase sword toss. Sword positions are centres.
#[derive(Debug, Clone, PartialEq)]
pub struct SwordToss {
    /// 0, 1 or 2.
    pub phase: usize,
    pub elapsed: f32,
    /// Mirrored points past the player, captured when the attack starts.
    pub anchors: [Vec2; 2],
    /// Sword positions when the current phase started.
    pub from: [Vec2; 2],
    pub swords: [Vec2; 2],
    pub spin: f32,
    pub hitbox: Vec2,
    /// The player has been hit during the current phase.
    pub hit: bool,
}

impl SwordToss {
    pub fn new(boss_center: Vec2, player_center: Vec2, enraged: bool) -> Self {
        let flanks = flanks(boss_center);
        SwordToss {
            phase: 0,
            elapsed: 0.0,
            anchors: [
                player_center + Vec2::new(TOSS_ANCHOR, 0.0),
                player_center - Vec2::new(TOSS_ANCHOR, 0.0),
            ],
            from: flanks,
            swords: flanks,
            spin: 0.0,
            hitbox: if enraged {
                Vec2::new(12.0, 24.0)
            } else {
                Vec2::new(8.0, 24.0)
            },
            hit: false,
        }
    }

    /// Phase target for each sword. Phase 2 returns to the boss's current flanks.
    fn targets(&self, boss_center: Vec2) -> [Vec2; 2] {
        match self.phase {
            0 => self.anchors,
            1 => [self.anchors[1], self.anchors[0]],
            _ => flanks(boss_center),
        }
    }

    /// Move the swords. Returns `true` once the last phase has completed.
    pub fn advance(&mut self, dt: f32, boss_center: Vec2) -> bool {
        self.elapsed += dt;
        self.spin = (self.spin + TOSS_SPIN * dt).rem_euclid(std::f32::consts::TAU);
        let t = (self.elapsed / TOSS_PHASE_TIME).min(1.0);
        let targets = self.targets(boss_center);
        for i in 0..2 {
            self.swords[i] = self.from[i].lerp(targets[i], t);
        }
        if self.elapsed >= TOSS_PHASE_TIME {
            if self.phase == 2 {
                return true;
            }
            self.phase += 1;
            self.elapsed = 0.0;
            self.from = self.swords;
            self.hit = false;
        }
        false
    }

    pub fn sword_rects(&self) -> [Rect; 2] {
        [
            Rect::from_center(self.swords[0], self.hitbox),
            Rect::from_center(self.swords[1], self.hitbox),
        ]
    }
}

fn flanks(center: Vec2) -> [Vec2; 2] {
    [
        center - Vec2::new(TOSS_FLANK, 0.0),
        center + Vec2::new(TOSS_FLANK, 0.0),
    ]
}

/// Bursts of aimed fireballs.
#[derive(Debug, Clone, PartialEq)]
pub struct FireballVolley {
    pub shot: Timer,
    pub streak: CooldownTimer,
    pub fired: u8,
}

impl FireballVolley {
    pub fn new(enraged: bool) -> Self {
        let (shot, streak) = if enraged { (0.12, 0.6) } else { (0.2, 1.0) };
        FireballVolley {
            shot: Timer::new(shot),
            streak: CooldownTimer::new(streak),
            fired: 0,
        }
    }

    /// Returns `true` when a fireball should be launched this frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.streak.update(dt);
        if self.streak.is_cooling_down || !self.shot.tick(dt) {
            return false;
        }
        self.fired += 1;
        if self.fired >= BOSS_BURST {
            self.streak.start();
            self.fired = 0;
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwordRain {
    pub spawn: Timer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BossAttack {
    Dropping(Dropping),
    DualSwordToss(SwordToss),
    Fireballs(FireballVolley),
    RainOfSwords(SwordRain),
}

impl BossAttack {
    /// Fresh payload for `kind`, with the enrage parameters baked in.
    pub fn start(kind: AttackKind, boss_center: Vec2, player_center: Vec2, enraged: bool) -> Self {
        match kind {
            AttackKind::Dropping => BossAttack::Dropping(Dropping {
                waited: 0.0,
                positioned: false,
                velocity: 0.0,
                acceleration: if enraged { 60.0 } else { 30.0 },
                damage: if enraged { 200 } else { 100 },
            }),
            AttackKind::DualSwordToss => {
                BossAttack::DualSwordToss(SwordToss::new(boss_center, player_center, enraged))
            }
            AttackKind::Fireballs => BossAttack::Fireballs(FireballVolley::new(enraged)),
            AttackKind::RainOfSwords => BossAttack::RainOfSwords(SwordRain {
                spawn: Timer::new(RAIN_INTERVAL),
            }),
        }
    }

    pub fn kind(&self) -> AttackKind {
        match self {
            BossAttack::Dropping(_) => AttackKind::Dropping,
            BossAttack::DualSwordToss(_) => AttackKind::DualSwordToss,
            BossAttack::Fireballs(_) => AttackKind::Fireballs,
            BossAttack::RainOfSwords(_) => AttackKind::RainOfSwords,
        }
    }

    /// The periodic re-roll may replace this attack.
    pub fn interruptible(&self) -> bool {
        !matches!(self, BossAttack::Dropping(_) | BossAttack::DualSwordToss(_))
    }

    /// The drift toward the player is suspended.
    pub fn holds_position(&self) -> bool {
        matches!(self, BossAttack::Dropping(_) | BossAttack::RainOfSwords(_))
    }
}

#[derive(Component, Debug, Clone)]
pub struct Gabriel {
    pub enraged: bool,
    pub attack: BossAttack,
    pub reroll: Timer,
    pub sway_timer: Timer,
    /// Sway direction in radians, within `[-π/2, π/2]`.
    pub sway: f32,
}

impl Gabriel {
    pub fn new(attack: BossAttack, sway: f32) -> Self {
        Gabriel {
            enraged: false,
            attack,
            reroll: Timer::new(FIRST_REROLL),
            sway_timer: Timer::new(SWAY_INTERVAL),
            sway,
        }
    }

    /// Latch the enrage flag once health is at or below half. Never clears it.
    /// Returns `true` on the frame it latches.
    pub fn check_enrage(&mut self, health: i32) -> bool {
        if !self.enraged && health <= BOSS_HEALTH / 2 {
            self.enraged = true;
            return true;
        }
        false
    }

    /// Replace the current attack with a freshly rolled one.
    pub fn roll(&mut self, rng: &mut fastrand::Rng, boss_center: Vec2, player_center: Vec2) {
        let kind = AttackKind::choose(rng, self.enraged);
        self.attack = BossAttack::start(kind, boss_center, player_center, self.enraged);
    }

    /// One frame of drift: toward `target`, then along the sway direction.
    pub fn drift(&self, pos: Vec2, target: Vec2, dt: f32) -> Vec2 {
        let step = BOSS_SPEED * dt;
        let pos = move_towards(pos, target, step);
        pos + crate::components::mapposition::direction(self.sway) * step
    }
}

/// Random sway angle in `[-π/2, π/2]`, drawn in whole degrees.
pub fn roll_sway(rng: &mut fastrand::Rng) -> f32 {
    (rng.i32(-90..=90) as f32).to_radians()
}

/// Next re-roll interval.
pub fn roll_interval(rng: &mut fastrand::Rng) -> f32 {
    REROLL_MIN + rng.f32() * (REROLL_MAX - REROLL_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrage_is_one_way() {
        let mut g = Gabriel::new(BossAttack::start(AttackKind::Fireballs, Vec2::ZERO, Vec2::ZERO, false), 0.0);
        assert!(!g.check_enrage(5001));
        assert!(g.check_enrage(5000));
        assert!(!g.check_enrage(10_000));
        assert!(g.enraged);
    }

    #[test]
    fn rain_only_when_enraged() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            assert_ne!(AttackKind::choose(&mut rng, false), AttackKind::RainOfSwords);
        }
        let mut seen = false;
        for _ in 0..200 {
            seen |= AttackKind::choose(&mut rng, true) == AttackKind::RainOfSwords;
        }
        assert!(seen);
    }

    #[test]
    fn enraged_parameters_apply_to_new_attacks() {
        match BossAttack::start(AttackKind::Dropping, Vec2::ZERO, Vec2::ZERO, true) {
            BossAttack::Dropping(d) => {
                assert_eq!(d.acceleration, 60.0);
                assert_eq!(d.damage, 200);
            }
            other => panic!("unexpected attack {:?}", other),
        }
        match BossAttack::start(AttackKind::DualSwordToss, Vec2::ZERO, Vec2::ZERO, true) {
            BossAttack::DualSwordToss(t) => assert_eq!(t.hitbox, Vec2::new(12.0, 24.0)),
            other => panic!("unexpected attack {:?}", other),
        }
    }

    #[test]
    fn sword_toss_runs_three_phases() {
        let boss = Vec2::new(0.0, 0.0);
        let player = Vec2::new(200.0, 0.0);
        let mut toss = SwordToss::new(boss, player, false);
        let mut frames = 0;
        let mut phases = vec![toss.phase];
        while !toss.advance(0.1, boss) {
            if *phases.last().unwrap() != toss.phase {
                phases.push(toss.phase);
            }
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(phases, vec![0, 1, 2]);
        assert!((toss.swords[0] - Vec2::new(-24.0, 0.0)).length() < 1e-3);
        assert!((toss.swords[1] - Vec2::new(24.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn sword_toss_first_phase_reaches_anchors() {
        let mut toss = SwordToss::new(Vec2::ZERO, Vec2::new(100.0, 0.0), false);
        toss.advance(0.4, Vec2::ZERO);
        assert_eq!(toss.phase, 0);
        toss.advance(0.4, Vec2::ZERO);
        assert_eq!(toss.phase, 1);
        assert!((toss.swords[0] - Vec2::new(164.0, 0.0)).length() < 1e-3);
        assert!((toss.swords[1] - Vec2::new(36.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn fireball_bursts_of_three() {
        let mut v = FireballVolley::new(false);
        let mut shots = 0;
        for _ in 0..30 {
            if v.advance(0.05) {
                shots += 1;
            }
        }
        assert_eq!(shots, 3);
        assert!(v.streak.is_cooling_down);
        assert_eq!(v.fired, 0);
    }
}
