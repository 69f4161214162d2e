//! Weapons the player can pick up, carry and fire.
use bevy_ecs::prelude::Component;

use glam::Vec2;

use crate::components::timer::CooldownTimer;

/// Pickup rect of a weapon lying on the ground.
pub const WEAPON_SIZE: Vec2 = Vec2::new(16.0, 8.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Pistol,
    Shotgun,
    Sawblade,
}

impl WeaponKind {
    /// Canonical order used for the initial equip.
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Pistol, WeaponKind::Shotgun, WeaponKind::Sawblade];

    /// Name used in the save file.
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Sawblade => "sawblade",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pistol" => Some(WeaponKind::Pistol),
            "shotgun" => Some(WeaponKind::Shotgun),
            "sawblade" => Some(WeaponKind::Sawblade),
            _ => None,
        }
    }

    /// Level tag this weapon is placed with.
    pub fn tag(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "Pistol",
            WeaponKind::Shotgun => "Shotgun",
            WeaponKind::Sawblade => "SawbladeLauncher",
        }
    }

    /// Seconds between shots.
    pub fn cooldown(&self) -> f32 {
        match self {
            WeaponKind::Pistol => 1.0,
            WeaponKind::Shotgun => 0.7,
            WeaponKind::Sawblade => 0.2,
        }
    }
}

/// Lifecycle: GROUND → EQUIPPED on pickup, INVENTORY ↔ EQUIPPED on switch.
/// Nothing ever returns a weapon to GROUND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Ground,
    Equipped,
    Inventory,
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub state: WeaponState,
    pub cooldown: CooldownTimer,
    /// Seconds the shotgun's alternate fire has been held.
    pub charge_held: f32,
    /// Current core-eject charge in `0..=1`.
    pub charge: f32,
}

impl Weapon {
    pub fn new(kind: WeaponKind, state: WeaponState) -> Self {
        Weapon {
            kind,
            state,
            cooldown: CooldownTimer::new(kind.cooldown()),
            charge_held: 0.0,
            charge: 0.0,
        }
    }

    /// The weapon has been collected (equipped or carried).
    pub fn is_owned(&self) -> bool {
        self.state != WeaponState::Ground
    }
}

/// Core-eject charge after holding the alternate fire for `held` seconds.
pub fn core_charge(held: f32) -> f32 {
    ((held - 0.5) / 1.3).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in WeaponKind::ALL {
            assert_eq!(WeaponKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(WeaponKind::from_name("railcannon"), None);
    }

    #[test]
    fn core_charge_is_clamped() {
        assert_eq!(core_charge(0.2), 0.0);
        assert_eq!(core_charge(0.5), 0.0);
        assert!((core_charge(1.15) - 0.5).abs() < 1e-6);
        assert_eq!(core_charge(5.0), 1.0);
    }
}
