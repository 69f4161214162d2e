//! Weapon pickup, switching and firing.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::{MapPosition, angle_to, direction};
use crate::components::player::Player;
use crate::components::projectile::{
    BULLET_SPEED, COIN_SPEED, CORE_MAX_SPEED, ChainScaling, MAGNET_SPEED, PELLET_COUNT, PELLET_DAMAGE,
    PELLET_SPREAD, PISTOL_DAMAGE, SAWBLADE_DAMAGE, SAWBLADE_SPEED,
};
use crate::components::weapon::{Weapon, WeaponKind, WeaponState, core_charge};
use crate::resources::camera2d::Camera2D;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::projectiles::{spawn_bullet, spawn_coin, spawn_core, spawn_magnet, spawn_sawblade};

/// Make `target` the equipped weapon, demoting whatever was equipped.
fn equip(player: &mut Player, target: Entity, weapons: &mut Query<(Entity, &mut Weapon, &MapPosition, &BoxCollider)>) {
    for (entity, mut weapon, _, _) in weapons.iter_mut() {
        if entity == target {
            weapon.state = WeaponState::Equipped;
        } else if weapon.state == WeaponState::Equipped {
            weapon.state = WeaponState::Inventory;
        }
    }
    player.equipped = Some(target);
}

/// Ground weapons touched by the player are picked up and equipped.
pub fn weapon_pickup(
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
    mut weapons: Query<(Entity, &mut Weapon, &MapPosition, &BoxCollider)>,
) {
    let Ok((mut player, position, collider)) = players.single_mut() else {
        return;
    };
    let rect = collider.rect(position.pos);
    let picked: Vec<(Entity, WeaponKind)> = weapons
        .iter()
        .filter(|(_, w, p, c)| w.state == WeaponState::Ground && c.rect(p.pos).overlaps(&rect))
        .map(|(e, w, _, _)| (e, w.kind))
        .collect();
    for (entity, kind) in picked {
        equip(&mut player, entity, &mut weapons);
        info!("Picked up {}", kind.name());
    }
}

/// Number keys switch to a carried weapon. Weapons still on the ground are
/// not selectable.
pub fn weapon_switch(
    input: Res<InputState>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
    mut weapons: Query<(Entity, &mut Weapon, &MapPosition, &BoxCollider)>,
) {
    let Ok((mut player, _, _)) = players.single_mut() else {
        return;
    };
    if player.frozen {
        return;
    }
    let wanted = if input.weapon_1.just_pressed {
        WeaponKind::Pistol
    } else if input.weapon_2.just_pressed {
        WeaponKind::Shotgun
    } else if input.weapon_3.just_pressed {
        WeaponKind::Sawblade
    } else {
        return;
    };
    let target = weapons
        .iter()
        .find(|(_, w, _, _)| w.kind == wanted && w.state == WeaponState::Inventory)
        .map(|(e, _, _, _)| e);
    if let Some(target) = target {
        equip(&mut player, target, &mut weapons);
        debug!("Switched to {}", wanted.name());
    }
}

/// Fire the equipped weapon toward the pointer.
///
/// | weapon | primary | alternate |
/// |---|---|---|
/// | pistol | bullet on press | coin toss, one coin each |
/// | shotgun | pellet fan on press | core eject on release, charged while held |
/// | sawblade | sawblade while held | magnet on press, no cooldown |
pub fn weapon_fire(
    time: Res<WorldTime>,
    input: Res<InputState>,
    camera: Res<Camera2D>,
    mut commands: Commands,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
    mut weapons: Query<&mut Weapon>,
) {
    let dt = time.delta;
    for mut weapon in weapons.iter_mut() {
        weapon.cooldown.update(dt);
    }

    let Ok((mut player, position, collider)) = players.single_mut() else {
        return;
    };
    if player.frozen {
        return;
    }
    let Some(mut weapon) = player.equipped.and_then(|e| weapons.get_mut(e).ok()) else {
        return;
    };

    let muzzle = collider.rect(position.pos).center();
    let angle = angle_to(muzzle, camera.screen_to_world(input.pointer));
    let ready = !weapon.cooldown.is_cooling_down;

    match weapon.kind {
        WeaponKind::Pistol => {
            if input.fire.just_pressed && ready {
                spawn_bullet(&mut commands, muzzle, angle, BULLET_SPEED, PISTOL_DAMAGE, ChainScaling::Additive);
                weapon.cooldown.start();
            }
            if input.alt_fire.just_pressed && player.coins > 0 {
                player.coins -= 1;
                spawn_coin(&mut commands, muzzle, direction(angle) * COIN_SPEED);
            }
        }
        WeaponKind::Shotgun => {
            if input.fire.just_pressed && ready {
                let half = (PELLET_COUNT / 2) as f32;
                let spread: ArrayVec<f32, PELLET_COUNT> = (0..PELLET_COUNT)
                    .map(|i| angle + (i as f32 - half) * PELLET_SPREAD)
                    .collect();
                for radians in spread {
                    spawn_bullet(&mut commands, muzzle, radians, BULLET_SPEED, PELLET_DAMAGE, ChainScaling::Doubling);
                }
                weapon.cooldown.start();
            }
            if input.alt_fire.active {
                weapon.charge_held += dt;
                weapon.charge = core_charge(weapon.charge_held);
            }
            if input.alt_fire.just_released {
                spawn_core(&mut commands, muzzle, direction(angle) * CORE_MAX_SPEED * weapon.charge);
                weapon.charge_held = 0.0;
                weapon.charge = 0.0;
            }
        }
        WeaponKind::Sawblade => {
            if input.fire.active && ready {
                spawn_sawblade(&mut commands, muzzle, angle, SAWBLADE_SPEED, SAWBLADE_DAMAGE);
                weapon.cooldown.start();
            }
            if input.alt_fire.just_pressed {
                spawn_magnet(&mut commands, muzzle, direction(angle) * MAGNET_SPEED);
            }
        }
    }
}
