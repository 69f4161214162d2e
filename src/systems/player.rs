//! Player controller systems.
//!
//! - [`player_movement`]: walk, jump, slide, gravity, collision and camera.
//! - [`player_punch`]: melee window, hostile hits and fireball parries.
//! - [`player_coin_recharge`]: one coin back every recharge interval.
//! - [`player_death`]: requests game over once health runs out.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::boxcollider::BoxCollider;
use crate::components::collider::resolve;
use crate::components::gravity::Gravity;
use crate::components::hostile::Hostile;
use crate::components::mapposition::{MapPosition, angle_to, direction};
use crate::components::player::{
    Facing, JUMP_VELOCITY, MAX_COINS, MAX_HEALTH, MAX_HORIZONTAL_SPEED, MAX_JUMPS,
    PARRY_SPEED_FACTOR, PUNCH_DAMAGE, PUNCH_RADIUS, PUNCH_REACH, Player, SLIDE_DRIFT,
};
use crate::components::projectile::Fireball;
use crate::components::sprite::Sprite;
use crate::resources::camera2d::Camera2D;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::snapshot_blockers;

pub fn player_movement(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    registry: Res<ColliderRegistry>,
    mut camera: ResMut<Camera2D>,
    mut players: Query<(
        Entity,
        &mut Player,
        &mut MapPosition,
        &BoxCollider,
        &mut Gravity,
        Option<&mut Sprite>,
    )>,
    bodies: Query<(&MapPosition, &BoxCollider), Without<Player>>,
) {
    let dt = time.delta;
    let blockers = snapshot_blockers(&registry, &bodies);

    for (entity, mut player, mut position, collider, mut gravity, sprite) in players.iter_mut() {
        if player.frozen {
            continue;
        }

        let mut dx = input.horizontal() * MAX_HORIZONTAL_SPEED * dt;

        if input.jump.just_pressed && player.jump_count < MAX_JUMPS {
            gravity.velocity = JUMP_VELOCITY;
            player.jump_count += 1;
        }
        gravity.update(dt);
        let mut dy = gravity.velocity * dt;

        player.sliding = input.slide.active;
        if player.sliding {
            dx *= 2.0;
            dy += SLIDE_DRIFT * dt;
        }

        let rect = collider.rect(position.pos);
        let resolution = resolve(entity, rect, dx, dy, &blockers);
        if resolution.result.bottom.is_some() {
            player.jump_count = 0;
        }
        if resolution.result.vertical() {
            gravity.velocity = 0.0;
        }
        let (top_left, dx, _) = resolution.settle(dx, dy);
        position.pos = top_left - collider.offset;

        if dx < 0.0 {
            player.facing = Facing::Left;
        } else if dx > 0.0 {
            player.facing = Facing::Right;
        }
        if let Some(mut sprite) = sprite {
            sprite.flip_h = player.facing == Facing::Left;
        }

        camera.attach_to(collider.rect(position.pos).center(), config.camera_smoothing);
    }
}

/// Start punches on the punch edge and apply the active window.
///
/// Hostiles within [`PUNCH_RADIUS`] of the punch point take
/// [`PUNCH_DAMAGE`] once per punch id. Un-boosted fireballs in the same
/// radius are sent back along the punch angle at double speed, and the
/// player is healed to full.
pub fn player_punch(
    time: Res<WorldTime>,
    input: Res<InputState>,
    camera: Res<Camera2D>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
    mut hostiles: Query<(Entity, &mut Hostile, &MapPosition, &BoxCollider), Without<Player>>,
    mut fireballs: Query<(&mut Fireball, &MapPosition), Without<Player>>,
) {
    let dt = time.delta;
    for (mut player, position, collider) in players.iter_mut() {
        player.punch_timer.update(dt);
        player.punch_cooldown.update(dt);

        let center = collider.rect(position.pos).center();
        if !player.frozen && input.punch.just_pressed && !player.punch_cooldown.is_cooling_down {
            player.punch_timer.start();
            player.punch_cooldown.start();
            player.punch_id = player.punch_id.wrapping_add(1);
            player.punch_angle = angle_to(center, camera.screen_to_world(input.pointer));
        }

        if !player.is_punching() {
            continue;
        }
        let point = center + direction(player.punch_angle) * PUNCH_REACH;
        let punch_id = player.punch_id;

        for (entity, mut hostile, h_position, h_collider) in hostiles.iter_mut() {
            if !hostile.activation.is_active() {
                continue;
            }
            let h_center = h_collider.rect(h_position.pos).center();
            if h_center.distance(point) <= PUNCH_RADIUS && hostile.punch(punch_id, PUNCH_DAMAGE) {
                debug!("Punch {} hit {:?} ({:?})", punch_id, entity, hostile.kind);
            }
        }

        for (mut fireball, f_position) in fireballs.iter_mut() {
            if fireball.boosted || f_position.pos.distance(point) > PUNCH_RADIUS {
                continue;
            }
            fireball.radians = player.punch_angle;
            fireball.speed *= PARRY_SPEED_FACTOR;
            fireball.boosted = true;
            fireball.homing = false;
            player.heal(MAX_HEALTH);
            debug!("Fireball parried");
        }
    }
}

pub fn player_coin_recharge(time: Res<WorldTime>, mut players: Query<&mut Player>) {
    for mut player in players.iter_mut() {
        if player.coins >= MAX_COINS {
            player.coin_recharge.reset();
            continue;
        }
        if player.coin_recharge.tick(time.delta) {
            player.coins += 1;
        }
    }
}

pub fn player_death(players: Query<&Player>, mut next_state: ResMut<NextGameState>) {
    if players.iter().any(|p| p.is_dead()) && next_state.request(GameStates::GameOver) {
        info!("Player died");
    }
}
