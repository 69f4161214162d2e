//! Hostile damage intake, death and per-variant behaviour.
//!
//! Only active hostiles are simulated; dormant and flickering ones are
//! skipped by every system here.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};
use rustc_hash::FxHashSet;

use crate::components::boxcollider::BoxCollider;
use crate::components::collider::resolve;
use crate::components::effects::{BloodSplatter, Fade, SPLATTER_DURATION};
use crate::components::gravity::Gravity;
use crate::components::hostile::{
    FILTH_CONTACT_DAMAGE, FILTH_JUMP_RANGE, FILTH_JUMP_VELOCITY, FILTH_SPEED, Filth, Hostile,
    HostileKind, MAURICE_FIREBALL_SPEED, MAURICE_SPEED, Maurice, SOLDIER_FIREBALL_SPEED, Soldier,
    VIRTUE_CYCLE, VIRTUE_LOCK_TIME, VIRTUE_SPEED, VIRTUE_STRIKE_DAMAGE, VIRTUE_STRIKE_TIME, Virtue, Wings,
};
use crate::components::mapposition::{MapPosition, angle_to, move_towards};
use crate::components::player::Player;
use crate::components::projectile::{Bullet, FIREBALL_DAMAGE, FIREBALL_SIZE, Fireball, Sawblade};
use crate::components::sprite::Sprite;
use crate::events::chainhit::ChainHitEvent;
use crate::resources::camera2d::Camera2D;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::snapshot_blockers;
use crate::systems::projectiles::spawn_fireball;

/// Apply friendly projectile damage to every active hostile.
///
/// - bullets: removed on hit; a bullet with a chain history also triggers
///   a [`ChainHitEvent`]
/// - sawblades: rate limited per hostile
/// - boosted fireballs: removed on hit
pub fn hostile_damage(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut hostiles: Query<(Entity, &mut Hostile, &MapPosition, &BoxCollider)>,
    bullets: Query<(Entity, &Bullet, &MapPosition, &BoxCollider)>,
    sawblades: Query<(&Sawblade, &MapPosition, &BoxCollider)>,
    fireballs: Query<(Entity, &Fireball, &MapPosition, &BoxCollider)>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
) {
    let player_center = players
        .single()
        .map(|(p, c)| c.rect(p.pos).center())
        .unwrap_or(Vec2::ZERO);
    let mut consumed: FxHashSet<Entity> = FxHashSet::default();

    for (entity, mut hostile, position, collider) in hostiles.iter_mut() {
        hostile.sawblade_cooldown.update(time.delta);
        if !hostile.activation.is_active() {
            continue;
        }
        let rect = collider.rect(position.pos);

        for (bullet_entity, bullet, b_position, b_collider) in bullets.iter() {
            if consumed.contains(&bullet_entity) || !b_collider.rect(b_position.pos).overlaps(&rect) {
                continue;
            }
            consumed.insert(bullet_entity);
            commands.entity(bullet_entity).try_despawn();
            hostile.health -= bullet.damage;
            debug!("{:?} {:?} shot for {}", hostile.kind, entity, bullet.damage);
            if !bullet.chain.is_empty() {
                let mut points = Vec::with_capacity(bullet.chain.len() + 2);
                points.push(player_center);
                points.extend(bullet.chain.iter().copied());
                points.push(b_position.pos);
                commands.trigger(ChainHitEvent { points });
            }
        }

        for (sawblade, s_position, s_collider) in sawblades.iter() {
            if s_collider.rect(s_position.pos).overlaps(&rect) && hostile.saw(sawblade.damage) {
                break;
            }
        }

        for (fireball_entity, fireball, f_position, f_collider) in fireballs.iter() {
            if fireball.boosted
                && !consumed.contains(&fireball_entity)
                && f_collider.rect(f_position.pos).overlaps(&rect)
            {
                consumed.insert(fireball_entity);
                commands.entity(fireball_entity).try_despawn();
                hostile.health -= FIREBALL_DAMAGE;
            }
        }
    }
}

/// Remove dead hostiles and leave a blood splatter at their centre. The
/// boss dying wins the game.
pub fn hostile_death(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    hostiles: Query<(Entity, &Hostile, &MapPosition, &BoxCollider)>,
) {
    for (entity, hostile, position, collider) in hostiles.iter() {
        if !hostile.is_dead() {
            continue;
        }
        let center = collider.rect(position.pos).center();
        commands.entity(entity).try_despawn();
        commands.spawn((
            BloodSplatter::new(),
            Fade::new(SPLATTER_DURATION),
            MapPosition::from_vec(center),
        ));
        debug!("{:?} {:?} died", hostile.kind, entity);

        if hostile.kind == HostileKind::Gabriel && next_state.request(GameStates::Win) {
            info!("Gabriel defeated");
        }
    }
}

/// Jumpers: drift toward the player, leap when close, hurt on contact.
pub fn filth_behaviour(
    time: Res<WorldTime>,
    registry: Res<ColliderRegistry>,
    mut filths: Query<(
        Entity,
        &Hostile,
        &mut Filth,
        &mut MapPosition,
        &BoxCollider,
        &mut Gravity,
        Option<&mut Sprite>,
    )>,
    mut players: Query<(Entity, &mut Player, &MapPosition, &BoxCollider), Without<Filth>>,
    bodies: Query<(&MapPosition, &BoxCollider), Without<Filth>>,
) {
    let dt = time.delta;
    let Ok((player_entity, mut player, p_position, p_collider)) = players.single_mut() else {
        return;
    };
    let player_rect = p_collider.rect(p_position.pos);
    let blockers = snapshot_blockers(&registry, &bodies);

    for (entity, hostile, mut filth, mut position, collider, mut gravity, sprite) in filths.iter_mut() {
        if !hostile.activation.is_active() {
            continue;
        }
        filth.contact.update(dt);
        let rect = collider.rect(position.pos);
        let center = rect.center();

        if filth.retarget.tick(dt) {
            let gap = player_rect.center().x - center.x;
            if gap != 0.0 {
                filth.heading = gap.signum();
            }
        }
        if filth.grounded && center.distance(player_rect.center()) <= FILTH_JUMP_RANGE {
            gravity.velocity = FILTH_JUMP_VELOCITY;
            filth.grounded = false;
        }
        gravity.update(dt);

        let dx = filth.heading * FILTH_SPEED * dt;
        let dy = gravity.velocity * dt;
        let resolution = resolve(entity, rect, dx, dy, &blockers);
        filth.grounded = resolution.result.bottom.is_some();
        if resolution.result.vertical() {
            gravity.velocity = 0.0;
        }
        let (top_left, _, _) = resolution.settle(dx, dy);
        position.pos = top_left - collider.offset;

        let r = &resolution.result;
        let touching = [r.left, r.right, r.top, r.bottom].contains(&Some(player_entity))
            || collider.rect(position.pos).overlaps(&player_rect);
        if touching && !filth.contact.is_cooling_down {
            player.damage(FILTH_CONTACT_DAMAGE);
            filth.contact.start();
            debug!("Filth hit the player, health {}", player.health);
        }

        if let Some(mut sprite) = sprite {
            sprite.flip_h = filth.heading < 0.0;
        }
    }
}

/// Ranged units: one fireball at the player every charge.
pub fn soldier_behaviour(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut soldiers: Query<(&Hostile, &mut Soldier, &MapPosition, &BoxCollider, Option<&mut Sprite>)>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
) {
    let Ok((p_position, p_collider)) = players.single() else {
        return;
    };
    let target = p_collider.rect(p_position.pos).center();

    for (hostile, mut soldier, position, collider, sprite) in soldiers.iter_mut() {
        if !hostile.activation.is_active() {
            continue;
        }
        let rect = collider.rect(position.pos);
        if let Some(mut sprite) = sprite {
            sprite.flip_h = target.x < rect.center().x;
        }

        soldier.charge.update(time.delta);
        if soldier.charge.is_cooling_down {
            continue;
        }
        let muzzle = Vec2::new(rect.center().x, rect.top() - FIREBALL_SIZE);
        spawn_fireball(
            &mut commands,
            muzzle,
            Fireball::new(angle_to(muzzle, target), SOLDIER_FIREBALL_SPEED),
        );
        soldier.charge.start();
    }
}

/// Flying strikers: approach the player and run the lightning cycle.
///
/// The strike column follows the player until the lock time, lands once at
/// the strike time, and the cycle restarts at its end.
pub fn virtue_behaviour(
    time: Res<WorldTime>,
    camera: Res<Camera2D>,
    mut virtues: Query<(&Hostile, &mut Virtue, &mut MapPosition, &BoxCollider), Without<Player>>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
) {
    let dt = time.delta;
    let Ok((mut player, p_position, p_collider)) = players.single_mut() else {
        return;
    };
    let player_rect = p_collider.rect(p_position.pos);
    let view = camera.view();

    for (hostile, mut virtue, mut position, collider) in virtues.iter_mut() {
        if !hostile.activation.is_active() {
            continue;
        }
        let half = collider.size * 0.5;
        let center = move_towards(collider.rect(position.pos).center(), player_rect.center(), VIRTUE_SPEED * dt);
        position.pos = center - half - collider.offset;

        virtue.cycle += dt;
        if virtue.cycle < VIRTUE_LOCK_TIME {
            virtue.strike_x = player_rect.center().x;
        }
        if virtue.cycle >= VIRTUE_STRIKE_TIME && !virtue.struck {
            virtue.struck = true;
            if virtue.footprint(view.center().y, view.height()).overlaps(&player_rect) {
                player.damage(VIRTUE_STRIKE_DAMAGE);
                debug!("Virtue strike hit the player, health {}", player.health);
            }
        }
        if virtue.cycle >= VIRTUE_CYCLE {
            virtue.cycle = 0.0;
            virtue.struck = false;
        }
    }
}

/// Floating chasers: follow the player and fire homing volleys.
pub fn maurice_behaviour(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut maurices: Query<(&Hostile, &mut Maurice, &mut MapPosition, &BoxCollider), Without<Player>>,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
) {
    let dt = time.delta;
    let Ok((p_position, p_collider)) = players.single() else {
        return;
    };
    let target = p_collider.rect(p_position.pos).center();

    for (hostile, mut maurice, mut position, collider) in maurices.iter_mut() {
        if !hostile.activation.is_active() {
            continue;
        }
        let half = collider.size * 0.5;
        let center = move_towards(collider.rect(position.pos).center(), target, MAURICE_SPEED * dt);
        position.pos = center - half - collider.offset;

        for _ in 0..maurice.advance(dt) {
            spawn_fireball(
                &mut commands,
                center,
                Fireball::new(angle_to(center, target), MAURICE_FIREBALL_SPEED).homing(),
            );
        }
    }
}

pub fn wings_rotation(time: Res<WorldTime>, mut wings: Query<(&Hostile, &mut Wings)>) {
    for (hostile, mut wings) in wings.iter_mut() {
        if hostile.activation.is_active() {
            wings.update(time.delta);
        }
    }
}
