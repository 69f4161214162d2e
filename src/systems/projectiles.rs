//! Projectile spawning and flight.
//!
//! Every projectile's `MapPosition` is its centre (centred collider). Flight
//! systems move them, react to tiles and pickups, and despawn them; damage to
//! hostiles is applied by
//! [`hostile_damage`](crate::systems::hostiles::hostile_damage).
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::collider::Solid;
use crate::components::effects::Fade;
use crate::components::hostile::Hostile;
use crate::components::mapposition::{MapPosition, angle_to, direction, move_towards};
use crate::components::player::Player;
use crate::components::projectile::{
    BULLET_LIFETIME, BULLET_SIZE, Bullet, COIN_GRAVITY, COIN_LIFETIME, COIN_SIZE, CORE_GRAVITY,
    CORE_LIFETIME, CORE_SIZE, ChainScaling, Coin, CoreEject, EXPLOSION_DAMAGE, EXPLOSION_FADE,
    Explosion, FALLING_SWORD_DAMAGE, FALLING_SWORD_DESPAWN_MARGIN, FALLING_SWORD_GRAVITY,
    FALLING_SWORD_SIZE, FIREBALL_DAMAGE, FIREBALL_SIZE, FallingSword, Fireball, MAGNET_GRAVITY,
    MAGNET_LIFETIME, MAGNET_ORBIT_RADIUS, MAGNET_SIZE, Magnet, SAWBLADE_LIFETIME, SAWBLADE_ORBIT_SPEED,
    SAWBLADE_SIZE, Sawblade,
};
use crate::components::sprite::Sprite;
use crate::components::tint::{Rgba, Tint, palette};
use crate::components::ttl::Ttl;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::session::SessionState;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::solid_overlap;

fn body(center: Vec2, size: Vec2, key: &str, color: Rgba) -> (MapPosition, BoxCollider, Sprite, Tint) {
    (
        MapPosition::from_vec(center),
        BoxCollider::centered(size.x, size.y),
        Sprite::new(key, size.x, size.y),
        Tint::from(color),
    )
}

pub fn spawn_bullet(
    commands: &mut Commands,
    center: Vec2,
    radians: f32,
    speed: f32,
    damage: i32,
    scaling: ChainScaling,
) -> Entity {
    commands
        .spawn((
            Bullet::new(radians, speed, damage, scaling),
            Ttl::new(BULLET_LIFETIME),
            body(center, Vec2::splat(BULLET_SIZE), "Bullet", palette::YELLOW),
        ))
        .id()
}

pub fn spawn_coin(commands: &mut Commands, center: Vec2, velocity: Vec2) -> Entity {
    commands
        .spawn((
            Coin { velocity },
            Ttl::new(COIN_LIFETIME),
            body(center, Vec2::splat(COIN_SIZE), "Coin", palette::YELLOW),
        ))
        .id()
}

pub fn spawn_core(commands: &mut Commands, center: Vec2, velocity: Vec2) -> Entity {
    commands
        .spawn((
            CoreEject {
                velocity,
                remaining: CORE_LIFETIME,
            },
            body(center, Vec2::splat(CORE_SIZE), "Core", Rgba::BLUE),
        ))
        .id()
}

pub fn spawn_explosion(commands: &mut Commands, center: Vec2) -> Entity {
    commands
        .spawn((Explosion::new(), Fade::new(EXPLOSION_FADE), MapPosition::from_vec(center)))
        .id()
}

pub fn spawn_magnet(commands: &mut Commands, center: Vec2, velocity: Vec2) -> Entity {
    commands
        .spawn((
            Magnet {
                velocity,
                anchor: None,
            },
            Ttl::new(MAGNET_LIFETIME),
            body(center, Vec2::splat(MAGNET_SIZE), "Magnet", palette::GREY),
        ))
        .id()
}

pub fn spawn_sawblade(commands: &mut Commands, center: Vec2, radians: f32, speed: f32, damage: i32) -> Entity {
    commands
        .spawn((
            Sawblade {
                radians,
                speed,
                damage,
                magnet: None,
            },
            Ttl::new(SAWBLADE_LIFETIME),
            body(center, Vec2::splat(SAWBLADE_SIZE), "Sawblade", Rgba::WHITE),
        ))
        .id()
}

pub fn spawn_fireball(commands: &mut Commands, center: Vec2, fireball: Fireball) -> Entity {
    commands
        .spawn((fireball, body(center, Vec2::splat(FIREBALL_SIZE), "Fireball", Rgba::RED)))
        .id()
}

pub fn spawn_falling_sword(commands: &mut Commands, center: Vec2) -> Entity {
    commands
        .spawn((
            FallingSword::default(),
            body(center, FALLING_SWORD_SIZE, "FallingSword", Rgba::WHITE),
        ))
        .id()
}

/// Nearest candidate centre to `from`, ties keep the first.
fn nearest(from: Vec2, candidates: impl Iterator<Item = (Entity, Vec2)>) -> Option<(Entity, Vec2)> {
    candidates.fold(None, |best: Option<(Entity, Vec2)>, candidate| match best {
        Some(b) if b.1.distance_squared(from) <= candidate.1.distance_squared(from) => Some(b),
        _ => Some(candidate),
    })
}

/// Fly bullets, despawn them on tiles, and ricochet them off coins.
///
/// A bullet touching a coin consumes it and is re-aimed from the coin at
/// whichever is nearer: another live coin or an active hostile. With
/// neither available the bullet is removed. A redirected bullet homes on
/// its target's current centre, or on the last known one once the target
/// is gone.
pub fn bullet_flight(
    time: Res<WorldTime>,
    registry: Res<ColliderRegistry>,
    mut commands: Commands,
    mut bullets: Query<(Entity, &mut Bullet, &mut MapPosition, &BoxCollider)>,
    coins: Query<(Entity, &MapPosition, &BoxCollider), (With<Coin>, Without<Bullet>)>,
    hostiles: Query<(Entity, &Hostile, &MapPosition, &BoxCollider), Without<Bullet>>,
    bodies: Query<(&MapPosition, &BoxCollider), (With<Solid>, Without<Bullet>)>,
    targets: Query<(&MapPosition, &BoxCollider), Without<Bullet>>,
) {
    let dt = time.delta;
    let mut consumed: FxHashSet<Entity> = FxHashSet::default();

    for (entity, mut bullet, mut position, collider) in bullets.iter_mut() {
        if bullet.speed <= 0.0 {
            commands.entity(entity).try_despawn();
            continue;
        }

        if let Some(target) = bullet.target_entity {
            match targets.get(target) {
                Ok((t_position, t_collider)) => bullet.target = Some(t_collider.rect(t_position.pos).center()),
                Err(_) => bullet.target_entity = None,
            }
        }

        let step = bullet.speed * dt;
        match bullet.target {
            Some(target) => {
                if position.pos != target {
                    bullet.radians = angle_to(position.pos, target);
                }
                position.pos = move_towards(position.pos, target, step);
                if position.pos == target {
                    bullet.release_target();
                }
            }
            None => position.pos += direction(bullet.radians) * step,
        }
        let rect = collider.rect(position.pos);

        if solid_overlap(&rect, &registry, &bodies).is_some() {
            commands.entity(entity).try_despawn();
            continue;
        }

        let Some((coin, coin_center)) = coins
            .iter()
            .filter(|(c, _, _)| !consumed.contains(c))
            .find(|(_, p, c)| c.rect(p.pos).overlaps(&rect))
            .map(|(c, p, _)| (c, p.pos))
        else {
            continue;
        };
        consumed.insert(coin);
        commands.entity(coin).try_despawn();

        let next_coin = nearest(
            coin_center,
            coins
                .iter()
                .filter(|(c, _, _)| !consumed.contains(c))
                .map(|(c, p, _)| (c, p.pos)),
        );
        let next_hostile = nearest(
            coin_center,
            hostiles
                .iter()
                .filter(|(_, h, _, _)| h.activation.is_active() && !h.is_dead())
                .map(|(e, _, p, c)| (e, c.rect(p.pos).center())),
        );
        let target = match (next_coin, next_hostile) {
            (Some(c), Some(h)) => {
                if c.1.distance_squared(coin_center) < h.1.distance_squared(coin_center) {
                    Some(c)
                } else {
                    Some(h)
                }
            }
            (c, h) => c.or(h),
        };

        match target {
            Some((next, point)) => {
                position.pos = coin_center;
                bullet.redirect(coin_center, next, point);
                debug!(
                    "Bullet {:?} redirected, chain {} damage {}",
                    entity,
                    bullet.chain.len(),
                    bullet.damage
                );
            }
            None => {
                commands.entity(entity).try_despawn();
            }
        }
    }
}

pub fn coin_flight(time: Res<WorldTime>, mut coins: Query<(&mut Coin, &mut MapPosition)>) {
    let dt = time.delta;
    for (mut coin, mut position) in coins.iter_mut() {
        coin.velocity.y += COIN_GRAVITY * dt;
        position.pos += coin.velocity * dt;
    }
}

/// Fly core ejects; they burst into an explosion on an active hostile or
/// at the end of their life.
pub fn core_flight(
    time: Res<WorldTime>,
    mut commands: Commands,
    mut cores: Query<(Entity, &mut CoreEject, &mut MapPosition, &BoxCollider)>,
    hostiles: Query<(&Hostile, &MapPosition, &BoxCollider), Without<CoreEject>>,
) {
    let dt = time.delta;
    for (entity, mut core, mut position, collider) in cores.iter_mut() {
        core.velocity.y += CORE_GRAVITY * dt;
        position.pos += core.velocity * dt;
        core.remaining -= dt;

        let rect = collider.rect(position.pos);
        let hit = hostiles
            .iter()
            .any(|(h, p, c)| h.activation.is_active() && c.rect(p.pos).overlaps(&rect));
        if hit || core.remaining <= 0.0 {
            spawn_explosion(&mut commands, position.pos);
            commands.entity(entity).try_despawn();
        }
    }
}

/// Apply each explosion's damage once, on its first frame.
pub fn explosion_damage(
    mut explosions: Query<(&mut Explosion, &MapPosition)>,
    mut hostiles: Query<(&mut Hostile, &MapPosition, &BoxCollider), Without<Explosion>>,
) {
    for (mut explosion, position) in explosions.iter_mut() {
        if explosion.detonated {
            continue;
        }
        explosion.detonated = true;
        let bounds = Rect::from_center(position.pos, Vec2::splat(explosion.radius * 2.0));
        for (mut hostile, h_position, h_collider) in hostiles.iter_mut() {
            if hostile.activation.is_active() && h_collider.rect(h_position.pos).overlaps(&bounds) {
                hostile.health -= EXPLOSION_DAMAGE;
                debug!("Explosion hit {:?}", hostile.kind);
            }
        }
    }
}

/// Magnets fall until they touch an actor or tile, then ride it.
pub fn magnet_flight(
    time: Res<WorldTime>,
    registry: Res<ColliderRegistry>,
    mut magnets: Query<(&mut Magnet, &mut MapPosition, &BoxCollider)>,
    hostiles: Query<(Entity, &Hostile, &MapPosition, &BoxCollider), Without<Magnet>>,
    anchors: Query<&MapPosition, Without<Magnet>>,
    bodies: Query<(&MapPosition, &BoxCollider), (With<Solid>, Without<Magnet>)>,
) {
    let dt = time.delta;
    for (mut magnet, mut position, collider) in magnets.iter_mut() {
        if let Some((anchor, offset)) = magnet.anchor {
            match anchors.get(anchor) {
                Ok(anchor_position) => position.pos = anchor_position.pos + offset,
                Err(_) => magnet.anchor = None,
            }
            continue;
        }

        magnet.velocity.y += MAGNET_GRAVITY * dt;
        position.pos += magnet.velocity * dt;
        let rect = collider.rect(position.pos);

        let touched = hostiles
            .iter()
            .find(|(_, h, p, c)| h.activation.is_active() && c.rect(p.pos).overlaps(&rect))
            .map(|(e, _, _, _)| e)
            .or_else(|| solid_overlap(&rect, &registry, &bodies));
        if let Some(anchor) = touched
            && let Ok(anchor_position) = anchors.get(anchor)
        {
            magnet.anchor = Some((anchor, position.pos - anchor_position.pos));
            debug!("Magnet attached to {:?}", anchor);
        }
    }
}

/// Sawblades fly straight unless a magnet is within orbit range, in which
/// case they circle it for the magnet's remaining lifetime.
pub fn sawblade_flight(
    time: Res<WorldTime>,
    mut sawblades: Query<(&mut Sawblade, &mut MapPosition, &mut Ttl), Without<Magnet>>,
    magnets: Query<(Entity, &MapPosition, &Ttl), With<Magnet>>,
) {
    let dt = time.delta;
    for (mut sawblade, mut position, mut ttl) in sawblades.iter_mut() {
        if sawblade.magnet.is_none()
            && let Some((magnet, magnet_position, _)) = magnets
                .iter()
                .find(|(_, p, _)| p.pos.distance(position.pos) <= MAGNET_ORBIT_RADIUS)
        {
            sawblade.magnet = Some(magnet);
            sawblade.radians = angle_to(magnet_position.pos, position.pos);
        }

        match sawblade.magnet.and_then(|m| magnets.get(m).ok()) {
            Some((_, magnet_position, magnet_ttl)) => {
                sawblade.radians += SAWBLADE_ORBIT_SPEED * dt;
                position.pos = magnet_position.pos + direction(sawblade.radians) * MAGNET_ORBIT_RADIUS;
                ttl.remaining = magnet_ttl.remaining;
            }
            None => {
                sawblade.magnet = None;
                position.pos += direction(sawblade.radians) * sawblade.speed * dt;
            }
        }
    }
}

/// Move fireballs, hit the player with un-boosted ones, and drop any that
/// leave the level.
pub fn fireball_flight(
    time: Res<WorldTime>,
    session: Res<SessionState>,
    mut commands: Commands,
    mut fireballs: Query<(Entity, &mut Fireball, &mut MapPosition, &BoxCollider), Without<Player>>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
) {
    let dt = time.delta;
    let mut player = players.single_mut().ok();

    for (entity, mut fireball, mut position, collider) in fireballs.iter_mut() {
        if let Some((_, p_position, p_collider)) = player.as_ref()
            && fireball.homing
            && !fireball.boosted
        {
            let target = p_collider.rect(p_position.pos).center();
            fireball.radians = angle_to(position.pos, target);
        }
        position.pos += fireball.velocity() * dt;

        if let Some((p, p_position, p_collider)) = player.as_mut()
            && !fireball.boosted
            && collider.rect(position.pos).overlaps(&p_collider.rect(p_position.pos))
        {
            p.damage(FIREBALL_DAMAGE);
            debug!("Fireball hit the player, health {}", p.health);
            commands.entity(entity).try_despawn();
            continue;
        }

        if !session.bounds.contains_point(position.pos) {
            commands.entity(entity).try_despawn();
        }
    }
}

/// Falling swords accelerate down, hit the player once, and are dropped
/// well below the level.
pub fn falling_sword_flight(
    time: Res<WorldTime>,
    session: Res<SessionState>,
    mut commands: Commands,
    mut swords: Query<(Entity, &mut FallingSword, &mut MapPosition, &BoxCollider), Without<Player>>,
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
) {
    let dt = time.delta;
    let mut player = players.single_mut().ok();

    for (entity, mut sword, mut position, collider) in swords.iter_mut() {
        sword.velocity += FALLING_SWORD_GRAVITY * dt;
        position.pos.y += sword.velocity * dt;

        if let Some((p, p_position, p_collider)) = player.as_mut()
            && collider.rect(position.pos).overlaps(&p_collider.rect(p_position.pos))
        {
            p.damage(FALLING_SWORD_DAMAGE);
            commands.entity(entity).try_despawn();
            continue;
        }

        if position.pos.y > session.bounds.bottom() + FALLING_SWORD_DESPAWN_MARGIN {
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_prefers_first_on_ties() {
        let mut world = World::new();
        let [a, b, c] = [(); 3].map(|_| world.spawn_empty().id());
        let from = Vec2::ZERO;
        let pts = [(a, Vec2::new(5.0, 0.0)), (b, Vec2::new(-5.0, 0.0)), (c, Vec2::new(2.0, 0.0))];
        assert_eq!(nearest(from, pts.into_iter()), Some((c, Vec2::new(2.0, 0.0))));
        let tied = [(a, Vec2::new(3.0, 0.0)), (b, Vec2::new(0.0, 3.0))];
        assert_eq!(nearest(from, tied.into_iter()), Some((a, Vec2::new(3.0, 0.0))));
        assert_eq!(nearest(from, std::iter::empty()), None);
    }
}
