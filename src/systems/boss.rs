//! Gabriel's per-frame controller.
//!
//! Each frame the boss:
//! 1. latches enrage once health is low enough
//! 2. re-rolls its sway, and its attack when the re-roll timer fires during
//!    an interruptible attack
//! 3. drifts toward the player unless the attack holds position
//! 4. runs the current attack; attacks that finish pick the next one
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::boss::{
    BOSS_FIREBALL_SPEED, BossAttack, DROP_HEIGHT_TILES, DROP_WAIT, Gabriel, RAIN_HEIGHT, RAIN_SPREAD,
    TOSS_DAMAGE, roll_interval, roll_sway,
};
use crate::components::boxcollider::BoxCollider;
use crate::components::collider::resolve;
use crate::components::hostile::Hostile;
use crate::components::mapposition::{MapPosition, angle_to};
use crate::components::player::Player;
use crate::components::projectile::Fireball;
use crate::components::timer::Timer;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::rng::GameRng;
use crate::resources::session::SessionState;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::snapshot_blockers;
use crate::systems::projectiles::{spawn_falling_sword, spawn_fireball};

pub fn boss_behaviour(
    time: Res<WorldTime>,
    session: Res<SessionState>,
    registry: Res<ColliderRegistry>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut bosses: Query<(Entity, &Hostile, &mut Gabriel, &mut MapPosition, &BoxCollider), Without<Player>>,
    mut players: Query<(Entity, &mut Player, &MapPosition, &BoxCollider)>,
    bodies: Query<(&MapPosition, &BoxCollider), Without<Gabriel>>,
) {
    let dt = time.delta;
    let Ok((player_entity, mut player, p_position, p_collider)) = players.single_mut() else {
        return;
    };
    let player_rect = p_collider.rect(p_position.pos);
    let player_center = player_rect.center();
    let blockers = snapshot_blockers(&registry, &bodies);

    for (entity, hostile, mut gabriel, mut position, collider) in bosses.iter_mut() {
        if hostile.is_dead() || !hostile.activation.is_active() {
            continue;
        }
        let size = collider.size;
        let center = collider.rect(position.pos).center();

        if gabriel.check_enrage(hostile.health) {
            info!("Gabriel is enraged");
        }
        if gabriel.sway_timer.tick(dt) {
            gabriel.sway = roll_sway(&mut rng.0);
        }
        if gabriel.reroll.tick(dt) && gabriel.attack.interruptible() {
            gabriel.roll(&mut rng.0, center, player_center);
            gabriel.reroll = Timer::new(roll_interval(&mut rng.0));
            debug!("Gabriel re-rolled to {:?}", gabriel.attack.kind());
        }

        if !gabriel.attack.holds_position() {
            let top_left = gabriel.drift(center - size * 0.5, player_center - size * 0.5, dt);
            position.pos = top_left - collider.offset;
        }
        let rect = collider.rect(position.pos);
        let center = rect.center();

        let mut finished = false;
        match &mut gabriel.attack {
            BossAttack::Dropping(drop) => {
                if !drop.positioned {
                    drop.waited += dt;
                    if drop.waited >= DROP_WAIT {
                        let top_left = Vec2::new(
                            player_center.x - size.x * 0.5,
                            player_rect.top() - DROP_HEIGHT_TILES * session.tile_size - size.y,
                        );
                        position.pos = top_left - collider.offset;
                        drop.positioned = true;
                    }
                } else {
                    drop.velocity += drop.acceleration * dt;
                    let dy = drop.velocity * dt;
                    let resolution = resolve(entity, rect, 0.0, dy, &blockers);
                    let (top_left, _, _) = resolution.settle(0.0, dy);
                    position.pos = top_left - collider.offset;

                    let landed_on_player = resolution.result.bottom == Some(player_entity)
                        || collider.rect(position.pos).overlaps(&player_rect);
                    if landed_on_player {
                        player.damage(drop.damage);
                        debug!("Gabriel dropped on the player, health {}", player.health);
                    }
                    finished = landed_on_player
                        || resolution.result.bottom.is_some()
                        || position.pos.y > session.bounds.bottom();
                }
            }
            BossAttack::DualSwordToss(toss) => {
                finished = toss.advance(dt, center);
                if !toss.hit && toss.sword_rects().iter().any(|r| r.overlaps(&player_rect)) {
                    toss.hit = true;
                    player.damage(TOSS_DAMAGE);
                    debug!("Sword toss hit the player, health {}", player.health);
                }
            }
            BossAttack::Fireballs(volley) => {
                if volley.advance(dt) {
                    spawn_fireball(
                        &mut commands,
                        center,
                        Fireball::new(angle_to(center, player_center), BOSS_FIREBALL_SPEED),
                    );
                }
            }
            BossAttack::RainOfSwords(rain) => {
                let top_left = Vec2::new(rect.left(), session.bounds.top() + RAIN_HEIGHT);
                position.pos = top_left - collider.offset;
                if rain.spawn.tick(dt) {
                    let x = center.x + (rng.0.f32() * 2.0 - 1.0) * RAIN_SPREAD;
                    spawn_falling_sword(&mut commands, Vec2::new(x, top_left.y + size.y));
                }
            }
        }

        if finished {
            let center = collider.rect(position.pos).center();
            gabriel.roll(&mut rng.0, center, player_center);
            debug!("Gabriel attack finished, next {:?}", gabriel.attack.kind());
        }
    }
}
