//! Hostiles, projectiles and the boss, driven one system at a time.
#![allow(dead_code, unused_imports)]

use angelfall::components::boss::{AttackKind, BOSS_HEALTH, BossAttack, Gabriel, TOSS_DAMAGE};
use angelfall::components::boxcollider::{BoxCollider, Rect};
use angelfall::components::collider::TempSolid;
use angelfall::components::effects::{BloodSplatter, ChainLine, Flash};
use angelfall::components::environment::Spawner;
use angelfall::components::gravity::Gravity;
use angelfall::components::hostile::{
    Activation, Filth, Hostile, HostileKind, Maurice, Soldier, VIRTUE_STRIKE_DAMAGE, Virtue,
};
use angelfall::components::mapposition::MapPosition;
use angelfall::components::player::{MAX_HEALTH, PLAYER_SIZE, Player};
use angelfall::components::projectile::{
    BULLET_SIZE, Bullet, COIN_SIZE, CORE_SIZE, ChainScaling, Coin, CoreEject, EXPLOSION_DAMAGE, Explosion,
    FALLING_SWORD_DAMAGE, FALLING_SWORD_SIZE, FIREBALL_DAMAGE, FIREBALL_SIZE, FallingSword, Fireball,
    MAGNET_ORBIT_RADIUS, MAGNET_SIZE, Magnet, SAWBLADE_SIZE, Sawblade,
};
use angelfall::components::ttl::Ttl;
use angelfall::events::chainhit::observe_chain_hit;
use angelfall::resources::camera2d::Camera2D;
use angelfall::resources::colliders::ColliderRegistry;
use angelfall::resources::gamestate::{GameStates, NextGameState, NextGameStates};
use angelfall::resources::rng::GameRng;
use angelfall::resources::session::SessionState;
use angelfall::resources::worldtime::WorldTime;
use angelfall::systems::boss::boss_behaviour;
use angelfall::systems::collision::update_temp_colliders;
use angelfall::systems::hostiles::{
    filth_behaviour, hostile_damage, hostile_death, maurice_behaviour, soldier_behaviour, virtue_behaviour,
};
use angelfall::systems::player::player_death;
use angelfall::systems::projectiles::{
    bullet_flight, core_flight, explosion_damage, falling_sword_flight, fireball_flight, magnet_flight,
    sawblade_flight,
};
use angelfall::systems::spawner::spawner_activation;
use bevy_ecs::prelude::*;
use bevy_ecs::system::ScheduleSystem;
use glam::Vec2;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(ColliderRegistry::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(GameRng::new(Some(7)));
    world.insert_resource(Camera2D::new(480.0, 270.0));
    let mut session = SessionState::new(1);
    session.bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
    session.tile_size = 16.0;
    world.insert_resource(session);
    world
}

fn tick<M>(world: &mut World, system: impl IntoScheduleConfigs<ScheduleSystem, M>) {
    let mut schedule = Schedule::default();
    schedule.add_systems(system);
    schedule.run(world);
}

fn spawn_player(world: &mut World, x: f32, y: f32) -> Entity {
    world
        .spawn((
            Player::new(),
            MapPosition::new(x, y),
            BoxCollider::new(PLAYER_SIZE.x, PLAYER_SIZE.y),
            Gravity::new(),
            TempSolid,
        ))
        .id()
}

fn spawn_hostile(world: &mut World, kind: HostileKind, x: f32, y: f32) -> Entity {
    let size = kind.size();
    world
        .spawn((
            Hostile::new(kind, None).active(),
            MapPosition::new(x, y),
            BoxCollider::new(size.x, size.y),
        ))
        .id()
}

fn spawn_bullet(world: &mut World, center: Vec2, scaling: ChainScaling, damage: i32) -> Entity {
    world
        .spawn((
            Bullet::new(0.0, 200.0, damage, scaling),
            MapPosition::from_vec(center),
            BoxCollider::centered(BULLET_SIZE, BULLET_SIZE),
        ))
        .id()
}

fn spawn_coin(world: &mut World, center: Vec2) -> Entity {
    world
        .spawn((
            Coin { velocity: Vec2::ZERO },
            MapPosition::from_vec(center),
            BoxCollider::centered(COIN_SIZE, COIN_SIZE),
        ))
        .id()
}

fn count<C: Component>(world: &mut World) -> usize {
    world.query::<&C>().iter(world).count()
}

#[test]
fn filth_contact_damage_respects_its_cooldown() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 0.0, 0.0);
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 0.0, 0.0);
    world.entity_mut(filth).insert((Filth::new(), Gravity::new()));

    tick(&mut world, filth_behaviour);
    assert_eq!(world.get::<Player>(player).unwrap().health, MAX_HEALTH - 100);

    tick(&mut world, filth_behaviour);
    assert_eq!(world.get::<Player>(player).unwrap().health, MAX_HEALTH - 100);
}

#[test]
fn dormant_filth_stays_put() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 0.0, 0.0);
    let filth = world
        .spawn((
            Hostile::new(HostileKind::Filth, None),
            Filth::new(),
            Gravity::new(),
            MapPosition::new(0.0, 0.0),
            BoxCollider::new(16.0, 16.0),
        ))
        .id();

    tick(&mut world, filth_behaviour);

    assert_eq!(world.get::<MapPosition>(filth).unwrap().pos, Vec2::ZERO);
    assert_eq!(world.get::<Player>(player).unwrap().health, MAX_HEALTH);
}

#[test]
fn player_death_requests_game_over_once() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 0.0, 0.0);
    world.get_mut::<Player>(player).unwrap().damage(MAX_HEALTH);

    tick(&mut world, player_death);
    tick(&mut world, player_death);

    let mut next = world.resource_mut::<NextGameState>();
    assert_eq!(next.get(), &NextGameStates::Pending(GameStates::GameOver));
    assert!(!next.request(GameStates::Win));
    assert_eq!(next.get(), &NextGameStates::Pending(GameStates::GameOver));
}

#[test]
fn bullet_ricochets_off_a_coin_toward_the_nearest_hostile() {
    let mut world = make_world(0.05);
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, ChainScaling::Additive, 200);
    let coin = spawn_coin(&mut world, Vec2::new(12.0, 0.0));
    spawn_hostile(&mut world, HostileKind::Filth, 100.0, -8.0);

    tick(&mut world, bullet_flight);

    assert!(world.get_entity(coin).is_err());
    let b = world.get::<Bullet>(bullet).unwrap();
    assert_eq!(b.damage, 400);
    assert_eq!(b.chain.len(), 1);
    assert_eq!(b.chain[0], Vec2::new(108.0, 0.0));
    assert_eq!(b.target, Some(Vec2::new(108.0, 0.0)));
    assert_eq!(world.get::<MapPosition>(bullet).unwrap().pos, Vec2::new(12.0, 0.0));
}

#[test]
fn chained_coins_double_damage_each_hop() {
    let mut world = make_world(0.05);
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, ChainScaling::Doubling, 70);
    spawn_coin(&mut world, Vec2::new(12.0, 0.0));
    let second = spawn_coin(&mut world, Vec2::new(40.0, 0.0));
    spawn_hostile(&mut world, HostileKind::Filth, 300.0, -8.0);

    tick(&mut world, bullet_flight);
    {
        let b = world.get::<Bullet>(bullet).unwrap();
        assert_eq!(b.damage, 140);
        assert_eq!(b.target, Some(Vec2::new(40.0, 0.0)));
    }

    tick(&mut world, bullet_flight);
    tick(&mut world, bullet_flight);

    assert!(world.get_entity(second).is_err());
    let b = world.get::<Bullet>(bullet).unwrap();
    assert_eq!(b.damage, 280);
    assert_eq!(b.chain.len(), 2);
    assert_eq!(b.target, Some(Vec2::new(308.0, 0.0)));
}

#[test]
fn ricochet_without_targets_removes_the_bullet() {
    let mut world = make_world(0.05);
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, ChainScaling::Additive, 200);
    let coin = spawn_coin(&mut world, Vec2::new(12.0, 0.0));

    tick(&mut world, bullet_flight);

    assert!(world.get_entity(bullet).is_err());
    assert!(world.get_entity(coin).is_err());
}

#[test]
fn chained_hit_draws_the_trail_and_flashes() {
    let mut world = make_world(0.05);
    world.add_observer(observe_chain_hit);
    spawn_player(&mut world, 0.0, 0.0);
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 100.0, 0.0);
    let bullet = spawn_bullet(&mut world, Vec2::new(108.0, 8.0), ChainScaling::Additive, 200);
    world.get_mut::<Bullet>(bullet).unwrap().chain.push(Vec2::new(50.0, 8.0));

    tick(&mut world, hostile_damage);

    assert!(world.get_entity(bullet).is_err());
    assert_eq!(world.get::<Hostile>(filth).unwrap().health, -100);
    let trails: Vec<Vec<Vec2>> = world
        .query::<&ChainLine>()
        .iter(&world)
        .map(|c| c.points.clone())
        .collect();
    assert_eq!(
        trails,
        vec![vec![Vec2::new(6.0, 8.0), Vec2::new(50.0, 8.0), Vec2::new(108.0, 8.0)]]
    );
    assert_eq!(count::<Flash>(&mut world), 1);
}

#[test]
fn dead_hostiles_leave_a_splatter() {
    let mut world = make_world(0.05);
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 0.0, 0.0);
    world.get_mut::<Hostile>(filth).unwrap().health = 0;

    tick(&mut world, hostile_death);

    assert!(world.get_entity(filth).is_err());
    let splatters: Vec<Vec2> = world
        .query::<(&BloodSplatter, &MapPosition)>()
        .iter(&world)
        .map(|(_, p)| p.pos)
        .collect();
    assert_eq!(splatters, vec![Vec2::new(8.0, 8.0)]);
    assert!(!world.resource::<NextGameState>().is_pending());
}

#[test]
fn defeating_gabriel_wins() {
    let mut world = make_world(0.05);
    let boss = spawn_hostile(&mut world, HostileKind::Gabriel, 0.0, 0.0);
    world.get_mut::<Hostile>(boss).unwrap().health = -5;

    tick(&mut world, hostile_death);

    assert_eq!(
        world.resource::<NextGameState>().get(),
        &NextGameStates::Pending(GameStates::Win)
    );
}

#[test]
fn spawner_wakes_its_hostiles_with_a_flicker() {
    let mut world = make_world(0.1);
    let player = spawn_player(&mut world, 0.0, 0.0);
    let spawner = world
        .spawn((Spawner::new(3), MapPosition::new(200.0, 0.0), BoxCollider::new(64.0, 64.0)))
        .id();
    let filth = world
        .spawn((
            Hostile::new(HostileKind::Filth, Some(spawner)),
            MapPosition::new(220.0, 0.0),
            BoxCollider::new(16.0, 16.0),
        ))
        .id();

    tick(&mut world, spawner_activation);
    assert!(world.get::<Hostile>(filth).unwrap().activation.is_dormant());

    world.get_mut::<MapPosition>(player).unwrap().pos = Vec2::new(210.0, 10.0);
    tick(&mut world, spawner_activation);
    assert!(world.get::<Spawner>(spawner).unwrap().activated);
    assert!(matches!(
        world.get::<Hostile>(filth).unwrap().activation,
        Activation::Flickering { .. }
    ));

    for _ in 0..7 {
        tick(&mut world, spawner_activation);
    }
    assert!(world.get::<Hostile>(filth).unwrap().activation.is_active());
}

#[test]
fn gabriel_drops_onto_the_player() {
    let mut world = make_world(0.25);
    let player = spawn_player(&mut world, 100.0, 200.0);
    let boss = world
        .spawn((
            Hostile::new(HostileKind::Gabriel, None).active(),
            Gabriel::new(
                BossAttack::start(AttackKind::Dropping, Vec2::ZERO, Vec2::ZERO, false),
                0.0,
            ),
            MapPosition::new(300.0, 40.0),
            BoxCollider::new(24.0, 40.0),
        ))
        .id();
    tick(&mut world, update_temp_colliders);

    tick(&mut world, boss_behaviour);
    // Repositioned above the player once the wait is over.
    assert_eq!(world.get::<MapPosition>(boss).unwrap().pos, Vec2::new(94.0, 48.0));

    for _ in 0..40 {
        tick(&mut world, boss_behaviour);
        if world.get::<Player>(player).unwrap().health < MAX_HEALTH {
            break;
        }
    }
    assert_eq!(world.get::<Player>(player).unwrap().health, MAX_HEALTH - 100);
    let boss_rect = world
        .get::<BoxCollider>(boss)
        .unwrap()
        .rect(world.get::<MapPosition>(boss).unwrap().pos);
    assert!(approx_eq(boss_rect.bottom(), 200.0), "bottom = {}", boss_rect.bottom());
}

#[test]
fn gabriel_enrages_at_half_health() {
    let mut world = make_world(0.05);
    spawn_player(&mut world, 100.0, 200.0);
    let boss = world
        .spawn((
            Hostile::new(HostileKind::Gabriel, None).active(),
            Gabriel::new(
                BossAttack::start(AttackKind::Fireballs, Vec2::ZERO, Vec2::ZERO, false),
                0.0,
            ),
            MapPosition::new(300.0, 40.0),
            BoxCollider::new(24.0, 40.0),
        ))
        .id();

    tick(&mut world, boss_behaviour);
    assert!(!world.get::<Gabriel>(boss).unwrap().enraged);

    world.get_mut::<Hostile>(boss).unwrap().health = BOSS_HEALTH / 2;
    tick(&mut world, boss_behaviour);
    assert!(world.get::<Gabriel>(boss).unwrap().enraged);

    world.get_mut::<Hostile>(boss).unwrap().health = BOSS_HEALTH;
    tick(&mut world, boss_behaviour);
    assert!(world.get::<Gabriel>(boss).unwrap().enraged);
}

fn health(world: &World, player: Entity) -> i32 {
    world.get::<Player>(player).unwrap().health
}

#[test]
fn redirected_bullet_tracks_a_moving_hostile() {
    let mut world = make_world(0.05);
    let bullet = spawn_bullet(&mut world, Vec2::new(90.0, 100.0), ChainScaling::Additive, 200);
    spawn_coin(&mut world, Vec2::new(100.0, 100.0));
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 300.0, 92.0);

    tick(&mut world, bullet_flight);
    assert_eq!(world.get::<Bullet>(bullet).unwrap().target_entity, Some(filth));

    for _ in 0..40 {
        world.get_mut::<MapPosition>(filth).unwrap().pos.y += 1.5;
        tick(&mut world, (bullet_flight, hostile_damage).chain());
        if world.get_entity(bullet).is_err() {
            break;
        }
    }

    assert!(world.get_entity(bullet).is_err());
    assert_eq!(world.get::<Hostile>(filth).unwrap().health, 100 - 400);
}

#[test]
fn bullet_keeps_the_last_known_point_when_its_target_is_gone() {
    let mut world = make_world(0.05);
    let bullet = spawn_bullet(&mut world, Vec2::ZERO, ChainScaling::Additive, 200);
    spawn_coin(&mut world, Vec2::new(12.0, 0.0));
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 100.0, -8.0);

    tick(&mut world, bullet_flight);
    world.entity_mut(filth).despawn();
    tick(&mut world, bullet_flight);

    let b = world.get::<Bullet>(bullet).unwrap();
    assert_eq!(b.target_entity, None);
    assert_eq!(b.target, Some(Vec2::new(108.0, 0.0)));
    assert_eq!(world.get::<MapPosition>(bullet).unwrap().pos, Vec2::new(22.0, 0.0));
}

#[test]
fn magnet_sticks_to_a_hostile_and_rides_it() {
    let mut world = make_world(0.05);
    let filth = spawn_hostile(&mut world, HostileKind::Filth, 92.0, 96.0);
    let magnet = world
        .spawn((
            Magnet {
                velocity: Vec2::ZERO,
                anchor: None,
            },
            MapPosition::new(100.0, 100.0),
            BoxCollider::centered(MAGNET_SIZE, MAGNET_SIZE),
        ))
        .id();

    tick(&mut world, magnet_flight);
    let (anchor, offset) = world.get::<Magnet>(magnet).unwrap().anchor.unwrap();
    assert_eq!(anchor, filth);
    let stuck_at = world.get::<MapPosition>(magnet).unwrap().pos;

    world.get_mut::<MapPosition>(filth).unwrap().pos = Vec2::new(120.0, 150.0);
    tick(&mut world, magnet_flight);
    tick(&mut world, magnet_flight);

    let pos = world.get::<MapPosition>(magnet).unwrap().pos;
    assert_eq!(pos, Vec2::new(120.0, 150.0) + offset);
    assert!(approx_eq(pos.x - stuck_at.x, 28.0));
    assert!(approx_eq(pos.y - stuck_at.y, 54.0));
}

#[test]
fn sawblade_orbits_a_nearby_magnet_for_its_lifetime() {
    let mut world = make_world(0.05);
    let magnet = world
        .spawn((
            Magnet {
                velocity: Vec2::ZERO,
                anchor: None,
            },
            Ttl::new(5.0),
            MapPosition::new(100.0, 100.0),
            BoxCollider::centered(MAGNET_SIZE, MAGNET_SIZE),
        ))
        .id();
    let sawblade = world
        .spawn((
            Sawblade {
                radians: 0.0,
                speed: 200.0,
                damage: 30,
                magnet: None,
            },
            Ttl::new(0.2),
            MapPosition::new(130.0, 100.0),
            BoxCollider::centered(SAWBLADE_SIZE, SAWBLADE_SIZE),
        ))
        .id();
    let stray = world
        .spawn((
            Sawblade {
                radians: 0.0,
                speed: 200.0,
                damage: 30,
                magnet: None,
            },
            Ttl::new(0.2),
            MapPosition::new(400.0, 100.0),
            BoxCollider::centered(SAWBLADE_SIZE, SAWBLADE_SIZE),
        ))
        .id();

    tick(&mut world, sawblade_flight);

    assert_eq!(world.get::<Sawblade>(sawblade).unwrap().magnet, Some(magnet));
    let pos = world.get::<MapPosition>(sawblade).unwrap().pos;
    assert!(approx_eq(pos.distance(Vec2::new(100.0, 100.0)), MAGNET_ORBIT_RADIUS));
    assert!(pos.y > 100.0);
    assert_eq!(world.get::<Ttl>(sawblade).unwrap().remaining, 5.0);

    world.get_mut::<MapPosition>(magnet).unwrap().pos = Vec2::new(200.0, 60.0);
    world.get_mut::<Ttl>(magnet).unwrap().remaining = 3.5;
    tick(&mut world, sawblade_flight);

    let pos = world.get::<MapPosition>(sawblade).unwrap().pos;
    assert!(approx_eq(pos.distance(Vec2::new(200.0, 60.0)), MAGNET_ORBIT_RADIUS));
    assert_eq!(world.get::<Ttl>(sawblade).unwrap().remaining, 3.5);

    assert_eq!(world.get::<Sawblade>(stray).unwrap().magnet, None);
    assert!(approx_eq(world.get::<MapPosition>(stray).unwrap().pos.x, 420.0));
}

#[test]
fn virtue_strike_lands_once_per_cycle() {
    let mut world = make_world(0.1);
    let player = spawn_player(&mut world, 100.0, 200.0);
    let virtue = spawn_hostile(&mut world, HostileKind::Virtue, 400.0, 20.0);
    world.entity_mut(virtue).insert(Virtue::default());

    for _ in 0..58 {
        tick(&mut world, virtue_behaviour);
    }
    assert_eq!(health(&world, player), MAX_HEALTH);

    for _ in 0..4 {
        tick(&mut world, virtue_behaviour);
    }
    assert_eq!(health(&world, player), MAX_HEALTH - VIRTUE_STRIKE_DAMAGE);

    for _ in 0..15 {
        tick(&mut world, virtue_behaviour);
    }
    assert_eq!(health(&world, player), MAX_HEALTH - VIRTUE_STRIKE_DAMAGE);
}

#[test]
fn virtue_strike_column_locks_before_landing() {
    let mut world = make_world(0.1);
    let player = spawn_player(&mut world, 100.0, 200.0);
    let virtue = spawn_hostile(&mut world, HostileKind::Virtue, 400.0, 20.0);
    world.entity_mut(virtue).insert(Virtue::default());

    for _ in 0..30 {
        tick(&mut world, virtue_behaviour);
    }
    world.get_mut::<MapPosition>(player).unwrap().pos.x = 150.0;
    tick(&mut world, virtue_behaviour);
    assert!(approx_eq(world.get::<Virtue>(virtue).unwrap().strike_x, 156.0));

    for _ in 0..27 {
        tick(&mut world, virtue_behaviour);
    }
    // Past the lock: the column no longer follows.
    world.get_mut::<MapPosition>(player).unwrap().pos.x = 300.0;
    for _ in 0..4 {
        tick(&mut world, virtue_behaviour);
    }

    assert!(approx_eq(world.get::<Virtue>(virtue).unwrap().strike_x, 156.0));
    assert!(world.get::<Virtue>(virtue).unwrap().struck);
    assert_eq!(health(&world, player), MAX_HEALTH);
}

#[test]
fn soldier_fires_once_per_charge() {
    let mut world = make_world(0.1);
    spawn_player(&mut world, 100.0, 200.0);
    let soldier = spawn_hostile(&mut world, HostileKind::Soldier, 300.0, 200.0);
    world.entity_mut(soldier).insert(Soldier::new());

    tick(&mut world, soldier_behaviour);
    assert_eq!(count::<Fireball>(&mut world), 1);

    for _ in 0..20 {
        tick(&mut world, soldier_behaviour);
    }
    assert_eq!(count::<Fireball>(&mut world), 1);

    for _ in 0..12 {
        tick(&mut world, soldier_behaviour);
    }
    assert_eq!(count::<Fireball>(&mut world), 2);
}

#[test]
fn maurice_launches_a_homing_volley_of_three() {
    let mut world = make_world(0.1);
    spawn_player(&mut world, 100.0, 200.0);
    let maurice = spawn_hostile(&mut world, HostileKind::Maurice, 300.0, 100.0);
    world.entity_mut(maurice).insert(Maurice::default());

    for _ in 0..29 {
        tick(&mut world, maurice_behaviour);
    }
    assert_eq!(count::<Fireball>(&mut world), 0);

    for _ in 0..7 {
        tick(&mut world, maurice_behaviour);
    }
    let homing: Vec<bool> = world.query::<&Fireball>().iter(&world).map(|f| f.homing).collect();
    assert_eq!(homing, vec![true, true, true]);
}

#[test]
fn homing_fireball_chases_and_hits_the_player_once() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 100.0, 100.0);
    let fireball = world
        .spawn((
            Fireball::new(std::f32::consts::PI, 30.0).homing(),
            MapPosition::new(60.0, 80.0),
            BoxCollider::centered(FIREBALL_SIZE, FIREBALL_SIZE),
        ))
        .id();

    for _ in 0..100 {
        tick(&mut world, fireball_flight);
        if world.get_entity(fireball).is_err() {
            break;
        }
    }

    assert!(world.get_entity(fireball).is_err());
    assert_eq!(health(&world, player), MAX_HEALTH - FIREBALL_DAMAGE);
}

#[test]
fn explosion_deals_its_damage_once() {
    let mut world = make_world(0.05);
    let virtue = spawn_hostile(&mut world, HostileKind::Virtue, 92.0, 92.0);
    let far = spawn_hostile(&mut world, HostileKind::Filth, 400.0, 400.0);
    let dormant = world
        .spawn((
            Hostile::new(HostileKind::Soldier, None),
            MapPosition::new(100.0, 100.0),
            BoxCollider::new(16.0, 16.0),
        ))
        .id();
    world.spawn((Explosion::new(), MapPosition::new(100.0, 100.0)));

    tick(&mut world, explosion_damage);
    tick(&mut world, explosion_damage);

    assert_eq!(world.get::<Hostile>(virtue).unwrap().health, 1000 - EXPLOSION_DAMAGE);
    assert_eq!(world.get::<Hostile>(far).unwrap().health, 100);
    assert_eq!(world.get::<Hostile>(dormant).unwrap().health, 100);
}

#[test]
fn core_bursts_on_contact_with_a_hostile() {
    let mut world = make_world(0.05);
    let virtue = spawn_hostile(&mut world, HostileKind::Virtue, 92.0, 92.0);
    let core = world
        .spawn((
            CoreEject {
                velocity: Vec2::ZERO,
                remaining: 0.5,
            },
            MapPosition::new(100.0, 100.0),
            BoxCollider::centered(CORE_SIZE, CORE_SIZE),
        ))
        .id();

    tick(&mut world, core_flight);
    assert!(world.get_entity(core).is_err());
    assert_eq!(count::<Explosion>(&mut world), 1);

    tick(&mut world, explosion_damage);
    assert_eq!(world.get::<Hostile>(virtue).unwrap().health, 1000 - EXPLOSION_DAMAGE);
}

fn spawn_falling_sword(world: &mut World, center: Vec2) -> Entity {
    world
        .spawn((
            FallingSword::default(),
            MapPosition::from_vec(center),
            BoxCollider::centered(FALLING_SWORD_SIZE.x, FALLING_SWORD_SIZE.y),
        ))
        .id()
}

#[test]
fn falling_sword_hits_the_player_once() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 100.0, 300.0);
    let sword = spawn_falling_sword(&mut world, Vec2::new(106.0, 200.0));

    for _ in 0..100 {
        tick(&mut world, falling_sword_flight);
        if world.get_entity(sword).is_err() {
            break;
        }
    }

    assert!(world.get_entity(sword).is_err());
    assert_eq!(health(&world, player), MAX_HEALTH - FALLING_SWORD_DAMAGE);
}

#[test]
fn falling_sword_outlives_the_level_bottom_by_a_margin() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 100.0, 300.0);
    let sword = spawn_falling_sword(&mut world, Vec2::new(500.0, 300.0));

    let mut last_seen = 300.0;
    for _ in 0..400 {
        tick(&mut world, falling_sword_flight);
        match world.get::<MapPosition>(sword) {
            Some(position) => last_seen = position.pos.y,
            None => break,
        }
    }

    assert!(world.get_entity(sword).is_err());
    // Level bottom is 480; swords are dropped 200 px below it.
    assert!(last_seen > 480.0, "last seen at {}", last_seen);
    assert!(last_seen <= 680.0, "last seen at {}", last_seen);
    assert_eq!(health(&world, player), MAX_HEALTH);
}

#[test]
fn sword_toss_hits_at_most_once_per_phase() {
    let mut world = make_world(0.05);
    let player = spawn_player(&mut world, 94.0, 112.0);
    let boss_center = Vec2::new(100.0, 120.0);
    let player_center = Vec2::new(100.0, 120.0);
    let boss = world
        .spawn((
            Hostile::new(HostileKind::Gabriel, None).active(),
            Gabriel::new(
                BossAttack::start(AttackKind::DualSwordToss, boss_center, player_center, false),
                0.0,
            ),
            MapPosition::new(88.0, 100.0),
            BoxCollider::new(24.0, 40.0),
        ))
        .id();

    let mut health_by_phase = [None; 3];
    let mut last_phase = 0;
    let mut finished = false;
    for _ in 0..200 {
        tick(&mut world, boss_behaviour);
        let phase = match &world.get::<Gabriel>(boss).unwrap().attack {
            BossAttack::DualSwordToss(toss) => toss.phase,
            _ => usize::MAX,
        };
        if phase == usize::MAX || phase < last_phase {
            finished = true;
            break;
        }
        last_phase = phase;
        health_by_phase[phase] = Some(health(&world, player));
    }

    assert!(finished);
    assert_eq!(
        health_by_phase,
        [
            Some(MAX_HEALTH - TOSS_DAMAGE),
            Some(MAX_HEALTH - 2 * TOSS_DAMAGE),
            Some(MAX_HEALTH - 2 * TOSS_DAMAGE),
        ]
    );
}
