//! World assembly, the frame schedule and level loading.
//!
//! [`build_world`] inserts every resource, registers the state hooks and
//! observers and enters `Playing`. [`build_update_schedule`] wires the
//! systems in their fixed order and [`step`] advances the world by one frame.
//! Frontends and tests only need these three entry points.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::boss::{AttackKind, BossAttack, Gabriel, roll_sway};
use crate::components::boxcollider::BoxCollider;
use crate::components::collider::{Solid, TempSolid};
use crate::components::environment::{
    CHECKPOINT_SIZE, Checkpoint, Decoration, FgDecoration, GravityWell, HELLPIT_SIZE, HellPit, Note,
    Portal, Spawner, Tile,
};
use crate::components::gravity::Gravity;
use crate::components::hostile::{Filth, Hostile, HostileKind, Maurice, Soldier, Virtue, Wings};
use crate::components::mapposition::MapPosition;
use crate::components::persistent::Persistent;
use crate::components::player::{PLAYER_SIZE, Player};
use crate::components::sprite::Sprite;
use crate::components::tint::{Rgba, Tint, palette};
use crate::components::weapon::{WEAPON_SIZE, Weapon, WeaponKind, WeaponState};
use crate::events::chainhit::observe_chain_hit;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::level::observe_level_complete;
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::camera2d::Camera2D;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::debugmode::DebugMode;
use crate::resources::drawlist::DrawList;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::{InputSnapshot, InputState};
use crate::resources::level::{LevelData, LevelLibrary, Placement, PortalData, SpriteCache};
use crate::resources::rng::GameRng;
use crate::resources::save::SaveSlot;
use crate::resources::session::SessionState;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::worldtime::WorldTime;
use crate::systems::boss::boss_behaviour;
use crate::systems::collision::update_temp_colliders;
use crate::systems::effects::fade_effects;
use crate::systems::environment::{
    checkpoint_touch, gravity_well_pull, hellpit_fall, portal_travel, splatter_heal,
};
use crate::systems::gamestate::{check_pending_state, state_is_game_over, state_is_playing, world_not_frozen};
use crate::systems::hostiles::{
    filth_behaviour, hostile_damage, hostile_death, maurice_behaviour, soldier_behaviour,
    virtue_behaviour, wings_rotation,
};
use crate::systems::input::{restart_on_input, update_input_state};
use crate::systems::player::{player_coin_recharge, player_death, player_movement, player_punch};
use crate::systems::projectiles::{
    bullet_flight, coin_flight, core_flight, explosion_damage, fireball_flight, falling_sword_flight,
    magnet_flight, sawblade_flight,
};
use crate::systems::render::{
    debug_enabled, render_actors, render_banner, render_begin, render_debug, render_level,
    render_overlay, render_projectiles,
};
use crate::systems::spawner::spawner_activation;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;
use crate::systems::weapons::{weapon_fire, weapon_pickup, weapon_switch};

/// Build a ready-to-run world.
///
/// The start level is `config.start_level` clamped to the highest level the
/// save has unlocked. The world is already in `Playing` when this returns.
pub fn build_world(config: &GameConfig, library: LevelLibrary, save_slot: SaveSlot) -> World {
    let mut world = World::new();

    let save = save_slot.load_or_default();
    let start_level = config.start_level.clamp(1, save.max_level.max(1));
    let mut session = SessionState::new(start_level);
    session.save = save;
    info!("Starting on level {} (unlocked up to {})", start_level, session.save.max_level);

    let (render_width, render_height) = config.render_size();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(InputSnapshot::default());
    world.insert_resource(Camera2D::new(render_width as f32, render_height as f32));
    world.insert_resource(ColliderRegistry::new());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(session);
    world.insert_resource(save_slot);
    world.insert_resource(GameRng::new(config.seed));
    world.insert_resource(DrawList::new());
    world.insert_resource(SpriteCache::new());
    world.insert_resource(library);
    world.insert_resource(config.clone());
    if config.debug {
        world.insert_resource(DebugMode {});
    }

    // Registered systems are entities; they must survive level teardown.
    let mut systems_store = SystemsStore::new();
    let enter_play_id = world.register_system(enter_play);
    world.entity_mut(enter_play_id.entity()).insert(Persistent);
    systems_store.insert("enter_play", enter_play_id);

    let exit_play_id = world.register_system(exit_play);
    world.entity_mut(exit_play_id.entity()).insert(Persistent);
    systems_store.insert("exit_play", exit_play_id);

    let enter_game_over_id = world.register_system(enter_game_over);
    world.entity_mut(enter_game_over_id.entity()).insert(Persistent);
    systems_store.insert("enter_game_over", enter_game_over_id);

    let enter_win_id = world.register_system(enter_win);
    world.entity_mut(enter_win_id.entity()).insert(Persistent);
    systems_store.insert("enter_win", enter_win_id);

    world.insert_resource(systems_store);

    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));
    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(observe_chain_hit), Persistent));
    world.spawn((Observer::new(observe_level_complete), Persistent));
    world.flush();

    world.resource_mut::<NextGameState>().request(GameStates::Playing);
    world.trigger(GameStateChangedEvent {});
    world.flush();

    world
}

/// The per-frame schedule.
///
/// Input and pending state transitions are handled first. The simulation
/// chain runs only while playing and while no hit-flash is on screen;
/// cosmetic fades keep running underneath a flash. The render pass always
/// runs last, in the fixed draw order.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();

    update.add_systems((update_input_state, check_pending_state).chain());
    update.add_systems(
        (
            (
                update_temp_colliders,
                spawner_activation,
                player_movement,
                player_punch,
                player_coin_recharge,
                weapon_pickup,
                weapon_switch,
                weapon_fire,
            )
                .chain(),
            (
                bullet_flight,
                coin_flight,
                core_flight,
                explosion_damage,
                magnet_flight,
                sawblade_flight,
                fireball_flight,
                falling_sword_flight,
            )
                .chain(),
            (
                hostile_damage,
                filth_behaviour,
                soldier_behaviour,
                virtue_behaviour,
                maurice_behaviour,
                wings_rotation,
                boss_behaviour,
                hostile_death,
            )
                .chain(),
            (
                hellpit_fall,
                portal_travel,
                gravity_well_pull,
                checkpoint_touch,
                splatter_heal,
                ttl_system,
                player_death,
            )
                .chain(),
        )
            .chain()
            .after(check_pending_state)
            .run_if(state_is_playing)
            .run_if(world_not_frozen),
    );
    update.add_systems(
        fade_effects
            .after(player_death)
            .run_if(state_is_playing),
    );
    update.add_systems(
        restart_on_input
            .after(check_pending_state)
            .run_if(state_is_game_over),
    );
    update.add_systems(
        (
            render_begin,
            (render_level, render_actors, render_projectiles, render_overlay)
                .chain()
                .run_if(state_is_playing),
            render_debug.run_if(state_is_playing).run_if(debug_enabled),
            render_banner,
        )
            .chain()
            .after(fade_effects)
            .after(restart_on_input),
    );

    update
}

/// Advance the world by one frame of `dt` seconds with the given input.
pub fn step(world: &mut World, schedule: &mut Schedule, dt: f32, input: InputSnapshot) {
    update_world_time(world, dt);
    world.insert_resource(input);
    schedule.run(world);
    world.clear_trackers();
}

/// Despawn everything built from a level and forget its colliders.
fn despawn_level(
    commands: &mut Commands,
    registry: &mut ColliderRegistry,
    query: &Query<Entity, Without<Persistent>>,
) {
    let mut count = 0;
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
        count += 1;
    }
    registry.clear();
    debug!("Level teardown despawned {} entities", count);
}

/// Body colour for a placement tag.
fn tint_for(tag: &str) -> Rgba {
    match tag {
        "Tile" => palette::GREY,
        "Player" => Rgba::WHITE,
        "Filth" => palette::RED,
        "Soldier" => palette::RED2,
        "Virtue" | "Gabriel" => palette::YELLOW,
        "Maurice" => palette::PURPLE,
        "HellPit" => palette::BLACK,
        "Checkpoint" => palette::YELLOW,
        "Decoration" => palette::GREY.with_alpha(0.5),
        "FGDecoration" => palette::BLACK,
        _ => Rgba::WHITE,
    }
}

/// Size of a placement: the override if given, else `default`.
fn placement_size(placement: &Placement, default: Vec2) -> Vec2 {
    placement
        .size
        .map(|[w, h]| Vec2::new(w, h))
        .unwrap_or(default)
}

/// Top-left for an actor of `size` standing on the bottom of its cell.
fn standing_origin(level: &LevelData, placement: &Placement, size: Vec2) -> Vec2 {
    let cell = level.cell_origin(placement.x, placement.y);
    let ts = level.tile_size as f32;
    Vec2::new(cell.x, cell.y + ts - size.y)
}

/// Tear down the previous level and build `session.level_no`.
///
/// A missing level means the game has been finished and requests `Win`.
#[allow(clippy::too_many_arguments)]
pub fn enter_play(
    mut commands: Commands,
    mut library: ResMut<LevelLibrary>,
    mut session: ResMut<SessionState>,
    mut registry: ResMut<ColliderRegistry>,
    mut camera: ResMut<Camera2D>,
    mut sprite_cache: ResMut<SpriteCache>,
    mut next_state: ResMut<NextGameState>,
    mut rng: ResMut<GameRng>,
    save_slot: Option<Res<SaveSlot>>,
    leftovers: Query<Entity, Without<Persistent>>,
) {
    despawn_level(&mut commands, &mut registry, &leftovers);

    let level_no = session.level_no;
    let Some(level) = library.get(level_no).cloned() else {
        warn!("Level {} not found", level_no);
        next_state.request(GameStates::Win);
        return;
    };
    info!(
        "Entering level {} ({}x{} tiles, {} placements)",
        level_no,
        level.width,
        level.height,
        level.placements.len()
    );

    if let Some(slot) = save_slot {
        session.save = slot.load_or_default();
    }
    let owned: FxHashSet<WeaponKind> = session
        .save
        .weapons
        .iter()
        .filter_map(|name| {
            let kind = WeaponKind::from_name(name);
            if kind.is_none() {
                warn!("Unknown weapon '{}' in save data", name);
            }
            kind
        })
        .collect();

    let bounds = level.bounds();
    let tile_size = level.tile_size as f32;
    session.bounds = bounds;
    session.tile_size = tile_size;
    session.level_complete = false;
    camera.bounds = Some(bounds);

    // Spawners come first so hostiles can link to them.
    let mut spawner_ids: FxHashMap<u32, Entity> = FxHashMap::default();
    let mut spawner_centers: Vec<(Entity, Vec2)> = Vec::with_capacity(level.spawners.len());
    for data in &level.spawners {
        let rect = data.area.rect();
        let entity = commands
            .spawn((
                Spawner::new(data.id),
                MapPosition::from_vec(rect.pos),
                BoxCollider::new(rect.size.x, rect.size.y),
            ))
            .id();
        spawner_ids.insert(data.id, entity);
        spawner_centers.push((entity, rect.center()));
    }

    let player_origin = level
        .placements
        .iter()
        .find(|p| p.tag == "Player")
        .map(|p| standing_origin(&level, p, PLAYER_SIZE));
    let player_origin = match session.respawn_point() {
        Some(checkpoint) => Vec2::new(checkpoint.x, checkpoint.y + CHECKPOINT_SIZE.y - PLAYER_SIZE.y),
        None => player_origin.unwrap_or_else(|| {
            warn!("Level {} has no player placement", level_no);
            bounds.pos
        }),
    };
    let player_center = player_origin + PLAYER_SIZE * 0.5;

    let mut weapons: Vec<(WeaponKind, Entity)> = Vec::new();
    for placement in &level.placements {
        let tag = placement.tag.as_str();
        let tint = Tint::from(tint_for(tag));

        if let Some(kind) = HostileKind::from_tag(tag) {
            let size = placement_size(placement, kind.size());
            let pos = standing_origin(&level, placement, size);
            let body = (
                MapPosition::from_vec(pos),
                BoxCollider::new(size.x, size.y),
                Sprite::new(tag, size.x, size.y),
                tint,
            );
            let center = pos + size * 0.5;

            if kind == HostileKind::Gabriel {
                let attack = BossAttack::start(AttackKind::choose(&mut rng.0, false), center, player_center, false);
                let sway = roll_sway(&mut rng.0);
                commands.spawn((Hostile::new(kind, None).active(), Gabriel::new(attack, sway), body));
                info!("Gabriel awaits");
                continue;
            }

            let spawner = match placement.spawner {
                Some(id) => spawner_ids.get(&id).copied().or_else(|| {
                    warn!("{} at ({}, {}) names unknown spawner {}", tag, placement.x, placement.y, id);
                    nearest_spawner(&spawner_centers, center)
                }),
                None => nearest_spawner(&spawner_centers, center),
            };
            let hostile = Hostile::new(kind, spawner);
            let mut entity = commands.spawn((hostile, body));
            match kind {
                HostileKind::Filth => {
                    entity.insert((Filth::new(), Gravity::new()));
                }
                HostileKind::Soldier => {
                    entity.insert(Soldier::new());
                }
                HostileKind::Virtue => {
                    entity.insert(Virtue {
                        strike_x: player_center.x,
                        ..Virtue::default()
                    });
                }
                HostileKind::Maurice => {
                    entity.insert((Maurice::default(), Wings::new()));
                }
                HostileKind::Gabriel => {}
            }
            continue;
        }

        if let Some(kind) = WeaponKind::ALL.iter().copied().find(|k| k.tag() == tag) {
            let size = placement_size(placement, WEAPON_SIZE);
            let pos = standing_origin(&level, placement, size);
            let state = if owned.contains(&kind) {
                WeaponState::Inventory
            } else {
                WeaponState::Ground
            };
            let entity = commands
                .spawn((
                    Weapon::new(kind, state),
                    MapPosition::from_vec(pos),
                    BoxCollider::new(size.x, size.y),
                ))
                .id();
            weapons.push((kind, entity));
            continue;
        }

        let cell = level.cell_origin(placement.x, placement.y);
        match tag {
            "Player" => {}
            "Tile" => {
                let size = placement_size(placement, Vec2::splat(tile_size));
                let entity = commands
                    .spawn((
                        Tile,
                        Solid,
                        MapPosition::from_vec(cell),
                        BoxCollider::new(size.x, size.y),
                        Sprite::new(tag, size.x, size.y),
                        tint,
                    ))
                    .id();
                registry.register(entity);
            }
            "HellPit" => {
                let size = placement_size(placement, HELLPIT_SIZE);
                commands.spawn((
                    HellPit,
                    MapPosition::from_vec(cell),
                    BoxCollider::new(size.x, size.y),
                    Sprite::new(tag, size.x, size.y),
                    tint,
                ));
            }
            "Checkpoint" => {
                let size = placement_size(placement, CHECKPOINT_SIZE);
                commands.spawn((
                    Checkpoint,
                    MapPosition::from_vec(cell),
                    BoxCollider::new(size.x, size.y),
                    Sprite::new(tag, size.x, size.y),
                    tint,
                ));
            }
            "Decoration" => {
                let size = placement_size(placement, Vec2::splat(tile_size));
                commands.spawn((
                    Decoration,
                    MapPosition::from_vec(cell),
                    BoxCollider::new(size.x, size.y),
                    Sprite::new(tag, size.x, size.y),
                    tint,
                ));
            }
            "FGDecoration" => {
                let size = placement_size(placement, Vec2::splat(tile_size));
                commands.spawn((
                    FgDecoration,
                    MapPosition::from_vec(cell),
                    BoxCollider::new(size.x, size.y),
                    Sprite::new(tag, size.x, size.y),
                    tint,
                ));
            }
            _ => {
                let size = placement_size(placement, Vec2::splat(tile_size));
                if sprite_cache.get(tag).is_none() {
                    debug!("Caching unknown tag '{}'", tag);
                }
                sprite_cache.insert(tag, size);
            }
        }
    }

    // Owned weapons the map does not place are carried from the start.
    for kind in WeaponKind::ALL {
        if owned.contains(&kind) && !weapons.iter().any(|(k, _)| *k == kind) {
            let entity = commands
                .spawn((
                    Weapon::new(kind, WeaponState::Inventory),
                    MapPosition::from_vec(player_origin),
                    BoxCollider::new(WEAPON_SIZE.x, WEAPON_SIZE.y),
                ))
                .id();
            weapons.push((kind, entity));
        }
    }

    let mut player = Player::new();
    let first_owned = WeaponKind::ALL.iter().find_map(|kind| {
        weapons
            .iter()
            .find(|(k, _)| k == kind && owned.contains(k))
            .map(|(k, e)| (*k, *e))
    });
    if let Some((kind, entity)) = first_owned {
        commands
            .entity(entity)
            .insert(Weapon::new(kind, WeaponState::Equipped));
        player.equipped = Some(entity);
        debug!("Equipped {} at level start", kind.name());
    }

    commands.spawn((
        player,
        MapPosition::from_vec(player_origin),
        BoxCollider::new(PLAYER_SIZE.x, PLAYER_SIZE.y),
        Gravity::new(),
        TempSolid,
        Sprite::new("Player", PLAYER_SIZE.x, PLAYER_SIZE.y),
        Tint::from(tint_for("Player")),
    ));

    spawn_portals(&mut commands, &level);

    for note in &level.notes {
        commands.spawn((
            Note {
                text: note.text.clone(),
            },
            MapPosition::new(note.x, note.y),
        ));
    }

    for well in &level.gravity_wells {
        let rect = well.area.rect();
        commands.spawn((
            GravityWell { acc: well.acc },
            MapPosition::from_vec(rect.pos),
            BoxCollider::new(rect.size.x, rect.size.y),
        ));
    }

    camera.attach_to(player_center, 1.0);
}

fn nearest_spawner(spawners: &[(Entity, Vec2)], from: Vec2) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for (entity, center) in spawners {
        let d = center.distance_squared(from);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((*entity, d));
        }
    }
    best.map(|(e, _)| e)
}

/// Spawn the portal layer and pair portals sharing a link id.
fn spawn_portals(commands: &mut Commands, level: &LevelData) {
    let mut links: FxHashMap<u32, Vec<Entity>> = FxHashMap::default();
    let spawned: Vec<(Entity, &PortalData)> = level
        .portals
        .iter()
        .map(|data| (commands.spawn_empty().id(), data))
        .collect();
    for (entity, data) in &spawned {
        links.entry(data.link).or_default().push(*entity);
    }

    for (entity, data) in spawned {
        let partner = links
            .get(&data.link)
            .and_then(|group| group.iter().copied().find(|e| *e != entity));
        if partner.is_none() {
            warn!("Portal with link {} has no partner", data.link);
        }
        let rect = data.area.rect();
        commands.entity(entity).insert((
            Portal {
                link: data.link,
                side: data.side.into(),
                partner,
            },
            MapPosition::from_vec(rect.pos),
            BoxCollider::new(rect.size.x, rect.size.y),
        ));
    }
}

/// Leaving `Playing`: moving blockers are rebuilt by the next level.
pub fn exit_play(mut registry: ResMut<ColliderRegistry>) {
    registry.clear_temp();
    debug!("Left Playing");
}

pub fn enter_game_over(session: Res<SessionState>) {
    info!("Game over on level {}", session.level_no);
}

pub fn enter_win(session: Res<SessionState>) {
    info!("Victory after level {}", session.level_no);
}
