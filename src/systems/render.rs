//! Render pass.
//!
//! The pass turns the world into screen-space [`DrawCommand`]s appended to
//! the [`DrawList`] resource. Systems are chained in the fixed category
//! order, so the list is already back-to-front:
//!
//! 1. [`render_begin`] clears the list
//! 2. [`render_level`] level furniture behind the actors
//! 3. [`render_actors`] hostiles, boss, weapons and the player
//! 4. [`render_projectiles`] projectiles, explosions and blood
//! 5. [`render_overlay`] foreground decorations, chain lines, HUD, flash
//! 6. [`render_debug`] collider outlines when debug mode is on
//! 7. [`render_banner`] game-over and win screens
//!
//! Anything whose world rect misses the camera view is culled.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::boss::{BossAttack, Gabriel};
use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::effects::{BloodSplatter, ChainLine, CheckpointPopup, Fade, Flash};
use crate::components::environment::{
    Checkpoint, Decoration, FgDecoration, GravityWell, HellPit, Note, Portal, Spawner, Tile,
};
use crate::components::hostile::{Hostile, Virtue, Wings};
use crate::components::mapposition::{MapPosition, angle_to, direction};
use crate::components::player::{MAX_COINS, MAX_HEALTH, PUNCH_RADIUS, PUNCH_REACH, Player};
use crate::components::projectile::{
    Bullet, Coin, CoreEject, Explosion, FallingSword, Fireball, Magnet, Sawblade,
};
use crate::components::sprite::Sprite;
use crate::components::tint::{Rgba, Tint, palette};
use crate::components::weapon::{Weapon, WeaponKind, WeaponState};
use crate::resources::camera2d::Camera2D;
use crate::resources::colliders::ColliderRegistry;
use crate::resources::debugmode::DebugMode;
use crate::resources::drawlist::{DrawCommand, DrawList};
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

const FLICKER_TINT: Rgba = palette::PURPLE;
const WING_SIZE: Vec2 = Vec2::new(14.0, 6.0);
const SWORD_SIZE: Vec2 = Vec2::new(8.0, 24.0);
const WEAPON_SIZE: Vec2 = Vec2::new(12.0, 6.0);

/// Push a textured quad for `rect` (world space), unless it is off screen.
fn sprite(
    list: &mut DrawList,
    camera: &Camera2D,
    key: &str,
    rect: Rect,
    rotation: f32,
    flip_h: bool,
    tint: Rgba,
) {
    if !camera.view().overlaps(&rect) {
        return;
    }
    list.push(DrawCommand::Sprite {
        key: key.to_string(),
        rect: camera.transform_rect(&rect),
        rotation,
        flip_h,
        tint,
    });
}

/// Draw a plain body: its sprite when it has one, a tinted rect otherwise.
fn body(
    list: &mut DrawList,
    camera: &Camera2D,
    position: &MapPosition,
    collider: &BoxCollider,
    key: Option<&Sprite>,
    tint: Option<&Tint>,
) {
    let rect = collider.rect(position.pos);
    let color = tint.map(|t| t.color).unwrap_or(Rgba::WHITE);
    match key {
        Some(s) => sprite(list, camera, &s.tex_key, rect, 0.0, s.flip_h, color),
        None => {
            if camera.view().overlaps(&rect) {
                list.rect(camera.transform_rect(&rect), color, true);
            }
        }
    }
}

pub fn render_begin(mut list: ResMut<DrawList>) {
    list.clear();
    list.push(DrawCommand::Clear(palette::BLACK));
}

#[allow(clippy::type_complexity)]
pub fn render_level(
    mut list: ResMut<DrawList>,
    camera: Res<Camera2D>,
    decorations: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Decoration>>,
    tiles: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Tile>>,
    wells: Query<(&GravityWell, &MapPosition, &BoxCollider)>,
    portals: Query<(&Portal, &MapPosition, &BoxCollider)>,
    pits: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<HellPit>>,
    checkpoints: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Checkpoint>>,
    notes: Query<(&Note, &MapPosition)>,
) {
    for (p, c, s, t) in decorations.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in tiles.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (well, p, c) in wells.iter() {
        let rect = c.rect(p.pos);
        if camera.view().overlaps(&rect) {
            let base = if well.acc >= 0.0 { Rgba::RED } else { Rgba::BLUE };
            list.rect(camera.transform_rect(&rect), base.with_alpha(well.alpha() as f32), true);
        }
    }
    for (portal, p, c) in portals.iter() {
        let rect = c.rect(p.pos);
        if camera.view().overlaps(&rect) {
            let color = if portal.partner.is_some() { palette::YELLOW } else { palette::GREY };
            list.rect(camera.transform_rect(&rect), color, false);
        }
    }
    for (p, c, s, t) in pits.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in checkpoints.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (note, p) in notes.iter() {
        list.text(note.text.clone(), camera.transform(p.pos), 10.0, Rgba::WHITE);
    }
}

#[allow(clippy::type_complexity)]
pub fn render_actors(
    mut list: ResMut<DrawList>,
    camera: Res<Camera2D>,
    input: Res<InputState>,
    hostiles: Query<(
        &Hostile,
        &MapPosition,
        &BoxCollider,
        Option<&Sprite>,
        Option<&Tint>,
        Option<&Virtue>,
        Option<&Wings>,
    )>,
    bosses: Query<&Gabriel>,
    weapons: Query<(Entity, &Weapon, &MapPosition, &BoxCollider)>,
    players: Query<(&Player, &MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>)>,
) {
    let view = camera.view();

    for (hostile, p, c, s, t, virtue, wings) in hostiles.iter() {
        if hostile.activation.is_dormant() {
            continue;
        }
        let rect = c.rect(p.pos);
        if let Some(virtue) = virtue
            && hostile.activation.is_active()
        {
            let footprint = virtue.footprint(view.center().y, view.height());
            let color = palette::YELLOW.with_alpha(virtue.strike_alpha() * 255.0);
            list.rect(camera.transform_rect(&footprint), color, true);
        }
        if let Some(wings) = wings {
            let left = Rect::from_center(rect.center() - Vec2::new(rect.width() * 0.5, 0.0), WING_SIZE);
            let right = Rect::from_center(rect.center() + Vec2::new(rect.width() * 0.5, 0.0), WING_SIZE);
            sprite(&mut list, &camera, "Wing", left, wings.first, false, Rgba::WHITE);
            sprite(&mut list, &camera, "Wing", right, wings.second, true, Rgba::WHITE);
        }
        let base = t.map(|t| t.color).unwrap_or(Rgba::WHITE);
        let color = if hostile.activation.is_tinted() {
            base.multiply(FLICKER_TINT)
        } else {
            base
        };
        let key = s.map(|s| s.tex_key.as_str()).unwrap_or(hostile.kind.tag());
        let flip = s.map(|s| s.flip_h).unwrap_or(false);
        sprite(&mut list, &camera, key, rect, 0.0, flip, color);
    }

    for gabriel in bosses.iter() {
        if let BossAttack::DualSwordToss(toss) = &gabriel.attack {
            let rotation = toss.spin.to_degrees();
            for center in toss.swords {
                let rect = Rect::from_center(center, SWORD_SIZE);
                sprite(&mut list, &camera, "Sword", rect, rotation, false, Rgba::WHITE);
            }
        }
    }

    let player = players.single().ok();
    let equipped = player.and_then(|(pl, _, _, _, _)| pl.equipped);
    for (entity, weapon, p, c) in weapons.iter() {
        match weapon.state {
            WeaponState::Ground => {
                sprite(&mut list, &camera, weapon.kind.tag(), c.rect(p.pos), 0.0, false, Rgba::WHITE);
            }
            WeaponState::Equipped if Some(entity) == equipped => {
                if let Some((_, pp, pc, _, _)) = player {
                    let center = pc.rect(pp.pos).center();
                    let aim = angle_to(center, camera.screen_to_world(input.pointer));
                    let rect = Rect::from_center(center, WEAPON_SIZE);
                    let flip = aim.cos() < 0.0;
                    sprite(&mut list, &camera, weapon.kind.tag(), rect, aim.to_degrees(), flip, Rgba::WHITE);
                }
            }
            _ => {}
        }
    }

    if let Some((player, p, c, s, t)) = player {
        body(&mut list, &camera, p, c, s, t);
        if player.is_punching() {
            let point = c.rect(p.pos).center() + direction(player.punch_angle) * PUNCH_REACH;
            list.circle(camera.transform(point), PUNCH_RADIUS, Rgba::WHITE.with_alpha(80.0), false);
        }
    }
}

#[allow(clippy::type_complexity)]
pub fn render_projectiles(
    mut list: ResMut<DrawList>,
    camera: Res<Camera2D>,
    bullets: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Bullet>>,
    coins: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Coin>>,
    cores: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<CoreEject>>,
    magnets: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Magnet>>,
    sawblades: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<Sawblade>>,
    fireballs: Query<(&Fireball, &MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>)>,
    swords: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<FallingSword>>,
    explosions: Query<(&Explosion, &Fade, &MapPosition)>,
    splatters: Query<(&BloodSplatter, &Fade, &MapPosition)>,
) {
    for (p, c, s, t) in bullets.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in coins.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in cores.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in magnets.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (p, c, s, t) in sawblades.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (fireball, p, c, s, t) in fireballs.iter() {
        let tint = if fireball.boosted {
            Some(Tint::from(palette::YELLOW))
        } else {
            t.copied()
        };
        body(&mut list, &camera, p, c, s, tint.as_ref());
    }
    for (p, c, s, t) in swords.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (explosion, fade, p) in explosions.iter() {
        let color = palette::YELLOW.with_alpha(fade.alpha() * 255.0);
        list.circle(camera.transform(p.pos), explosion.radius, color, true);
    }
    for (splatter, fade, p) in splatters.iter() {
        let color = palette::RED2.with_alpha(fade.alpha() * 255.0);
        list.circle(camera.transform(p.pos), splatter.radius, color, true);
    }
}

#[allow(clippy::type_complexity)]
pub fn render_overlay(
    mut list: ResMut<DrawList>,
    camera: Res<Camera2D>,
    foreground: Query<(&MapPosition, &BoxCollider, Option<&Sprite>, Option<&Tint>), With<FgDecoration>>,
    chains: Query<(&ChainLine, &Fade)>,
    popups: Query<(&Fade, &MapPosition), With<CheckpointPopup>>,
    players: Query<&Player>,
    weapons: Query<&Weapon>,
    flashes: Query<&Fade, With<Flash>>,
) {
    for (p, c, s, t) in foreground.iter() {
        body(&mut list, &camera, p, c, s, t);
    }
    for (chain, fade) in chains.iter() {
        let color = palette::YELLOW.with_alpha(fade.alpha() * 255.0);
        for pair in chain.points.windows(2) {
            list.line(camera.transform(pair[0]), camera.transform(pair[1]), 2.0, color);
        }
    }
    for (fade, p) in popups.iter() {
        let elapsed = fade.elapsed();
        let size = 10.0 * CheckpointPopup::scale(elapsed);
        let color = Rgba::WHITE.with_alpha(CheckpointPopup::alpha(elapsed) * 255.0);
        let pos = camera.transform(p.pos) - Vec2::new(size * 2.5, size * 1.5);
        list.text("Checkpoint!", pos, size, color);
    }

    if let Ok(player) = players.single() {
        let bar = Rect::new(8.0, 8.0, 100.0 * player.health.max(0) as f32 / MAX_HEALTH as f32, 6.0);
        list.rect(bar, palette::RED, true);
        list.rect(Rect::new(8.0, 8.0, 100.0, 6.0), Rgba::WHITE, false);
        list.text(format!("{}", player.health.max(0)), Vec2::new(112.0, 6.0), 10.0, Rgba::WHITE);

        for i in 0..MAX_COINS {
            let color = if i < player.coins { palette::YELLOW } else { palette::GREY };
            list.circle(Vec2::new(12.0 + i as f32 * 10.0, 22.0), 3.0, color, true);
        }

        if let Some(weapon) = player.equipped.and_then(|e| weapons.get(e).ok()) {
            let center = Vec2::new(camera.size.x - 16.0, 16.0);
            list.push(DrawCommand::Arc {
                center,
                radius: 8.0,
                start: -90.0,
                end: -90.0 + 360.0 * weapon.cooldown.amount_cooled,
                color: Rgba::WHITE,
            });
            if weapon.kind == WeaponKind::Shotgun && weapon.charge_held > 0.0 {
                let bar = Rect::new(camera.size.x - 48.0, 28.0, 40.0 * weapon.charge, 4.0);
                list.rect(bar, Rgba::BLUE, true);
                list.rect(Rect::new(camera.size.x - 48.0, 28.0, 40.0, 4.0), Rgba::WHITE, false);
            }
        }
    }

    for fade in flashes.iter() {
        let screen = Rect {
            pos: Vec2::ZERO,
            size: camera.size,
        };
        list.rect(screen, Rgba::WHITE.with_alpha(fade.alpha() * 255.0), true);
    }
}

/// Collider, spawner and registry overlay.
pub fn render_debug(
    mut list: ResMut<DrawList>,
    camera: Res<Camera2D>,
    time: Res<WorldTime>,
    registry: Res<ColliderRegistry>,
    bodies: Query<(&MapPosition, &BoxCollider)>,
    spawners: Query<(&Spawner, &MapPosition, &BoxCollider)>,
    entities: Query<Entity>,
) {
    for (p, c) in bodies.iter() {
        let rect = c.rect(p.pos);
        if camera.view().overlaps(&rect) {
            list.rect(camera.transform_rect(&rect), Rgba::RED, false);
        }
    }
    for (spawner, p, c) in spawners.iter() {
        let color = if spawner.activated { palette::GREY } else { Rgba::BLUE };
        list.rect(camera.transform_rect(&c.rect(p.pos)), color, false);
        list.text(format!("{}", spawner.id), camera.transform(p.pos), 8.0, color);
    }
    let text = format!(
        "DEBUG | frame {} | entities {} | solids {} | camera ({:.0}, {:.0})",
        time.frame_count,
        entities.iter().count(),
        registry.len(),
        camera.offset.x,
        camera.offset.y
    );
    list.text(text, Vec2::new(8.0, camera.size.y - 12.0), 8.0, Rgba::WHITE);
}

pub fn render_banner(mut list: ResMut<DrawList>, camera: Res<Camera2D>, state: Res<GameState>) {
    let (title, hint) = match state.get() {
        GameStates::GameOver => ("YOU DIED", "press R to restart"),
        GameStates::Win => ("GABRIEL FALLS", "thanks for playing"),
        _ => return,
    };
    let center = camera.size * 0.5;
    list.text(title, center - Vec2::new(60.0, 20.0), 20.0, palette::YELLOW);
    list.text(hint, center - Vec2::new(50.0, -8.0), 10.0, Rgba::WHITE);
}

pub fn debug_enabled(debug: Option<Res<DebugMode>>) -> bool {
    debug.is_some()
}
