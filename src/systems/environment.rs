//! Hazards and trigger volumes the player interacts with.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info};

use crate::components::boxcollider::{BoxCollider, Rect};
use crate::components::effects::{BloodSplatter, CheckpointPopup, Fade, POPUP_DURATION};
use crate::components::environment::{Checkpoint, GravityWell, HELLPIT_SINK_SPEED, HellPit, Portal};
use crate::components::gravity::Gravity;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::level::LevelCompleteEvent;
use crate::resources::camera2d::Camera2D;
use crate::resources::session::{CheckpointMark, SessionState};
use crate::resources::worldtime::WorldTime;

/// Catch the player in a hell-pit and let them sink out of view. The level
/// is completed once, when the player's top passes the bottom of the view.
pub fn hellpit_fall(
    time: Res<WorldTime>,
    camera: Res<Camera2D>,
    mut session: ResMut<SessionState>,
    mut commands: Commands,
    mut players: Query<(&mut Player, &mut MapPosition, &BoxCollider, &mut Gravity)>,
    pits: Query<(&MapPosition, &BoxCollider), (With<HellPit>, Without<Player>)>,
) {
    for (mut player, mut position, collider, mut gravity) in players.iter_mut() {
        if !player.frozen {
            let rect = collider.rect(position.pos);
            if pits.iter().any(|(p, c)| c.rect(p.pos).overlaps(&rect)) {
                player.frozen = true;
                gravity.velocity = 0.0;
                info!("Player fell into a hell-pit");
            }
            continue;
        }

        position.pos.y += HELLPIT_SINK_SPEED * time.delta;
        if !session.level_complete && collider.rect(position.pos).top() > camera.view().bottom() {
            session.level_complete = true;
            commands.trigger(LevelCompleteEvent {});
        }
    }
}

/// Teleport the player to the paired portal.
pub fn portal_travel(
    mut players: Query<(&mut MapPosition, &BoxCollider), With<Player>>,
    portals: Query<(&Portal, &MapPosition, &BoxCollider), Without<Player>>,
) {
    for (mut position, collider) in players.iter_mut() {
        let rect = collider.rect(position.pos);
        let exit = portals
            .iter()
            .filter(|(_, p, c)| c.rect(p.pos).overlaps(&rect))
            .find_map(|(portal, _, _)| portal.partner.and_then(|e| portals.get(e).ok()));
        if let Some((partner, p_position, p_collider)) = exit {
            let target = p_collider.rect(p_position.pos);
            let top_left = Portal::exit_position(&target, partner.side, collider.size);
            position.pos = top_left - collider.offset;
            debug!("Portal to {:?}", top_left);
        }
    }
}

pub fn gravity_well_pull(
    time: Res<WorldTime>,
    mut players: Query<(&MapPosition, &BoxCollider, &mut Gravity), With<Player>>,
    wells: Query<(&GravityWell, &MapPosition, &BoxCollider), Without<Player>>,
) {
    for (position, collider, mut gravity) in players.iter_mut() {
        let rect = collider.rect(position.pos);
        for (well, w_position, w_collider) in wells.iter() {
            if w_collider.rect(w_position.pos).overlaps(&rect) {
                gravity.velocity += well.acc * time.delta;
            }
        }
    }
}

/// Record a newly touched checkpoint and pop up a notice above it.
pub fn checkpoint_touch(
    mut session: ResMut<SessionState>,
    mut commands: Commands,
    players: Query<(&MapPosition, &BoxCollider), With<Player>>,
    checkpoints: Query<(&MapPosition, &BoxCollider), (With<Checkpoint>, Without<Player>)>,
) {
    let Ok((position, collider)) = players.single() else {
        return;
    };
    let rect = collider.rect(position.pos);
    for (c_position, c_collider) in checkpoints.iter() {
        let c_rect = c_collider.rect(c_position.pos);
        if !c_rect.overlaps(&rect) {
            continue;
        }
        let mark = CheckpointMark {
            level: session.level_no,
            position: c_rect.pos,
        };
        if session.checkpoint == Some(mark) {
            continue;
        }
        session.checkpoint = Some(mark);
        commands.spawn((
            CheckpointPopup,
            Fade::new(POPUP_DURATION),
            MapPosition::from_vec(Vec2::new(c_rect.center().x, c_rect.top())),
        ));
        info!("Checkpoint reached at {:?}", c_rect.pos);
    }
}

/// A blood splatter heals the player once when touched.
pub fn splatter_heal(
    mut players: Query<(&mut Player, &MapPosition, &BoxCollider)>,
    mut splatters: Query<(&mut BloodSplatter, &MapPosition), Without<Player>>,
) {
    let Ok((mut player, position, collider)) = players.single_mut() else {
        return;
    };
    let rect = collider.rect(position.pos);
    for (mut splatter, s_position) in splatters.iter_mut() {
        if splatter.used {
            continue;
        }
        let region = Rect::from_center(s_position.pos, Vec2::splat(splatter.radius * 2.0));
        if region.overlaps(&rect) {
            splatter.used = true;
            player.heal(splatter.heal);
            debug!("Splatter healed the player to {}", player.health);
        }
    }
}
