//! Level completion.
//!
//! Fired once per level when the player has sunk out of view inside a
//! hell-pit. The observer unlocks the next level, persists progress and
//! requests a reload of `Playing`, which loads the new level number.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{info, warn};

use crate::components::weapon::Weapon;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::save::{SaveData, SaveSlot};
use crate::resources::session::SessionState;

#[derive(Event, Debug, Clone, Copy)]
pub struct LevelCompleteEvent {}

pub fn observe_level_complete(
    _trigger: On<LevelCompleteEvent>,
    mut session: ResMut<SessionState>,
    mut next_state: ResMut<NextGameState>,
    save_slot: Option<ResMut<SaveSlot>>,
    weapons: Query<&Weapon>,
) {
    session.level_no += 1;
    info!("Level complete, advancing to level {}", session.level_no);

    let mut owned: Vec<&Weapon> = weapons.iter().filter(|w| w.is_owned()).collect();
    owned.sort_by_key(|w| w.kind as u8);
    let data = SaveData {
        max_level: session.save.max_level.max(session.level_no),
        weapons: owned.iter().map(|w| w.kind.name().to_string()).collect(),
    };
    match save_slot {
        Some(mut slot) => {
            if let Err(e) = slot.store(&data) {
                warn!("{}", e);
            }
        }
        None => warn!("No save slot; progress not stored"),
    }
    session.save = data;
    next_state.request(GameStates::Playing);
}
