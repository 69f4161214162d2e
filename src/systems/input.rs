//! Input systems.
//!
//! - [`update_input_state`] folds the frame's
//!   [`InputSnapshot`](crate::resources::input::InputSnapshot) into
//!   [`InputState`](crate::resources::input::InputState).
//! - Pressing the debug action emits a
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
//! - [`restart_on_input`] brings a dead player back after game over.
use bevy_ecs::prelude::*;
use log::info;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::input::{InputSnapshot, InputState};

/// Copy the frontend sample into the `InputState` resource.
pub fn update_input_state(
    snapshot: Option<Res<InputSnapshot>>,
    mut input: ResMut<InputState>,
    mut commands: Commands,
) {
    let Some(snapshot) = snapshot else {
        *input = InputState::default();
        return;
    };
    input.apply(&snapshot);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}

/// Game over: the restart action reloads the level at the last checkpoint.
pub fn restart_on_input(input: Res<InputState>, mut next_state: ResMut<NextGameState>) {
    if input.restart.just_pressed && next_state.request(GameStates::Playing) {
        info!("Restarting level");
    }
}
