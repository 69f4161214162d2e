//! Game state polling and run conditions.
use crate::components::effects::Flash;
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    // Check if there is a pending state change
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        // If there is, trigger the GameStateChangedEvent
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

pub fn state_is_game_over(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::GameOver)
}

/// The simulation is suspended while any hit-flash exists.
pub fn world_not_frozen(flashes: Query<(), With<Flash>>) -> bool {
    flashes.is_empty()
}
