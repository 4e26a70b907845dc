#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::app::state::AppState;
#[cfg(feature = "debug")]
use crate::gameplay::scoreboard::Scoreboard;

/// F1 back to menu, F2/F3 walk a round forward, F4 grants points.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
    mut scoreboard: ResMut<Scoreboard>,
) {
    if keys.just_pressed(KeyCode::F1) && *state.get() != AppState::Menu {
        info!(target: "debug", "forcing state -> Menu");
        next_state.set(AppState::Menu);
    }
    if keys.just_pressed(KeyCode::F2) && *state.get() == AppState::Menu {
        info!(target: "debug", "forcing state -> Playing");
        next_state.set(AppState::Playing);
    }
    if keys.just_pressed(KeyCode::F3) && *state.get() == AppState::Playing {
        info!(target: "debug", "forcing state -> Finished");
        next_state.set(AppState::Finished);
    }
    if keys.just_pressed(KeyCode::F4) {
        scoreboard.add(10);
        info!(target: "debug", "granted 10 points (score={})", scoreboard.score);
    }
}
