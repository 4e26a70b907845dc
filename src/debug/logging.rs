#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::app::state::AppState;
#[cfg(feature = "debug")]
use crate::audio::CrossFade;
#[cfg(feature = "debug")]
use crate::gameplay::round::Can;
#[cfg(feature = "debug")]
use crate::gameplay::scoreboard::Scoreboard;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugLogState {
    pub log_interval: f32,
    pub time_accum: f32,
}

#[cfg(feature = "debug")]
impl Default for DebugLogState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
        }
    }
}

#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time>,
    mut state: ResMut<DebugLogState>,
    app_state: Res<State<AppState>>,
    scoreboard: Res<Scoreboard>,
    fade: Res<CrossFade>,
    cans: Query<(), With<Can>>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum < state.log_interval {
        return;
    }
    state.time_accum = 0.0;
    info!(
        "GAME state={:?} score={} high={} record={} cans={} fade={:.2}",
        app_state.get(),
        scoreboard.score,
        scoreboard.high_score,
        scoreboard.new_record,
        cans.iter().count(),
        fade.level
    );
}
