use bevy::prelude::*;

use crate::app::state::AppState;
use crate::audio::GameAudioPlugin;
use crate::core::config::GameConfig;
use crate::core::storage::{MemoryPrefs, Prefs};
use crate::core::system::system_order::{FixedMotionSet, SceneLogicSet, TapDispatchSet};
use crate::debug::DebugPlugin;
use crate::gameplay::background::BackgroundPlugin;
use crate::gameplay::finished::FinishedPlugin;
use crate::gameplay::menu::MenuPlugin;
use crate::gameplay::motion::MotionPlugin;
use crate::gameplay::round::RoundPlugin;
use crate::gameplay::scoreboard::ScoreboardPlugin;
use crate::gameplay::settings::SettingsPlugin;
use crate::interaction::tap::TapInputPlugin;
use crate::platform::play_services::{DesktopPlayServices, GameServices};

/// Deterministic logic rate. The original shipped at a 60 FPS frame gate; all
/// motion, fades and timers advance in `FixedUpdate` at this frequency.
pub const TICK_HZ: f64 = 60.0;

pub struct TinCanPlugin;

impl Plugin for TinCanPlugin {
    fn build(&self, app: &mut App) {
        // Resources the binary normally inserts up front; tests (and embedders)
        // that skip that get working in-memory fallbacks.
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::default());
        }
        if !app.world().contains_resource::<Prefs>() {
            app.insert_resource(Prefs(Box::new(MemoryPrefs::default())));
        }
        if !app.world().contains_resource::<GameServices>() {
            let key = app.world().resource::<GameConfig>().storage.leaderboard_key.clone();
            app.insert_resource(GameServices(Box::new(DesktopPlayServices::new(key))));
        }

        app.init_state::<AppState>()
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .configure_sets(Update, (TapDispatchSet, SceneLogicSet.after(TapDispatchSet)))
            .configure_sets(FixedUpdate, FixedMotionSet)
            .add_systems(Startup, (setup_camera, setup_autoclose))
            .add_systems(Update, check_autoclose)
            .add_plugins((
                TapInputPlugin,
                GameAudioPlugin,
                BackgroundPlugin,
                ScoreboardPlugin,
                MotionPlugin,
                MenuPlugin,
                SettingsPlugin,
                RoundPlugin,
                FinishedPlugin,
                DebugPlugin,
            ));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time>,
    mut timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if let Some(t) = timer.as_mut() {
        t.tick(time.delta());
        if t.finished() {
            info!("AutoClose: timer finished, requesting app exit");
            ev_exit.write(AppExit::Success);
        }
    }
}
