use bevy::prelude::*;
use rand::Rng;

use crate::app::state::AppState;
use crate::audio::{MusicPauseRequest, SoundRequest, SoundTag};
use crate::core::components::{Bob, BobAxis, TapTarget};
use crate::core::config::GameConfig;
use crate::core::storage::{Prefs, StoredData};
use crate::core::system::system_order::{FixedMotionSet, SceneLogicSet};
use crate::gameplay::background::ScreenShake;
use crate::gameplay::round::{Can, Popping, RoundScene, Spawner};
use crate::gameplay::scoreboard::Scoreboard;
use crate::interaction::tap::TapEvent;
use crate::platform::play_services::{GameServices, PlayServices};

pub const GAME_OVER_TEXTURE: &str = "textures/gameover.png";
pub const CONGRATS_TEXTURE: &str = "textures/congrats.png";
pub const TRY_AGAIN_TEXTURE: &str = "textures/tryagain.png";

const SHAKE_TICKS: u32 = 12;
const SHAKE_OFFSET: f32 = 16.0;
const END_MESSAGE_BOB: f32 = 64.0;

#[derive(Component, Clone, Copy)]
pub struct FinishedScene;

/// The "game over" sign. Ignores taps until its shake settles, then a tap on
/// it returns to the menu.
#[derive(Component, Debug)]
pub struct GameOverSign {
    pub shake_ticks_left: u32,
    pub anchor: Vec2,
}

pub struct FinishedPlugin;

impl Plugin for FinishedPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Finished),
            (finalize_round, end_round_scene),
        )
        .add_systems(
            Update,
            handle_finished_taps
                .in_set(SceneLogicSet)
                .run_if(in_state(AppState::Finished)),
        )
        .add_systems(
            FixedUpdate,
            shake_game_over_sign
                .in_set(FixedMotionSet)
                .run_if(in_state(AppState::Finished)),
        )
        .add_systems(OnExit(AppState::Finished), despawn_round);
    }
}

/// Storage and services side of the round end; kept free of asset loads so
/// headless apps can drive it.
pub fn finalize_round(
    scoreboard: Res<Scoreboard>,
    mut prefs: ResMut<Prefs>,
    mut services: ResMut<GameServices>,
    mut sounds: EventWriter<SoundRequest>,
    mut pause: EventWriter<MusicPauseRequest>,
) {
    pause.write(MusicPauseRequest);
    let jingle = if scoreboard.new_record {
        SoundTag::HighScore
    } else {
        SoundTag::GameOver
    };
    sounds.write(SoundRequest::new(jingle));

    if scoreboard.new_record {
        prefs.record_high_score(scoreboard.score);
        services.submit_score(scoreboard.score);
    }
}

fn end_round_scene(
    mut commands: Commands,
    assets: Res<AssetServer>,
    cfg: Res<GameConfig>,
    scoreboard: Res<Scoreboard>,
    mut shake: ResMut<ScreenShake>,
    q_cans: Query<Entity, (With<Can>, Without<Popping>)>,
    q_spawner: Query<Entity, With<Spawner>>,
) {
    for e in &q_cans {
        commands.entity(e).remove::<TapTarget>().insert(Popping {
            ticks_left: cfg.can.pop_ticks,
        });
    }
    for e in &q_spawner {
        commands.entity(e).despawn();
    }
    shake.start(SHAKE_TICKS, SHAKE_OFFSET);

    let w = cfg.window.width;
    let h = cfg.window.height;

    let sign_anchor = Vec2::new(0.0, h / 6.0);
    commands.spawn((
        FinishedScene,
        GameOverSign {
            shake_ticks_left: SHAKE_TICKS,
            anchor: sign_anchor,
        },
        TapTarget::new(w * 0.85, h * 0.22),
        Sprite {
            image: assets.load(GAME_OVER_TEXTURE),
            custom_size: Some(Vec2::new(w * 0.85, h * 0.22)),
            ..default()
        },
        Transform::from_xyz(sign_anchor.x, sign_anchor.y, 8.0),
    ));

    let message = if scoreboard.new_record {
        CONGRATS_TEXTURE
    } else {
        TRY_AGAIN_TEXTURE
    };
    let message_anchor = Vec2::new(0.0, -h / 6.0);
    commands.spawn((
        FinishedScene,
        Bob::new(message_anchor, END_MESSAGE_BOB, BobAxis::Y),
        Sprite {
            image: assets.load(message),
            custom_size: Some(Vec2::new(w * 0.85, h * 0.15)),
            ..default()
        },
        Transform::from_xyz(message_anchor.x, message_anchor.y, 8.0),
    ));
}

fn shake_game_over_sign(mut q: Query<(&mut Transform, &mut GameOverSign)>) {
    let mut rng = rand::thread_rng();
    for (mut tf, mut sign) in &mut q {
        if sign.shake_ticks_left == 0 {
            continue;
        }
        sign.shake_ticks_left -= 1;
        tf.translation.x = sign.anchor.x;
        tf.translation.y = sign.anchor.y;
        if sign.shake_ticks_left != 0 {
            tf.translation.x += rng.gen_range(-SHAKE_OFFSET..=SHAKE_OFFSET);
            tf.translation.y += rng.gen_range(-SHAKE_OFFSET..=SHAKE_OFFSET);
        }
    }
}

fn handle_finished_taps(
    mut taps: EventReader<TapEvent>,
    q: Query<(&Transform, &TapTarget, &GameOverSign)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for tap in taps.read() {
        for (tf, target, sign) in &q {
            if sign.shake_ticks_left == 0
                && target.contains(tf.translation.truncate(), tap.world_pos)
            {
                next_state.set(AppState::Menu);
            }
        }
    }
}

fn despawn_round(
    mut commands: Commands,
    q: Query<Entity, Or<(With<FinishedScene>, With<RoundScene>)>>,
) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
