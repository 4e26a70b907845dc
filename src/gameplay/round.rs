use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

use crate::app::state::AppState;
use crate::audio::{MusicRequest, MusicTag, SoundRequest, SoundTag};
use crate::core::components::{Spin, TapTarget};
use crate::core::config::{CanConfig, GameConfig, SpawnRange, SpawnerConfig};
use crate::core::system::system_order::{FixedMotionSet, SceneLogicSet};
use crate::gameplay::scoreboard::{spawn_score_display, Scoreboard};
use crate::interaction::tap::TapEvent;

pub const CAN_TEXTURE: &str = "textures/can0.png";

const CAN_Z: f32 = 5.0;
const POP_SHRINK: f32 = 0.82;

/// Everything that lives for one round: cans, spawner, score strip. Survives
/// the Playing -> Finished transition and is torn down when Finished exits.
#[derive(Component, Clone, Copy)]
pub struct RoundScene;

/// An airborne can. Velocity is integrated under the fixed timestep.
#[derive(Component, Debug)]
pub struct Can {
    pub velocity: Vec2,
}

/// Scale-out animation after a kill (or at round end); despawns at zero.
#[derive(Component, Debug)]
pub struct Popping {
    pub ticks_left: u32,
}

/// Launches cans on a score-ramped interval while the round runs.
#[derive(Component, Debug)]
pub struct Spawner {
    pub timer: Timer,
}

/// X position handed over from the menu's start can; seeds the first launch.
#[derive(Resource, Debug, Clone, Copy)]
pub struct LaunchFrom {
    pub x: f32,
}

/// Seconds until the next launch at the given score.
pub fn interval_for(cfg: &SpawnerConfig, score: u32) -> f32 {
    (cfg.base_interval - score as f32 * cfg.ramp_per_point).max(cfg.min_interval)
}

pub fn sample_range(range: &SpawnRange<f32>, rng: &mut impl Rng) -> f32 {
    if range.min < range.max {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}

/// One fixed tick of can kinematics; returns (position, velocity).
pub fn integrate_can(pos: Vec2, vel: Vec2, gravity: f32, dt: f32) -> (Vec2, Vec2) {
    let vel = Vec2::new(vel.x, vel.y + gravity * dt);
    (pos + vel * dt, vel)
}

/// A can is lost once it is falling and fully below the kill line.
pub fn is_missed(pos_y: f32, vel_y: f32, window_height: f32, margin: f32) -> bool {
    vel_y < 0.0 && pos_y < -(window_height * 0.5) - margin
}

/// Upward toss with horizontal drift aimed back across the screen.
pub fn launch_velocity(cfg: &CanConfig, from_x: f32, rng: &mut impl Rng) -> Vec2 {
    let vy = sample_range(&cfg.launch_speed, rng);
    let drift = sample_range(&cfg.drift_speed, rng);
    let vx = if from_x > 0.0 { -drift } else { drift };
    Vec2::new(vx, vy)
}

pub struct RoundPlugin;

impl Plugin for RoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::Playing),
            (reset_round, spawn_round_scene).chain(),
        )
        .add_systems(
            Update,
            handle_round_taps
                .in_set(SceneLogicSet)
                .run_if(in_state(AppState::Playing)),
        )
        .add_systems(
            FixedUpdate,
            (tick_spawner, move_cans, detect_miss)
                .chain()
                .in_set(FixedMotionSet)
                .run_if(in_state(AppState::Playing)),
        )
        .add_systems(FixedUpdate, pop_cans.in_set(FixedMotionSet));
    }
}

pub fn reset_round(mut scoreboard: ResMut<Scoreboard>) {
    scoreboard.reset_round();
}

fn spawn_round_scene(
    mut commands: Commands,
    assets: Res<AssetServer>,
    cfg: Res<GameConfig>,
    scoreboard: Res<Scoreboard>,
    launch: Option<Res<LaunchFrom>>,
    mut music: EventWriter<MusicRequest>,
) {
    music.write(MusicRequest(MusicTag::Gameplay));
    spawn_score_display(&mut commands, &scoreboard, RoundScene);

    commands.spawn((
        RoundScene,
        Spawner {
            timer: Timer::from_seconds(interval_for(&cfg.spawner, 0), TimerMode::Once),
        },
    ));

    // The first can jumps from wherever the start can was when it was tapped.
    let x = launch.map(|l| l.x).unwrap_or(0.0);
    let mut rng = rand::thread_rng();
    let velocity = launch_velocity(&cfg.can, x, &mut rng);
    spawn_can(&mut commands, &assets, &cfg.can, Vec2::new(x, 0.0), velocity, &mut rng);
}

fn spawn_can(
    commands: &mut Commands,
    assets: &AssetServer,
    can_cfg: &CanConfig,
    pos: Vec2,
    velocity: Vec2,
    rng: &mut impl Rng,
) {
    commands.spawn((
        RoundScene,
        Can { velocity },
        Spin(sample_range(&can_cfg.spin, rng)),
        TapTarget::new(
            can_cfg.width + can_cfg.tap_padding,
            can_cfg.height + can_cfg.tap_padding,
        ),
        Sprite {
            image: assets.load(CAN_TEXTURE),
            custom_size: Some(Vec2::new(can_cfg.width, can_cfg.height)),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, CAN_Z),
    ));
}

fn tick_spawner(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    scoreboard: Res<Scoreboard>,
    mut commands: Commands,
    assets: Res<AssetServer>,
    mut q: Query<&mut Spawner>,
) {
    let Ok(mut spawner) = q.single_mut() else {
        return;
    };
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }

    let mut rng = rand::thread_rng();
    let half_w = cfg.window.width * 0.5;
    let lane = (half_w - cfg.can.width).max(1.0);
    let x = rng.gen_range(-lane..lane);
    let y = -(cfg.window.height * 0.5) - cfg.can.height;
    let velocity = launch_velocity(&cfg.can, x, &mut rng);
    spawn_can(&mut commands, &assets, &cfg.can, Vec2::new(x, y), velocity, &mut rng);

    let next = interval_for(&cfg.spawner, scoreboard.score);
    spawner.timer.set_duration(Duration::from_secs_f32(next));
    spawner.timer.reset();
}

fn move_cans(
    time: Res<Time>,
    cfg: Res<GameConfig>,
    mut q: Query<(&mut Transform, &mut Can), Without<Popping>>,
) {
    let dt = time.delta_secs();
    for (mut tf, mut can) in &mut q {
        let (pos, vel) = integrate_can(tf.translation.truncate(), can.velocity, cfg.can.gravity, dt);
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        can.velocity = vel;
    }
}

fn detect_miss(
    cfg: Res<GameConfig>,
    mut commands: Commands,
    q: Query<(Entity, &Transform, &Can), Without<Popping>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (entity, tf, can) in &q {
        if is_missed(
            tf.translation.y,
            can.velocity.y,
            cfg.window.height,
            cfg.can.kill_line_margin,
        ) {
            info!(target: "round", "missed can at x={:.0}", tf.translation.x);
            commands.entity(entity).despawn();
            next_state.set(AppState::Finished);
        }
    }
}

pub fn handle_round_taps(
    mut taps: EventReader<TapEvent>,
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut scoreboard: ResMut<Scoreboard>,
    mut sounds: EventWriter<SoundRequest>,
    q: Query<(Entity, &Transform, &TapTarget), (With<Can>, Without<Popping>)>,
) {
    // Commands are deferred, so track kills locally to keep one tap pair from
    // double-scoring the same can within a frame.
    let mut killed: Vec<Entity> = Vec::new();
    for tap in taps.read() {
        for (entity, tf, target) in &q {
            if killed.contains(&entity) {
                continue;
            }
            if target.contains(tf.translation.truncate(), tap.world_pos) {
                killed.push(entity);
                scoreboard.add(1);
                sounds.write(SoundRequest::new(SoundTag::Kill));
                commands
                    .entity(entity)
                    .remove::<TapTarget>()
                    .insert(Popping {
                        ticks_left: cfg.can.pop_ticks,
                    });
            }
        }
    }
}

pub fn pop_cans(mut commands: Commands, mut q: Query<(Entity, &mut Transform, &mut Popping)>) {
    for (entity, mut tf, mut popping) in &mut q {
        if popping.ticks_left == 0 {
            commands.entity(entity).despawn();
            continue;
        }
        popping.ticks_left -= 1;
        tf.scale *= POP_SHRINK;
    }
}
