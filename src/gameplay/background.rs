use bevy::prelude::*;
use rand::Rng;

use crate::core::config::GameConfig;
use crate::core::system::system_order::FixedMotionSet;

pub const BACKGROUND_TEXTURE: &str = "textures/background.png";

#[derive(Component)]
struct Backdrop;

/// Full-screen jitter countdown, kicked by the round-end crash.
#[derive(Resource, Debug, Default)]
pub struct ScreenShake {
    pub ticks_left: u32,
    pub magnitude: f32,
}

impl ScreenShake {
    pub fn start(&mut self, ticks: u32, magnitude: f32) {
        self.ticks_left = ticks;
        self.magnitude = magnitude;
    }
}

pub struct BackgroundPlugin;

impl Plugin for BackgroundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenShake>()
            .add_systems(Startup, spawn_backdrop)
            .add_systems(FixedUpdate, shake_backdrop.in_set(FixedMotionSet));
    }
}

fn spawn_backdrop(mut commands: Commands, assets: Res<AssetServer>, cfg: Res<GameConfig>) {
    commands.spawn((
        Backdrop,
        Sprite {
            image: assets.load(BACKGROUND_TEXTURE),
            custom_size: Some(Vec2::new(cfg.window.width, cfg.window.height)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));
}

fn shake_backdrop(mut shake: ResMut<ScreenShake>, mut q: Query<&mut Transform, With<Backdrop>>) {
    if shake.ticks_left == 0 {
        return;
    }
    shake.ticks_left -= 1;
    let mut rng = rand::thread_rng();
    for mut tf in &mut q {
        tf.translation.x = 0.0;
        tf.translation.y = 0.0;
        if shake.ticks_left != 0 {
            tf.translation.x = rng.gen_range(-shake.magnitude..=shake.magnitude);
            tf.translation.y = rng.gen_range(-shake.magnitude..=shake.magnitude);
        }
    }
}
