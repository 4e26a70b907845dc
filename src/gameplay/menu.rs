use bevy::prelude::*;

use crate::app::state::AppState;
use crate::audio::{MusicRequest, MusicTag, SoundRequest, SoundTag};
use crate::core::components::{Bob, BobAxis, TapTarget};
use crate::core::config::GameConfig;
use crate::core::storage::{Prefs, StoredData};
use crate::core::system::system_order::SceneLogicSet;
use crate::gameplay::round::{LaunchFrom, CAN_TEXTURE};
use crate::gameplay::scoreboard::{spawn_score_display, Scoreboard};
use crate::interaction::tap::TapEvent;
use crate::platform::play_services::{GameServices, PlayServices};

pub const LOGO_TEXTURE: &str = "textures/logo.png";
pub const TUTORIAL_TEXTURE: &str = "textures/tutorial.png";

const TUTORIAL_ICON_SIZE: f32 = 96.0;
const TUTORIAL_ICON_DROP: f32 = 150.0;

#[derive(Component, Clone, Copy)]
pub struct MenuScene;

/// The bobbing can on the title screen; tapping it starts a round.
#[derive(Component)]
pub struct StartCan;

/// Tap hint shown for the first couple of launches, tracking the start can.
#[derive(Component)]
pub struct TutorialIcon;

#[derive(Component, Debug, Clone, Copy)]
pub enum MenuAction {
    ShowLeaderboard,
    OpenSettings,
}

pub(crate) fn button_background(interaction: Interaction) -> BackgroundColor {
    BackgroundColor(match interaction {
        Interaction::Pressed => Color::srgb(0.75, 0.75, 0.75),
        Interaction::Hovered => Color::srgb(0.92, 0.92, 0.92),
        Interaction::None => Color::WHITE,
    })
}

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Menu), spawn_menu_scene)
            .add_systems(
                Update,
                (
                    handle_menu_taps.in_set(SceneLogicSet),
                    handle_menu_buttons,
                    tutorial_icon_follow,
                )
                    .run_if(in_state(AppState::Menu)),
            )
            .add_systems(OnExit(AppState::Menu), despawn_menu);
    }
}

fn spawn_menu_scene(
    mut commands: Commands,
    assets: Res<AssetServer>,
    cfg: Res<GameConfig>,
    scoreboard: Res<Scoreboard>,
    mut prefs: ResMut<Prefs>,
    mut music: EventWriter<MusicRequest>,
) {
    music.write(MusicRequest(MusicTag::Menu));

    let w = cfg.window.width;
    let h = cfg.window.height;

    commands.spawn((
        MenuScene,
        Sprite {
            image: assets.load(LOGO_TEXTURE),
            custom_size: Some(Vec2::new(w * 0.85, w * 0.32)),
            ..default()
        },
        Transform::from_xyz(0.0, h / 6.0, 1.0),
    ));

    commands.spawn((
        MenuScene,
        StartCan,
        Bob::new(Vec2::ZERO, cfg.menu.bob_amplitude, BobAxis::X),
        TapTarget::new(
            cfg.can.width + cfg.can.tap_padding,
            cfg.can.height + cfg.can.tap_padding,
        ),
        Sprite {
            image: assets.load(CAN_TEXTURE),
            custom_size: Some(Vec2::new(cfg.can.width, cfg.can.height)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));

    if prefs.take_tutorial_credit() {
        commands.spawn((
            MenuScene,
            TutorialIcon,
            Sprite {
                image: assets.load(TUTORIAL_TEXTURE),
                custom_size: Some(Vec2::splat(TUTORIAL_ICON_SIZE)),
                ..default()
            },
            Transform::from_xyz(0.0, -TUTORIAL_ICON_DROP, 6.0),
        ));
    }

    spawn_score_display(&mut commands, &scoreboard, MenuScene);

    let root = commands
        .spawn((
            MenuScene,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                padding: UiRect::bottom(Val::Px(48.0)),
                ..default()
            },
        ))
        .id();
    commands.entity(root).with_children(|p| {
        for (action, label) in [
            (MenuAction::ShowLeaderboard, "Leaderboards"),
            (MenuAction::OpenSettings, "Settings"),
        ] {
            p.spawn((
                Button,
                action,
                Node {
                    width: Val::Px(280.0),
                    height: Val::Px(72.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                button_background(Interaction::None),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new(label),
                    TextColor(Color::BLACK),
                    TextFont {
                        font_size: 32.0,
                        ..default()
                    },
                ));
            });
        }
    });
}

fn handle_menu_taps(
    mut taps: EventReader<TapEvent>,
    q_start: Query<(&Transform, &TapTarget), With<StartCan>>,
    mut sounds: EventWriter<SoundRequest>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for tap in taps.read() {
        for (tf, target) in &q_start {
            if target.contains(tf.translation.truncate(), tap.world_pos) {
                sounds.write(SoundRequest::new(SoundTag::Hit));
                commands.insert_resource(LaunchFrom {
                    x: tf.translation.x,
                });
                next_state.set(AppState::Playing);
            }
        }
    }
}

fn handle_menu_buttons(
    mut q: Query<
        (&Interaction, &MenuAction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut sounds: EventWriter<SoundRequest>,
    mut services: ResMut<GameServices>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (interaction, action, mut bg) in &mut q {
        *bg = button_background(*interaction);
        if *interaction != Interaction::Pressed {
            continue;
        }
        sounds.write(SoundRequest::new(SoundTag::Hit));
        match *action {
            MenuAction::ShowLeaderboard => services.show_leaderboard(),
            MenuAction::OpenSettings => next_state.set(AppState::Settings),
        }
    }
}

fn tutorial_icon_follow(
    q_can: Query<&Transform, (With<StartCan>, Without<TutorialIcon>)>,
    mut q_icon: Query<&mut Transform, (With<TutorialIcon>, Without<StartCan>)>,
) {
    let Ok(can_tf) = q_can.single() else {
        return;
    };
    for mut tf in &mut q_icon {
        tf.translation.x = can_tf.translation.x;
    }
}

fn despawn_menu(mut commands: Commands, q: Query<Entity, With<MenuScene>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
