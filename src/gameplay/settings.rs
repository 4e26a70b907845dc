use bevy::prelude::*;

use crate::app::state::AppState;
use crate::audio::{SoundRequest, SoundTag};
use crate::core::storage::{Prefs, StoredData};
use crate::gameplay::menu::button_background;

/// Which mixer a settings row controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTarget {
    Sfx,
    Music,
}

#[derive(Component, Debug, Clone, Copy)]
pub enum SettingsAction {
    VolumeDown(VolumeTarget),
    VolumeUp(VolumeTarget),
    Back,
}

/// Live percent display next to a stepper pair.
#[derive(Component, Debug, Clone, Copy)]
pub struct VolumeReadout(pub VolumeTarget);

#[derive(Component, Clone, Copy)]
pub struct SettingsScene;

pub const VOLUME_STEP: u8 = 10;

/// One stepper press worth of volume change, clamped to 0..=100.
pub fn stepped_volume(current: u8, up: bool) -> u8 {
    if up {
        current.saturating_add(VOLUME_STEP).min(100)
    } else {
        current.saturating_sub(VOLUME_STEP)
    }
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Settings), spawn_settings_ui)
            .add_systems(
                Update,
                handle_settings_buttons.run_if(in_state(AppState::Settings)),
            )
            .add_systems(OnExit(AppState::Settings), despawn_settings);
    }
}

fn spawn_settings_ui(mut commands: Commands, prefs: Res<Prefs>) {
    let sfx = prefs.sfx_volume();
    let music = prefs.music_volume();

    commands
        .spawn((
            SettingsScene,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexStart,
                align_items: AlignItems::Center,
                padding: UiRect::top(Val::Px(96.0)),
                row_gap: Val::Px(28.0),
                ..default()
            },
        ))
        .with_children(|p| {
            p.spawn((
                Text::new("Settings"),
                TextColor(Color::WHITE),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
            ));

            p.spawn((
                Text::new("SFX Volume"),
                TextColor(Color::WHITE),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
            ));
            p.spawn(stepper_row()).with_children(|row| {
                row.spawn((
                    Button,
                    SettingsAction::VolumeDown(VolumeTarget::Sfx),
                    stepper_button_node(),
                    button_background(Interaction::None),
                ))
                .with_children(|b| {
                    b.spawn(stepper_label("-"));
                });
                row.spawn((
                    VolumeReadout(VolumeTarget::Sfx),
                    Text::new(format!("{sfx}%")),
                    TextColor(Color::WHITE),
                    TextFont {
                        font_size: 40.0,
                        ..default()
                    },
                ));
                row.spawn((
                    Button,
                    SettingsAction::VolumeUp(VolumeTarget::Sfx),
                    stepper_button_node(),
                    button_background(Interaction::None),
                ))
                .with_children(|b| {
                    b.spawn(stepper_label("+"));
                });
            });

            p.spawn((
                Text::new("Music Volume"),
                TextColor(Color::WHITE),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
            ));
            p.spawn(stepper_row()).with_children(|row| {
                row.spawn((
                    Button,
                    SettingsAction::VolumeDown(VolumeTarget::Music),
                    stepper_button_node(),
                    button_background(Interaction::None),
                ))
                .with_children(|b| {
                    b.spawn(stepper_label("-"));
                });
                row.spawn((
                    VolumeReadout(VolumeTarget::Music),
                    Text::new(format!("{music}%")),
                    TextColor(Color::WHITE),
                    TextFont {
                        font_size: 40.0,
                        ..default()
                    },
                ));
                row.spawn((
                    Button,
                    SettingsAction::VolumeUp(VolumeTarget::Music),
                    stepper_button_node(),
                    button_background(Interaction::None),
                ))
                .with_children(|b| {
                    b.spawn(stepper_label("+"));
                });
            });

            p.spawn((
                Button,
                SettingsAction::Back,
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(72.0),
                    margin: UiRect::top(Val::Px(64.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                button_background(Interaction::None),
            ))
            .with_children(|b| {
                b.spawn((
                    Text::new("Back"),
                    TextColor(Color::BLACK),
                    TextFont {
                        font_size: 32.0,
                        ..default()
                    },
                ));
            });
        });
}

fn stepper_row() -> Node {
    Node {
        flex_direction: FlexDirection::Row,
        align_items: AlignItems::Center,
        column_gap: Val::Px(28.0),
        ..default()
    }
}

fn stepper_button_node() -> Node {
    Node {
        width: Val::Px(72.0),
        height: Val::Px(72.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

fn stepper_label(text: &str) -> (Text, TextColor, TextFont) {
    (
        Text::new(text),
        TextColor(Color::BLACK),
        TextFont {
            font_size: 40.0,
            ..default()
        },
    )
}

fn handle_settings_buttons(
    mut q: Query<
        (&Interaction, &SettingsAction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut prefs: ResMut<Prefs>,
    mut readouts: Query<(&VolumeReadout, &mut Text)>,
    mut sounds: EventWriter<SoundRequest>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (interaction, action, mut bg) in &mut q {
        *bg = button_background(*interaction);
        if *interaction != Interaction::Pressed {
            continue;
        }
        match *action {
            SettingsAction::Back => {
                next_state.set(AppState::Menu);
            }
            SettingsAction::VolumeDown(target) | SettingsAction::VolumeUp(target) => {
                let up = matches!(*action, SettingsAction::VolumeUp(_));
                let volume = match target {
                    VolumeTarget::Sfx => {
                        let v = stepped_volume(prefs.sfx_volume(), up);
                        prefs.set_sfx_volume(v);
                        v
                    }
                    VolumeTarget::Music => {
                        // The cross-fade system re-applies channel volumes every
                        // tick, so the change is audible immediately.
                        let v = stepped_volume(prefs.music_volume(), up);
                        prefs.set_music_volume(v);
                        v
                    }
                };
                for (readout, mut text) in &mut readouts {
                    if readout.0 == target {
                        *text = Text::new(format!("{volume}%"));
                    }
                }
            }
        }
        sounds.write(SoundRequest::new(SoundTag::Hit));
    }
}

fn despawn_settings(mut commands: Commands, q: Query<Entity, With<SettingsScene>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
