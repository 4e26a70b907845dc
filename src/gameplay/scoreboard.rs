use bevy::prelude::*;

use crate::core::storage::{Prefs, StoredData};

/// Live round score plus the best score ever seen. The persisted value is only
/// written back when a round ends with a new record.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
}

impl Scoreboard {
    pub fn add(&mut self, points: u32) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_record = true;
        }
    }

    pub fn reset_round(&mut self) {
        self.score = 0;
        self.new_record = false;
    }
}

#[derive(Component)]
pub struct CurrentScoreText;
#[derive(Component)]
pub struct HighScoreText;

pub struct ScoreboardPlugin;

impl Plugin for ScoreboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scoreboard>()
            .add_systems(Startup, seed_high_score)
            .add_systems(Update, update_score_text);
    }
}

fn seed_high_score(mut scoreboard: ResMut<Scoreboard>, prefs: Res<Prefs>) {
    scoreboard.high_score = prefs.high_score();
}

fn high_score_color(new_record: bool) -> Color {
    if new_record {
        Color::srgb(1.0, 0.84, 0.0)
    } else {
        Color::WHITE
    }
}

/// Spawns the CURR / HIGH readout strip. Each scene that shows it passes its
/// own marker so teardown follows the scene.
pub fn spawn_score_display(
    commands: &mut Commands,
    scoreboard: &Scoreboard,
    marker: impl Component,
) {
    let root = commands
        .spawn((
            marker,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::horizontal(Val::Px(16.0)),
                ..default()
            },
        ))
        .id();
    commands.entity(root).with_children(|p| {
        p.spawn((
            HighScoreText,
            Text::new(format!("HIGH {:04}", scoreboard.high_score)),
            TextColor(high_score_color(scoreboard.new_record)),
            TextFont {
                font_size: 36.0,
                ..default()
            },
        ));
        p.spawn((
            CurrentScoreText,
            Text::new(format!("CURR {:04}", scoreboard.score)),
            TextColor(Color::WHITE),
            TextFont {
                font_size: 36.0,
                ..default()
            },
        ));
    });
}

fn update_score_text(
    scoreboard: Res<Scoreboard>,
    mut q_curr: Query<&mut Text, (With<CurrentScoreText>, Without<HighScoreText>)>,
    mut q_high: Query<(&mut Text, &mut TextColor), (With<HighScoreText>, Without<CurrentScoreText>)>,
) {
    if !scoreboard.is_changed() {
        return;
    }
    for mut text in &mut q_curr {
        *text = Text::new(format!("CURR {:04}", scoreboard.score));
    }
    for (mut text, mut color) in &mut q_high {
        *text = Text::new(format!("HIGH {:04}", scoreboard.high_score));
        *color = TextColor(high_score_color(scoreboard.new_record));
    }
}
