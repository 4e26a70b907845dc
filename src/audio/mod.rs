//! Game audio: a bank of one-shot effects with recorded variants and two
//! looping music channels blended by a linear cross-fade.
//!
//! Track status changes are avoided where volume manipulation suffices; a
//! switch only unpauses the incoming channel and the fade runs on volumes.

use bevy::audio::{AudioSink, AudioSinkPlayback, Volume};
use bevy::prelude::*;
use rand::Rng;
use std::collections::HashMap;

use crate::core::config::GameConfig;
use crate::core::storage::{Prefs, StoredData};
use crate::core::system::system_order::FixedMotionSet;

/// One-shot effect categories. Hit and Kill carry several recorded variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundTag {
    Hit,
    Kill,
    GameOver,
    HighScore,
}

/// Looping music tracks, one channel entity each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicTag {
    Menu,
    Gameplay,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SoundRequest {
    pub tag: SoundTag,
    pub volume_scale: f32,
}

impl SoundRequest {
    pub fn new(tag: SoundTag) -> Self {
        Self {
            tag,
            volume_scale: 1.0,
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct MusicRequest(pub MusicTag);

/// Pauses both music channels (round end). The next [`MusicRequest`] resumes
/// only the requested channel.
#[derive(Event, Debug, Clone, Copy)]
pub struct MusicPauseRequest;

#[derive(Resource)]
pub struct SoundBank {
    variants: HashMap<SoundTag, Vec<Handle<AudioSource>>>,
}

impl SoundBank {
    pub fn pick(&self, tag: SoundTag, rng: &mut impl Rng) -> Option<Handle<AudioSource>> {
        let list = self.variants.get(&tag)?;
        if list.is_empty() {
            return None;
        }
        let idx = if list.len() > 1 {
            rng.gen_range(0..list.len())
        } else {
            0
        };
        Some(list[idx].clone())
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicChannel(pub MusicTag);

/// Linear cross-fade between the two music channels.
///
/// `level` runs 1 -> 0 after each track change: at 1 the previous track still
/// owns the full music volume, at 0 the current track does. Volume math lives
/// here so it stays testable without an audio device.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CrossFade {
    pub level: f32,
    pub current: Option<MusicTag>,
    pub last: Option<MusicTag>,
    /// Channel waiting for its sink (asset still decoding) to start playback.
    pub pending: Option<MusicTag>,
}

impl Default for CrossFade {
    fn default() -> Self {
        Self {
            level: 0.0,
            current: None,
            last: None,
            pending: None,
        }
    }
}

impl CrossFade {
    /// Switch to `tag`. Replaying the already-current track is a no-op so a
    /// settings round-trip never disturbs the menu music. Returns whether a
    /// fade actually started.
    pub fn begin(&mut self, tag: MusicTag) -> bool {
        if self.current == Some(tag) {
            return false;
        }
        self.last = self.current;
        self.current = Some(tag);
        self.pending = Some(tag);
        self.level = 1.0;
        true
    }

    pub fn step(&mut self, rate: f32) {
        self.level = (self.level - rate).max(0.0);
    }

    /// Volume share for (current, last) given the player's music volume 0..=100.
    pub fn channel_volumes(&self, music_volume: u8) -> (f32, f32) {
        let vol = f32::from(music_volume) / 100.0;
        ((1.0 - self.level) * vol, self.level * vol)
    }
}

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CrossFade>()
            .add_event::<SoundRequest>()
            .add_event::<MusicRequest>()
            .add_event::<MusicPauseRequest>()
            .add_systems(Startup, setup_audio_banks)
            .add_systems(
                Update,
                (
                    handle_music_requests,
                    handle_music_pause,
                    activate_pending_channel,
                    handle_sound_requests,
                ),
            )
            .add_systems(FixedUpdate, update_cross_fade.in_set(FixedMotionSet));
    }
}

fn setup_audio_banks(mut commands: Commands, assets: Res<AssetServer>) {
    let mut variants: HashMap<SoundTag, Vec<Handle<AudioSource>>> = HashMap::new();
    variants.insert(
        SoundTag::Hit,
        (0..3).map(|i| assets.load(format!("audio/hit{i}.ogg"))).collect(),
    );
    variants.insert(
        SoundTag::Kill,
        (0..3).map(|i| assets.load(format!("audio/kill{i}.ogg"))).collect(),
    );
    variants.insert(SoundTag::GameOver, vec![assets.load("audio/gameover.ogg")]);
    variants.insert(SoundTag::HighScore, vec![assets.load("audio/highscore.ogg")]);
    commands.insert_resource(SoundBank { variants });

    for (tag, file) in [
        (MusicTag::Menu, "audio/menu.ogg"),
        (MusicTag::Gameplay, "audio/gameplay.ogg"),
    ] {
        commands.spawn((
            MusicChannel(tag),
            AudioPlayer(assets.load(file)),
            PlaybackSettings {
                paused: true,
                volume: Volume::Linear(0.0),
                ..PlaybackSettings::LOOP
            },
        ));
    }
}

fn handle_music_requests(mut requests: EventReader<MusicRequest>, mut fade: ResMut<CrossFade>) {
    for MusicRequest(tag) in requests.read().copied() {
        if fade.begin(tag) {
            info!(target: "audio", "music -> {tag:?}");
        }
    }
}

/// Starts the incoming channel once its sink exists (the decoder may lag the
/// request by a few frames on first play).
fn activate_pending_channel(
    mut fade: ResMut<CrossFade>,
    mut channels: Query<(&MusicChannel, &mut AudioSink)>,
) {
    let Some(tag) = fade.pending else {
        return;
    };
    for (channel, mut sink) in &mut channels {
        if channel.0 == tag {
            sink.set_volume(Volume::Linear(0.0));
            sink.play();
            fade.pending = None;
        }
    }
}

fn handle_music_pause(
    mut requests: EventReader<MusicPauseRequest>,
    mut channels: Query<&mut AudioSink, With<MusicChannel>>,
) {
    if requests.read().next().is_none() {
        return;
    }
    for sink in &mut channels {
        sink.pause();
    }
}

fn update_cross_fade(
    cfg: Res<GameConfig>,
    prefs: Res<Prefs>,
    mut fade: ResMut<CrossFade>,
    mut channels: Query<(&MusicChannel, &mut AudioSink)>,
) {
    if fade.current.is_none() {
        return;
    }
    fade.step(cfg.audio.cross_fade_rate);
    let (current_vol, last_vol) = fade.channel_volumes(prefs.music_volume());
    for (channel, mut sink) in &mut channels {
        if Some(channel.0) == fade.current {
            sink.set_volume(Volume::Linear(current_vol));
        } else if Some(channel.0) == fade.last {
            sink.set_volume(Volume::Linear(last_vol));
            if fade.level == 0.0 && !sink.is_paused() {
                sink.pause();
            }
        }
    }
}

fn handle_sound_requests(
    mut commands: Commands,
    mut requests: EventReader<SoundRequest>,
    bank: Option<Res<SoundBank>>,
    prefs: Res<Prefs>,
) {
    let Some(bank) = bank else {
        return;
    };
    let mut rng = rand::thread_rng();
    for request in requests.read() {
        let Some(source) = bank.pick(request.tag, &mut rng) else {
            continue;
        };
        let volume = f32::from(prefs.sfx_volume()) / 100.0 * request.volume_scale;
        commands.spawn((
            AudioPlayer(source),
            PlaybackSettings {
                volume: Volume::Linear(volume),
                ..PlaybackSettings::DESPAWN
            },
        ));
    }
}
