use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use tin_can::app::state::AppState;
use tin_can::audio::{MusicPauseRequest, SoundRequest, SoundTag};
use tin_can::core::storage::{MemoryPrefs, Prefs, StoredData};
use tin_can::gameplay::finished::finalize_round;
use tin_can::gameplay::round::reset_round;
use tin_can::gameplay::scoreboard::Scoreboard;
use tin_can::platform::play_services::{GameServices, PlayServices};

#[derive(Default)]
struct RecordingPlayServices {
    signed_in: bool,
    submitted: Arc<Mutex<Vec<u32>>>,
}

impl PlayServices for RecordingPlayServices {
    fn sign_in(&mut self) {
        self.signed_in = true;
    }
    fn sign_out(&mut self) {
        self.signed_in = false;
    }
    fn is_signed_in(&self) -> bool {
        self.signed_in
    }
    fn submit_score(&mut self, score: u32) {
        self.submitted.lock().unwrap().push(score);
    }
    fn show_leaderboard(&mut self) {}
}

/// Headless app wiring just the storage/services side of the state machine,
/// the way the full game wires it on enter systems.
fn director_app(prefs: MemoryPrefs) -> (App, Arc<Mutex<Vec<u32>>>) {
    let recorder = RecordingPlayServices::default();
    let submitted = recorder.submitted.clone();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<AppState>();
    app.add_event::<SoundRequest>();
    app.add_event::<MusicPauseRequest>();
    let high = prefs.high_score();
    app.insert_resource(Scoreboard {
        high_score: high,
        ..Default::default()
    });
    app.insert_resource(Prefs(Box::new(prefs)));
    app.insert_resource(GameServices(Box::new(recorder)));
    app.add_systems(OnEnter(AppState::Playing), reset_round);
    app.add_systems(OnEnter(AppState::Finished), finalize_round);
    app.update();
    (app, submitted)
}

fn set_state(app: &mut App, state: AppState) {
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(state);
    app.update();
}

fn jingles(app: &App) -> Vec<SoundTag> {
    let events = app.world().resource::<Events<SoundRequest>>();
    events.get_cursor().read(events).map(|r| r.tag).collect()
}

#[test]
fn new_record_is_persisted_and_submitted() {
    let (mut app, submitted) = director_app(MemoryPrefs::default());

    set_state(&mut app, AppState::Playing);
    app.world_mut().resource_mut::<Scoreboard>().add(5);
    set_state(&mut app, AppState::Finished);

    let scoreboard = *app.world().resource::<Scoreboard>();
    assert!(scoreboard.new_record);
    assert_eq!(app.world().resource::<Prefs>().high_score(), 5);
    assert_eq!(*submitted.lock().unwrap(), vec![5]);
    assert!(jingles(&app).contains(&SoundTag::HighScore));
}

#[test]
fn beaten_by_old_record_submits_nothing() {
    let (mut app, submitted) = director_app(MemoryPrefs::with_high_score(10));

    set_state(&mut app, AppState::Playing);
    app.world_mut().resource_mut::<Scoreboard>().add(3);
    set_state(&mut app, AppState::Finished);

    let scoreboard = *app.world().resource::<Scoreboard>();
    assert!(!scoreboard.new_record);
    assert_eq!(scoreboard.high_score, 10);
    assert_eq!(app.world().resource::<Prefs>().high_score(), 10);
    assert!(submitted.lock().unwrap().is_empty());
    assert!(jingles(&app).contains(&SoundTag::GameOver));
}

#[test]
fn replaying_resets_the_round_but_keeps_the_record() {
    let (mut app, _submitted) = director_app(MemoryPrefs::default());

    set_state(&mut app, AppState::Playing);
    app.world_mut().resource_mut::<Scoreboard>().add(8);
    set_state(&mut app, AppState::Finished);
    set_state(&mut app, AppState::Menu);
    set_state(&mut app, AppState::Playing);

    let scoreboard = *app.world().resource::<Scoreboard>();
    assert_eq!(scoreboard.score, 0);
    assert!(!scoreboard.new_record);
    assert_eq!(scoreboard.high_score, 8);
}

#[test]
fn round_end_pauses_music() {
    let (mut app, _submitted) = director_app(MemoryPrefs::default());

    set_state(&mut app, AppState::Playing);
    set_state(&mut app, AppState::Finished);

    let events = app.world().resource::<Events<MusicPauseRequest>>();
    assert!(events.get_cursor().read(events).next().is_some());
}
