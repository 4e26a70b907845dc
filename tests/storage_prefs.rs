use std::fs;

use tin_can::core::storage::{FilePrefs, StoredData, TUTORIAL_SHOW_COUNT};

#[test]
fn missing_save_starts_from_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("save.ron");
    let prefs = FilePrefs::load_or_default(&path, "lb");
    assert_eq!(prefs.high_score(), 0);
    assert_eq!(prefs.music_volume(), 50);
    assert_eq!(prefs.sfx_volume(), 50);
    assert_eq!(prefs.leaderboard_key(), "lb");
}

#[test]
fn tutorial_credit_counts_down_and_persists() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("save.ron");

    let mut prefs = FilePrefs::load_or_default(&path, "lb");
    for _ in 0..TUTORIAL_SHOW_COUNT {
        assert!(prefs.take_tutorial_credit());
    }
    assert!(!prefs.take_tutorial_credit());

    // A fresh process sees the exhausted countdown.
    let mut reloaded = FilePrefs::load_or_default(&path, "lb");
    assert!(!reloaded.take_tutorial_credit());
}

#[test]
fn volumes_are_independent_and_clamped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("save.ron");

    let mut prefs = FilePrefs::load_or_default(&path, "lb");
    prefs.set_sfx_volume(20);
    prefs.set_music_volume(80);
    assert_eq!(prefs.sfx_volume(), 20);
    assert_eq!(prefs.music_volume(), 80);

    prefs.set_music_volume(130);
    assert_eq!(prefs.music_volume(), 100);

    let reloaded = FilePrefs::load_or_default(&path, "lb");
    assert_eq!(reloaded.sfx_volume(), 20);
    assert_eq!(reloaded.music_volume(), 100);
}

#[test]
fn high_score_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("save.ron");

    let mut prefs = FilePrefs::load_or_default(&path, "lb");
    prefs.record_high_score(1234);

    let reloaded = FilePrefs::load_or_default(&path, "lb");
    assert_eq!(reloaded.high_score(), 1234);
}

#[test]
fn corrupt_save_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("save.ron");
    fs::write(&path, "garbage, not a save file").expect("write corrupt");

    let mut prefs = FilePrefs::load_or_default(&path, "lb");
    assert_eq!(prefs.high_score(), 0);
    assert_eq!(prefs.music_volume(), 50);

    // The next write repairs the file.
    prefs.record_high_score(7);
    let reloaded = FilePrefs::load_or_default(&path, "lb");
    assert_eq!(reloaded.high_score(), 7);
}
