use std::fs;

use tin_can::core::config::config::GameConfig;

#[test]
fn defaults_are_playable_and_warning_free() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.window.width, 720.0);
    assert_eq!(cfg.window.height, 1280.0);
    assert_eq!(cfg.window.title, "Tin Can");
    assert!(cfg.can.gravity < 0.0, "cans must fall back down");
    assert!(cfg.can.launch_speed.min <= cfg.can.launch_speed.max);
    assert!(cfg.spawner.min_interval <= cfg.spawner.base_interval);
    assert!(
        cfg.validate().is_empty(),
        "default config should not warn: {:?}",
        cfg.validate()
    );
}

#[test]
fn layered_load_merges_later_layers_over_earlier() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = dir.path().join("base.ron");
    let overlay = dir.path().join("overlay.ron");
    fs::write(
        &base,
        r#"
        (
            window: (title: "Layered Can"),
            spawner: (base_interval: 2.0, min_interval: 0.5),
        )
        "#,
    )
    .expect("write base");
    fs::write(
        &overlay,
        r#"
        (
            spawner: (min_interval: 0.25),
        )
        "#,
    )
    .expect("write overlay");

    let (cfg, used, errors) = GameConfig::load_layered([&base, &overlay]);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.title, "Layered Can");
    assert_eq!(cfg.spawner.base_interval, 2.0);
    assert_eq!(cfg.spawner.min_interval, 0.25);
    // Untouched sections keep their defaults.
    assert_eq!(cfg.can.width, GameConfig::default().can.width);
}

#[test]
fn layered_load_skips_missing_and_broken_layers() {
    let dir = tempfile::tempdir().expect("tempdir");
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "this is not ron (").expect("write broken");
    let missing = dir.path().join("does-not-exist.ron");

    let (cfg, used, errors) = GameConfig::load_layered([&broken, &missing]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 2);
    assert_eq!(cfg, GameConfig::default());
}

#[test]
fn validate_flags_suspicious_values() {
    let mut cfg = GameConfig::default();
    cfg.window.auto_close = -1.0;
    cfg.can.gravity = 10.0;
    cfg.spawner.min_interval = cfg.spawner.base_interval + 1.0;
    cfg.audio.cross_fade_rate = 0.0;

    let warnings = cfg.validate().join("\n");
    assert!(warnings.contains("autoClose"), "{warnings}");
    assert!(warnings.contains("gravity"), "{warnings}");
    assert!(warnings.contains("min_interval"), "{warnings}");
    assert!(warnings.contains("cross_fade_rate"), "{warnings}");
}

#[test]
fn load_from_file_reports_parse_errors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.ron");
    fs::write(&path, "(window: (width: \"oops\"))").expect("write");
    let err = GameConfig::load_from_file(&path).unwrap_err();
    assert!(err.contains("parse RON"), "{err}");
}
