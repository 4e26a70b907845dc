use tin_can::audio::{CrossFade, MusicTag};

#[test]
fn begin_switches_track_and_restarts_fade() {
    let mut fade = CrossFade::default();
    assert!(fade.begin(MusicTag::Menu));
    assert_eq!(fade.current, Some(MusicTag::Menu));
    assert_eq!(fade.last, None);
    assert_eq!(fade.pending, Some(MusicTag::Menu));
    assert_eq!(fade.level, 1.0);

    for _ in 0..25 {
        fade.step(0.05);
    }
    assert_eq!(fade.level, 0.0);

    assert!(fade.begin(MusicTag::Gameplay));
    assert_eq!(fade.current, Some(MusicTag::Gameplay));
    assert_eq!(fade.last, Some(MusicTag::Menu));
    assert_eq!(fade.level, 1.0);
}

#[test]
fn replaying_the_current_track_is_a_no_op() {
    let mut fade = CrossFade::default();
    fade.begin(MusicTag::Menu);
    for _ in 0..7 {
        fade.step(0.05);
    }
    let mid_fade = fade;

    assert!(!fade.begin(MusicTag::Menu));
    assert_eq!(fade, mid_fade, "replay must not disturb a running fade");
}

#[test]
fn level_never_leaves_unit_range() {
    let mut fade = CrossFade::default();
    fade.begin(MusicTag::Gameplay);
    for _ in 0..100 {
        fade.step(0.07);
        assert!((0.0..=1.0).contains(&fade.level));
    }
    assert_eq!(fade.level, 0.0);
}

#[test]
fn channel_volumes_trade_off_against_the_fade() {
    let mut fade = CrossFade::default();
    fade.begin(MusicTag::Gameplay);

    // Fade just started: the outgoing track still owns the full volume.
    let (current, last) = fade.channel_volumes(50);
    assert_eq!(current, 0.0);
    assert_eq!(last, 0.5);

    while fade.level > 0.0 {
        fade.step(0.05);
        let (current, last) = fade.channel_volumes(50);
        assert!(current + last <= 0.5 + f32::EPSILON);
        assert!(current >= 0.0 && last >= 0.0);
    }

    // Fade complete: the incoming track owns the full volume.
    let (current, last) = fade.channel_volumes(50);
    assert_eq!(current, 0.5);
    assert_eq!(last, 0.0);
}

#[test]
fn muted_player_silences_both_channels() {
    let mut fade = CrossFade::default();
    fade.begin(MusicTag::Menu);
    fade.step(0.05);
    let (current, last) = fade.channel_volumes(0);
    assert_eq!(current, 0.0);
    assert_eq!(last, 0.0);
}
