use bevy::prelude::*;

use tin_can::core::components::TapTarget;
use tin_can::core::config::config::{CanConfig, GameConfig, SpawnerConfig};
use tin_can::gameplay::round::{
    handle_round_taps, integrate_can, interval_for, is_missed, launch_velocity, pop_cans, Can,
    Popping,
};
use tin_can::gameplay::scoreboard::Scoreboard;
use tin_can::audio::SoundRequest;
use tin_can::interaction::tap::TapEvent;

#[test]
fn spawn_interval_ramps_down_to_the_floor() {
    let cfg = SpawnerConfig {
        base_interval: 1.6,
        min_interval: 0.55,
        ramp_per_point: 0.03,
    };
    assert_eq!(interval_for(&cfg, 0), 1.6);
    assert!(interval_for(&cfg, 10) < interval_for(&cfg, 5));
    assert_eq!(interval_for(&cfg, 10_000), 0.55);
}

#[test]
fn can_arc_rises_peaks_and_falls() {
    let dt = 1.0 / 60.0;
    let gravity = -1500.0;
    let mut pos = Vec2::new(0.0, -700.0);
    let mut vel = Vec2::new(100.0, 1500.0);

    let mut peak = pos.y;
    let mut ticks = 0;
    while vel.y > 0.0 {
        let (p, v) = integrate_can(pos, vel, gravity, dt);
        pos = p;
        vel = v;
        peak = peak.max(pos.y);
        ticks += 1;
        assert!(ticks < 10_000, "can never reached its apex");
    }
    assert!(peak > -700.0, "can must gain height before falling");

    // Gravity keeps pulling; the can comes back down past its start.
    while pos.y > -700.0 {
        let (p, v) = integrate_can(pos, vel, gravity, dt);
        pos = p;
        vel = v;
        ticks += 1;
        assert!(ticks < 20_000, "can never fell back");
    }
    assert!(vel.y < 0.0);
}

#[test]
fn launch_phase_below_the_kill_line_is_not_a_miss() {
    // Fresh launches start under the bottom edge moving up.
    assert!(!is_missed(-800.0, 1500.0, 1280.0, 96.0));
    // Falling below the kill line ends the round.
    assert!(is_missed(-800.0, -200.0, 1280.0, 96.0));
    // Falling but still on screen is fine.
    assert!(!is_missed(-300.0, -200.0, 1280.0, 96.0));
}

#[test]
fn launches_drift_back_toward_the_play_area() {
    let cfg = CanConfig::default();
    let mut rng = rand::thread_rng();
    for _ in 0..32 {
        let from_right = launch_velocity(&cfg, 250.0, &mut rng);
        assert!(from_right.x < 0.0);
        let from_left = launch_velocity(&cfg, -250.0, &mut rng);
        assert!(from_left.x > 0.0);
        assert!(from_left.y >= cfg.launch_speed.min && from_left.y <= cfg.launch_speed.max);
    }
}

fn tap_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(GameConfig::default());
    app.insert_resource(Scoreboard::default());
    app.add_event::<TapEvent>();
    app.add_event::<SoundRequest>();
    app.add_systems(Update, handle_round_taps);
    app
}

fn spawn_test_can(app: &mut App, x: f32, y: f32) -> Entity {
    app.world_mut()
        .spawn((
            Can {
                velocity: Vec2::ZERO,
            },
            TapTarget::new(120.0, 152.0),
            Transform::from_xyz(x, y, 5.0),
        ))
        .id()
}

#[test]
fn tapping_a_can_scores_and_starts_the_pop() {
    let mut app = tap_app();
    let can = spawn_test_can(&mut app, 0.0, 0.0);

    app.world_mut().send_event(TapEvent {
        world_pos: Vec2::new(30.0, -40.0),
    });
    app.update();

    assert_eq!(app.world().resource::<Scoreboard>().score, 1);
    assert!(app.world().entity(can).contains::<Popping>());
    assert!(!app.world().entity(can).contains::<TapTarget>());
}

#[test]
fn taps_outside_the_hit_box_do_nothing() {
    let mut app = tap_app();
    let can = spawn_test_can(&mut app, 0.0, 0.0);

    app.world_mut().send_event(TapEvent {
        world_pos: Vec2::new(200.0, 0.0),
    });
    app.update();

    assert_eq!(app.world().resource::<Scoreboard>().score, 0);
    assert!(!app.world().entity(can).contains::<Popping>());
}

#[test]
fn a_popping_can_cannot_be_killed_twice() {
    let mut app = tap_app();
    let _can = spawn_test_can(&mut app, 0.0, 0.0);

    app.world_mut().send_event(TapEvent {
        world_pos: Vec2::ZERO,
    });
    app.update();
    app.world_mut().send_event(TapEvent {
        world_pos: Vec2::ZERO,
    });
    app.update();

    assert_eq!(app.world().resource::<Scoreboard>().score, 1);
}

#[test]
fn overlapping_cans_are_all_killed_by_one_tap() {
    let mut app = tap_app();
    spawn_test_can(&mut app, 0.0, 0.0);
    spawn_test_can(&mut app, 40.0, 20.0);

    app.world_mut().send_event(TapEvent {
        world_pos: Vec2::new(20.0, 10.0),
    });
    app.update();

    assert_eq!(app.world().resource::<Scoreboard>().score, 2);
}

#[test]
fn pop_animation_ends_in_a_despawn() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_systems(Update, pop_cans);
    let can = app
        .world_mut()
        .spawn((Popping { ticks_left: 2 }, Transform::default()))
        .id();

    app.update();
    app.update();
    assert!(app.world().get_entity(can).is_ok(), "still shrinking");
    app.update();
    assert!(app.world().get_entity(can).is_err(), "pop should despawn");
}
