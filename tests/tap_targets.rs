use bevy::prelude::*;

use tin_can::core::components::{Bob, BobAxis, TapTarget};
use tin_can::gameplay::settings::stepped_volume;

#[test]
fn tap_target_hits_inside_and_on_the_edge() {
    let target = TapTarget::new(100.0, 60.0);
    let center = Vec2::new(10.0, -20.0);

    assert!(target.contains(center, center));
    assert!(target.contains(center, Vec2::new(60.0, -20.0))); // right edge
    assert!(target.contains(center, Vec2::new(10.0, 10.0))); // top edge
    assert!(!target.contains(center, Vec2::new(61.0, -20.0)));
    assert!(!target.contains(center, Vec2::new(10.0, 11.0)));
}

#[test]
fn bob_oscillates_around_the_anchor() {
    let mut bob = Bob::new(Vec2::new(5.0, 0.0), 64.0, BobAxis::X);

    // Quarter period at 60 Hz: the sine peaks.
    bob.ticks = 30;
    assert!((bob.offset(60.0) - 64.0).abs() < 1e-3);

    // Half period: back through the anchor.
    bob.ticks = 60;
    assert!(bob.offset(60.0).abs() < 1e-3);

    // Three quarters: the trough.
    bob.ticks = 90;
    assert!((bob.offset(60.0) + 64.0).abs() < 1e-3);
}

#[test]
fn volume_steps_clamp_at_both_ends() {
    assert_eq!(stepped_volume(50, true), 60);
    assert_eq!(stepped_volume(50, false), 40);
    assert_eq!(stepped_volume(95, true), 100);
    assert_eq!(stepped_volume(100, true), 100);
    assert_eq!(stepped_volume(5, false), 0);
    assert_eq!(stepped_volume(0, false), 0);
}
