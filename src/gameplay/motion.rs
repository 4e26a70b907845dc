use bevy::prelude::*;

use crate::app::game::TICK_HZ;
use crate::core::components::{Bob, BobAxis, Spin};
use crate::core::system::system_order::FixedMotionSet;

/// Shared tick-driven motion: sinusoidal bobbing (start can, end message) and
/// sprite spin (airborne cans).
pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (advance_bob, advance_spin).in_set(FixedMotionSet),
        );
    }
}

fn advance_bob(mut q: Query<(&mut Transform, &mut Bob)>) {
    for (mut tf, mut bob) in &mut q {
        bob.ticks = bob.ticks.wrapping_add(1);
        let offset = bob.offset(TICK_HZ as f32);
        match bob.axis {
            BobAxis::X => {
                tf.translation.x = bob.anchor.x + offset;
                tf.translation.y = bob.anchor.y;
            }
            BobAxis::Y => {
                tf.translation.x = bob.anchor.x;
                tf.translation.y = bob.anchor.y + offset;
            }
        }
    }
}

fn advance_spin(time: Res<Time>, mut q: Query<(&mut Transform, &Spin)>) {
    for (mut tf, spin) in &mut q {
        tf.rotate_z(spin.0 * time.delta_secs());
    }
}
