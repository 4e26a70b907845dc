use bevy::prelude::*;

/// Axis-aligned tap hit box centered on the entity translation.
#[derive(Component, Debug, Copy, Clone, PartialEq)]
pub struct TapTarget {
    pub half_extents: Vec2,
}

impl TapTarget {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width, height) * 0.5,
        }
    }

    /// Point-in-rect test around `center`. Edges count as hits.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        (point.x - center.x).abs() <= self.half_extents.x
            && (point.y - center.y).abs() <= self.half_extents.y
    }
}

/// Which translation axis a [`Bob`] oscillates along.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BobAxis {
    X,
    Y,
}

/// Sinusoidal bob around an anchor point. Tick-driven so the motion is
/// deterministic under the fixed timestep.
#[derive(Component, Debug, Copy, Clone)]
pub struct Bob {
    pub anchor: Vec2,
    pub amplitude: f32,
    pub axis: BobAxis,
    pub ticks: u32,
}

impl Bob {
    pub fn new(anchor: Vec2, amplitude: f32, axis: BobAxis) -> Self {
        Self {
            anchor,
            amplitude,
            axis,
            ticks: 0,
        }
    }

    /// Offset from the anchor after `ticks` fixed ticks. Full period is two
    /// seconds at the given tick rate.
    pub fn offset(&self, tick_hz: f32) -> f32 {
        (std::f32::consts::PI * self.ticks as f32 / tick_hz).sin() * self.amplitude
    }
}

/// Constant rotation, radians per second, applied under the fixed timestep.
#[derive(Component, Debug, Copy, Clone, Deref, DerefMut)]
pub struct Spin(pub f32);
