use bevy::prelude::*;

use crate::core::system::system_order::TapDispatchSet;

/// World-space tap, emitted once per press. Every tappable under the point is
/// notified by its scene's handler, matching the original dispatch loop.
#[derive(Event, Debug, Clone, Copy)]
pub struct TapEvent {
    pub world_pos: Vec2,
}

pub struct TapInputPlugin;

impl Plugin for TapInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TapEvent>()
            .add_systems(Update, emit_tap_events.in_set(TapDispatchSet));
    }
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// First fresh touch wins over the mouse cursor.
fn primary_pointer_press(
    buttons: &ButtonInput<MouseButton>,
    touches: &Touches,
    window: &Window,
) -> Option<Vec2> {
    if let Some(touch) = touches.iter_just_pressed().next() {
        return Some(touch.position());
    }
    if buttons.just_pressed(MouseButton::Left) {
        return window.cursor_position();
    }
    None
}

fn emit_tap_events(
    buttons: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut taps: EventWriter<TapEvent>,
) {
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(screen_pos) = primary_pointer_press(&buttons, &touches, window) else {
        return;
    };
    let Some(world_pos) = cursor_world_pos(&camera_q, screen_pos) else {
        return;
    };
    taps.write(TapEvent { world_pos });
}
