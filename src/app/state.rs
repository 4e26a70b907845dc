use bevy::prelude::*;

/// High-level app lifecycle state.
/// Menu <-> Settings, Menu -> Playing -> Finished -> Menu
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Title screen with the bobbing start can.
    #[default]
    Menu,
    /// Volume settings screen.
    Settings,
    /// Active round.
    Playing,
    /// Round over; overlay stays up until the player taps back to the menu.
    Finished,
}
