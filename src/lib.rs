pub mod app;
pub mod audio;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod platform;

// Curated re-exports
pub use app::game::TinCanPlugin;
pub use app::state::AppState;
pub use crate::core::config::{config::GameConfig, config::WindowConfig};
