use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use tin_can::core::storage::{FilePrefs, Prefs};
use tin_can::platform::play_services::{DesktopPlayServices, GameServices};
use tin_can::{GameConfig, TinCanPlugin};

const DEFAULT_CONFIG: &str = "assets/config/game.ron";

/// Tap-the-can arcade game.
#[derive(Parser, Debug)]
#[command(name = "tin-can", version, about)]
struct Cli {
    /// Extra config layer merged over the bundled defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Preferences file (high score, volumes, tutorial countdown)
    #[arg(long)]
    save: Option<PathBuf>,
    /// Exit automatically after this many seconds (smoke runs)
    #[arg(long)]
    auto_close: Option<f32>,
}

fn main() {
    let cli = Cli::parse();

    let mut layers: Vec<PathBuf> = vec![DEFAULT_CONFIG.into()];
    if let Some(extra) = &cli.config {
        layers.push(extra.clone());
    }
    // Logging is not up yet; config problems go straight to stderr.
    let (mut cfg, _used, errors) = GameConfig::load_layered(&layers);
    for error in &errors {
        eprintln!("config: {error}");
    }
    for warning in cfg.validate() {
        eprintln!("config: {warning}");
    }
    if let Some(secs) = cli.auto_close {
        cfg.window.auto_close = secs;
    }

    let save_path = cli
        .save
        .unwrap_or_else(|| PathBuf::from(&cfg.storage.save_path));
    let prefs = FilePrefs::load_or_default(save_path, cfg.storage.leaderboard_key.clone());
    let services = DesktopPlayServices::new(cfg.storage.leaderboard_key.clone());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(cfg)
        .insert_resource(Prefs(Box::new(prefs)))
        .insert_resource(GameServices(Box::new(services)))
        .add_plugins(TinCanPlugin)
        .run();
}
