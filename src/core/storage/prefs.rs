use anyhow::{Context, Result};
use bevy::prelude::*;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MAX_VOLUME: u8 = 100;
pub const DEFAULT_VOLUME: u8 = 50;
/// How many menu visits show the tap-the-can tutorial icon on a fresh install.
pub const TUTORIAL_SHOW_COUNT: u32 = 2;

/// Persistent player data: high score, mixer volumes, tutorial-icon countdown.
/// Implementations must never let an IO failure reach game flow.
pub trait StoredData: Send + Sync {
    fn leaderboard_key(&self) -> &str;

    fn high_score(&self) -> u32;
    fn record_high_score(&mut self, score: u32);

    fn music_volume(&self) -> u8;
    fn set_music_volume(&mut self, volume: u8);

    fn sfx_volume(&self) -> u8;
    fn set_sfx_volume(&mut self, volume: u8);

    /// Consumes one showing of the tutorial icon; false once exhausted.
    fn take_tutorial_credit(&mut self) -> bool;
}

/// On-disk shape of the save file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveFile {
    pub high_score: u32,
    pub music_volume: u8,
    pub sfx_volume: u8,
    pub tutorial_remaining: u32,
}
impl Default for SaveFile {
    fn default() -> Self {
        Self {
            high_score: 0,
            music_volume: DEFAULT_VOLUME,
            sfx_volume: DEFAULT_VOLUME,
            tutorial_remaining: TUTORIAL_SHOW_COUNT,
        }
    }
}

impl SaveFile {
    fn take_tutorial_credit(&mut self) -> bool {
        if self.tutorial_remaining == 0 {
            return false;
        }
        self.tutorial_remaining -= 1;
        true
    }
}

/// RON-file-backed preferences. Every mutation persists immediately; a corrupt
/// or missing file falls back to defaults and is overwritten on the next write.
pub struct FilePrefs {
    path: PathBuf,
    leaderboard_key: String,
    data: SaveFile,
}

impl FilePrefs {
    pub fn load_or_default(path: impl Into<PathBuf>, leaderboard_key: impl Into<String>) -> Self {
        let path = path.into();
        let data = match Self::read(&path) {
            Ok(data) => data,
            Err(e) => {
                if path.exists() {
                    warn!(target: "storage", "{e:#}; starting from defaults");
                }
                SaveFile::default()
            }
        };
        Self {
            path,
            leaderboard_key: leaderboard_key.into(),
            data,
        }
    }

    fn read(path: &Path) -> Result<SaveFile> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read save {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parse save {}", path.display()))
    }

    fn persist(&self) {
        let serialized = match ron::ser::to_string_pretty(&self.data, PrettyConfig::default()) {
            Ok(s) => s,
            Err(e) => {
                warn!(target: "storage", "serialize save: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, serialized) {
            warn!(target: "storage", "write save {}: {e}", self.path.display());
        }
    }
}

impl StoredData for FilePrefs {
    fn leaderboard_key(&self) -> &str {
        &self.leaderboard_key
    }

    fn high_score(&self) -> u32 {
        self.data.high_score
    }

    fn record_high_score(&mut self, score: u32) {
        self.data.high_score = score;
        self.persist();
    }

    fn music_volume(&self) -> u8 {
        self.data.music_volume
    }

    fn set_music_volume(&mut self, volume: u8) {
        self.data.music_volume = volume.min(MAX_VOLUME);
        self.persist();
    }

    fn sfx_volume(&self) -> u8 {
        self.data.sfx_volume
    }

    fn set_sfx_volume(&mut self, volume: u8) {
        self.data.sfx_volume = volume.min(MAX_VOLUME);
        self.persist();
    }

    fn take_tutorial_credit(&mut self) -> bool {
        let granted = self.data.take_tutorial_credit();
        if granted {
            self.persist();
        }
        granted
    }
}

/// In-memory preferences for tests and embedders that opt out of persistence.
#[derive(Default)]
pub struct MemoryPrefs {
    data: SaveFile,
    leaderboard_key: String,
}

impl MemoryPrefs {
    pub fn with_high_score(score: u32) -> Self {
        Self {
            data: SaveFile {
                high_score: score,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl StoredData for MemoryPrefs {
    fn leaderboard_key(&self) -> &str {
        &self.leaderboard_key
    }

    fn high_score(&self) -> u32 {
        self.data.high_score
    }

    fn record_high_score(&mut self, score: u32) {
        self.data.high_score = score;
    }

    fn music_volume(&self) -> u8 {
        self.data.music_volume
    }

    fn set_music_volume(&mut self, volume: u8) {
        self.data.music_volume = volume.min(MAX_VOLUME);
    }

    fn sfx_volume(&self) -> u8 {
        self.data.sfx_volume
    }

    fn set_sfx_volume(&mut self, volume: u8) {
        self.data.sfx_volume = volume.min(MAX_VOLUME);
    }

    fn take_tutorial_credit(&mut self) -> bool {
        self.data.take_tutorial_credit()
    }
}

/// Resource wrapper handing the active [`StoredData`] implementation to systems.
#[derive(Resource, Deref, DerefMut)]
pub struct Prefs(pub Box<dyn StoredData>);
