use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 1280.0,
            title: "Tin Can".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnRange<T> {
    pub min: T,
    pub max: T,
}
impl<T: Default> Default for SpawnRange<T> {
    fn default() -> Self {
        Self {
            min: Default::default(),
            max: Default::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CanConfig {
    /// Vertical acceleration in world units / s^2 (negative = downward).
    pub gravity: f32,
    /// Logical sprite size; also the base of the tap hit box.
    pub width: f32,
    pub height: f32,
    /// Extra slack added around the sprite rect for finger-sized taps.
    pub tap_padding: f32,
    /// Upward launch speed range for spawned cans.
    pub launch_speed: SpawnRange<f32>,
    /// Horizontal drift speed range (always aimed back across the screen).
    pub drift_speed: SpawnRange<f32>,
    /// Spin range in radians / s.
    pub spin: SpawnRange<f32>,
    /// How far below the bottom edge a falling can counts as missed.
    pub kill_line_margin: f32,
    /// Fixed ticks of the scale-out pop after a kill.
    pub pop_ticks: u32,
}
impl Default for CanConfig {
    fn default() -> Self {
        Self {
            gravity: -1500.0,
            width: 96.0,
            height: 128.0,
            tap_padding: 24.0,
            launch_speed: SpawnRange {
                min: 1350.0,
                max: 1650.0,
            },
            drift_speed: SpawnRange {
                min: 60.0,
                max: 220.0,
            },
            spin: SpawnRange {
                min: -3.5,
                max: 3.5,
            },
            kill_line_margin: 96.0,
            pop_ticks: 8,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between launches at score 0.
    pub base_interval: f32,
    /// Interval floor the ramp never goes below.
    pub min_interval: f32,
    /// Seconds shaved off the interval per point scored.
    pub ramp_per_point: f32,
}
impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            base_interval: 1.6,
            min_interval: 0.55,
            ramp_per_point: 0.03,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MenuConfig {
    /// Horizontal bob amplitude of the start can (world units).
    pub bob_amplitude: f32,
}
impl Default for MenuConfig {
    fn default() -> Self {
        Self { bob_amplitude: 64.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Cross-fade progress per fixed tick; 0.05 completes a fade in ~1/3 s.
    pub cross_fade_rate: f32,
}
impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            cross_fade_rate: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Preferences file (high score, volumes, tutorial countdown).
    pub save_path: String,
    pub leaderboard_key: String,
}
impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_path: "tin-can-save.ron".into(),
            leaderboard_key: "leaderboard_tin_can".into(),
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub can: CanConfig,
    pub spawner: SpawnerConfig,
    pub menu: MenuConfig,
    pub audio: AudioConfig,
    pub storage: StorageConfig,
}
impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            can: Default::default(),
            spawner: Default::default(),
            menu: Default::default(),
            audio: Default::default(),
            storage: Default::default(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    #[allow(dead_code)]
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merge any number of RON layers (later wins per key) and deserialize the
    /// result. Unreadable or unparsable layers are skipped and reported.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
            use ron::value::Value;
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        let mut replaced = false;
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                let val = incoming.take().unwrap();
                                merge_value(ev, val);
                                replaced = true;
                                break;
                            }
                        }
                        if !replaced {
                            bm.insert(k, incoming.unwrap());
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        if let Some(val) = merged {
            match val.clone().into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!("merged config deserialize error: {e}"));
                    (Self::default(), used, errors)
                }
            }
        } else {
            (Self::default(), used, errors)
        }
    }

    /// Sanity warnings only; a warned config still runs.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.can.gravity >= 0.0 {
            w.push(format!(
                "can.gravity is non-negative ({}); cans will never fall back down",
                self.can.gravity
            ));
        }
        if self.can.launch_speed.min > self.can.launch_speed.max {
            w.push("can.launch_speed min > max; min will be used for every launch".into());
        }
        if self.can.launch_speed.max <= 0.0 {
            w.push("can.launch_speed max <= 0; cans never enter the screen".into());
        }
        if self.can.tap_padding < 0.0 {
            w.push("can.tap_padding negative; hit box smaller than the sprite".into());
        }
        if self.can.pop_ticks == 0 {
            w.push("can.pop_ticks is 0; kills despawn with no pop".into());
        }
        if self.spawner.min_interval > self.spawner.base_interval {
            w.push(format!(
                "spawner.min_interval {} exceeds base_interval {}; ramp has no effect",
                self.spawner.min_interval, self.spawner.base_interval
            ));
        }
        if self.spawner.min_interval <= 0.0 {
            w.push("spawner.min_interval <= 0; spawns every tick at high scores".into());
        }
        if self.spawner.ramp_per_point < 0.0 {
            w.push("spawner.ramp_per_point negative; game gets easier with score".into());
        }
        if !(0.0..=1.0).contains(&self.audio.cross_fade_rate) || self.audio.cross_fade_rate == 0.0 {
            w.push(format!(
                "audio.cross_fade_rate {} outside (0, 1]; fades may stall or snap",
                self.audio.cross_fade_rate
            ));
        }
        if self.storage.save_path.is_empty() {
            w.push("storage.save_path empty; preferences will not persist".into());
        }
        w
    }
}
