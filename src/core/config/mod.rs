pub mod config;

pub use config::{
    AudioConfig, CanConfig, GameConfig, MenuConfig, SpawnRange, SpawnerConfig, StorageConfig,
    WindowConfig,
};
