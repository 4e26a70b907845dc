pub mod prefs;

pub use prefs::{
    FilePrefs, MemoryPrefs, Prefs, SaveFile, StoredData, DEFAULT_VOLUME, MAX_VOLUME,
    TUTORIAL_SHOW_COUNT,
};
