//! Runtime configuration and loaders.
use std::env;
use std::path::PathBuf;

use dnabar_render::{PngSink, RenderSettings};
use dnabar_store::{CorruptPolicy, RecordStore, DEFAULT_STORE_DIR};

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Directory for saved images, sequence files and the record document
    pub store_dir: PathBuf,
    pub render: RenderSettings,
    pub corrupt_policy: CorruptPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            render: RenderSettings::default(),
            corrupt_policy: CorruptPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `DNABAR_STORE_DIR`
    /// - `DNABAR_UNIT_WIDTH` / `DNABAR_MIN_WIDTH` / `DNABAR_MAX_WIDTH` / `DNABAR_HEIGHT`
    /// - `DNABAR_CORRUPT_POLICY` (`backup` or `refuse`)
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = read("DNABAR_STORE_DIR") {
            config.store_dir = PathBuf::from(dir);
        }
        if let Some(width) = read("DNABAR_UNIT_WIDTH").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.render.unit_width = width;
        }
        if let Some(width) = read("DNABAR_MIN_WIDTH").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.render.min_width = width;
        }
        if let Some(width) = read("DNABAR_MAX_WIDTH").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.render.max_width = width.max(1);
        }
        if let Some(height) = read("DNABAR_HEIGHT").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.render.height = height.max(1);
        }
        if let Some(policy) = read("DNABAR_CORRUPT_POLICY").and_then(|v| v.parse::<CorruptPolicy>().ok()) {
            config.corrupt_policy = policy;
        }

        config
    }

    pub fn store(&self) -> RecordStore {
        RecordStore::in_dir(&self.store_dir).with_policy(self.corrupt_policy)
    }

    pub fn sink(&self) -> PngSink {
        PngSink::new(self.render)
    }
}
