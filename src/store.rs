//! Key-value blob storage for persisted settings.
//!
//! The resolver only needs `exists`/`read`/`write` over small UTF-8 blobs,
//! so storage is abstracted behind the [`ConfigStore`] trait. The production
//! implementation maps keys to files under a root directory (the platform
//! config dir by default), creating parent directories on write.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::constants::CONFIG_DIR_NAME;

/// Persistent storage for settings blobs.
pub trait ConfigStore {
    /// Whether a blob exists under `key`.
    fn exists(&self, key: &str) -> bool;

    /// Read the blob stored under `key`.
    fn read(&self, key: &str) -> Result<String>;

    /// Write `value` under `key`, replacing any previous blob.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Filesystem-backed store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create a store rooted at the platform config directory.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().context("could not determine config directory")?;
        Ok(Self::new(config_dir.join(CONFIG_DIR_NAME)))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl ConfigStore for FileStore {
    fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn read(&self, key: &str) -> Result<String> {
        let path = self.path_for(key);
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings from {}", path.display()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, value)
            .with_context(|| format!("failed to write settings to {}", path.display()))
    }
}
