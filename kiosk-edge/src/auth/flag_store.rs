//! Key/value flag storage
//!
//! A tiny string map that survives restarts when file-backed.
//! The file lives at `{work_dir}/Flags.json`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Flag file name inside the work directory
pub const FLAG_FILE: &str = "Flags.json";

#[derive(Debug, Error)]
pub enum FlagStoreError {
    #[error("Flag store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Flag store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type FlagStoreResult<T> = Result<T, FlagStoreError>;

/// String flags keyed by name
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> FlagStoreResult<()>;
    fn remove(&mut self, key: &str) -> FlagStoreResult<()>;
}

// ============================================================================
// In-memory
// ============================================================================

/// Non-persistent store (tests, ephemeral kiosks)
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    flags: BTreeMap<String, String>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.flags.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FlagStoreResult<()> {
        self.flags.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> FlagStoreResult<()> {
        self.flags.remove(key);
        Ok(())
    }
}

// ============================================================================
// File-backed
// ============================================================================

/// JSON-file store; every change is written through
#[derive(Debug, Clone)]
pub struct FileFlagStore {
    path: PathBuf,
    flags: BTreeMap<String, String>,
}

impl FileFlagStore {
    /// Open the flag file in `work_dir`, creating the directory if needed
    pub fn open(work_dir: &Path) -> FlagStoreResult<Self> {
        std::fs::create_dir_all(work_dir)?;
        let path = work_dir.join(FLAG_FILE);
        let flags = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), flags = flags.len(), "Flag store opened");
        Ok(Self { path, flags })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `flags` to disk, then adopt them; memory is untouched on failure
    fn commit(&mut self, flags: BTreeMap<String, String>) -> FlagStoreResult<()> {
        let content = serde_json::to_string(&flags)?;
        std::fs::write(&self.path, content)?;
        self.flags = flags;
        Ok(())
    }
}

impl FlagStore for FileFlagStore {
    fn get(&self, key: &str) -> Option<String> {
        self.flags.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> FlagStoreResult<()> {
        let mut flags = self.flags.clone();
        flags.insert(key.to_string(), value.to_string());
        self.commit(flags)
    }

    fn remove(&mut self, key: &str) -> FlagStoreResult<()> {
        if !self.flags.contains_key(key) {
            return Ok(());
        }
        let mut flags = self.flags.clone();
        flags.remove(key);
        self.commit(flags)
    }
}
