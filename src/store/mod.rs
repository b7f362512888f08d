//! First-run flag store
//!
//! A tiny key-value seam around the platform's persistent storage. The app
//! persists exactly one flag: whether onboarding has completed.

use crate::utils::AppResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key marking that onboarding permissions were fully granted
pub const HAS_OPENED_KEY: &str = "hasOpened";

/// Key-value storage for app flags
pub trait FlagStore: Send + Sync {
    /// Read a flag; `None` when the key was never set
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a flag
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
}

/// Whether this launch is the first time the app was opened
///
/// Absence of the flag signals first-time use. Store failures are logged
/// and treated as a prior launch so a broken store cannot trap the user in
/// onboarding.
pub fn is_first_time_open(store: &dyn FlagStore) -> bool {
    match store.get(HAS_OPENED_KEY) {
        Ok(Some(_)) => false,
        Ok(None) => true,
        Err(e) => {
            tracing::error!("first-run check failed: {}", e);
            false
        }
    }
}

/// In-memory store, used in tests and as a session-only fallback
#[derive(Default)]
pub struct MemoryFlagStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON file
pub struct JsonFlagStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl JsonFlagStore {
    /// Open the store, loading existing flags if the file is present
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    fn persist(&self, values: &HashMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl FlagStore for JsonFlagStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}
