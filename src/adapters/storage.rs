use crate::domain::ports::KeyValueStore;
use crate::utils::error::{ParcelError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

/// Stores each key as `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.path_for(key);
        if !full_path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(full_path)?;
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key);
        let storage_err = |e: std::io::Error| {
            ParcelError::storage(format!("writing {}: {}", full_path.display(), e))
        };

        fs::create_dir_all(&self.base_path).map_err(storage_err)?;

        // Write next to the target and rename so a failed write never truncates the slot.
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(storage_err)?;
        if let Err(e) = fs::rename(&tmp_path, &full_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(storage_err(e));
        }

        tracing::debug!("Wrote {} bytes to {}", value.len(), full_path.display());
        Ok(())
    }
}

/// In-process store. A byte quota and a disabled switch reproduce the
/// failures a browser's local storage can raise.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Seeds a value without counting it as a write.
    pub fn insert_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| ParcelError::storage(format!("Failed to acquire write lock: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(ParcelError::storage("storage is disabled"));
        }
        let entries = self
            .entries
            .read()
            .map_err(|e| ParcelError::storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(ParcelError::storage("storage is disabled"));
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|e| ParcelError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(quota) = self.quota_bytes {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(ParcelError::storage(format!(
                    "quota exceeded ({} of {} bytes)",
                    needed, quota
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
