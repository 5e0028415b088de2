//! JSON file-based preference store.
//!
//! Preferences live in a small human-readable JSON document. Writes go to a
//! temporary file that is then renamed over the target, so a crash never leaves
//! a truncated file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "values": {
//!     "theme": "dark"
//!   }
//! }
//! ```

use crate::domain::error::{Result, VcFinderError};
use crate::storage::backend::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level document serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferenceData {
    /// Version of the storage format for future migrations.
    version: u32,

    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for PreferenceData {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            values: BTreeMap::new(),
        }
    }
}

/// JSON file preference store.
///
/// The whole document is cached in memory and rewritten on every change.
///
/// # Thread Safety
///
/// `Send` but not `Sync`: after startup the store is owned by the search worker
/// thread, which performs all writes.
#[derive(Debug)]
pub struct JsonPreferences {
    file_path: PathBuf,
    data: PreferenceData,
    /// Tracks unsaved modifications.
    dirty: bool,
}

impl JsonPreferences {
    /// Opens a preference file, creating parent directories as needed.
    ///
    /// A missing file is not an error; it is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - The file exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening preference store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no preference file yet, starting empty");
            PreferenceData::default()
        };

        tracing::debug!(value_count = data.values.len(), "preference store ready");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<PreferenceData> {
        let contents = std::fs::read_to_string(path)?;
        let data: PreferenceData = serde_json::from_str(&contents)
            .map_err(|e| VcFinderError::Storage(format!("failed to parse preferences: {e}")))?;

        if data.version != FORMAT_VERSION {
            tracing::warn!(version = data.version, "unknown preference format version, reading anyway");
        }

        Ok(data)
    }

    /// Writes the document to a temporary file and renames it into place.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the write, or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| VcFinderError::Storage(format!("failed to serialize preferences: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl PreferenceStore for JsonPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_preference", key = %key, value = %value).entered();

        if self.data.values.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.values.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonPreferences {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty preferences on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}

/// Preference store that keeps values in memory only.
///
/// Used when the data directory is unavailable and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferences::new(dir.path().join("nested/prefs.json")).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        {
            let mut store = JsonPreferences::new(path.clone()).unwrap();
            store.set("theme", "dark").unwrap();
        }

        let reopened = JsonPreferences::new(path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn write_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let mut store = JsonPreferences::new(path.clone()).unwrap();
        store.set("theme", "light").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonPreferences::new(path).unwrap_err();
        assert!(matches!(err, VcFinderError::Storage(_)));
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryPreferences::default();
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
