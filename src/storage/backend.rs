//! Preference store abstraction.
//!
//! This module defines the [`PreferenceStore`] trait, a minimal key-value
//! surface for user preferences. The application only persists the theme, but
//! the store is keyed so new preferences do not need a new backend method.

use crate::domain::error::Result;

/// Abstraction over persistent preference backends.
///
/// # Implementations
///
/// - [`JsonPreferences`](crate::storage::JsonPreferences): JSON file with atomic writes
/// - [`MemoryPreferences`](crate::storage::MemoryPreferences): in-process map, nothing written
///
/// # Examples
///
/// ```no_run
/// use vcfinder::storage::{JsonPreferences, PreferenceStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonPreferences::new(PathBuf::from("/tmp/vcfinder/preferences.json"))?;
/// store.set("theme", "dark")?;
/// assert_eq!(store.get("theme")?.as_deref(), Some("dark"));
/// # Ok::<(), vcfinder::VcFinderError>(())
/// ```
pub trait PreferenceStore: Send {
    /// Reads a stored value.
    ///
    /// Returns `Ok(None)` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
