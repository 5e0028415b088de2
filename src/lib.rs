//! VCFinder: a terminal directory of venture capital firms.
//!
//! Type an industry, pick from the autosuggest list, and browse the firms
//! whose industry tags contain the query:
//! - Case-insensitive substring search over a read-only firm corpus
//! - Up to eight sorted, deduplicated industry suggestions while typing
//! - Firm cards with contact details, copy-email, and open-website actions
//! - Light/dark theme persisted in a small JSON preference file
//! - Search answered by a background worker thread; the latest search wins

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Shell (main.rs)                           │  ← crossterm loop
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling                                   │
//! │  - Actions for the shell to execute                 │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (worker/)     │
//! │ - Rendering   │   │ - JSON prefs  │   │ - Search jobs │
//! │ - Theming     │   │ - Store trait │   │ - Generations │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine, Domain & Infrastructure                    │
//! │  - suggest / search (engine/)                       │
//! │  - Firm, Corpus, errors (domain/)                   │
//! │  - Paths, clipboard, URL opener (infrastructure/)   │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry spans exported to a local file     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! An optional TOML file, passed as the first argument, named by
//! `VCFINDER_CONFIG`, or found at `~/.config/vcfinder/config.toml`:
//!
//! ```toml
//! corpus_file = "~/vc/firms.json"
//! search_latency_ms = 300
//! theme = "dark"
//! dark_theme = "~/.config/vcfinder/nord.toml"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust
//! use vcfinder::storage::MemoryPreferences;
//! use vcfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default(), &MemoryPreferences::default())?;
//!
//! for c in "fin".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! assert!(state.suggestions_visible());
//!
//! let (_, actions) = handle_event(&mut state, &Event::Confirm)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! assert!(state.is_loading);
//! # Ok::<(), vcfinder::VcFinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod infrastructure;
pub mod preferences;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, Focus};
pub use domain::{Corpus, Firm, Result, VcFinderError};
pub use preferences::{ThemeMode, ThemePreference};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_SEARCH_LATENCY_MS: u64 = 800;
const DEFAULT_LIGHT_THEME: &str = "latte";
const DEFAULT_DARK_THEME: &str = "mocha";

/// Runtime configuration.
///
/// Every field has a default, so an absent config file is the same as an
/// empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON corpus to load instead of the embedded dataset.
    pub corpus_file: Option<PathBuf>,

    /// Where preferences and traces live. Default: [`infrastructure::get_data_dir`].
    pub data_dir: Option<PathBuf>,

    /// Artificial delay of the in-memory search backend.
    pub search_latency_ms: u64,

    /// Forces a theme mode, ignoring the stored preference.
    pub theme: Option<ThemeMode>,

    /// Built-in theme name or path to a `.toml` palette.
    pub light_theme: String,

    pub dark_theme: String,

    /// `EnvFilter` directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_file: None,
            data_dir: None,
            search_latency_ms: DEFAULT_SEARCH_LATENCY_MS,
            theme: None,
            light_theme: DEFAULT_LIGHT_THEME.to_string(),
            dark_theme: DEFAULT_DARK_THEME.to_string(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key-value pairs.
    ///
    /// Unknown keys are ignored. Values that fail to parse fall back to the
    /// default for that key. Paths starting with `~` are expanded.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use vcfinder::{Config, ThemeMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_latency_ms".to_string(), "250".to_string());
    /// map.insert("theme".to_string(), "dark".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.search_latency_ms, 250);
    /// assert_eq!(config.theme, Some(ThemeMode::Dark));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let path = |key: &str| {
            map.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| PathBuf::from(infrastructure::expand_tilde(s)))
        };

        let search_latency_ms = map
            .get("search_latency_ms")
            .and_then(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| tracing::debug!(value = %raw, error = %e, "invalid search_latency_ms, using default"))
                    .ok()
            })
            .unwrap_or(DEFAULT_SEARCH_LATENCY_MS);

        let theme = map.get("theme").and_then(|raw| {
            raw.parse::<ThemeMode>()
                .map_err(|e| tracing::debug!(error = %e, "invalid theme, using stored preference"))
                .ok()
        });

        let name = |key: &str, default: &str| {
            map.get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map_or_else(|| default.to_string(), String::from)
        };

        Self {
            corpus_file: path("corpus_file"),
            data_dir: path("data_dir"),
            search_latency_ms,
            theme,
            light_theme: name("light_theme", DEFAULT_LIGHT_THEME),
            dark_theme: name("dark_theme", DEFAULT_DARK_THEME),
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Reads a TOML file of top-level scalar keys.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Config`] if the file cannot be read or is not
    /// valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VcFinderError::Config(format!("failed to read {}: {e}", path.display())))?;
        let table: toml::Table = contents
            .parse()
            .map_err(|e| VcFinderError::Config(format!("failed to parse {}: {e}", path.display())))?;

        let mut map = BTreeMap::new();
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    tracing::debug!(key = %key, kind = other.type_str(), "ignoring non-scalar config value");
                    continue;
                }
            };
            map.insert(key, text);
        }

        Ok(Self::from_map(&map))
    }

    /// Configured data directory, or the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(infrastructure::get_data_dir)
    }

    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join("preferences.json")
    }

    #[must_use]
    pub const fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    /// Loads `corpus_file`, or the embedded dataset when none is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus cannot be read or parsed.
    pub fn load_corpus(&self) -> Result<Corpus> {
        match &self.corpus_file {
            Some(path) => Corpus::from_file(path),
            None => Corpus::embedded(),
        }
    }

    /// Resolves both palettes, falling back to the built-ins.
    #[must_use]
    pub fn themes(&self) -> (Theme, Theme) {
        let resolve = |name: &str, fallback: fn() -> Theme| {
            Theme::resolve(name).unwrap_or_else(|e| {
                tracing::debug!(theme = %name, error = %e, "failed to load theme, using default");
                fallback()
            })
        };
        (resolve(&self.light_theme, Theme::light), resolve(&self.dark_theme, Theme::dark))
    }
}

/// Builds the initial application state.
///
/// Loads the corpus and restores the theme mode from `store`. An unreadable
/// store is logged and treated as empty.
///
/// # Errors
///
/// Returns an error if the corpus cannot be loaded.
pub fn initialize(config: &Config, store: &dyn storage::PreferenceStore) -> Result<AppState> {
    tracing::debug!("initializing vcfinder");

    let corpus = config.load_corpus()?;
    let (light, dark) = config.themes();
    let theme = ThemePreference::load(store, config.theme, light.clone(), dark.clone()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to read theme preference");
        ThemePreference::new(config.theme.unwrap_or_default(), light, dark)
    });

    tracing::info!(firms = corpus.len(), mode = %theme.mode(), "vcfinder initialized");
    Ok(AppState::new(corpus, theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryPreferences, PreferenceStore};

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_map(&map(&[
            ("search_latency_ms", "soon"),
            ("theme", "sepia"),
            ("light_theme", "  "),
        ]));
        assert_eq!(config.search_latency_ms, 800);
        assert_eq!(config.theme, None);
        assert_eq!(config.light_theme, "latte");
    }

    #[test]
    fn from_file_converts_scalars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "search_latency_ms = 0\ntheme = \"dark\"\ndata_dir = \"/tmp/vcf\"\n[ignored]\nkey = 1\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.search_latency(), Duration::ZERO);
        assert_eq!(config.theme, Some(ThemeMode::Dark));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/vcf"));
        assert_eq!(config.preferences_path(), PathBuf::from("/tmp/vcf/preferences.json"));
    }

    #[test]
    fn from_file_reports_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::from_file(dir.path().join("missing.toml")),
            Err(VcFinderError::Config(_))
        ));

        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "theme = ").unwrap();
        assert!(matches!(Config::from_file(&path), Err(VcFinderError::Config(_))));
    }

    #[test]
    fn unknown_theme_names_fall_back_to_builtins() {
        let config = Config {
            light_theme: "nope".to_string(),
            dark_theme: "/missing/palette.toml".to_string(),
            ..Config::default()
        };
        let (light, dark) = config.themes();
        assert_eq!(light, Theme::light());
        assert_eq!(dark, Theme::dark());
    }

    #[test]
    fn initialize_restores_stored_theme() {
        let mut store = MemoryPreferences::default();
        store.set(preferences::THEME_KEY, "dark").unwrap();

        let state = initialize(&Config::default(), &store).unwrap();
        assert_eq!(state.theme.mode(), ThemeMode::Dark);
        assert!(!state.corpus.is_empty());
    }

    #[test]
    fn initialize_fails_on_unreadable_corpus() {
        let config = Config {
            corpus_file: Some(PathBuf::from("/nonexistent/firms.json")),
            ..Config::default()
        };
        assert!(initialize(&config, &MemoryPreferences::default()).is_err());
    }
}
