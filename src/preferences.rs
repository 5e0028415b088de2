//! Light/dark theme preference.
//!
//! [`ThemePreference`] is the only process-wide UI setting. It is loaded once
//! at startup, applied to produce the active [`Theme`], and persisted through
//! the worker on every toggle. The search engine knows nothing about it.

use crate::domain::error::Result;
use crate::storage::PreferenceStore;
use crate::ui::Theme;
use crate::worker::WorkerMessage;
use std::fmt;
use std::str::FromStr;

/// Preference key under which the theme mode is stored.
pub const THEME_KEY: &str = "theme";

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme mode: {other}")),
        }
    }
}

/// Current theme mode plus the palette used for each mode.
#[derive(Debug, Clone)]
pub struct ThemePreference {
    mode: ThemeMode,
    light: Theme,
    dark: Theme,
}

impl ThemePreference {
    #[must_use]
    pub const fn new(mode: ThemeMode, light: Theme, dark: Theme) -> Self {
        Self { mode, light, dark }
    }

    /// Loads the stored mode.
    ///
    /// A mode forced by configuration wins over the stored value. A missing or
    /// unrecognized stored value falls back to light.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(
        store: &dyn PreferenceStore,
        forced: Option<ThemeMode>,
        light: Theme,
        dark: Theme,
    ) -> Result<Self> {
        let mode = match forced {
            Some(mode) => mode,
            None => match store.get(THEME_KEY)? {
                Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                    tracing::debug!(error = %e, "ignoring stored theme");
                    ThemeMode::default()
                }),
                None => ThemeMode::default(),
            },
        };

        tracing::debug!(mode = %mode, "theme preference loaded");
        Ok(Self::new(mode, light, dark))
    }

    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// The palette for the current mode.
    #[must_use]
    pub const fn apply(&self) -> &Theme {
        match self.mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Switches mode and returns the message that persists the new value.
    pub fn toggle(&mut self) -> WorkerMessage {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = %self.mode, "theme toggled");
        self.persist()
    }

    /// Builds the worker message that stores the current mode.
    #[must_use]
    pub fn persist(&self) -> WorkerMessage {
        WorkerMessage::save_preference(THEME_KEY.to_string(), self.mode.as_str().to_string())
    }
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::new(ThemeMode::default(), Theme::light(), Theme::dark())
    }
}
