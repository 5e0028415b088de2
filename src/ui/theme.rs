//! Color palettes and ANSI escape sequence generation.
//!
//! A [`Theme`] is a named palette of hex colors. Two palettes ship with the
//! binary, one per [`ThemeMode`](crate::preferences::ThemeMode); either can be
//! replaced by a TOML file.
//!
//! # Built-in Themes
//!
//! - `latte`: light palette (default for light mode)
//! - `mocha`: dark palette (default for dark mode)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#4c4f69"
//! selection_fg = "#eff1f5"
//! selection_bg = "#1e66f5"
//! text_normal = "#4c4f69"
//! text_dim = "#8c8fa1"
//! border = "#bcc0cc"
//! search_bar_border = "#1e66f5"
//! match_highlight_fg = "#4c4f69"
//! match_highlight_bg = "#df8e1d"
//! empty_state_fg = "#1e66f5"
//! accent = "#1e66f5"
//! verified_fg = "#40a02b"
//! pending_fg = "#df8e1d"
//! tag_fg = "#6c6f85"
//! tag_match_fg = "#1e66f5"
//! ```

use crate::domain::error::{Result, VcFinderError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Highlighted suggestion and selected card.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, subtitles, card metadata.
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Query occurrences inside firm names and tags.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Emails, websites, result counts.
    pub accent: String,

    /// "Verified Email" badge.
    pub verified_fg: String,
    /// "Pending" badge.
    pub pending_fg: String,

    pub tag_fg: String,
    /// Tags that contain the searched query.
    pub tag_match_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vcfinder::ui::Theme;
    ///
    /// let theme = Theme::from_name("mocha").unwrap();
    /// assert_eq!(theme.name, "mocha");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "latte" => include_str!("../../themes/latte.toml"),
            "mocha" => include_str!("../../themes/mocha.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VcFinderError::Theme(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| VcFinderError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves a configuration value to a theme.
    ///
    /// Values ending in `.toml` are treated as file paths; anything else must
    /// name a built-in theme.
    ///
    /// # Errors
    ///
    /// Returns [`VcFinderError::Theme`] for unknown names or unreadable files.
    pub fn resolve(value: &str) -> Result<Self> {
        if value.ends_with(".toml") {
            return Self::from_file(crate::infrastructure::expand_tilde(value));
        }
        Self::from_name(value).ok_or_else(|| VcFinderError::Theme(format!("unknown theme: {value}")))
    }

    /// Default palette for light mode.
    #[must_use]
    pub fn light() -> Self {
        Self::from_name("latte").unwrap_or_else(Self::fallback)
    }

    /// Default palette for dark mode.
    #[must_use]
    pub fn dark() -> Self {
        Self::from_name("mocha").unwrap_or_else(Self::fallback)
    }

    /// Monochrome palette used only if a bundled theme fails to parse.
    fn fallback() -> Self {
        let white = "#ffffff".to_string();
        let grey = "#808080".to_string();
        let black = "#000000".to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: white.clone(),
                header_bg: None,
                selection_fg: black.clone(),
                selection_bg: white.clone(),
                text_normal: white.clone(),
                text_dim: grey.clone(),
                border: grey.clone(),
                search_bar_border: white.clone(),
                match_highlight_fg: black,
                match_highlight_bg: white.clone(),
                empty_state_fg: white.clone(),
                accent: white.clone(),
                verified_fg: white.clone(),
                pending_fg: grey.clone(),
                tag_fg: grey,
                tag_match_fg: white,
            },
        }
    }

    /// Converts a hex color to an RGB tuple, falling back to white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// ```rust
    /// use vcfinder::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#010203"), "\u{1b}[38;2;1;2;3m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_themes_parse() {
        assert_eq!(Theme::from_name("latte").unwrap().name, "latte");
        assert_eq!(Theme::from_name("mocha").unwrap().name, "mocha");
    }

    #[test]
    fn invalid_hex_falls_back_to_white() {
        assert_eq!(Theme::hex_to_rgb("#12"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("zzzzzz"), (255, 255, 255));
        assert_eq!(Theme::hex_to_rgb("#1e66f5"), (0x1e, 0x66, 0xf5));
    }

    #[test]
    fn resolves_names_and_files() {
        assert!(Theme::resolve("mocha").is_ok());
        assert!(matches!(Theme::resolve("nope"), Err(VcFinderError::Theme(_))));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut custom = Theme::dark();
        custom.name = "custom".to_string();
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let loaded = Theme::resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.name, "custom");
        assert_eq!(loaded.colors, custom.colors);
    }
}
