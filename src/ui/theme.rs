//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the terminal UI, supporting
//! built-in themes and custom themes loaded from TOML files. It provides
//! utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `rose-dark`: Dark background with rose accents (default)
//! - `rose-light`: Light background with rose accents
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f9fafb"
//! accent = "#fb7185"
//! success = "#4ade80"
//! selection_fg = "#111827"
//! selection_bg = "#fb7185"
//! text_normal = "#e5e7eb"
//! text_dim = "#9ca3af"
//! border = "#374151"
//! search_bar_border = "#fb7185"
//! match_highlight_fg = "#111827"
//! match_highlight_bg = "#facc15"
//! empty_state_fg = "#9ca3af"
//! progress_track = "#374151"
//! ```
//!
//! # Example
//!
//! ```rust
//! use hirebox::ui::theme::Theme;
//!
//! let theme = Theme::from_name("rose-light").unwrap();
//! let styled = format!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! assert!(styled.starts_with('\u{1b}'));
//! # let _ = theme;
//! ```

use crate::domain::error::{HireBoxError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "rose-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#fb7185"). Optional fields
/// default to `None`, allowing themes to opt out of certain styling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Brand color: buttons, progress fill, company names.
    pub accent: String,
    /// Ready state color for the apply link.
    pub success: String,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, secondary info).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,

    /// Unfilled part of the progress bar.
    pub progress_track: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `rose-dark`, `rose-light`. Returns `None` for anything else.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "rose-dark" => include_str!("../../themes/rose-dark.toml"),
            "rose-light" => include_str!("../../themes/rose-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`HireBoxError::Io`] if the file cannot be read and
    /// [`HireBoxError::Theme`] if the TOML does not describe a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;

        toml::from_str(&contents).map_err(|e| HireBoxError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Returns the ANSI bold escape sequence (`\x1b[1m`).
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Returns the ANSI dim escape sequence (`\x1b[2m`).
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI underline escape sequence (`\x1b[4m`).
    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (`rose-dark`).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("built-in rose-dark theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "rose-dark");
        let light = Theme::from_name("rose-light").unwrap();
        assert_eq!(light.colors.header_bg.as_deref(), Some("#ffffff"));
        assert!(Theme::from_name("catppuccin").is_none());
    }

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let source = toml::to_string(&Theme::from_name("rose-light").unwrap()).unwrap();
        let source = source.replace("rose-light", "mine");
        file.write_all(source.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "mine");
    }

    #[test]
    fn malformed_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(HireBoxError::Theme(_))));
    }
}
