//! User settings and preferences for MDX Converter
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    System,
}

// ─────────────────────────────────────────────────────────────────────────────
// Output Tab Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Which view the output pane shows.
///
/// - `Preview`: the converted HTML rendered as rich text
/// - `Html`: the formatted HTML source as plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputTab {
    #[default]
    Preview,
    Html,
}

impl OutputTab {
    /// Toggle between Preview and HTML.
    pub fn toggle(&self) -> Self {
        match self {
            OutputTab::Preview => OutputTab::Html,
            OutputTab::Html => OutputTab::Preview,
        }
    }

    /// Get a display label for the tab.
    pub fn label(&self) -> &'static str {
        match self {
            OutputTab::Preview => "Preview",
            OutputTab::Html => "HTML Code",
        }
    }

    /// Get an icon/symbol for the tab.
    pub fn icon(&self) -> &'static str {
        match self {
            OutputTab::Preview => "👁",
            OutputTab::Html => "</>",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions and position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Window X position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    /// Window Y position (optional, for restoring position)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            x: None,
            y: None,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config directory.
/// All fields have sensible defaults via the `Default` trait and `#[serde(default)]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Appearance
    // ─────────────────────────────────────────────────────────────────────────
    /// Color theme (light, dark, or system)
    pub theme: Theme,

    /// Which output view is active (preview or HTML source)
    pub output_tab: OutputTab,

    /// Font size for the editor and HTML view (in points)
    pub font_size: f32,

    /// Whether to wrap long lines in the editor
    pub word_wrap: bool,

    /// Whether to show the line number gutter in the editor
    pub show_line_numbers: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Autosave
    // ─────────────────────────────────────────────────────────────────────────
    /// Quiet period after the last keystroke before the source is persisted
    pub autosave_delay_ms: u64,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size and position
    pub window_size: WindowSize,

    /// Fraction of the window width given to the editor pane
    pub split_ratio: f32,

    // ─────────────────────────────────────────────────────────────────────────
    // Export Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// Last directory used for MD/HTML export
    pub last_export_directory: Option<PathBuf>,

    /// Whether to open exported files after export
    pub open_after_export: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            output_tab: OutputTab::default(),
            font_size: 14.0,
            word_wrap: true,
            show_line_numbers: true,

            autosave_delay_ms: 800,

            window_size: WindowSize::default(),
            split_ratio: 0.5,

            last_export_directory: None,
            open_after_export: false,
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Minimum autosave delay in milliseconds.
    pub const MIN_AUTOSAVE_DELAY_MS: u64 = 100;
    /// Maximum autosave delay in milliseconds.
    pub const MAX_AUTOSAVE_DELAY_MS: u64 = 10_000;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;
    /// Smallest share of the window either pane may take.
    pub const MIN_SPLIT_RATIO: f32 = 0.2;
    /// Largest share of the window the editor pane may take.
    pub const MAX_SPLIT_RATIO: f32 = 0.8;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.autosave_delay_ms = self
            .autosave_delay_ms
            .clamp(Self::MIN_AUTOSAVE_DELAY_MS, Self::MAX_AUTOSAVE_DELAY_MS);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        self.split_ratio = self
            .split_ratio
            .clamp(Self::MIN_SPLIT_RATIO, Self::MAX_SPLIT_RATIO);
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    /// The autosave quiet period as a `Duration`.
    pub fn autosave_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.autosave_delay_ms)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.output_tab, OutputTab::Preview);
        assert_eq!(settings.font_size, 14.0);
        assert_eq!(settings.autosave_delay_ms, 800);
        assert_eq!(settings.split_ratio, 0.5);
        assert!(settings.last_export_directory.is_none());
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"system\"");
    }

    #[test]
    fn test_output_tab_serialization() {
        assert_eq!(
            serde_json::to_string(&OutputTab::Preview).unwrap(),
            "\"preview\""
        );
        assert_eq!(
            serde_json::from_str::<OutputTab>("\"html\"").unwrap(),
            OutputTab::Html
        );
    }

    #[test]
    fn test_output_tab_toggle() {
        assert_eq!(OutputTab::Preview.toggle(), OutputTab::Html);
        assert_eq!(OutputTab::Html.toggle(), OutputTab::Preview);
        assert_eq!(OutputTab::Html.label(), "HTML Code");
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.autosave_delay_ms, 800);
        assert!(settings.word_wrap);
    }

    #[test]
    fn test_settings_serialization_roundtrip() {
        let settings = Settings {
            theme: Theme::Dark,
            output_tab: OutputTab::Html,
            last_export_directory: Some(PathBuf::from("/tmp/exports")),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let loaded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut settings = Settings {
            font_size: 2.0,
            autosave_delay_ms: 0,
            split_ratio: 0.95,
            ..Settings::default()
        };
        settings.window_size.width = 50.0;
        settings.sanitize();

        assert_eq!(settings.font_size, Settings::MIN_FONT_SIZE);
        assert_eq!(settings.autosave_delay_ms, Settings::MIN_AUTOSAVE_DELAY_MS);
        assert_eq!(settings.split_ratio, Settings::MAX_SPLIT_RATIO);
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
    }

    #[test]
    fn test_from_json_sanitized() {
        let settings =
            Settings::from_json_sanitized(r#"{"font_size": 500.0, "autosave_delay_ms": 99999}"#)
                .unwrap();
        assert_eq!(settings.font_size, Settings::MAX_FONT_SIZE);
        assert_eq!(settings.autosave_delay_ms, Settings::MAX_AUTOSAVE_DELAY_MS);
    }

    #[test]
    fn test_autosave_delay_duration() {
        let settings = Settings::default();
        assert_eq!(
            settings.autosave_delay(),
            std::time::Duration::from_millis(800)
        );
    }
}
