//! Theme System for MDX Converter
//!
//! Colors for the application chrome and the native preview, plus their
//! conversion into egui `Visuals`. The `Theme` enum in `config::settings`
//! (Light/Dark/System) selects which palette is used at runtime.
//!
//! # Theme Files
//!
//! - `light.rs` - Light palette (slate on white, indigo accent)
//! - `dark.rs` - Dark palette
//! - `manager.rs` - Current theme state and application to the context
//!
//! # Usage
//!
//! ```ignore
//! use crate::theme::ThemeColors;
//! use crate::config::Theme;
//!
//! let colors = ThemeColors::from_theme(Theme::Dark, &ctx.style().visuals);
//! ui.label(RichText::new("Hello").color(colors.text.primary));
//! ctx.set_visuals(colors.to_visuals());
//! ```

pub mod dark;
pub mod light;
pub mod manager;

pub use manager::ThemeManager;

use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

use crate::config::Theme;

/// Corner radius for widgets and frames.
pub const ROUNDING: f32 = 4.0;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Complete palette for one theme variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub dark: bool,
    pub base: BaseColors,
    pub text: TextColors,
    pub preview: PreviewColors,
    pub ui: UiColors,
}

/// Backgrounds and borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    /// Editor and preview background
    pub background: Color32,
    /// Toolbars, header and status bar
    pub panel: Color32,
    /// Text inputs and raised surfaces
    pub input: Color32,
    pub border: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

/// Text colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    /// Hints and placeholders
    pub muted: Color32,
    pub link: Color32,
}

/// Colors for the rendered markdown preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewColors {
    /// Heading colors for H1, H2 and H3-H6
    pub headings: [Color32; 3],
    /// Underline below H1 and H2, and horizontal rules
    pub rule: Color32,
    pub quote_border: Color32,
    pub quote_bg: Color32,
    pub quote_text: Color32,
    /// Inline code
    pub code_bg: Color32,
    pub code_fg: Color32,
    /// Framed raw HTML blocks
    pub html_block_bg: Color32,
    pub table_border: Color32,
    pub table_header_bg: Color32,
}

impl PreviewColors {
    /// Heading color for a level from 1 to 6.
    pub fn heading(&self, level: u8) -> Color32 {
        match level {
            0 | 1 => self.headings[0],
            2 => self.headings[1],
            _ => self.headings[2],
        }
    }
}

/// Accent and feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    /// "Auto-saved" and "Copied" feedback
    pub success: Color32,
    /// "Saving..." indicator
    pub warning: Color32,
    pub error: Color32,
    /// Error banner background
    pub error_bg: Color32,
}

impl ThemeColors {
    /// Palette for the given theme, resolving System from `visuals`.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => dark::colors(),
            Theme::Light => light::colors(),
            Theme::System => {
                if visuals.dark_mode {
                    dark::colors()
                } else {
                    light::colors()
                }
            }
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Convert the palette into egui Visuals.
    pub fn to_visuals(&self) -> Visuals {
        let mut visuals = if self.dark {
            Visuals::dark()
        } else {
            Visuals::light()
        };
        let rounding = Rounding::same(ROUNDING);

        // Window & panel background
        visuals.panel_fill = self.base.background;
        visuals.window_fill = self.base.background;
        visuals.extreme_bg_color = self.base.input;
        visuals.faint_bg_color = self.base.panel;
        visuals.code_bg_color = self.preview.code_bg;

        // Text
        visuals.override_text_color = None;
        visuals.warn_fg_color = self.ui.warning;
        visuals.error_fg_color = self.ui.error;
        visuals.hyperlink_color = self.text.link;

        visuals.selection.bg_fill = self.base.selected;
        visuals.selection.stroke = Stroke::new(1.0, self.ui.accent);

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.base.panel;
        widgets.noninteractive.weak_bg_fill = self.base.panel;
        widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.base.border);
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text.primary);
        widgets.noninteractive.rounding = rounding;

        widgets.inactive.bg_fill = self.base.input;
        widgets.inactive.weak_bg_fill = self.base.input;
        widgets.inactive.bg_stroke = Stroke::new(1.0, self.base.border);
        widgets.inactive.fg_stroke = Stroke::new(1.0, self.text.secondary);
        widgets.inactive.rounding = rounding;

        widgets.hovered.bg_fill = self.base.hover;
        widgets.hovered.weak_bg_fill = self.base.hover;
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.ui.accent);
        widgets.hovered.fg_stroke = Stroke::new(1.5, self.ui.accent);
        widgets.hovered.rounding = rounding;

        widgets.active.bg_fill = self.ui.accent;
        widgets.active.weak_bg_fill = self.base.selected;
        widgets.active.bg_stroke = Stroke::new(1.0, self.ui.accent_hover);
        widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
        widgets.active.rounding = rounding;

        widgets.open.bg_fill = self.base.selected;
        widgets.open.weak_bg_fill = self.base.selected;
        widgets.open.bg_stroke = Stroke::new(1.0, self.ui.accent);
        widgets.open.fg_stroke = Stroke::new(1.0, self.text.primary);
        widgets.open.rounding = rounding;

        // Windows (cheat sheet, confirm dialog)
        visuals.window_rounding = Rounding::same(ROUNDING * 2.0);
        visuals.window_stroke = Stroke::new(1.0, self.base.border);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: egui::vec2(0.0, 4.0),
            blur: 16.0,
            spread: 0.0,
            color: Color32::from_black_alpha(if self.dark { 80 } else { 30 }),
        };

        visuals.striped = true;
        visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
        visuals.dark_mode = self.dark;

        visuals
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_theme() {
        assert!(ThemeColors::from_theme(Theme::Dark, &Visuals::light()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::Light, &Visuals::dark()).is_dark());
    }

    #[test]
    fn test_system_follows_visuals() {
        assert!(ThemeColors::from_theme(Theme::System, &Visuals::dark()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::System, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_to_visuals_uses_palette() {
        for colors in [light::colors(), dark::colors()] {
            let visuals = colors.to_visuals();
            assert_eq!(visuals.dark_mode, colors.is_dark());
            assert_eq!(visuals.panel_fill, colors.base.background);
            assert_eq!(visuals.hyperlink_color, colors.text.link);
            assert_eq!(
                visuals.widgets.noninteractive.fg_stroke.color,
                colors.text.primary
            );
        }
    }

    #[test]
    fn test_heading_colors_by_level() {
        let preview = light::colors().preview;
        assert_eq!(preview.heading(1), preview.headings[0]);
        assert_eq!(preview.heading(2), preview.headings[1]);
        assert_eq!(preview.heading(3), preview.headings[2]);
        assert_eq!(preview.heading(6), preview.headings[2]);
    }
}
