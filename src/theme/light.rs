//! Light palette
//!
//! Slate text on white with an indigo accent.

use eframe::egui::Color32;

use super::{BaseColors, PreviewColors, TextColors, ThemeColors, UiColors};

/// The light theme colors.
pub fn colors() -> ThemeColors {
    ThemeColors {
        dark: false,
        base: BaseColors {
            background: Color32::WHITE,
            panel: Color32::from_rgb(248, 250, 252),    // slate-50
            input: Color32::WHITE,
            border: Color32::from_rgb(226, 232, 240),   // slate-200
            hover: Color32::from_rgb(241, 245, 249),    // slate-100
            selected: Color32::from_rgb(224, 231, 255), // indigo-100
        },
        text: TextColors {
            primary: Color32::from_rgb(30, 41, 59),     // slate-800
            secondary: Color32::from_rgb(100, 116, 139), // slate-500
            muted: Color32::from_rgb(148, 163, 184),    // slate-400
            link: Color32::from_rgb(79, 70, 229),       // indigo-600
        },
        preview: PreviewColors {
            headings: [
                Color32::from_rgb(30, 41, 59),
                Color32::from_rgb(51, 65, 85),
                Color32::from_rgb(71, 85, 105),
            ],
            rule: Color32::from_rgb(226, 232, 240),
            quote_border: Color32::from_rgb(99, 102, 241),
            quote_bg: Color32::from_rgb(248, 250, 252),
            quote_text: Color32::from_rgb(71, 85, 105),
            code_bg: Color32::from_rgb(241, 245, 249),
            code_fg: Color32::from_rgb(219, 39, 119),
            html_block_bg: Color32::from_rgb(239, 246, 255),
            table_border: Color32::from_rgb(226, 232, 240),
            table_header_bg: Color32::from_rgb(248, 250, 252),
        },
        ui: UiColors {
            accent: Color32::from_rgb(79, 70, 229),
            accent_hover: Color32::from_rgb(67, 56, 202),
            success: Color32::from_rgb(22, 163, 74),
            warning: Color32::from_rgb(245, 158, 11),
            error: Color32::from_rgb(220, 38, 38),
            error_bg: Color32::from_rgb(254, 242, 242),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_background_is_bright() {
        let colors = colors();
        assert!(!colors.is_dark());
        assert!(colors.base.background.r() > 200);
        assert!(colors.text.primary.r() < 100);
    }

    #[test]
    fn test_selection_visible() {
        let visuals = colors().to_visuals();
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }
}
