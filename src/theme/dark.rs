//! Dark palette

use eframe::egui::Color32;

use super::{BaseColors, PreviewColors, TextColors, ThemeColors, UiColors};

/// The dark theme colors.
pub fn colors() -> ThemeColors {
    ThemeColors {
        dark: true,
        base: BaseColors {
            background: Color32::from_rgb(15, 23, 42), // slate-900
            panel: Color32::from_rgb(30, 41, 59),
            input: Color32::from_rgb(15, 23, 42),
            border: Color32::from_rgb(51, 65, 85),
            hover: Color32::from_rgb(51, 65, 85),
            selected: Color32::from_rgb(55, 48, 163),
        },
        text: TextColors {
            primary: Color32::from_rgb(226, 232, 240),
            secondary: Color32::from_rgb(148, 163, 184),
            muted: Color32::from_rgb(100, 116, 139),
            link: Color32::from_rgb(129, 140, 248),
        },
        preview: PreviewColors {
            headings: [
                Color32::from_rgb(241, 245, 249),
                Color32::from_rgb(226, 232, 240),
                Color32::from_rgb(203, 213, 225),
            ],
            rule: Color32::from_rgb(51, 65, 85),
            quote_border: Color32::from_rgb(129, 140, 248),
            quote_bg: Color32::from_rgb(30, 41, 59),
            quote_text: Color32::from_rgb(203, 213, 225),
            code_bg: Color32::from_rgb(30, 41, 59),
            code_fg: Color32::from_rgb(244, 114, 182),
            html_block_bg: Color32::from_rgb(23, 37, 84),
            table_border: Color32::from_rgb(51, 65, 85),
            table_header_bg: Color32::from_rgb(30, 41, 59),
        },
        ui: UiColors {
            accent: Color32::from_rgb(129, 140, 248),
            accent_hover: Color32::from_rgb(165, 180, 252),
            success: Color32::from_rgb(74, 222, 128),
            warning: Color32::from_rgb(251, 191, 36),
            error: Color32::from_rgb(248, 113, 113),
            error_bg: Color32::from_rgb(69, 10, 10),
        },
    }
}
