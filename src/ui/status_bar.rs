//! Status bar for MDX Converter
//!
//! Source statistics on the right, the current toast in the middle.

use eframe::egui::{self, RichText, Ui};

use crate::theme::ThemeColors;

/// Word, character and line counts of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStats {
    /// Sequences of non-whitespace characters
    pub words: usize,
    /// Characters including whitespace
    pub characters: usize,
    /// Lines, including empty ones; an empty text has one line
    pub lines: usize,
}

impl DocumentStats {
    /// Count `text` in a single pass.
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self {
            lines: 1,
            ..Self::default()
        };
        let mut in_word = false;

        for ch in text.chars() {
            stats.characters += 1;
            if ch == '\n' {
                stats.lines += 1;
            }
            if ch.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                stats.words += 1;
            }
        }

        stats
    }

    /// Format the statistics for display in the status bar.
    ///
    /// Returns a compact string like "150 words | 892 chars | 25 lines"
    pub fn format_compact(&self) -> String {
        format!(
            "{} words | {} chars | {} lines",
            self.words, self.characters, self.lines
        )
    }
}

/// Render the status bar contents.
pub fn show(ui: &mut Ui, theme_colors: &ThemeColors, stats: &DocumentStats, toast: Option<&str>) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("MDX Converter {}", env!("CARGO_PKG_VERSION")))
                .small()
                .color(theme_colors.text.muted),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(stats.format_compact())
                    .small()
                    .color(theme_colors.text.secondary),
            );

            // Center: toast message (temporary notifications)
            if let Some(toast) = toast {
                ui.with_layout(
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.label(RichText::new(toast).italics());
                    },
                );
            }
        });
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_text() {
        let stats = DocumentStats::from_text("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.characters, 0);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_stats_simple_sentence() {
        let stats = DocumentStats::from_text("Hello, World!");
        assert_eq!(stats.words, 2);
        assert_eq!(stats.characters, 13);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn test_stats_markup_counts_as_words() {
        let stats = DocumentStats::from_text("# Title\n\n<div class=\"x\">Y</div>\n");
        assert_eq!(stats.words, 4);
        assert_eq!(stats.lines, 4);
    }

    #[test]
    fn test_stats_counts_chars_not_bytes() {
        let stats = DocumentStats::from_text("💡 ✅");
        assert_eq!(stats.characters, 3);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn test_format_compact() {
        let stats = DocumentStats {
            words: 150,
            characters: 892,
            lines: 25,
        };
        assert_eq!(stats.format_compact(), "150 words | 892 chars | 25 lines");
    }
}
