//! Source editor widget for MDX Converter
//!
//! Wraps egui's `TextEdit` with the editor font, optional word wrap, a
//! placeholder, and a line number gutter drawn from the laid-out galley.

use crate::theme::ThemeColors;
use eframe::egui::{self, FontId, ScrollArea, TextEdit, Ui};
use std::sync::Arc;

/// Placeholder shown while the editor is empty.
pub const EDITOR_HINT: &str = "Type your MDX here...";

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the content was modified.
    pub changed: bool,
}

/// Multiline editor for the source text.
///
/// # Example
///
/// ```ignore
/// let output = SourceEditor::new(&mut text)
///     .font_size(settings.font_size)
///     .word_wrap(settings.word_wrap)
///     .show(ui);
/// ```
pub struct SourceEditor<'a> {
    /// The text being edited.
    text: &'a mut String,
    /// Font size for the editor.
    font_size: f32,
    /// Whether word wrap is enabled.
    word_wrap: bool,
    /// Whether to show line numbers.
    show_line_numbers: bool,
    /// Theme colors for styling line numbers.
    theme_colors: Option<&'a ThemeColors>,
}

impl<'a> SourceEditor<'a> {
    /// Create a new editor widget for `text`.
    pub fn new(text: &'a mut String) -> Self {
        Self {
            text,
            font_size: 14.0,
            word_wrap: true,
            show_line_numbers: true,
            theme_colors: None,
        }
    }

    /// Set the font size for the editor.
    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set whether word wrap is enabled.
    #[must_use]
    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Set whether to show line numbers.
    #[must_use]
    pub fn show_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }

    /// Set theme colors for styling the gutter.
    #[must_use]
    pub fn theme_colors(mut self, colors: &'a ThemeColors) -> Self {
        self.theme_colors = Some(colors);
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        let id = ui.id().with("source_editor");
        let font_size = self.font_size;
        let word_wrap = self.word_wrap;
        let font_id = FontId::monospace(font_size);

        let gutter_width = if self.show_line_numbers {
            gutter_width(count_lines(self.text), font_size)
        } else {
            0.0
        };

        let layout_font = font_id.clone();
        let mut layouter = move |ui: &Ui, text: &str, wrap_width: f32| -> Arc<egui::Galley> {
            let layout_job = if word_wrap {
                egui::text::LayoutJob::simple(
                    text.to_owned(),
                    layout_font.clone(),
                    ui.visuals().text_color(),
                    wrap_width,
                )
            } else {
                egui::text::LayoutJob::simple_singleline(
                    text.to_owned(),
                    layout_font.clone(),
                    ui.visuals().text_color(),
                )
            };
            ui.fonts(|f| f.layout_job(layout_job))
        };

        let scroll_area = if word_wrap {
            ScrollArea::vertical()
        } else {
            ScrollArea::both()
        };

        let text = self.text;
        let theme_colors = self.theme_colors;
        let show_line_numbers = self.show_line_numbers;

        let changed = scroll_area
            .id_source(id.with("scroll"))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    // Reserve the gutter; numbers are drawn once rows are known
                    let gutter_rect = show_line_numbers.then(|| {
                        let line_height = ui.fonts(|f| f.row_height(&font_id));
                        let total_height = count_lines(text) as f32 * line_height;
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(gutter_width, total_height.max(ui.available_height())),
                            egui::Sense::hover(),
                        );
                        rect
                    });

                    let text_output = TextEdit::multiline(text)
                        .id(id)
                        .frame(false)
                        .code_editor()
                        .font(font_id.clone())
                        .hint_text(EDITOR_HINT)
                        .desired_width(f32::INFINITY)
                        .desired_rows(20)
                        .lock_focus(true)
                        .layouter(&mut layouter)
                        .show(ui);

                    if let Some(gutter_rect) = gutter_rect {
                        paint_line_numbers(
                            ui,
                            gutter_rect,
                            &text_output.galley,
                            text_output.galley_pos,
                            font_size,
                            theme_colors,
                        );
                    }

                    text_output.response.changed()
                })
                .inner
            })
            .inner;

        EditorOutput { changed }
    }
}

/// Number of lines in `text`; an empty text is one empty line.
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Gutter width for a document of `line_count` lines.
fn gutter_width(line_count: usize, font_size: f32) -> f32 {
    let digit_count = line_count.max(1).to_string().len();
    let char_width = font_size * 0.6;
    (char_width * digit_count as f32 + 20.0).max(30.0)
}

/// Draw line numbers next to the first row of each logical line.
fn paint_line_numbers(
    ui: &Ui,
    gutter_rect: egui::Rect,
    galley: &egui::Galley,
    galley_pos: egui::Pos2,
    font_size: f32,
    theme_colors: Option<&ThemeColors>,
) {
    let line_color = theme_colors
        .map(|c| c.text.muted)
        .unwrap_or(egui::Color32::from_rgb(120, 120, 120));
    let bg_color = theme_colors
        .map(|c| c.base.panel)
        .unwrap_or(egui::Color32::from_rgb(245, 245, 245));
    let border_color = theme_colors
        .map(|c| c.base.border)
        .unwrap_or(egui::Color32::from_rgb(200, 200, 200));

    let painter = ui.painter();
    painter.rect_filled(gutter_rect, 0.0, bg_color);
    painter.vline(
        gutter_rect.right() - 1.0,
        gutter_rect.y_range(),
        egui::Stroke::new(1.0, border_color),
    );

    let number_font = FontId::monospace(font_size);
    let mut logical_line = 0usize;
    let mut at_line_start = true;

    for row in &galley.rows {
        if at_line_start {
            painter.text(
                egui::pos2(gutter_rect.right() - 12.0, galley_pos.y + row.min_y()),
                egui::Align2::RIGHT_TOP,
                (logical_line + 1).to_string(),
                number_font.clone(),
                line_color,
            );
            at_line_start = false;
        }

        // Wrapped rows share the number of their logical line
        if row.ends_with_newline {
            logical_line += 1;
            at_line_start = true;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("one\ntwo\n"), 3);
        assert_eq!(count_lines("\r\n\r\n"), 3);
    }

    #[test]
    fn test_gutter_width_grows_with_digits() {
        let narrow = gutter_width(9, 14.0);
        let wide = gutter_width(1000, 14.0);
        assert!(wide > narrow);
        assert!(gutter_width(0, 8.0) >= 30.0);
    }

    #[test]
    fn test_editor_shows_without_changes() {
        let ctx = egui::Context::default();
        let mut text = String::from("# Title\n\nBody");
        let mut changed = true;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = SourceEditor::new(&mut text)
                    .font_size(13.0)
                    .word_wrap(false)
                    .show(ui)
                    .changed;
            });
        });
        assert!(!changed);
        assert_eq!(text, "# Title\n\nBody");
    }
}
