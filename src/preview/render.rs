//! egui rendering of the preview element tree

use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke, Ui};
use std::cell::Cell;

use super::elements::{Alignment, ListItem, PreviewElement, Span};
use crate::markdown::syntax::get_highlighter;
use crate::theme::ThemeColors;

/// Heading size relative to body text, for levels 1 to 6.
const HEADING_SCALE: [f32; 6] = [2.25, 1.75, 1.5, 1.25, 1.1, 1.0];

/// Width of the block quote bar.
const QUOTE_BAR_WIDTH: f32 = 4.0;

/// Font size for a heading level.
pub fn heading_size(level: u8, base: f32) -> f32 {
    let index = usize::from(level.clamp(1, 6)) - 1;
    base * HEADING_SCALE[index]
}

/// Marker text for the `index`th item of a list.
pub fn list_marker(start: Option<usize>, index: usize, checked: Option<bool>) -> String {
    match (checked, start) {
        (Some(true), _) => "☑".to_string(),
        (Some(false), _) => "☐".to_string(),
        (None, Some(start)) => format!("{}.", start + index),
        (None, None) => "•".to_string(),
    }
}

/// Draws preview elements into a `Ui`.
pub struct PreviewRenderer<'a> {
    colors: &'a ThemeColors,
    font_size: f32,
    /// Tables drawn so far this frame, for unique grid ids
    tables: Cell<usize>,
}

impl<'a> PreviewRenderer<'a> {
    pub fn new(colors: &'a ThemeColors, font_size: f32) -> Self {
        Self {
            colors,
            font_size,
            tables: Cell::new(0),
        }
    }

    /// Draw all `elements` top to bottom.
    pub fn show(&self, ui: &mut Ui, elements: &[PreviewElement]) {
        for element in elements {
            self.block(ui, element);
            ui.add_space(self.font_size * 0.6);
        }
    }

    fn block(&self, ui: &mut Ui, element: &PreviewElement) {
        let colors = self.colors;
        match element {
            PreviewElement::Heading { level, spans } => {
                let size = heading_size(*level, self.font_size);
                ui.add_space(size * 0.3);
                self.spans(ui, spans, size, colors.preview.heading(*level), true);
                if *level <= 2 {
                    self.rule(ui);
                }
            }
            PreviewElement::Paragraph(spans) => {
                self.spans(ui, spans, self.font_size, colors.text.primary, false);
            }
            PreviewElement::CodeBlock { language, code } => self.code_block(ui, language, code),
            PreviewElement::BlockQuote(inner) => self.block_quote(ui, inner),
            PreviewElement::List { start, items } => self.list(ui, *start, items),
            PreviewElement::Table {
                alignments,
                header,
                rows,
            } => self.table(ui, alignments, header, rows),
            PreviewElement::ThematicBreak => {
                ui.add_space(self.font_size);
                self.rule(ui);
                ui.add_space(self.font_size);
            }
            PreviewElement::Html(text) => {
                egui::Frame::none()
                    .fill(colors.preview.html_block_bg)
                    .stroke(Stroke::new(1.0, colors.base.border))
                    .inner_margin(egui::Margin::same(12.0))
                    .rounding(6.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new(text)
                                .size(self.font_size)
                                .color(colors.text.primary),
                        );
                    });
            }
        }
    }

    /// A wrapped run of styled spans.
    fn spans(&self, ui: &mut Ui, spans: &[Span], size: f32, color: Color32, strong: bool) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            for span in spans {
                if span.is_line_break() {
                    ui.end_row();
                    continue;
                }

                let mut text = RichText::new(&span.text).size(size).color(color);
                if strong || span.style.strong {
                    text = text.strong();
                }
                if span.style.emphasis {
                    text = text.italics();
                }
                if span.style.strikethrough {
                    text = text.strikethrough();
                }
                if span.style.code {
                    text = text
                        .monospace()
                        .size(size * 0.9)
                        .color(self.colors.preview.code_fg)
                        .background_color(self.colors.preview.code_bg);
                }

                match &span.link {
                    Some(url) => {
                        ui.hyperlink_to(text.color(self.colors.text.link).underline(), url);
                    }
                    None => {
                        ui.label(text);
                    }
                }
            }
        });
    }

    fn rule(&self, ui: &mut Ui) {
        let width = ui.available_width();
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 2.0), egui::Sense::hover());
        ui.painter()
            .hline(rect.x_range(), rect.center().y, Stroke::new(1.0, self.colors.preview.rule));
    }

    fn code_block(&self, ui: &mut Ui, language: &str, code: &str) {
        let dark = self.colors.is_dark();
        let highlighter = get_highlighter();
        let fill = highlighter
            .background(dark)
            .unwrap_or(self.colors.preview.code_bg);
        let job = highlighter.layout_job(
            code.strip_suffix('\n').unwrap_or(code),
            language,
            dark,
            self.font_size * 0.9,
        );

        egui::Frame::none()
            .fill(fill)
            .inner_margin(egui::Margin::same(14.0))
            .rounding(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(job);
            });
    }

    fn block_quote(&self, ui: &mut Ui, inner: &[PreviewElement]) {
        let response = egui::Frame::none()
            .fill(self.colors.preview.quote_bg)
            .inner_margin(egui::Margin {
                left: 16.0,
                right: 12.0,
                top: 10.0,
                bottom: 4.0,
            })
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                let quoted = ThemeColors {
                    text: crate::theme::TextColors {
                        primary: self.colors.preview.quote_text,
                        ..self.colors.text
                    },
                    ..self.colors.clone()
                };
                PreviewRenderer::new(&quoted, self.font_size).show(ui, inner);
            })
            .response;

        let rect = response.rect;
        ui.painter().vline(
            rect.left() + QUOTE_BAR_WIDTH / 2.0,
            rect.y_range(),
            Stroke::new(QUOTE_BAR_WIDTH, self.colors.preview.quote_border),
        );
    }

    fn list(&self, ui: &mut Ui, start: Option<usize>, items: &[ListItem]) {
        for (index, item) in items.iter().enumerate() {
            ui.horizontal_top(|ui| {
                ui.add_space(self.font_size * 0.6);
                let marker = list_marker(start, index, item.checked);
                let marker_color = match item.checked {
                    Some(true) => self.colors.ui.accent,
                    _ => self.colors.text.secondary,
                };
                ui.label(RichText::new(marker).size(self.font_size).color(marker_color));
                ui.add_space(self.font_size * 0.4);
                ui.vertical(|ui| {
                    for block in &item.blocks {
                        self.block(ui, block);
                    }
                });
            });
            ui.add_space(self.font_size * 0.3);
        }
    }

    fn table(
        &self,
        ui: &mut Ui,
        alignments: &[Alignment],
        header: &[Vec<Span>],
        rows: &[Vec<Vec<Span>>],
    ) {
        let table_index = self.tables.get();
        self.tables.set(table_index + 1);

        egui::Frame::none()
            .stroke(Stroke::new(1.0, self.colors.preview.table_border))
            .inner_margin(egui::Margin::same(8.0))
            .rounding(4.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.id().with(("preview_table", table_index)))
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        for (column, cell) in header.iter().enumerate() {
                            self.cell(ui, cell, alignment_at(alignments, column), true);
                        }
                        ui.end_row();

                        for row in rows {
                            for (column, cell) in row.iter().enumerate() {
                                self.cell(ui, cell, alignment_at(alignments, column), false);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn cell(&self, ui: &mut Ui, spans: &[Span], alignment: Alignment, header: bool) {
        let align = match alignment {
            Alignment::None | Alignment::Left => Align::Min,
            Alignment::Center => Align::Center,
            Alignment::Right => Align::Max,
        };
        let color = if header {
            self.colors.preview.heading(2)
        } else {
            self.colors.text.primary
        };
        ui.with_layout(Layout::top_down(align), |ui| {
            self.spans(ui, spans, self.font_size * 0.95, color, header);
        });
    }
}

fn alignment_at(alignments: &[Alignment], column: usize) -> Alignment {
    alignments.get(column).copied().unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
