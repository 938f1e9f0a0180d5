//! Cheat Sheet Panel for MDX Converter
//!
//! A modal window with two sections:
//! - Syntax: the Markdown and JSX constructs the converter understands,
//!   with the HTML each one produces
//! - Shortcuts: the application's keyboard shortcuts

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

/// One row of the syntax table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxEntry {
    pub element: &'static str,
    pub syntax: &'static str,
    pub result: &'static str,
}

impl SyntaxEntry {
    const fn new(element: &'static str, syntax: &'static str, result: &'static str) -> Self {
        Self {
            element,
            syntax,
            result,
        }
    }
}

/// Rows of the syntax table, in display order.
pub const SYNTAX_ENTRIES: &[SyntaxEntry] = &[
    SyntaxEntry::new("Heading 1", "# Title", "<h1>Title</h1>"),
    SyntaxEntry::new("Heading 2", "## Subtitle", "<h2>Subtitle</h2>"),
    SyntaxEntry::new("Line Break", "<br /> or (2 spaces)", "<br />"),
    SyntaxEntry::new("Bold", "**Bold**", "<strong>Bold</strong>"),
    SyntaxEntry::new("Italic", "*Italic*", "<em>Italic</em>"),
    SyntaxEntry::new("Link", "[Text](url)", "<a href=\"url\">Text</a>"),
    SyntaxEntry::new("Unordered List", "- Item", "<ul><li>Item..."),
    SyntaxEntry::new("Ordered List", "1. Item", "<ol><li>Item..."),
    SyntaxEntry::new(
        "Table",
        "| Header | Header |\n| --- | --- |\n| Cell | Cell |",
        "<table>...",
    ),
    SyntaxEntry::new("Blockquote", "> Quote", "<blockquote>..."),
    SyntaxEntry::new("Code Block", "```js code ```", "<pre><code>..."),
    SyntaxEntry::new("Inline Code", "`code`", "<code>code</code>"),
    SyntaxEntry::new("Image", "![Alt](img.jpg)", "<img src=\"...\" />"),
    SyntaxEntry::new("Horizontal Rule", "---", "<hr />"),
    SyntaxEntry::new("JSX / HTML", "<div class=\"...\">", "Preserved as is"),
];

/// Keyboard shortcuts shown in the Shortcuts section.
pub const SHORTCUTS: &[(&str, &str)] = &[
    ("Ctrl+S", "Save Source MD"),
    ("Ctrl+Shift+E", "Export HTML"),
    ("Ctrl+Shift+C", "Copy"),
    ("Ctrl+E", "Toggle Preview / HTML Code"),
    ("Ctrl+Shift+T", "Toggle Theme"),
    ("F1", "Cheat Sheet"),
    ("Escape", "Close Cheat Sheet"),
];

/// Cheat sheet sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheatSheetSection {
    #[default]
    Syntax,
    Shortcuts,
}

impl CheatSheetSection {
    /// Get the display label for the section.
    pub fn label(&self) -> &'static str {
        match self {
            CheatSheetSection::Syntax => "Syntax",
            CheatSheetSection::Shortcuts => "Shortcuts",
        }
    }

    /// Get the icon for the section.
    pub fn icon(&self) -> &'static str {
        match self {
            CheatSheetSection::Syntax => "📝",
            CheatSheetSection::Shortcuts => "⌨",
        }
    }
}

/// Result of showing the cheat sheet.
#[derive(Debug, Clone, Default)]
pub struct CheatSheetOutput {
    /// Whether the panel should be closed.
    pub close_requested: bool,
}

/// Cheat sheet state and rendering.
#[derive(Debug, Clone, Default)]
pub struct CheatSheet {
    active_section: CheatSheetSection,
}

impl CheatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the cheat sheet as a modal window.
    pub fn show(&mut self, ctx: &egui::Context, is_dark: bool) -> CheatSheetOutput {
        let mut output = CheatSheetOutput::default();

        // Semi-transparent overlay
        let screen_rect = ctx.screen_rect();
        let overlay_color = if is_dark {
            Color32::from_rgba_unmultiplied(0, 0, 0, 180)
        } else {
            Color32::from_rgba_unmultiplied(0, 0, 0, 120)
        };

        egui::Area::new(egui::Id::new("cheat_sheet_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(screen_rect, 0.0, overlay_color);

                // Close on click outside
                if response.clicked() {
                    output.close_requested = true;
                }
            });

        egui::Window::new("⌘ Markdown & JSX Cheat Sheet")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(600.0)
            .max_width(700.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.horizontal(|ui| {
                    for section in [CheatSheetSection::Syntax, CheatSheetSection::Shortcuts] {
                        let selected = self.active_section == section;
                        let text = format!("{} {}", section.icon(), section.label());
                        if ui
                            .selectable_label(selected, RichText::new(text).size(14.0))
                            .clicked()
                        {
                            self.active_section = section;
                        }
                    }
                });

                ui.separator();

                ScrollArea::vertical()
                    .max_height(ctx.screen_rect().height() * 0.6)
                    .show(ui, |ui| {
                        ui.set_min_width(560.0);
                        match self.active_section {
                            CheatSheetSection::Syntax => show_syntax_table(ui, is_dark),
                            CheatSheetSection::Shortcuts => show_shortcuts(ui, is_dark),
                        }
                    });

                ui.separator();

                ui.vertical_centered(|ui| {
                    let got_it = egui::Button::new(RichText::new("Got it").size(14.0))
                        .min_size(egui::vec2(96.0, 28.0));
                    if ui.add(got_it).clicked()
                    {
                        output.close_requested = true;
                    }
                    ui.label(RichText::new("Press F1 or Escape to close").small().weak());
                });
            });

        output
    }
}

fn syntax_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_rgb(165, 180, 252)
    } else {
        Color32::from_rgb(79, 70, 229)
    }
}

fn show_syntax_table(ui: &mut Ui, is_dark: bool) {
    egui::Grid::new("cheat_sheet_syntax")
        .num_columns(3)
        .striped(true)
        .spacing([20.0, 8.0])
        .min_col_width(110.0)
        .show(ui, |ui| {
            ui.label(RichText::new("Element").strong());
            ui.label(RichText::new("Markdown Syntax").strong());
            ui.label(RichText::new("Result / HTML").strong());
            ui.end_row();

            for entry in SYNTAX_ENTRIES {
                ui.label(RichText::new(entry.element).strong());
                ui.label(
                    RichText::new(entry.syntax)
                        .monospace()
                        .color(syntax_color(is_dark)),
                );
                ui.label(RichText::new(entry.result).monospace().weak());
                ui.end_row();
            }
        });
}

fn show_shortcuts(ui: &mut Ui, is_dark: bool) {
    egui::Grid::new("cheat_sheet_shortcuts")
        .num_columns(2)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for (keys, action) in SHORTCUTS {
                ui.label(
                    RichText::new(*keys)
                        .monospace()
                        .color(syntax_color(is_dark)),
                );
                ui.label(*action);
                ui.end_row();
            }
        });
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
