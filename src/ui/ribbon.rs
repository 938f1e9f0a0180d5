//! Ribbon UI Component for MDX Converter
//!
//! The header ribbon (title, cheat sheet, theme toggle) and the two pane
//! toolbars above the editor and the output. All of them report clicks as
//! a `RibbonAction` for the app to handle.

use crate::config::OutputTab;
use crate::theme::ThemeColors;
use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};

/// Height of the header ribbon.
const RIBBON_HEIGHT: f32 = 40.0;

/// Height of the pane toolbars.
const TOOLBAR_HEIGHT: f32 = 30.0;

/// Size of icon buttons.
const ICON_BUTTON_SIZE: Vec2 = Vec2::new(32.0, 28.0);

/// Actions that can be triggered from the ribbon or a pane toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RibbonAction {
    // Source pane
    /// Save the source text as a Markdown file
    SaveSource,
    /// Clear the editor (after confirmation)
    Clear,

    // Output pane
    /// Switch the output pane to a tab
    SelectTab(OutputTab),
    /// Export the converted HTML to a file
    ExportHtml,
    /// Copy the active tab's content
    Copy,
    /// Open the converted HTML in the system browser
    OpenInBrowser,

    // Header
    /// Show or hide the cheat sheet
    ToggleCheatSheet,
    /// Switch between light and dark
    ToggleTheme,
}

/// Header ribbon rendering.
#[derive(Debug, Clone, Default)]
pub struct Ribbon;

impl Ribbon {
    pub fn new() -> Self {
        Self
    }

    /// Get the ribbon height.
    pub fn height(&self) -> f32 {
        RIBBON_HEIGHT
    }

    /// Render the header ribbon and return any triggered action.
    pub fn show(
        &self,
        ui: &mut Ui,
        theme_colors: &ThemeColors,
        theme_icon: &str,
        theme_tooltip: &str,
    ) -> Option<RibbonAction> {
        let mut action = None;
        let is_dark = theme_colors.is_dark();

        ui.horizontal(|ui| {
            ui.set_height(self.height());
            ui.spacing_mut().item_spacing.x = 6.0;

            ui.label(
                RichText::new("</>")
                    .monospace()
                    .strong()
                    .size(16.0)
                    .color(theme_colors.ui.accent),
            );
            ui.label(
                RichText::new("MDX Converter")
                    .strong()
                    .size(17.0)
                    .color(theme_colors.text.primary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if icon_button(ui, theme_icon, theme_tooltip, true, is_dark).clicked() {
                    action = Some(RibbonAction::ToggleTheme);
                }

                vertical_separator(ui, theme_colors.base.border, self.height() - 12.0);

                if ui
                    .button(RichText::new("⌘ Cheat Sheet").size(13.0))
                    .on_hover_text("Markdown & JSX syntax reference (F1)")
                    .clicked()
                {
                    action = Some(RibbonAction::ToggleCheatSheet);
                }
            });
        });

        action
    }
}

/// Toolbar above the editor: title, autosave indicator, Save MD and Clear.
pub fn source_toolbar(
    ui: &mut Ui,
    theme_colors: &ThemeColors,
    is_saved: bool,
) -> Option<RibbonAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.set_height(TOOLBAR_HEIGHT);

        ui.label(
            RichText::new("MDX INPUT")
                .size(11.0)
                .strong()
                .color(theme_colors.text.secondary),
        );

        let (indicator, color) = if is_saved {
            ("✔ Auto-saved", theme_colors.ui.success)
        } else {
            ("⟳ Saving...", theme_colors.ui.warning)
        };
        ui.label(RichText::new(indicator).size(10.0).color(color));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button("🗑 Clear")
                .on_hover_text("Clear the editor and its auto-saved data")
                .clicked()
            {
                action = Some(RibbonAction::Clear);
            }
            if ui
                .small_button("💾 Save MD")
                .on_hover_text("Save source as a Markdown file (Ctrl+S)")
                .clicked()
            {
                action = Some(RibbonAction::SaveSource);
            }
        });
    });

    action
}

/// Toolbar above the output: tabs, Open in Browser, Export HTML and Copy.
pub fn output_toolbar(
    ui: &mut Ui,
    theme_colors: &ThemeColors,
    active_tab: OutputTab,
    copied: bool,
) -> Option<RibbonAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.set_height(TOOLBAR_HEIGHT);

        for tab in [OutputTab::Preview, OutputTab::Html] {
            let text = RichText::new(format!("{} {}", tab.icon(), tab.label())).size(13.0);
            if ui
                .selectable_label(active_tab == tab, text)
                .on_hover_text("Switch view (Ctrl+E)")
                .clicked()
                && active_tab != tab
            {
                action = Some(RibbonAction::SelectTab(tab));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (copy_text, copy_color) = if copied {
                ("✔ Copied", theme_colors.ui.success)
            } else {
                ("📋 Copy", theme_colors.text.primary)
            };
            if ui
                .small_button(RichText::new(copy_text).color(copy_color))
                .on_hover_text("Copy to clipboard (Ctrl+Shift+C)")
                .clicked()
            {
                action = Some(RibbonAction::Copy);
            }

            if ui
                .small_button("⬇ Export HTML")
                .on_hover_text("Save the HTML to a file (Ctrl+Shift+E)")
                .clicked()
            {
                action = Some(RibbonAction::ExportHtml);
            }

            if ui
                .small_button("🌐 Browser")
                .on_hover_text("Open the HTML in the system browser")
                .clicked()
            {
                action = Some(RibbonAction::OpenInBrowser);
            }
        });
    });

    action
}

/// Render an icon button with a hover background.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = if enabled {
        if is_dark {
            Color32::from_rgb(220, 220, 220)
        } else {
            Color32::from_rgb(50, 50, 50)
        }
    } else if is_dark {
        Color32::from_rgb(100, 100, 100)
    } else {
        Color32::from_rgb(160, 160, 160)
    };

    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 60)
    } else {
        Color32::from_rgb(220, 220, 220)
    };

    // Use an invisible button as the clickable area
    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(16.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    ui.painter().text(
        btn.rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(16.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

/// Draw a thin vertical separator line.
fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().vline(rect.center().x, rect.y_range(), egui::Stroke::new(1.0, color));
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
