//! Main application module for MDX Converter
//!
//! This module implements the eframe App trait for the main application,
//! handling window management, UI updates, and event processing.

use std::time::{Duration, Instant};

use crate::config::{OutputTab, Settings, WindowSize};
use crate::editor::SourceEditor;
use crate::export::{copy_to_clipboard, open_in_browser, write_export, ExportKind};
use crate::files::save_export_dialog;
use crate::markdown::ParserLoader;
use crate::preview::PreviewRenderer;
use crate::state::AppState;
use crate::theme::{ThemeColors, ThemeManager};
use crate::ui::{
    output_toolbar, show_clear_dialog, source_toolbar, status_bar, CheatSheet, ConfirmResult,
    DocumentStats, Ribbon, RibbonAction,
};
use eframe::egui;
use log::{debug, info, warn};

/// How often to check on the background parser while it loads.
const LOADER_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Keyboard shortcut actions that need to be deferred.
///
/// These actions are detected in the input handling closure and executed
/// afterwards to avoid borrow conflicts.
#[derive(Debug, Clone, Copy)]
enum KeyboardAction {
    /// Save source as Markdown (Ctrl+S)
    SaveSource,
    /// Export HTML (Ctrl+Shift+E)
    ExportHtml,
    /// Copy the active tab's content (Ctrl+Shift+C)
    Copy,
    /// Toggle Preview / HTML Code (Ctrl+E)
    ToggleOutputTab,
    /// Toggle light / dark (Ctrl+Shift+T)
    ToggleTheme,
    /// Toggle the cheat sheet (F1)
    ToggleCheatSheet,
    /// Close the cheat sheet (Escape)
    CloseCheatSheet,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct ConverterApp {
    /// Central application state
    state: AppState,
    /// Parser being prepared in the background
    loader: ParserLoader,
    /// Theme manager for handling theme switching
    theme_manager: ThemeManager,
    /// Header ribbon
    ribbon: Ribbon,
    /// Cheat sheet window
    cheat_sheet: CheatSheet,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Last known window position (for detecting changes)
    last_window_pos: Option<egui::Pos2>,
    /// Application start time for timing toast messages
    start_time: Instant,
}

impl ConverterApp {
    /// Create a new ConverterApp instance.
    ///
    /// This restores settings and the saved source, applies the saved theme,
    /// and starts loading the parser in the background.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing MDX Converter");

        let state = AppState::new();

        let mut theme_manager = ThemeManager::new(state.settings.theme);
        theme_manager.apply(&cc.egui_ctx);
        info!("Applied initial theme: {:?}", state.settings.theme);

        Self {
            state,
            loader: ParserLoader::spawn(),
            theme_manager,
            ribbon: Ribbon::new(),
            cheat_sheet: CheatSheet::new(),
            last_window_size: None,
            last_window_pos: None,
            start_time: Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn toast(&mut self, message: impl Into<String>, duration: f64) {
        let time = self.get_app_time();
        self.state.show_toast(message, time, duration);
    }

    /// Update window size in settings if changed.
    ///
    /// Returns `true` if the window state was updated.
    fn update_window_state(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;

        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                let current_size = rect.size();
                let current_pos = rect.min;

                let size_changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);
                let pos_changed = self
                    .last_window_pos
                    .map(|p| (p - current_pos).length() > 1.0)
                    .unwrap_or(true);

                if size_changed || pos_changed {
                    self.last_window_size = Some(current_size);
                    self.last_window_pos = Some(current_pos);
                    changed = true;
                }
            }
        });

        if changed {
            if let (Some(size), Some(pos)) = (self.last_window_size, self.last_window_pos) {
                let maximized = ctx.input(|i| i.viewport().maximized.unwrap_or(false));

                self.state.settings.window_size = WindowSize {
                    width: size.x,
                    height: size.y,
                    x: Some(pos.x),
                    y: Some(pos.y),
                    maximized,
                };

                debug!(
                    "Window state updated: {}x{} at ({}, {}), maximized: {}",
                    size.x, size.y, pos.x, pos.y, maximized
                );
            }
        }

        changed
    }

    /// Hand over the parser once the loader has it.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        if let Some(parser) = self.loader.poll() {
            self.state.attach_parser(parser);
        } else if self.loader.is_pending() {
            ctx.request_repaint_after(LOADER_POLL_INTERVAL);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the main UI content.
    fn render_ui(&mut self, ctx: &egui::Context) -> Option<RibbonAction> {
        let theme_colors = self.theme_manager.colors(ctx);
        let mut action = None;

        egui::TopBottomPanel::top("ribbon")
            .frame(
                egui::Frame::none()
                    .fill(theme_colors.base.panel)
                    .inner_margin(egui::Margin::symmetric(12.0, 0.0)),
            )
            .show(ctx, |ui| {
                let icon = self.theme_manager.toggle_icon(ctx);
                let tooltip = self.theme_manager.toggle_tooltip(ctx);
                if let Some(a) = self.ribbon.show(ui, &theme_colors, icon, tooltip) {
                    action = Some(a);
                }
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let stats = DocumentStats::from_text(self.state.source());
            status_bar::show(
                ui,
                &theme_colors,
                &stats,
                self.state.ui.toast_message.as_deref(),
            );
        });

        if !self.state.is_ready() {
            render_loading_screen(ctx, &theme_colors);
            return action;
        }

        if let Some(a) = self.render_source_panel(ctx, &theme_colors) {
            action = Some(a);
        }
        if let Some(a) = self.render_output_panel(ctx, &theme_colors) {
            action = Some(a);
        }

        action
    }

    /// Left pane: toolbar and editor.
    fn render_source_panel(
        &mut self,
        ctx: &egui::Context,
        theme_colors: &ThemeColors,
    ) -> Option<RibbonAction> {
        let mut action = None;
        let total_width = ctx.screen_rect().width();
        let split_ratio = self.state.settings.split_ratio;

        let response = egui::SidePanel::left("source_panel")
            .resizable(true)
            .default_width(total_width * split_ratio)
            .width_range(
                total_width * Settings::MIN_SPLIT_RATIO..=total_width * Settings::MAX_SPLIT_RATIO,
            )
            .frame(
                egui::Frame::none()
                    .fill(theme_colors.base.input)
                    .inner_margin(egui::Margin::symmetric(8.0, 4.0)),
            )
            .show(ctx, |ui| {
                action = source_toolbar(ui, theme_colors, self.state.is_saved());
                ui.separator();

                let settings = &self.state.settings;
                let (font_size, word_wrap, line_numbers) =
                    (settings.font_size, settings.word_wrap, settings.show_line_numbers);

                let output = SourceEditor::new(self.state.source_mut())
                    .font_size(font_size)
                    .word_wrap(word_wrap)
                    .show_line_numbers(line_numbers)
                    .theme_colors(theme_colors)
                    .show(ui);

                if output.changed {
                    self.state.source_changed(Instant::now());
                }
            })
            .response;

        // Remember where the user dragged the divider
        if total_width > 0.0 {
            let ratio = response.rect.width() / total_width;
            if (ratio - split_ratio).abs() > 0.005 {
                self.state.update_settings(|s| {
                    s.split_ratio =
                        ratio.clamp(Settings::MIN_SPLIT_RATIO, Settings::MAX_SPLIT_RATIO)
                });
            }
        }

        action
    }

    /// Right pane: tabs, actions, error banner and the active view.
    fn render_output_panel(
        &mut self,
        ctx: &egui::Context,
        theme_colors: &ThemeColors,
    ) -> Option<RibbonAction> {
        let mut action = None;
        let copied = self.state.is_copied(Instant::now());
        let active_tab = self.state.settings.output_tab;
        let font_size = self.state.settings.font_size;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(theme_colors.base.background)
                    .inner_margin(egui::Margin::symmetric(12.0, 4.0)),
            )
            .show(ctx, |ui| {
                action = output_toolbar(ui, theme_colors, active_tab, copied);
                ui.separator();

                if let Some(message) = self.state.error() {
                    render_error_banner(ui, theme_colors, message);
                    ui.add_space(8.0);
                }

                match active_tab {
                    OutputTab::Preview => {
                        egui::ScrollArea::vertical()
                            .id_source("preview_scroll")
                            .auto_shrink([false, false])
                            .show(ui, |ui| {
                                if self.state.preview().is_empty() {
                                    ui.label(
                                        egui::RichText::new("Nothing to preview")
                                            .italics()
                                            .color(theme_colors.text.muted),
                                    );
                                } else {
                                    PreviewRenderer::new(theme_colors, font_size)
                                        .show(ui, self.state.preview());
                                }
                            });
                    }
                    OutputTab::Html => {
                        let job = self
                            .state
                            .html_view(theme_colors.is_dark(), font_size * 0.9)
                            .clone();
                        egui::Frame::none()
                            .fill(theme_colors.preview.code_bg)
                            .inner_margin(egui::Margin::same(12.0))
                            .rounding(6.0)
                            .show(ui, |ui| {
                                egui::ScrollArea::both()
                                    .id_source("html_scroll")
                                    .auto_shrink([false, false])
                                    .show(ui, |ui| {
                                        ui.add(egui::Label::new(job).selectable(true));
                                    });
                            });
                    }
                }
            });

        action
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let is_dark = self.theme_manager.is_dark(ctx);

        if self.state.ui.show_cheat_sheet && self.cheat_sheet.show(ctx, is_dark).close_requested {
            self.state.ui.show_cheat_sheet = false;
        }

        if self.state.ui.show_confirm_clear {
            match show_clear_dialog(ctx, is_dark) {
                ConfirmResult::Confirmed => {
                    self.state.clear_editor(Instant::now());
                    self.toast("Editor cleared", 2.0);
                }
                ConfirmResult::Cancelled => self.state.ui.show_confirm_clear = false,
                ConfirmResult::None => {}
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input Handling
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let cheat_sheet_open = self.state.ui.show_cheat_sheet;

        let action = ctx.input(|i| {
            // Ctrl+Shift+E: Export HTML
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+Shift+E (Export HTML)");
                return Some(KeyboardAction::ExportHtml);
            }

            // Ctrl+Shift+C: Copy
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::C) {
                debug!("Keyboard shortcut: Ctrl+Shift+C (Copy)");
                return Some(KeyboardAction::Copy);
            }

            // Ctrl+Shift+T: Toggle Theme
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::T) {
                debug!("Keyboard shortcut: Ctrl+Shift+T (Toggle Theme)");
                return Some(KeyboardAction::ToggleTheme);
            }

            // Ctrl+E: Toggle Preview / HTML Code
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::E) {
                debug!("Keyboard shortcut: Ctrl+E (Toggle Output Tab)");
                return Some(KeyboardAction::ToggleOutputTab);
            }

            // Ctrl+S: Save source
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S) {
                debug!("Keyboard shortcut: Ctrl+S (Save MD)");
                return Some(KeyboardAction::SaveSource);
            }

            // F1: Cheat sheet
            if i.key_pressed(egui::Key::F1) {
                debug!("Keyboard shortcut: F1 (Cheat Sheet)");
                return Some(KeyboardAction::ToggleCheatSheet);
            }

            // Escape: Close cheat sheet (if open)
            if cheat_sheet_open && i.key_pressed(egui::Key::Escape) {
                return Some(KeyboardAction::CloseCheatSheet);
            }

            None
        });

        match action {
            Some(KeyboardAction::SaveSource) => self.handle_export(ExportKind::Markdown),
            Some(KeyboardAction::ExportHtml) => self.handle_export(ExportKind::Html),
            Some(KeyboardAction::Copy) => self.handle_copy(),
            Some(KeyboardAction::ToggleOutputTab) => self.state.toggle_output_tab(),
            Some(KeyboardAction::ToggleTheme) => self.handle_toggle_theme(ctx),
            Some(KeyboardAction::ToggleCheatSheet) => self.state.toggle_cheat_sheet(),
            Some(KeyboardAction::CloseCheatSheet) => self.state.ui.show_cheat_sheet = false,
            None => {}
        }
    }

    fn handle_ribbon_action(&mut self, ctx: &egui::Context, action: RibbonAction) {
        debug!("Ribbon action: {:?}", action);
        match action {
            RibbonAction::SaveSource => self.handle_export(ExportKind::Markdown),
            RibbonAction::Clear => self.state.ui.show_confirm_clear = true,
            RibbonAction::SelectTab(tab) => self.state.update_settings(|s| s.output_tab = tab),
            RibbonAction::ExportHtml => self.handle_export(ExportKind::Html),
            RibbonAction::Copy => self.handle_copy(),
            RibbonAction::OpenInBrowser => self.handle_open_in_browser(ctx),
            RibbonAction::ToggleCheatSheet => self.state.toggle_cheat_sheet(),
            RibbonAction::ToggleTheme => self.handle_toggle_theme(ctx),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action Handlers
    // ─────────────────────────────────────────────────────────────────────────

    /// Save the source or the HTML through a native save dialog.
    fn handle_export(&mut self, kind: ExportKind) {
        if !self.state.is_ready() {
            return;
        }

        let initial_dir = self.state.settings.last_export_directory.clone();
        let Some(path) = save_export_dialog(kind, initial_dir.as_deref()) else {
            debug!("{} export cancelled", kind.label());
            return;
        };

        match write_export(&path, self.state.export_contents(kind)) {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    let parent = parent.to_path_buf();
                    self.state
                        .update_settings(|s| s.last_export_directory = Some(parent));
                }

                self.toast(format!("Saved {} to {}", kind.label(), path.display()), 2.5);

                if self.state.settings.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!("Failed to open exported file: {}", e);
                    }
                }
            }
            Err(e) => {
                warn!("{} export failed: {}", kind.label(), e);
                self.toast(format!("Export failed: {}", e), 3.0);
            }
        }
    }

    fn handle_copy(&mut self) {
        if !self.state.is_ready() {
            return;
        }

        match copy_to_clipboard(self.state.clipboard_payload()) {
            Ok(()) => self.state.mark_copied(Instant::now()),
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.toast(format!("Copy failed: {}", e), 3.0);
            }
        }
    }

    fn handle_open_in_browser(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors(ctx);
        match open_in_browser(self.state.output(), &colors) {
            Ok(_) => self.toast("Opened preview in browser", 2.0),
            Err(e) => {
                warn!("Browser preview failed: {}", e);
                self.toast(format!("Could not open browser: {}", e), 3.0);
            }
        }
    }

    fn handle_toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.theme_manager.toggle(ctx);
        self.state.update_settings(|s| s.theme = theme);
        info!("Theme changed to {:?}", theme);
    }

    /// Schedule repaints for time-driven state: autosave, "Copied" and toasts.
    fn schedule_repaints(&mut self, ctx: &egui::Context) {
        let now = Instant::now();

        if let Some(remaining) = self.state.tick_autosave(now) {
            ctx.request_repaint_after(remaining);
        }

        if let Some(until) = self.state.ui.copied_until {
            match until.checked_duration_since(now) {
                Some(remaining) => ctx.request_repaint_after(remaining),
                None => self.state.ui.copied_until = None,
            }
        }

        if let Some(expires_at) = self.state.ui.toast_expires_at {
            let remaining = (expires_at - self.get_app_time()).max(0.0);
            ctx.request_repaint_after(Duration::from_secs_f64(remaining));
        }
    }
}

/// Full-window placeholder while the parser loads.
fn render_loading_screen(ctx: &egui::Context, theme_colors: &ThemeColors) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(theme_colors.base.background))
        .show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.horizontal_centered(|ui| {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Loading compiler...")
                            .size(15.0)
                            .color(theme_colors.text.secondary),
                    );
                });
            });
        });
}

/// Inline banner for a failed conversion.
fn render_error_banner(ui: &mut egui::Ui, theme_colors: &ThemeColors, message: &str) {
    egui::Frame::none()
        .fill(theme_colors.ui.error_bg)
        .stroke(egui::Stroke::new(1.0, theme_colors.ui.error))
        .inner_margin(egui::Margin::same(10.0))
        .rounding(6.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(
                    egui::RichText::new("Error:")
                        .strong()
                        .color(theme_colors.ui.error),
                );
                ui.label(egui::RichText::new(message).color(theme_colors.ui.error));
            });
        });
}

impl eframe::App for ConverterApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme if needed (handles System theme changes)
        self.theme_manager.apply_if_needed(ctx);

        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        // Track window size/position changes for persistence
        self.update_window_state(ctx);

        self.poll_loader(ctx);

        let ribbon_action = self.render_ui(ctx);
        self.render_dialogs(ctx);

        self.handle_keyboard_shortcuts(ctx);
        if let Some(action) = ribbon_action {
            self.handle_ribbon_action(ctx, action);
        }

        self.schedule_repaints(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }

    /// Auto-save interval in seconds.
    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}
