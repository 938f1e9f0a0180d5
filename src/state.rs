//! Application state management for MDX Converter
//!
//! This module defines the central `AppState` struct that owns the source
//! document, the conversion pipeline, the preview element tree, settings,
//! and transient UI state.

use std::time::{Duration, Instant};

use eframe::egui::text::LayoutJob;
use log::{debug, info, warn};

use crate::config::{
    load_config, save_config_silent, LocalStore, OutputTab, Settings, APP_DIR_NAME, STORAGE_KEY,
};
use crate::export::{ClipboardPayload, ExportKind};
use crate::markdown::{highlight_code, normalize_attributes, ComrakParser, MarkdownParser, Pipeline};
use crate::preview::{build_preview, PreviewElement};

/// Document shown on first start, before anything has been saved.
pub const DEFAULT_MDX: &str = r#"# Heading Level 1
## Heading Level 2
### Heading Level 3

This tool converts **Markdown** with embedded **JSX** into clean HTML.

<div className="p-4 my-4 bg-blue-50 border-l-4 border-blue-500 rounded-r">
  <h3 className="text-blue-700 font-bold m-0">💡 JSX Component</h3>
  <p className="text-blue-600 m-0">
    I am a raw HTML/JSX block rendered safely inside Markdown.
  </p>
</div>

## Features
- Standard Markdown support
- HTML/JSX tag preservation
- Live preview

## Table Example
| Feature | Supported |
| :--- | :---: |
| Markdown | ✅ |
| JSX | ✅ |
| Tables | ✅ |

## Code Example
```javascript
const greet = () => {
  console.log("Hello World");
}
```

<button className="px-4 py-2 bg-indigo-600 text-white rounded hover:bg-indigo-700 transition-colors">
  Click Me (Styled Button)
</button>
"#;

/// How long the Copy button shows "Copied".
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The source text being edited plus its autosave bookkeeping.
#[derive(Debug, Clone)]
pub struct Document {
    /// Current source text
    pub text: String,
    /// Whether `text` matches what is in the local store
    saved: bool,
    /// When the text last changed; `None` once persisted
    last_edit: Option<Instant>,
}

impl Document {
    /// A document that is already persisted.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            saved: true,
            last_edit: None,
        }
    }

    /// Record an edit made at `now`.
    pub fn mark_edited(&mut self, now: Instant) {
        self.saved = false;
        self.last_edit = Some(now);
    }

    /// Replace the text and record the edit.
    pub fn set_text(&mut self, text: impl Into<String>, now: Instant) {
        self.text = text.into();
        self.mark_edited(now);
    }

    /// Whether the text has been written to the local store.
    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Whether the text has been quiet for `delay` and still needs saving.
    pub fn autosave_due(&self, now: Instant, delay: Duration) -> bool {
        match self.last_edit {
            Some(edited) if !self.saved => now.saturating_duration_since(edited) >= delay,
            _ => false,
        }
    }

    /// Time left until the pending autosave fires.
    pub fn autosave_remaining(&self, now: Instant, delay: Duration) -> Option<Duration> {
        let edited = self.last_edit.filter(|_| !self.saved)?;
        Some(delay.saturating_sub(now.saturating_duration_since(edited)))
    }

    fn mark_saved(&mut self) {
        self.saved = true;
        self.last_edit = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the cheat sheet window is open
    pub show_cheat_sheet: bool,
    /// Whether the clear confirmation dialog is open
    pub show_confirm_clear: bool,
    /// Until when the Copy button reads "Copied"
    pub copied_until: Option<Instant>,
    /// Temporary toast message (shown in center of status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

/// Highlighted HTML view, rebuilt only when its inputs change.
#[derive(Debug)]
struct HtmlViewCache {
    run_count: u64,
    dark: bool,
    font_size: f32,
    job: LayoutJob,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state struct.
///
/// Every change to the source text goes through [`AppState::set_source`],
/// which feeds the pipeline and schedules an autosave.
#[derive(Debug)]
pub struct AppState<P: MarkdownParser = ComrakParser> {
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
    /// The editor contents
    document: Document,
    /// Conversion pipeline fed from `document`
    pipeline: Pipeline<P>,
    /// Native preview of the last successful conversion
    preview: Vec<PreviewElement>,
    /// Pipeline run the preview was built from
    preview_run: u64,
    /// Persisted source text
    store: LocalStore,
    html_view: Option<HtmlViewCache>,
}

impl AppState<ComrakParser> {
    /// Create an AppState with settings loaded from config and the source
    /// restored from the default local store.
    pub fn new() -> Self {
        let settings = load_config();
        info!("AppState initialized with settings");
        debug!(
            "Theme: {:?}, Output tab: {:?}",
            settings.theme, settings.output_tab
        );

        let store = LocalStore::open_default().unwrap_or_else(|e| {
            warn!("{}. Autosave will use the temp directory.", e);
            LocalStore::open_or_empty(std::env::temp_dir().join(APP_DIR_NAME))
        });

        Self::with_settings_and_store(settings, store)
    }
}

impl Default for AppState<ComrakParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MarkdownParser> AppState<P> {
    /// Create AppState from explicit settings and store (useful for testing).
    ///
    /// A stored value is used even when it is empty; only a missing entry
    /// falls back to [`DEFAULT_MDX`].
    pub fn with_settings_and_store(settings: Settings, store: LocalStore) -> Self {
        let text = match store.get_item(STORAGE_KEY) {
            Some(saved) => {
                info!("Restored {} bytes of saved source", saved.len());
                saved.to_string()
            }
            None => {
                debug!("No saved source, starting with the default document");
                DEFAULT_MDX.to_string()
            }
        };

        let mut pipeline = Pipeline::new();
        pipeline.set_source(text.as_str());

        Self {
            settings,
            ui: UiState::default(),
            settings_dirty: false,
            document: Document::new(text),
            pipeline,
            preview: Vec::new(),
            preview_run: 0,
            store,
            html_view: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Source & Conversion
    // ─────────────────────────────────────────────────────────────────────────

    /// Current source text.
    pub fn source(&self) -> &str {
        &self.document.text
    }

    /// Mutable access to the source buffer for the editor widget.
    ///
    /// Call [`AppState::source_changed`] after the widget reports a change.
    pub fn source_mut(&mut self) -> &mut String {
        &mut self.document.text
    }

    /// Replace the source text, reconvert, and schedule an autosave.
    pub fn set_source(&mut self, text: impl Into<String>, now: Instant) {
        self.document.set_text(text, now);
        self.convert();
    }

    /// Reconvert after the editor changed the buffer in place.
    pub fn source_changed(&mut self, now: Instant) {
        self.document.mark_edited(now);
        self.convert();
    }

    /// Hand the loaded parser to the pipeline.
    pub fn attach_parser(&mut self, parser: P) {
        self.pipeline.attach_parser(parser);
        self.refresh_preview();
    }

    /// Whether the parser has finished loading.
    pub fn is_ready(&self) -> bool {
        self.pipeline.is_ready()
    }

    /// Formatted HTML output.
    pub fn output(&self) -> &str {
        self.pipeline.output()
    }

    /// Message of the last failed conversion, if the latest run failed.
    pub fn error(&self) -> Option<&str> {
        self.pipeline.error()
    }

    /// Preview elements of the last successful conversion.
    pub fn preview(&self) -> &[PreviewElement] {
        &self.preview
    }

    /// The output as a highlighted layout, cached between frames.
    pub fn html_view(&mut self, dark: bool, font_size: f32) -> &LayoutJob {
        let run_count = self.pipeline.run_count();
        let stale = !matches!(
            &self.html_view,
            Some(cache) if cache.run_count == run_count
                && cache.dark == dark
                && cache.font_size == font_size
        );

        if stale {
            self.html_view = None;
        }

        let output = self.pipeline.output();
        &self
            .html_view
            .get_or_insert_with(|| HtmlViewCache {
                run_count,
                dark,
                font_size,
                job: highlight_code(output, "html", dark, font_size),
            })
            .job
    }

    fn convert(&mut self) {
        self.pipeline.set_source(self.document.text.as_str());
        self.refresh_preview();
    }

    /// Rebuild the preview when a new run succeeded.
    fn refresh_preview(&mut self) {
        let run = self.pipeline.run_count();
        if run == self.preview_run || self.pipeline.error().is_some() {
            return;
        }
        self.preview = build_preview(&normalize_attributes(self.pipeline.source()));
        self.preview_run = run;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Autosave
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the source matches the local store.
    pub fn is_saved(&self) -> bool {
        self.document.is_saved()
    }

    /// Persist the source if it has been quiet for the autosave delay.
    ///
    /// Returns the time until the next check is needed, if a save is still
    /// pending.
    pub fn tick_autosave(&mut self, now: Instant) -> Option<Duration> {
        let delay = self.settings.autosave_delay();
        if self.document.autosave_due(now, delay) {
            self.persist_source();
        }
        self.document.autosave_remaining(now, delay)
    }

    /// Persist any unsaved source immediately.
    pub fn flush_autosave(&mut self) {
        if !self.document.is_saved() {
            self.persist_source();
        }
    }

    fn persist_source(&mut self) {
        match self.store.set_item(STORAGE_KEY, &self.document.text) {
            Ok(()) => {
                debug!("Auto-saved {} bytes", self.document.text.len());
                self.document.mark_saved();
            }
            Err(e) => {
                // Leave the document unsaved; the next edit retries.
                warn!("Auto-save failed: {}", e);
                self.document.last_edit = None;
            }
        }
    }

    /// Empty the editor. The empty text replaces the saved source on the
    /// next autosave.
    pub fn clear_editor(&mut self, now: Instant) {
        info!("Clearing editor");
        self.set_source(String::new(), now);
        self.ui.show_confirm_clear = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Copy & Export
    // ─────────────────────────────────────────────────────────────────────────

    /// What the Copy action puts on the clipboard for the active tab.
    ///
    /// The HTML tab copies the formatted output. The preview tab copies the
    /// source as plain text, with the converted HTML offered as a rich
    /// flavor.
    pub fn clipboard_payload(&self) -> ClipboardPayload<'_> {
        match self.settings.output_tab {
            OutputTab::Html => ClipboardPayload::Text(self.pipeline.output()),
            OutputTab::Preview => ClipboardPayload::Html {
                html: self.pipeline.raw_html(),
                alt_text: &self.document.text,
            },
        }
    }

    /// File contents for an export.
    pub fn export_contents(&self, kind: ExportKind) -> &str {
        match kind {
            ExportKind::Markdown => &self.document.text,
            ExportKind::Html => self.pipeline.output(),
        }
    }

    /// Start the "Copied" feedback.
    pub fn mark_copied(&mut self, now: Instant) {
        self.ui.copied_until = Some(now + COPIED_FEEDBACK);
    }

    /// Whether the Copy button should read "Copied" at `now`.
    pub fn is_copied(&self, now: Instant) -> bool {
        self.ui.copied_until.is_some_and(|until| now < until)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Switch between the Preview and HTML tabs.
    pub fn toggle_output_tab(&mut self) {
        self.update_settings(|s| s.output_tab = s.output_tab.toggle());
    }

    /// Save settings to config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Prepare state for application shutdown.
    pub fn shutdown(&mut self) {
        self.flush_autosave();
        self.settings_dirty = true;
        self.save_settings_if_dirty();
        info!("AppState shutdown complete");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the cheat sheet window.
    pub fn toggle_cheat_sheet(&mut self) {
        self.ui.show_cheat_sheet = !self.ui.show_cheat_sheet;
    }

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
