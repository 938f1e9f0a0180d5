//! Syntax highlighting
//!
//! Wraps syntect for fenced code blocks in the preview and for the raw
//! HTML view. Loading the syntax and theme sets is slow, so a single
//! global instance is built once (on the parser loader thread) and shared.

use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{Color32, FontId};
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// syntect theme used in dark mode
pub const DARK_THEME: &str = "base16-ocean.dark";

/// syntect theme used in light mode
pub const LIGHT_THEME: &str = "InspiredGitHub";

/// Text color when a theme does not define a foreground
const FALLBACK_FOREGROUND: Color32 = Color32::GRAY;

// ─────────────────────────────────────────────────────────────────────────────
// Syntax Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Cached syntect syntax and theme sets.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Load syntect's bundled syntaxes and themes.
    pub fn new() -> Self {
        debug!("Loading syntect syntax and theme sets");
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "Loaded {} syntaxes and {} themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    /// Theme for the current mode, or any bundled theme if the preferred
    /// one is missing.
    fn theme(&self, dark_mode: bool) -> Option<&Theme> {
        let name = if dark_mode { DARK_THEME } else { LIGHT_THEME };
        self.theme_set
            .themes
            .get(name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Background color of the mode's theme.
    pub fn background(&self, dark_mode: bool) -> Option<Color32> {
        self.theme(dark_mode)?
            .settings
            .background
            .map(syntect_to_egui_color)
    }

    /// Look up a syntax by a fenced-code info string such as `js` or `html`.
    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        // Info strings may carry extra words: "js title=demo"
        let language = language.split_whitespace().next().unwrap_or_default();
        if language.is_empty() {
            return None;
        }

        let lower = language.to_lowercase();
        let extension = match lower.as_str() {
            "javascript" | "jsx" | "mjs" | "typescript" | "ts" | "tsx" => "js",
            "html" | "htm" | "mdx" | "xml" | "svg" => "html",
            "markdown" | "md" => "md",
            "shell" | "sh" | "bash" | "zsh" | "console" => "sh",
            "python" | "py" => "py",
            "rust" | "rs" => "rs",
            "yaml" | "yml" => "yaml",
            other => other,
        };

        self.syntax_set
            .find_syntax_by_extension(extension)
            .or_else(|| self.syntax_set.find_syntax_by_name(language))
            .or_else(|| {
                self.syntax_set
                    .syntaxes()
                    .iter()
                    .find(|syntax| syntax.name.to_lowercase() == lower)
            })
    }

    /// Highlight `code` into an egui layout job in monospace.
    ///
    /// Unknown languages and lines syntect cannot handle fall back to
    /// plain text in the theme's foreground color. The job's text is
    /// always exactly `code`.
    pub fn layout_job(
        &self,
        code: &str,
        language: &str,
        dark_mode: bool,
        font_size: f32,
    ) -> LayoutJob {
        let font_id = FontId::monospace(font_size);
        let mut job = LayoutJob::default();

        let Some(theme) = self.theme(dark_mode) else {
            job.append(code, 0.0, plain_format(&font_id, FALLBACK_FOREGROUND));
            return job;
        };
        let foreground = theme
            .settings
            .foreground
            .map(syntect_to_egui_color)
            .unwrap_or(FALLBACK_FOREGROUND);

        let Some(syntax) = self.find_syntax(language) else {
            debug!("No syntax for '{}', rendering plain", language);
            job.append(code, 0.0, plain_format(&font_id, foreground));
            return job;
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        for line in LinesWithEndings::from(code) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, text) in ranges {
                        job.append(text, 0.0, styled_format(&font_id, style));
                    }
                }
                Err(e) => {
                    warn!("Failed to highlight line: {}", e);
                    job.append(line, 0.0, plain_format(&font_id, foreground));
                }
            }
        }

        job
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Convert syntect Color to egui Color32.
pub fn syntect_to_egui_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn plain_format(font_id: &FontId, color: Color32) -> TextFormat {
    TextFormat::simple(font_id.clone(), color)
}

fn styled_format(font_id: &FontId, style: Style) -> TextFormat {
    let color = syntect_to_egui_color(style.foreground);
    let mut format = TextFormat::simple(font_id.clone(), color);
    format.italics = style.font_style.contains(FontStyle::ITALIC);
    if style.font_style.contains(FontStyle::UNDERLINE) {
        format.underline = eframe::egui::Stroke::new(1.0, color);
    }
    format
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Highlighter Instance
// ─────────────────────────────────────────────────────────────────────────────

static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// Get or create the global syntax highlighter.
pub fn get_highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

/// Highlight `code` with the global highlighter.
pub fn highlight_code(code: &str, language: &str, dark_mode: bool, font_size: f32) -> LayoutJob {
    get_highlighter().layout_job(code, language, dark_mode, font_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_mode_themes_exist() {
        let highlighter = get_highlighter();
        assert!(highlighter.theme_set.themes.contains_key(DARK_THEME));
        assert!(highlighter.theme_set.themes.contains_key(LIGHT_THEME));
        assert!(highlighter.background(true).is_some());
    }

    #[test]
    fn test_job_text_matches_input() {
        let code = "const a = 1;\nconsole.log(a);\n";
        let job = highlight_code(code, "javascript", true, 13.0);
        assert_eq!(job.text, code);
        assert!(job.sections.len() > 1);
    }

    #[test]
    fn test_html_view_highlighting() {
        let html = "<div class=\"x\">\r\n  <p>Y</p>\r\n</div>";
        let job = highlight_code(html, "html", false, 13.0);
        assert_eq!(job.text, html);
        assert!(job.sections.len() > 1);
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let job = highlight_code("just text", "unknownlang123", true, 13.0);
        assert_eq!(job.text, "just text");
        assert_eq!(job.sections.len(), 1);
    }

    #[test]
    fn test_empty_code() {
        let job = highlight_code("", "rust", true, 13.0);
        assert!(job.text.is_empty());
    }

    #[test]
    fn test_jsx_and_typescript_map_to_javascript() {
        let highlighter = get_highlighter();
        let js = highlighter.find_syntax("js").map(|s| s.name.clone());
        assert!(js.is_some());
        assert_eq!(highlighter.find_syntax("jsx").map(|s| s.name.clone()), js);
        assert_eq!(highlighter.find_syntax("tsx").map(|s| s.name.clone()), js);
        assert_eq!(
            highlighter.find_syntax("js title=demo").map(|s| s.name.clone()),
            js
        );
    }

    #[test]
    fn test_empty_info_string_has_no_syntax() {
        assert!(get_highlighter().find_syntax("").is_none());
        assert!(get_highlighter().find_syntax("   ").is_none());
    }

    #[test]
    fn test_syntect_to_egui_color() {
        let egui_color = syntect_to_egui_color(syntect::highlighting::Color {
            r: 255,
            g: 128,
            b: 64,
            a: 255,
        });
        assert_eq!(egui_color, Color32::from_rgb(255, 128, 64));
    }
}
