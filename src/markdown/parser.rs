//! Markdown parser implementation using comrak
//!
//! This module wraps comrak behind the `MarkdownParser` trait so the
//! conversion pipeline can treat the parser as a replaceable, fallible
//! collaborator.

use comrak::{markdown_to_html, Options};

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration options for markdown rendering.
///
/// The defaults are the converter's fixed configuration: soft newlines
/// render as `<br />` and the GitHub Flavored Markdown extensions are on.
/// Raw HTML is always passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Render soft line breaks as hard breaks
    pub breaks: bool,
    /// Enable GFM tables, strikethrough, task lists and autolinks
    pub gfm: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            breaks: true,
            gfm: true,
        }
    }
}

impl MarkdownOptions {
    /// Convert to comrak Options.
    pub(crate) fn to_comrak_options(self) -> Options {
        let mut options = Options::default();

        // Extension options
        options.extension.strikethrough = self.gfm;
        options.extension.table = self.gfm;
        options.extension.autolink = self.gfm;
        options.extension.tasklist = self.gfm;

        // Render options: embedded HTML/JSX must survive verbatim
        options.render.hardbreaks = self.breaks;
        options.render.unsafe_ = true;

        options
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Converts markdown source text into an HTML string.
///
/// Implementations may fail; the pipeline reports the error message and
/// keeps its previous output.
pub trait MarkdownParser: Send {
    /// Render `text` to HTML.
    fn parse(&self, text: &str) -> Result<String>;
}

/// The comrak-backed parser used by the application.
#[derive(Debug, Clone, Default)]
pub struct ComrakParser {
    options: MarkdownOptions,
}

impl ComrakParser {
    /// Create a parser with the converter's fixed options.
    pub fn new() -> Self {
        Self::default()
    }

    /// The options this parser renders with.
    pub fn options(&self) -> MarkdownOptions {
        self.options
    }
}

impl MarkdownParser for ComrakParser {
    fn parse(&self, text: &str) -> Result<String> {
        Ok(markdown_to_html(text, &self.options.to_comrak_options()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> String {
        ComrakParser::new().parse(text).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = MarkdownOptions::default();
        assert!(options.breaks);
        assert!(options.gfm);
        assert_eq!(ComrakParser::new().options(), options);
    }

    #[test]
    fn test_heading() {
        assert_eq!(render("# Title"), "<h1>Title</h1>\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_soft_break_renders_as_br() {
        let html = render("line one\nline two");
        assert!(html.contains("<br />"), "got: {html}");
    }

    #[test]
    fn test_soft_break_ignored_without_breaks() {
        let parser = ComrakParser {
            options: MarkdownOptions {
                breaks: false,
                gfm: true,
            },
        };
        let html = parser.parse("line one\nline two").unwrap();
        assert!(!html.contains("<br"), "got: {html}");
    }

    #[test]
    fn test_inline_html_passes_through() {
        let html = render(r#"**Bold** and <div class="x">Y</div>"#);
        assert!(
            html.contains(r#"<strong>Bold</strong> and <div class="x">Y</div>"#),
            "got: {html}"
        );
    }

    #[test]
    fn test_html_block_passes_through_unescaped() {
        let source = "<div class=\"note\">\n  <p>Raw</p>\n</div>\n";
        let html = render(source);
        assert!(html.contains("<div class=\"note\">"), "got: {html}");
        assert!(!html.contains("&lt;div"), "got: {html}");
    }

    #[test]
    fn test_script_is_not_filtered() {
        let html = render("<script>alert(1)</script>\n");
        assert!(html.contains("<script>alert(1)</script>"), "got: {html}");
    }

    #[test]
    fn test_gfm_table() {
        let html = render("| A | B |\n| :--- | :---: |\n| 1 | 2 |");
        assert!(html.contains("<table>"), "got: {html}");
        assert!(html.contains("<th"), "got: {html}");
    }

    #[test]
    fn test_gfm_strikethrough_and_tasklist() {
        let html = render("~~gone~~\n\n- [x] done\n- [ ] todo");
        assert!(html.contains("<del>gone</del>"), "got: {html}");
        assert!(html.contains("type=\"checkbox\""), "got: {html}");
    }

    #[test]
    fn test_gfm_autolink() {
        let html = render("see https://example.com now");
        assert!(html.contains("<a href=\"https://example.com\">"), "got: {html}");
    }

    #[test]
    fn test_fenced_code_language_class() {
        let html = render("```javascript\nconst a = 1;\n```");
        assert!(
            html.contains("<pre><code class=\"language-javascript\">"),
            "got: {html}"
        );
    }
}
