//! Browser preview document
//!
//! The native preview approximates the output. For an exact render, the
//! converted HTML is wrapped in a small standalone page styled from the
//! current theme and opened in the system browser.

use log::info;
use std::fs;
use std::path::PathBuf;

use crate::config::APP_DIR_NAME;
use crate::error::{Error, Result};
use crate::theme::ThemeColors;
use eframe::egui::Color32;

/// File name of the browser preview inside the temp directory.
const PREVIEW_FILE_NAME: &str = "preview.html";

// ─────────────────────────────────────────────────────────────────────────────
// Document Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap an HTML fragment in a complete, themed HTML page.
///
/// The fragment is inserted verbatim; it is the converter's output and is
/// meant to be rendered, not escaped.
pub fn browser_document(body: &str, colors: &ThemeColors) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="MDX Converter">
    <title>MDX Converter Preview</title>
    <style>
{base_css}
{theme_css}
    </style>
</head>
<body>
    <article class="preview-content">
{body}
    </article>
</body>
</html>"#,
        base_css = BASE_CSS,
        theme_css = theme_css(colors),
        body = body,
    )
}

/// Write the themed page to the temp directory and open it in the default
/// browser. Returns the written path.
pub fn open_in_browser(body: &str, colors: &ThemeColors) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(APP_DIR_NAME);
    fs::create_dir_all(&dir).map_err(|e| Error::FileWrite {
        path: dir.clone(),
        source: e,
    })?;

    let path = dir.join(PREVIEW_FILE_NAME);
    fs::write(&path, browser_document(body, colors)).map_err(|e| Error::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    open::that(&path).map_err(|e| {
        Error::Application(format!("Failed to open browser for '{}': {}", path.display(), e))
    })?;

    info!("Opened browser preview: {}", path.display());
    Ok(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// CSS Generation
// ─────────────────────────────────────────────────────────────────────────────

/// Layout and typography for the preview page.
const BASE_CSS: &str = r#"
*, *::before, *::after { box-sizing: border-box; }

body {
    margin: 0;
    font-family: ui-sans-serif, system-ui, -apple-system, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif;
    line-height: 1.7;
}

.preview-content { max-width: 860px; margin: 0 auto; padding: 2rem; }

.preview-content h1 { font-size: 2.25em; font-weight: 800; border-bottom: 2px solid; margin: 1.5em 0 0.8em; padding-bottom: 0.3em; line-height: 1.2; }
.preview-content h2 { font-size: 1.75em; font-weight: 700; border-bottom: 1px solid; margin: 1.5em 0 0.8em; padding-bottom: 0.3em; line-height: 1.3; }
.preview-content h3 { font-size: 1.5em; font-weight: 600; margin: 1.4em 0 0.6em; line-height: 1.4; }
.preview-content h4 { font-size: 1.25em; font-weight: 600; margin: 1.2em 0 0.5em; }

.preview-content p { margin: 0 0 1.25em; }
.preview-content ul { list-style-type: disc; padding-left: 1.6em; margin-bottom: 1.25em; }
.preview-content ol { list-style-type: decimal; padding-left: 1.6em; margin-bottom: 1.25em; }
.preview-content li { margin-bottom: 0.5em; }

.preview-content blockquote { border-left: 4px solid; padding: 1em; margin: 1.5em 0; border-radius: 0 0.5rem 0.5rem 0; font-style: italic; }

.preview-content pre { padding: 1.25em; border-radius: 0.5rem; overflow-x: auto; margin: 1.5em 0; }
.preview-content code { font-family: ui-monospace, 'JetBrains Mono', Consolas, monospace; font-size: 0.9em; }
.preview-content :not(pre) > code { padding: 0.2em 0.4em; border-radius: 0.25em; font-weight: 500; }

.preview-content img { border-radius: 0.5rem; max-width: 100%; height: auto; }
.preview-content a { text-decoration: underline; text-underline-offset: 2px; }
.preview-content hr { border: 0; border-top: 2px solid; margin: 2.5em 0; }

.preview-content table { width: 100%; border-collapse: collapse; margin: 1.5em 0; font-size: 0.95em; }
.preview-content th, .preview-content td { border: 1px solid; padding: 0.75em; text-align: left; }
.preview-content th { font-weight: 600; }
"#;

/// Colors for the preview page from the theme palette.
fn theme_css(colors: &ThemeColors) -> String {
    let preview = &colors.preview;
    format!(
        r#"
:root {{ color-scheme: {scheme}; }}
body {{ background-color: {bg}; color: {text}; }}
.preview-content h1 {{ color: {h1}; border-bottom-color: {rule}; }}
.preview-content h2 {{ color: {h2}; border-bottom-color: {rule}; }}
.preview-content h3, .preview-content h4, .preview-content h5, .preview-content h6 {{ color: {h3}; }}
.preview-content a {{ color: {link}; }}
.preview-content blockquote {{ border-left-color: {quote_border}; background-color: {quote_bg}; color: {quote_text}; }}
.preview-content pre {{ background-color: #1e293b; color: #e2e8f0; }}
.preview-content :not(pre) > code {{ background-color: {code_bg}; color: {code_fg}; }}
.preview-content hr {{ border-top-color: {rule}; }}
.preview-content th, .preview-content td {{ border-color: {table_border}; }}
.preview-content th {{ background-color: {table_header_bg}; }}
"#,
        scheme = if colors.is_dark() { "dark" } else { "light" },
        bg = css_color(colors.base.background),
        text = css_color(colors.text.primary),
        h1 = css_color(preview.heading(1)),
        h2 = css_color(preview.heading(2)),
        h3 = css_color(preview.heading(3)),
        rule = css_color(preview.rule),
        link = css_color(colors.text.link),
        quote_border = css_color(preview.quote_border),
        quote_bg = css_color(preview.quote_bg),
        quote_text = css_color(preview.quote_text),
        code_bg = css_color(preview.code_bg),
        code_fg = css_color(preview.code_fg),
        table_border = css_color(preview.table_border),
        table_header_bg = css_color(preview.table_header_bg),
    )
}

/// Convert Color32 to a CSS hex color.
fn css_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
