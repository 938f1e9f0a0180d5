//! Clipboard Operations
//!
//! Cross-platform clipboard access through the arboard crate.

use arboard::Clipboard;
use log::debug;

use crate::error::Result;

/// What the Copy action puts on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardPayload<'a> {
    /// Plain text only
    Text(&'a str),
    /// An HTML flavor with a plain text alternative, for apps that accept
    /// rich paste
    Html { html: &'a str, alt_text: &'a str },
}

impl ClipboardPayload<'_> {
    /// The text a plain-text paste produces.
    pub fn plain_text(&self) -> &str {
        match self {
            ClipboardPayload::Text(text) => text,
            ClipboardPayload::Html { alt_text, .. } => alt_text,
        }
    }
}

/// Put `payload` on the system clipboard.
pub fn copy_to_clipboard(payload: ClipboardPayload<'_>) -> Result<()> {
    let mut clipboard = Clipboard::new()?;

    match payload {
        ClipboardPayload::Text(text) => clipboard.set_text(text)?,
        ClipboardPayload::Html { html, alt_text } => clipboard.set_html(html, Some(alt_text))?,
    }

    debug!("Copied {} bytes to clipboard", payload.plain_text().len());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
