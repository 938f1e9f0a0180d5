//! Source and HTML export to files
//!
//! Exports are raw byte dumps of the in-memory text: no BOM, no newline
//! conversion, no wrapper document.

use log::info;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// What is being exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// The editor source text
    Markdown,
    /// The converted HTML
    Html,
}

impl ExportKind {
    /// Suggested file name in the save dialog.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportKind::Markdown => "document.md",
            ExportKind::Html => "document.html",
        }
    }

    /// Save dialog title.
    pub fn dialog_title(self) -> &'static str {
        match self {
            ExportKind::Markdown => "Save Source MD",
            ExportKind::Html => "Export HTML",
        }
    }

    /// Save dialog filter name and extensions.
    pub fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            ExportKind::Markdown => ("Markdown / MDX", &["md", "mdx", "markdown"]),
            ExportKind::Html => ("HTML", &["html", "htm"]),
        }
    }

    /// Noun for status messages.
    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Markdown => "Markdown",
            ExportKind::Html => "HTML",
        }
    }
}

/// Write `contents` to `path` exactly as given.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents.as_bytes()).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("Exported {} bytes to {}", contents.len(), path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
