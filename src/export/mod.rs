//! Export Module for MDX Converter
//!
//! Getting the document out of the app: files, the clipboard, and a
//! browser preview.
//!
//! - `file.rs` - Source (`document.md`) and HTML (`document.html`) export
//! - `clipboard.rs` - Platform clipboard operations
//! - `html.rs` - Standalone themed page for the browser preview

pub mod clipboard;
pub mod file;
pub mod html;

pub use clipboard::{copy_to_clipboard, ClipboardPayload};
pub use file::{write_export, ExportKind};
pub use html::open_in_browser;
