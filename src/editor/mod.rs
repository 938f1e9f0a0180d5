//! Editor module for MDX Converter
//!
//! The source text editor widget.

mod widget;

pub use widget::SourceEditor;
