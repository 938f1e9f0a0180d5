//! Native preview module for MDX Converter
//!
//! Renders the converted document inside the app. The element tree is
//! built from comrak's AST of the normalized source and drawn with egui.

pub mod elements;
mod render;

pub use elements::{build_preview, PreviewElement};
pub use render::PreviewRenderer;
