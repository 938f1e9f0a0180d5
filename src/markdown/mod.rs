//! Markdown conversion module
//!
//! Turns MDX-like source (markdown with embedded HTML/JSX) into formatted
//! HTML using the comrak library, a CommonMark + GFM compatible parser.
//!
//! # Stages
//! - `normalize`: rewrite JSX `className` attributes to `class`
//! - `parser`: markdown to HTML through comrak
//! - `reformat`: re-indent the HTML one node per line
//! - `pipeline`: runs the three stages on every source change
//!
//! # Example
//! ```ignore
//! use crate::markdown::{ComrakParser, Pipeline};
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.attach_parser(ComrakParser::new());
//! pipeline.set_source("# Hello\n\n<div className=\"note\">Hi</div>");
//! assert!(pipeline.output().contains("class=\"note\""));
//! ```

pub mod loader;
pub mod normalize;
mod parser;
pub mod pipeline;
pub mod reformat;
pub mod syntax;

pub use loader::ParserLoader;
pub use normalize::normalize_attributes;
pub use parser::{ComrakParser, MarkdownOptions, MarkdownParser};
pub use pipeline::Pipeline;
pub use syntax::highlight_code;
