//! UI components for MDX Converter
//!
//! This module contains reusable UI widgets and components.

mod cheat_sheet;
mod dialogs;
mod ribbon;
pub mod status_bar;

pub use cheat_sheet::CheatSheet;
pub use dialogs::{show_clear_dialog, ConfirmResult};
pub use ribbon::{output_toolbar, source_toolbar, Ribbon, RibbonAction};
pub use status_bar::DocumentStats;
