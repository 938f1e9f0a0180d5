//! File dialogs for MDX Converter

pub mod dialogs;

pub use dialogs::save_export_dialog;
