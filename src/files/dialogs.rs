//! Native file dialog integration using the rfd crate

use rfd::FileDialog;
use std::path::{Path, PathBuf};

use crate::export::ExportKind;

/// Opens a native save dialog for an export.
///
/// The dialog suggests the export's default file name and starts in
/// `initial_dir` when given. Returns `None` if cancelled.
pub fn save_export_dialog(kind: ExportKind, initial_dir: Option<&Path>) -> Option<PathBuf> {
    let (filter_name, extensions) = kind.filter();
    let mut dialog = FileDialog::new()
        .set_title(kind.dialog_title())
        .set_file_name(kind.default_file_name())
        .add_filter(filter_name, extensions)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.save_file()
}
