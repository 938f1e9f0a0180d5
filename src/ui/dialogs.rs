//! Modal confirmation dialogs.

use eframe::egui::{self, Color32, Key, RichText};

/// Message of the clear confirmation.
pub const CLEAR_CONFIRM_MESSAGE: &str =
    "Are you sure you want to clear the editor? This will also clear your auto-saved data.";

/// Result from showing a confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResult {
    /// No action taken (dialog still open)
    None,
    /// Dialog was cancelled
    Cancelled,
    /// The user confirmed
    Confirmed,
}

/// Show the "clear editor" confirmation.
pub fn show_clear_dialog(ctx: &egui::Context, is_dark: bool) -> ConfirmResult {
    let mut result = ConfirmResult::None;

    // Handle escape key
    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return ConfirmResult::Cancelled;
    }

    let bg_color = if is_dark {
        Color32::from_rgb(40, 40, 45)
    } else {
        Color32::from_rgb(250, 250, 250)
    };

    let border_color = if is_dark {
        Color32::from_rgb(70, 70, 80)
    } else {
        Color32::from_rgb(180, 180, 190)
    };

    egui::Window::new("🗑 Clear Editor")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(350.0);
            ui.set_max_width(420.0);

            ui.add_space(8.0);
            ui.label(CLEAR_CONFIRM_MESSAGE);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let clear_button =
                        egui::Button::new(RichText::new("Clear").color(Color32::WHITE))
                            .fill(Color32::from_rgb(200, 60, 60));

                    if ui.add(clear_button).clicked() {
                        result = ConfirmResult::Confirmed;
                    }

                    ui.add_space(8.0);

                    if ui.button("Cancel").clicked() {
                        result = ConfirmResult::Cancelled;
                    }
                });
            });

            ui.add_space(4.0);
        });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_dialog_idle_frame() {
        let ctx = egui::Context::default();
        let mut result = ConfirmResult::Cancelled;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            result = show_clear_dialog(ctx, true);
        });
        assert_eq!(result, ConfirmResult::None);
    }

    #[test]
    fn test_escape_cancels() {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: Key::Escape,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let mut result = ConfirmResult::None;
        let _ = ctx.run(input, |ctx| {
            result = show_clear_dialog(ctx, false);
        });
        assert_eq!(result, ConfirmResult::Cancelled);
    }
}
