//! Status bar showing the week's appointment count, the current selection
//! or last message, and keyboard hints that depend on the drag state.

use super::ClinicCalendarApp;
use egui::{Color32, RichText};

const SEPARATOR_WIDTH: f32 = 8.0;

fn secondary_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(160)
    } else {
        Color32::from_gray(100)
    }
}

fn hint_text_color(is_dark: bool) -> Color32 {
    if is_dark {
        Color32::from_gray(140)
    } else {
        Color32::from_gray(110)
    }
}

impl ClinicCalendarApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let is_dark = self.active_theme.is_dark;

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    self.render_status_left(ui, is_dark);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        self.render_status_hints(ui, is_dark);
                    });
                });
            });
    }

    fn render_status_left(&self, ui: &mut egui::Ui, is_dark: bool) {
        let secondary_color = secondary_text_color(is_dark);
        let count = self.appointments.len();
        let label = match count {
            1 => "1 appointment this week".to_string(),
            n => format!("{} appointments this week", n),
        };
        ui.label(RichText::new(label).small().color(secondary_color));

        if let Some(message) = &self.status_message {
            ui.add_space(SEPARATOR_WIDTH);
            ui.separator();
            ui.add_space(SEPARATOR_WIDTH);
            ui.label(RichText::new(message).small());
        }
    }

    fn render_status_hints(&self, ui: &mut egui::Ui, is_dark: bool) {
        let hint_color = hint_text_color(is_dark);
        let grid = self.week_view.grid();

        if grid.controller().is_dragging() {
            ui.label(RichText::new("Esc: Cancel drag").small().color(hint_color));
            return;
        }

        ui.label(RichText::new("Arrows: Week").small().color(hint_color));
        if grid.history().can_redo() {
            ui.add_space(SEPARATOR_WIDTH);
            ui.label(RichText::new("Ctrl+Shift+Z: Redo").small().color(hint_color));
        }
        if let Some(description) = grid.history().undo_description() {
            ui.add_space(SEPARATOR_WIDTH);
            ui.label(
                RichText::new(format!("Ctrl+Z: {}", description))
                    .small()
                    .color(hint_color),
            );
        }
    }
}
