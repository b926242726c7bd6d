use super::ClinicCalendarApp;

impl ClinicCalendarApp {
    /// App-level keys. Escape and undo/redo belong to the week view.
    pub(super) fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        let (previous, next, today, dark) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft) && !i.pointer.any_down(),
                i.key_pressed(egui::Key::ArrowRight) && !i.pointer.any_down(),
                i.modifiers.ctrl && i.key_pressed(egui::Key::T),
                i.modifiers.ctrl && i.key_pressed(egui::Key::D),
            )
        });

        if previous {
            self.navigate_previous();
        }
        if next {
            self.navigate_next();
        }
        if today {
            self.jump_to_today();
        }
        if dark {
            self.toggle_dark_mode();
        }
    }
}
