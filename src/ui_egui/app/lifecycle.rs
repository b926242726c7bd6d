use std::collections::HashSet;

use chrono::Local;

use super::{ClinicCalendarApp, MIN_ROOT_HEIGHT, MIN_ROOT_WIDTH};
use crate::models::appointment::{Appointment, AvailabilityBand, TimedAppointment};
use crate::services::settings::SettingsService;
use crate::services::week::{from_timed, into_timed, week_start_for};
use crate::ui_egui::theme::CalendarTheme;
use crate::ui_egui::views::{WeekCalendarView, WeekViewResponse};

impl ClinicCalendarApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings_service: SettingsService,
        records: Vec<TimedAppointment>,
        availability: Vec<AvailabilityBand>,
    ) -> Self {
        let settings = settings_service.load_or_default();
        let current_date = Local::now().date_naive();
        let week_start = week_start_for(current_date);
        let active_theme = CalendarTheme::from_colors(&settings.theme, settings.dark_mode);
        active_theme.apply_to_context(&cc.egui_ctx);

        log::info!(
            "Loaded {} appointments, grid {:02}:00-{:02}:00 in {} minute slots",
            records.len(),
            settings.grid.hours.start,
            settings.grid.hours.end,
            settings.grid.slot_minutes
        );

        let appointments = from_timed(&records, week_start);
        let week_view = WeekCalendarView::new(week_start, &settings);

        Self {
            settings_service,
            settings,
            active_theme,
            records,
            appointments,
            availability,
            current_date,
            week_view,
            selected: None,
            status_message: None,
            theme_applied: true,
        }
    }

    pub(super) fn apply_theme(&mut self, ctx: &egui::Context) {
        self.active_theme = CalendarTheme::from_colors(&self.settings.theme, self.settings.dark_mode);
        self.active_theme.apply_to_context(ctx);
        self.week_view.apply_settings(&self.settings);
        self.theme_applied = true;
    }

    pub(super) fn handle_update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            self.apply_theme(ctx);
        }

        self.handle_keyboard_shortcuts(ctx);
        self.render_status_bar(ctx);

        let now = Local::now().naive_local();
        let response = egui::CentralPanel::default()
            .show(ctx, |ui| {
                ui.set_min_size(egui::vec2(MIN_ROOT_WIDTH, MIN_ROOT_HEIGHT));
                self.week_view.show(
                    ui,
                    &self.appointments,
                    &self.availability,
                    &self.active_theme,
                    now,
                )
            })
            .inner;

        self.apply_view_response(response);
    }

    /// Apply what the week view reported this frame.
    pub(super) fn apply_view_response(&mut self, response: WeekViewResponse) {
        if let Some(events) = response.changed {
            self.store_week(events);
        }
        if let Some(id) = response.selected {
            self.status_message = self
                .appointments
                .iter()
                .find(|appointment| appointment.id == id)
                .map(|appointment| format!("Selected {} at {}", appointment.title, appointment.start));
            self.selected = Some(id);
        }
        if let Some(direction) = response.navigation {
            self.navigate(direction);
        }
    }

    /// Replace the displayed week's records with `events`.
    pub(super) fn store_week(&mut self, events: Vec<Appointment>) {
        let week_start = self.week_view.week_start();
        let in_week: HashSet<String> = from_timed(&self.records, week_start)
            .into_iter()
            .map(|appointment| appointment.id)
            .collect();
        self.records.retain(|record| !in_week.contains(&record.id));
        self.records.extend(into_timed(&events, week_start));
        self.appointments = events;
    }

    /// Rebuild the week-relative list after the displayed week changed.
    pub(super) fn reload_week(&mut self) {
        self.week_view.set_week_start(self.current_date);
        self.appointments = from_timed(&self.records, self.week_view.week_start());
        self.selected = None;
    }

    /// Flip between light and dark visuals and persist the choice.
    pub(super) fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.theme_applied = false;
        if let Err(e) = self.settings_service.update(&self.settings) {
            log::error!("Failed to save settings: {}", e);
            self.status_message = Some("Could not save settings".to_string());
        }
    }

    pub(super) fn handle_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let outcome = self.week_view.cancel_drag();
        log::debug!("Calendar closed: {:?}", outcome);
    }
}
