mod lifecycle;
mod navigation;
mod sample;
mod shortcuts;
mod status_bar;

use chrono::NaiveDate;

use crate::models::appointment::{Appointment, AvailabilityBand, TimedAppointment};
use crate::models::settings::CalendarSettings;
use crate::services::settings::SettingsService;
use crate::ui_egui::theme::CalendarTheme;
use crate::ui_egui::views::WeekCalendarView;

pub use self::sample::{sample_appointments, sample_availability};

const MIN_ROOT_WIDTH: f32 = 640.0;
const MIN_ROOT_HEIGHT: f32 = 360.0;

pub struct ClinicCalendarApp {
    settings_service: SettingsService,
    settings: CalendarSettings,
    active_theme: CalendarTheme,
    /// Host-side store of all appointments with real timestamps
    records: Vec<TimedAppointment>,
    /// Week-relative view of `records` for the displayed week
    appointments: Vec<Appointment>,
    availability: Vec<AvailabilityBand>,
    current_date: NaiveDate,
    week_view: WeekCalendarView,
    selected: Option<String>,
    status_message: Option<String>,
    theme_applied: bool,
}

impl eframe::App for ClinicCalendarApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.handle_update(ctx, frame);
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.handle_exit(gl);
    }
}
