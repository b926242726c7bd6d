use super::ClinicCalendarApp;
use crate::services::week::WeekNavigation;
use chrono::{Duration, Local};

impl ClinicCalendarApp {
    pub(super) fn navigate(&mut self, direction: WeekNavigation) {
        match direction {
            WeekNavigation::Previous => self.navigate_previous(),
            WeekNavigation::Next => self.navigate_next(),
        }
    }

    pub(super) fn navigate_previous(&mut self) {
        self.current_date -= Duration::weeks(1);
        self.reload_week();
    }

    pub(super) fn navigate_next(&mut self) {
        self.current_date += Duration::weeks(1);
        self.reload_week();
    }

    pub(super) fn jump_to_today(&mut self) {
        self.current_date = Local::now().date_naive();
        self.reload_week();
    }
}
