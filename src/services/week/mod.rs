//! Week grid shell.
//!
//! Owns the drag controller and move history for one calendar instance and
//! routes their results to the host through [`CalendarHost`]. The host keeps
//! the appointment list and the displayed week; the shell only reads them.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::models::appointment::{Appointment, AvailabilityBand, TimedAppointment, DAYS_PER_WEEK};
use crate::models::settings::GridConfig;
use crate::services::drag::{
    CancelReason, DragController, DragOutcome, MoveHistory, PointerInput,
};
use crate::services::geometry::ColumnGeometryProvider;
use crate::services::layout::DayColumnLayout;

/// Callbacks from the calendar to the page that embeds it.
pub trait CalendarHost {
    /// A drag or undo/redo produced a new appointment list.
    fn on_change(&mut self, events: Vec<Appointment>);

    fn on_prev_week(&mut self);

    fn on_next_week(&mut self);

    /// An appointment was clicked without being dragged.
    fn on_select(&mut self, _id: &str) {}
}

/// Week navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekNavigation {
    Previous,
    Next,
}

/// Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// The seven calendar dates shown for a week.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK as usize] {
    std::array::from_fn(|offset| week_start + Duration::days(offset as i64))
}

/// Header label such as `"3 Mar - 9 Mar 2025"`.
pub fn week_label(week_start: NaiveDate) -> String {
    let end = week_start + Duration::days(DAYS_PER_WEEK as i64 - 1);
    format!("{} - {}", week_start.format("%-d %b"), end.format("%-d %b %Y"))
}

/// One ruler label per hour in the grid window, both ends included.
pub fn hour_labels(config: &GridConfig) -> Vec<String> {
    config.hour_marks().map(|hour| format!("{:02}:00", hour)).collect()
}

/// Day column and pixel offset of the current-time line, when `now` falls
/// inside the displayed week and grid window.
pub fn now_indicator(now: NaiveDateTime, week_start: NaiveDate, config: &GridConfig) -> Option<(u8, f32)> {
    let offset = (now.date() - week_start).num_days();
    if !(0..DAYS_PER_WEEK as i64).contains(&offset) {
        return None;
    }

    let minutes = (now.hour() as i64 - config.hours.start as i64) * 60 + now.minute() as i64;
    if minutes < 0 || minutes > config.total_minutes() as i64 {
        return None;
    }

    Some((offset as u8, minutes as f32 * config.pixels_per_minute()))
}

/// Convert a committed list into begin/end timestamps for hosts that store
/// appointments that way.
pub fn into_timed(events: &[Appointment], week_start: NaiveDate) -> Vec<TimedAppointment> {
    events.iter().map(|event| event.to_timed(week_start)).collect()
}

/// Week-relative appointments for the timed records that start inside the
/// displayed week. Records outside it are skipped.
pub fn from_timed(records: &[TimedAppointment], week_start: NaiveDate) -> Vec<Appointment> {
    records
        .iter()
        .filter_map(|record| Appointment::from_timed(record, week_start))
        .collect()
}

pub struct WeekGrid {
    week_start: NaiveDate,
    controller: DragController,
    history: MoveHistory,
}

impl WeekGrid {
    pub fn new(week_start: NaiveDate, config: GridConfig) -> Self {
        Self {
            week_start: week_start_for(week_start),
            controller: DragController::new(config),
            history: MoveHistory::new(),
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Follow the host's week anchor. A gesture in flight is cancelled when
    /// the week actually changes, and the history is cleared since its day
    /// indices belong to the old week.
    pub fn set_week_start(&mut self, date: NaiveDate) {
        let week_start = week_start_for(date);
        if week_start != self.week_start {
            self.controller.cancel(CancelReason::Explicit);
            self.history.clear();
            self.week_start = week_start;
        }
    }

    pub fn dates(&self) -> [NaiveDate; DAYS_PER_WEEK as usize] {
        week_dates(self.week_start)
    }

    pub fn config(&self) -> &GridConfig {
        self.controller.config()
    }

    /// Replace the grid configuration. A real change drops the gesture and
    /// the history, whose recorded starts may fall outside the new hours.
    pub fn set_config(&mut self, config: GridConfig) {
        if &config != self.controller.config() {
            self.history.clear();
            self.controller.set_config(config);
        }
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Feed one pointer input and notify the host of any commit or click.
    pub fn handle_input(
        &mut self,
        input: PointerInput,
        events: &[Appointment],
        geometry: &dyn ColumnGeometryProvider,
        host: &mut dyn CalendarHost,
    ) -> DragOutcome {
        let outcome = self.controller.handle(input, events, geometry);
        match &outcome {
            DragOutcome::Committed { events, record } => {
                self.history.record(record.clone());
                host.on_change(events.clone());
            }
            DragOutcome::Clicked { id } => host.on_select(id),
            _ => {}
        }
        outcome
    }

    /// Forward a navigation request. The host owns the week anchor and is
    /// expected to call [`WeekGrid::set_week_start`] in response.
    pub fn navigate(&mut self, direction: WeekNavigation, host: &mut dyn CalendarHost) {
        self.controller.cancel(CancelReason::Explicit);
        match direction {
            WeekNavigation::Previous => host.on_prev_week(),
            WeekNavigation::Next => host.on_next_week(),
        }
    }

    pub fn undo(&mut self, events: &[Appointment], host: &mut dyn CalendarHost) -> bool {
        if !self.controller.state().is_idle() {
            return false;
        }
        match self.history.undo(events) {
            Some(updated) => {
                host.on_change(updated);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self, events: &[Appointment], host: &mut dyn CalendarHost) -> bool {
        if !self.controller.state().is_idle() {
            return false;
        }
        match self.history.redo(events) {
            Some(updated) => {
                host.on_change(updated);
                true
            }
            None => false,
        }
    }

    /// Lay out all seven columns for the current render, first dropping any
    /// gesture whose appointment has disappeared.
    pub fn column_layouts(&mut self, events: &[Appointment], availability: &[AvailabilityBand]) -> Vec<DayColumnLayout> {
        self.controller.reconcile(events);
        let indicator = self.controller.drop_indicator();
        let dragging_id = self.controller.dragging_id();
        (0..DAYS_PER_WEEK)
            .map(|day| {
                DayColumnLayout::build(
                    day,
                    self.controller.config(),
                    events,
                    availability,
                    indicator,
                    dragging_id,
                )
            })
            .collect()
    }

    /// Cancel any gesture because the calendar is going away.
    pub fn teardown(&mut self) -> DragOutcome {
        self.controller.cancel(CancelReason::Teardown)
    }
}

impl Drop for WeekGrid {
    fn drop(&mut self) {
        self.teardown();
    }
}
