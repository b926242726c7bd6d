// Appointment module
// Week-relative appointment and availability models shared with the host page

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::utils::time::{end_time, to_minutes};

/// Number of day columns in the week grid.
pub const DAYS_PER_WEEK: u8 = 7;

/// An appointment positioned relative to the displayed week.
///
/// `day_index` counts from the week start (Monday = 0) and `start` is a
/// wall-clock `"HH:MM"` string. `status` is an opaque display tag: it picks a
/// visual style and never changes how the block can be dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub day_index: u8,
    pub start: String,
    pub duration: u32,
    pub title: String,
    #[serde(default)]
    pub status: String,
}

impl Appointment {
    /// Create a new appointment with required fields
    ///
    /// # Examples
    /// ```
    /// use clinic_calendar::models::appointment::Appointment;
    ///
    /// let appt = Appointment::new("e1", 0, "09:00", 30, "Jane Doe").unwrap();
    /// assert_eq!(appt.end(), "09:30");
    /// ```
    pub fn new(
        id: impl Into<String>,
        day_index: u8,
        start: impl Into<String>,
        duration: u32,
        title: impl Into<String>,
    ) -> Result<Self, String> {
        let appointment = Self {
            id: id.into(),
            day_index,
            start: start.into(),
            duration,
            title: title.into(),
            status: "confirmed".to_string(),
        };
        appointment.validate()?;
        Ok(appointment)
    }

    /// Create a builder for constructing appointments with optional fields
    pub fn builder() -> AppointmentBuilder {
        AppointmentBuilder::new()
    }

    /// Validate the appointment
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Appointment id cannot be empty".to_string());
        }

        if self.day_index >= DAYS_PER_WEEK {
            return Err(format!(
                "Day index {} is outside the week (0-{})",
                self.day_index,
                DAYS_PER_WEEK - 1
            ));
        }

        if self.duration == 0 {
            return Err("Appointment duration must be positive".to_string());
        }

        Ok(())
    }

    /// Minutes from the grid start hour to the appointment start.
    pub fn start_minutes(&self, grid_start_hour: u32) -> i32 {
        to_minutes(&self.start, grid_start_hour)
    }

    /// Wall-clock end time as `"HH:MM"`.
    pub fn end(&self) -> String {
        end_time(&self.start, self.duration)
    }

    /// Copy of this appointment placed at another day and start time.
    pub fn moved_to(&self, day_index: u8, start: impl Into<String>) -> Self {
        Self {
            day_index,
            start: start.into(),
            ..self.clone()
        }
    }

    /// Convert from the host's begin/end timestamp form.
    ///
    /// Returns `None` when the appointment does not start inside the week
    /// beginning at `week_start` or when its end is not after its start.
    pub fn from_timed(timed: &TimedAppointment, week_start: NaiveDate) -> Option<Self> {
        let offset = (timed.starts_at.date() - week_start).num_days();
        if !(0..DAYS_PER_WEEK as i64).contains(&offset) {
            return None;
        }

        let duration = (timed.ends_at - timed.starts_at).num_minutes();
        if duration <= 0 {
            return None;
        }

        Some(Self {
            id: timed.id.clone(),
            day_index: offset as u8,
            start: timed.starts_at.format("%H:%M").to_string(),
            duration: duration as u32,
            title: timed.title.clone(),
            status: timed.status.clone(),
        })
    }

    /// Convert to the host's begin/end timestamp form for the week
    /// beginning at `week_start`.
    pub fn to_timed(&self, week_start: NaiveDate) -> TimedAppointment {
        let date = week_start + Duration::days(self.day_index as i64);
        let minutes = to_minutes(&self.start, 0).clamp(0, 24 * 60 - 1) as u32;
        let time = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN);
        let starts_at = date.and_time(time);

        TimedAppointment {
            id: self.id.clone(),
            title: self.title.clone(),
            status: self.status.clone(),
            starts_at,
            ends_at: starts_at + Duration::minutes(self.duration as i64),
        }
    }
}

/// Builder for creating appointments with optional fields
pub struct AppointmentBuilder {
    id: Option<String>,
    day_index: u8,
    start: Option<String>,
    duration: Option<u32>,
    title: String,
    status: String,
}

impl AppointmentBuilder {
    /// Create a new appointment builder
    pub fn new() -> Self {
        Self {
            id: None,
            day_index: 0,
            start: None,
            duration: None,
            title: String::new(),
            status: "confirmed".to_string(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn day_index(mut self, day_index: u8) -> Self {
        self.day_index = day_index;
        self
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Build the appointment
    pub fn build(self) -> Result<Appointment, String> {
        let id = self.id.ok_or("Appointment id is required")?;
        let start = self.start.ok_or("Appointment start time is required")?;
        let duration = self.duration.ok_or("Appointment duration is required")?;

        let appointment = Appointment {
            id,
            day_index: self.day_index,
            start,
            duration,
            title: self.title,
            status: self.status,
        };

        appointment.validate()?;
        Ok(appointment)
    }
}

impl Default for AppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A non-interactive band such as clinic opening hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityBand {
    pub day_index: u8,
    pub start: String,
    pub end: String,
}

impl AvailabilityBand {
    pub fn new(day_index: u8, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day_index,
            start: start.into(),
            end: end.into(),
        }
    }

    /// Band length in minutes; inverted bands have zero length.
    pub fn duration_minutes(&self) -> u32 {
        let length = to_minutes(&self.end, 0) as i64 - to_minutes(&self.start, 0) as i64;
        length.clamp(0, u32::MAX as i64) as u32
    }
}

/// Appointment with explicit begin/end timestamps, as stored by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedAppointment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub status: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl TimedAppointment {
    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.ends_at - self.starts_at).num_minutes()
    }

    /// Start time of day, truncated to the minute.
    pub fn start_time(&self) -> NaiveTime {
        let time = self.starts_at.time();
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn test_new_appointment_success() {
        let appt = Appointment::new("e1", 2, "09:00", 30, "Jane Doe").unwrap();
        assert_eq!(appt.id, "e1");
        assert_eq!(appt.day_index, 2);
        assert_eq!(appt.status, "confirmed");
        assert_eq!(appt.end(), "09:30");
    }

    #[test]
    fn test_new_appointment_rejects_zero_duration() {
        let result = Appointment::new("e1", 0, "09:00", 0, "Jane Doe");
        assert_eq!(result.unwrap_err(), "Appointment duration must be positive");
    }

    #[test]
    fn test_new_appointment_rejects_day_outside_week() {
        let result = Appointment::new("e1", 7, "09:00", 30, "Jane Doe");
        assert!(result.unwrap_err().contains("outside the week"));
    }

    #[test]
    fn test_builder_missing_id() {
        let result = Appointment::builder().start("09:00").duration(15).build();
        assert_eq!(result.unwrap_err(), "Appointment id is required");
    }

    #[test]
    fn test_builder_with_status() {
        let appt = Appointment::builder()
            .id("e9")
            .day_index(4)
            .start("14:15")
            .duration(45)
            .title("Follow-up")
            .status("provisional")
            .build()
            .unwrap();
        assert_eq!(appt.status, "provisional");
        assert_eq!(appt.start_minutes(8), 375);
    }

    #[test]
    fn test_moved_to_keeps_other_fields() {
        let appt = Appointment::new("e1", 0, "09:00", 30, "Jane Doe").unwrap();
        let moved = appt.moved_to(3, "11:15");
        assert_eq!(moved.day_index, 3);
        assert_eq!(moved.start, "11:15");
        assert_eq!(moved.duration, 30);
        assert_eq!(moved.title, appt.title);
        assert_eq!(appt.day_index, 0);
    }

    #[test]
    fn test_timed_round_trip() {
        let appt = Appointment::new("e1", 2, "10:30", 45, "Jane Doe").unwrap();
        let timed = appt.to_timed(monday());
        assert_eq!(
            timed.starts_at,
            NaiveDate::from_ymd_opt(2025, 3, 5)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap()
        );
        assert_eq!(timed.duration_minutes(), 45);
        assert_eq!(Appointment::from_timed(&timed, monday()), Some(appt));
    }

    #[test]
    fn test_from_timed_outside_week() {
        let appt = Appointment::new("e1", 0, "10:30", 45, "Jane Doe").unwrap();
        let timed = appt.to_timed(monday() + Duration::days(7));
        assert!(Appointment::from_timed(&timed, monday()).is_none());
    }

    #[test]
    fn test_serde_uses_host_field_names() {
        let json = r#"{"id":"e1","dayIndex":1,"start":"09:00","duration":30,"title":"A"}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.day_index, 1);
        assert_eq!(appt.status, "");
        let back = serde_json::to_string(&appt).unwrap();
        assert!(back.contains("\"dayIndex\":1"));
    }

    #[test]
    fn test_band_duration() {
        assert_eq!(AvailabilityBand::new(0, "08:00", "12:30").duration_minutes(), 270);
        assert_eq!(AvailabilityBand::new(0, "12:00", "08:00").duration_minutes(), 0);
        let huge = AvailabilityBand::new(0, "-99999999:00", "99999999:00");
        assert!(huge.duration_minutes() > 0);
    }
}
