//! Seed data for running the calendar without an appointments file.

use chrono::NaiveDate;

use crate::models::appointment::{Appointment, AvailabilityBand, TimedAppointment};

/// A handful of appointments spread over the week starting at `week_start`.
pub fn sample_appointments(week_start: NaiveDate) -> Vec<TimedAppointment> {
    let seeds = [
        ("a1", 0, "09:00", 30, "Jane Doe", "confirmed"),
        ("a2", 0, "11:15", 45, "Sam Patel", "provisional"),
        ("a3", 1, "10:00", 60, "Lee Wong", "confirmed"),
        ("a4", 2, "14:30", 15, "Ana Silva", "cancelled"),
        ("a5", 3, "08:30", 30, "Omar Haddad", "patient-preference"),
        ("a6", 4, "16:00", 45, "Mia Rossi", "confirmed"),
    ];

    seeds
        .iter()
        .filter_map(|(id, day, start, duration, title, status)| {
            Appointment::builder()
                .id(*id)
                .day_index(*day)
                .start(*start)
                .duration(*duration)
                .title(*title)
                .status(*status)
                .build()
                .map_err(|e| log::warn!("Skipping sample appointment {}: {}", id, e))
                .ok()
        })
        .map(|appointment| appointment.to_timed(week_start))
        .collect()
}

/// Weekday opening hours with a lunch break.
pub fn sample_availability() -> Vec<AvailabilityBand> {
    (0..5)
        .flat_map(|day| {
            [
                AvailabilityBand::new(day, "08:30", "12:30"),
                AvailabilityBand::new(day, "13:30", "17:00"),
            ]
        })
        .collect()
}
