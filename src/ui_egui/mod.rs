mod app;
pub mod theme;
pub mod views;

pub use app::{sample_appointments, sample_availability, ClinicCalendarApp};
