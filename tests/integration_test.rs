// Integration tests for settings persistence and host data round-trips
mod fixtures;

use chrono::NaiveDate;
use clinic_calendar::models::appointment::TimedAppointment;
use clinic_calendar::models::settings::{CalendarSettings, GridHours};
use clinic_calendar::services::settings::{SettingsError, SettingsService};
use clinic_calendar::services::week::{from_timed, into_timed};
use fixtures::appointments;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use test_case::test_case;

#[test]
fn test_settings_persistence() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let settings_service = SettingsService::new(dir.path().join("nested").join("calendar.toml"));

    // Defaults when nothing has been saved yet
    let mut settings = settings_service.get().expect("Failed to get settings");
    assert_eq!(settings, CalendarSettings::default());

    // Update settings to simulate UI changes
    settings.grid.hours = GridHours { start: 7, end: 20 };
    settings.grid.slot_minutes = 10;
    settings.dark_mode = true;
    settings.theme.primary = "#AA3366".to_string();
    settings.date_format = "YYYY/MM/DD".to_string();
    settings_service.update(&settings).expect("Failed to update settings");

    // Verify persistence by reading again through a fresh service
    let reloaded = SettingsService::new(settings_service.path())
        .get()
        .expect("Failed to load settings");
    assert_eq!(reloaded, settings);
}

#[test]
fn test_partial_settings_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calendar.toml");
    std::fs::write(&path, "dark_mode = true\n\n[grid]\nslot_minutes = 30\n").unwrap();

    let settings = SettingsService::new(&path).get().unwrap();
    assert!(settings.dark_mode);
    assert_eq!(settings.grid.slot_minutes, 30);
    assert_eq!(settings.grid.hours, GridHours { start: 8, end: 18 });
    assert_eq!(settings.date_format, "DD/MM");
}

#[test_case("[grid]\nslot_minutes = 0\n" ; "zero slot")]
#[test_case("[grid.hours]\nstart = 18\nend = 8\n" ; "inverted hours")]
#[test_case("[grid.hours]\nstart = 8\nend = 25\n" ; "past midnight")]
fn test_invalid_settings_file_is_rejected(contents: &str) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("calendar.toml");
    std::fs::write(&path, contents).unwrap();

    let service = SettingsService::new(&path);
    assert!(matches!(service.get(), Err(SettingsError::Invalid(_))));
    assert_eq!(service.load_or_default(), CalendarSettings::default());
}

#[test]
fn test_timed_records_round_trip_through_json() {
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let week = appointments::week();

    let records = into_timed(&week, monday);
    let json = serde_json::to_string_pretty(&records).unwrap();
    assert!(json.contains("\"startsAt\""));

    let parsed: Vec<TimedAppointment> = serde_json::from_str(&json).unwrap();
    assert_eq!(from_timed(&parsed, monday), week);
    assert!(from_timed(&parsed, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()).is_empty());
}

#[test]
fn test_appointment_json_uses_host_field_names() {
    let json = r#"[{"id":"e1","dayIndex":4,"start":"13:45","duration":20,"title":"Walk-in"}]"#;
    let parsed: Vec<clinic_calendar::models::appointment::Appointment> = serde_json::from_str(json).unwrap();
    assert_eq!(parsed[0].day_index, 4);
    assert_eq!(parsed[0].status, "");
    assert!(serde_json::to_string(&parsed).unwrap().contains("\"dayIndex\":4"));
}
