// Clinic Calendar Application
// Main entry point

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use clinic_calendar::models::appointment::TimedAppointment;
use clinic_calendar::services::settings::SettingsService;
use clinic_calendar::services::week::week_start_for;
use clinic_calendar::ui_egui::{sample_appointments, sample_availability, ClinicCalendarApp};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Clinic Calendar");

    let records = match std::env::args().nth(1) {
        Some(path) => load_appointments(Path::new(&path))?,
        None => {
            log::info!("No appointments file given, using sample data");
            sample_appointments(week_start_for(Local::now().date_naive()))
        }
    };

    let settings_service = SettingsService::with_default_path();
    log::info!("Settings file: {:?}", settings_service.path());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clinic Calendar")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Clinic Calendar",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(ClinicCalendarApp::new(
                cc,
                settings_service,
                records,
                sample_availability(),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run calendar window: {}", e))
}

fn load_appointments(path: &Path) -> Result<Vec<TimedAppointment>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read appointments from {}", path.display()))?;
    let records: Vec<TimedAppointment> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse appointments in {}", path.display()))?;
    log::info!("Loaded {} appointments from {}", records.len(), path.display());
    Ok(records)
}
