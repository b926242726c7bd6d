// Settings service
// Loads and stores CalendarSettings as a TOML file

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::CalendarSettings;

const SETTINGS_FILE: &str = "calendar.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory, falling back to the
    /// working directory when none can be resolved.
    pub fn with_default_path() -> Self {
        Self::new(default_settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read settings. A missing file yields defaults.
    pub fn get(&self) -> Result<CalendarSettings, SettingsError> {
        if !self.path.exists() {
            log::info!("No settings at {:?}, using defaults", self.path);
            return Ok(CalendarSettings::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings: CalendarSettings = toml::from_str(&raw)?;
        settings.validate().map_err(SettingsError::Invalid)?;
        Ok(settings)
    }

    /// Validate and write settings, creating the parent directory if needed.
    pub fn update(&self, settings: &CalendarSettings) -> Result<(), SettingsError> {
        settings.validate().map_err(SettingsError::Invalid)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let raw = toml::to_string_pretty(settings)?;
        fs::write(&self.path, raw).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }

    /// Like [`SettingsService::get`], but any failure is logged and replaced
    /// by defaults so the calendar can always start.
    pub fn load_or_default(&self) -> CalendarSettings {
        match self.get() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {}, using defaults", e);
                CalendarSettings::default()
            }
        }
    }
}

fn default_settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "ClinicCalendar", "ClinicCalendar") {
        proj_dirs.config_dir().join(SETTINGS_FILE)
    } else {
        log::warn!("Unable to resolve project directory; using current dir for settings");
        PathBuf::from(SETTINGS_FILE)
    }
}
