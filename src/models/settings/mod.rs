// Settings module
// Grid geometry and theme configuration for the week calendar

use serde::{Deserialize, Serialize};

/// Visible hour window of the grid, in 24h form. `end` is exclusive of any
/// further slots: a `{8, 18}` grid closes at 18:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridHours {
    pub start: u32,
    pub end: u32,
}

impl Default for GridHours {
    fn default() -> Self {
        Self { start: 8, end: 18 }
    }
}

/// Geometry of the scheduling grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub hours: GridHours,
    /// Snapping granularity in minutes
    pub slot_minutes: u32,
    /// Height of one slot row in pixels
    pub row_height_px: f32,
    /// Floor for block height so short appointments stay clickable
    pub min_block_height_px: f32,
    /// Pointer travel before a press turns into a drag
    pub activation_distance_px: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            hours: GridHours::default(),
            slot_minutes: 15,
            row_height_px: 20.0,
            min_block_height_px: 44.0,
            activation_distance_px: 5.0,
        }
    }
}

impl GridConfig {
    pub fn new(hours: GridHours, slot_minutes: u32) -> Self {
        Self {
            hours,
            slot_minutes,
            ..Self::default()
        }
    }

    /// Minutes between the grid start and closing time.
    pub fn total_minutes(&self) -> u32 {
        self.hours.end.saturating_sub(self.hours.start) * 60
    }

    pub fn pixels_per_minute(&self) -> f32 {
        if self.slot_minutes == 0 {
            return 0.0;
        }
        self.row_height_px / self.slot_minutes as f32
    }

    /// Full column height in pixels.
    pub fn grid_height_px(&self) -> f32 {
        self.total_minutes() as f32 * self.pixels_per_minute()
    }

    /// Hours that get a ruler label and gridline, both ends included.
    pub fn hour_marks(&self) -> impl Iterator<Item = u32> {
        self.hours.start..=self.hours.end
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.hours.start >= self.hours.end {
            return Err(format!(
                "Grid start hour {} must be before end hour {}",
                self.hours.start, self.hours.end
            ));
        }

        if self.hours.end > 24 {
            return Err(format!("Grid end hour {} is past midnight", self.hours.end));
        }

        if !(1..=60).contains(&self.slot_minutes) {
            return Err(format!(
                "Slot size must be between 1 and 60 minutes, got {}",
                self.slot_minutes
            ));
        }

        if self.row_height_px <= 0.0 {
            return Err("Row height must be positive".to_string());
        }

        Ok(())
    }
}

/// Brand colors supplied by the clinic, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#2A7DE1".to_string(),
            secondary: "#38B2AC".to_string(),
        }
    }
}

/// Persisted calendar settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub grid: GridConfig,
    pub theme: ThemeColors,
    /// Dark base visuals
    pub dark_mode: bool,
    /// Date format used in column headers ("DD/MM", "MM/DD" or "YYYY/MM/DD")
    pub date_format: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            theme: ThemeColors::default(),
            dark_mode: false,
            date_format: "DD/MM".to_string(),
        }
    }
}

impl CalendarSettings {
    pub fn validate(&self) -> Result<(), String> {
        self.grid.validate()
    }
}
