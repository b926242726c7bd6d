// Test fixtures - reusable test data
// Provides a standard grid, column geometry and appointments across test files

#![allow(dead_code)]

use clinic_calendar::models::appointment::Appointment;
use clinic_calendar::models::settings::{GridConfig, GridHours};
use clinic_calendar::services::drag::{Point, PointerInput};
use clinic_calendar::services::geometry::{ColumnBounds, ColumnRegistry};

/// Screen y of every column's top edge
pub const COLUMN_TOP: f32 = 100.0;
/// Screen x of Monday's column
pub const COLUMN_LEFT: f32 = 60.0;
pub const COLUMN_WIDTH: f32 = 120.0;

/// Grid configurations
pub mod grid {
    use super::*;

    /// 08:00-18:00 in 15 minute slots, 20 px per slot
    pub fn clinic_day() -> GridConfig {
        GridConfig::new(GridHours { start: 8, end: 18 }, 15)
    }

    /// Screen y for a minute offset from the grid start
    pub fn y_for(minutes: f32) -> f32 {
        COLUMN_TOP + minutes * clinic_day().pixels_per_minute()
    }

    /// Horizontal centre of a day column
    pub fn x_for(day_index: u8) -> f32 {
        COLUMN_LEFT + day_index as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0
    }

    /// Seven side-by-side columns sharing the same top edge
    pub fn week_columns() -> ColumnRegistry {
        let height = clinic_day().grid_height_px();
        let mut registry = ColumnRegistry::new();
        for day in 0..7u8 {
            registry.register(
                day,
                ColumnBounds::new(COLUMN_LEFT + day as f32 * COLUMN_WIDTH, COLUMN_TOP, COLUMN_WIDTH, height),
            );
        }
        registry
    }
}

/// Sample appointments
pub mod appointments {
    use super::*;

    pub fn simple() -> Appointment {
        Appointment::new("e1", 0, "09:00", 30, "Jane Doe").unwrap()
    }

    pub fn hour_long() -> Appointment {
        Appointment::new("e2", 1, "11:00", 60, "John Roe").unwrap()
    }

    pub fn cancelled() -> Appointment {
        Appointment::builder()
            .id("e3")
            .day_index(3)
            .start("15:00")
            .duration(15)
            .title("Ana Silva")
            .status("cancelled")
            .build()
            .unwrap()
    }

    pub fn week() -> Vec<Appointment> {
        vec![simple(), hour_long(), cancelled()]
    }
}

/// Pointer input helpers
pub mod pointer {
    use super::*;

    /// Press on the top edge of `appointment`'s block
    pub fn press(appointment: &Appointment) -> PointerInput {
        let config = grid::clinic_day();
        let top = grid::y_for(appointment.start_minutes(config.hours.start) as f32);
        PointerInput::Down {
            id: appointment.id.clone(),
            pos: Point::new(grid::x_for(appointment.day_index), top),
            block_top: top,
        }
    }

    /// Pointer position putting a pressed block's top edge at `minutes`
    /// in `day_index`. [`press`] grabs blocks at their top edge.
    pub fn at(day_index: u8, minutes: f32) -> Point {
        Point::new(grid::x_for(day_index), grid::y_for(minutes))
    }

    pub fn move_to(day_index: u8, minutes: f32) -> PointerInput {
        PointerInput::Move {
            pos: at(day_index, minutes),
            over_day: Some(day_index),
        }
    }

    pub fn release_at(day_index: u8, minutes: f32) -> PointerInput {
        PointerInput::Up {
            pos: at(day_index, minutes),
            over_day: Some(day_index),
        }
    }

    /// Release outside every column
    pub fn release_outside() -> PointerInput {
        PointerInput::Up {
            pos: Point::new(5.0, 5.0),
            over_day: None,
        }
    }
}
