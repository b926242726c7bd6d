//! Headless layout for day columns and appointment blocks.
//!
//! Produces pixel offsets relative to the column top. The egui views paint
//! these rectangles; tests assert on them directly.

use crate::models::appointment::{Appointment, AvailabilityBand};
use crate::models::settings::GridConfig;
use crate::services::drag::DropIndicator;
use crate::utils::time::{format_time_range, to_minutes};

/// Hour line across a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Gridline {
    pub hour: u32,
    pub offset: f32,
    pub label: String,
}

/// Vertical span inside a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f32,
    pub height: f32,
}

impl Span {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Solid,
    Dashed,
}

/// Status-driven presentation. Never feeds back into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub strikethrough: bool,
    pub muted: bool,
    pub border: BorderStyle,
}

impl BlockStyle {
    pub fn for_status(status: &str) -> Self {
        let status = status.trim();
        if status.eq_ignore_ascii_case("cancelled") || status.eq_ignore_ascii_case("canceled") {
            Self {
                strikethrough: true,
                muted: true,
                border: BorderStyle::Solid,
            }
        } else if status.eq_ignore_ascii_case("provisional")
            || status.eq_ignore_ascii_case("patient-preference")
        {
            Self {
                strikethrough: false,
                muted: false,
                border: BorderStyle::Dashed,
            }
        } else {
            Self::default()
        }
    }
}

impl Default for BlockStyle {
    fn default() -> Self {
        Self {
            strikethrough: false,
            muted: false,
            border: BorderStyle::Solid,
        }
    }
}

/// Placement of one appointment card.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    pub id: String,
    pub title: String,
    pub time_range: String,
    pub status: String,
    pub span: Span,
    pub style: BlockStyle,
    /// Source of the drag currently in progress
    pub is_dragging: bool,
}

impl BlockLayout {
    pub fn for_appointment(appointment: &Appointment, config: &GridConfig) -> Self {
        let ppm = config.pixels_per_minute();
        let top = appointment.start_minutes(config.hours.start) as f32 * ppm;
        let height = (appointment.duration as f32 * ppm).max(config.min_block_height_px);

        Self {
            id: appointment.id.clone(),
            title: appointment.title.clone(),
            time_range: format_time_range(&appointment.start, appointment.duration),
            status: appointment.status.clone(),
            span: Span { top, height },
            style: BlockStyle::for_status(&appointment.status),
            is_dragging: false,
        }
    }
}

/// Everything painted inside one day column.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumnLayout {
    pub day_index: u8,
    pub height: f32,
    pub gridlines: Vec<Gridline>,
    pub bands: Vec<Span>,
    pub drop_indicator: Option<Span>,
    pub blocks: Vec<BlockLayout>,
}

impl DayColumnLayout {
    pub fn build(
        day_index: u8,
        config: &GridConfig,
        events: &[Appointment],
        availability: &[AvailabilityBand],
        indicator: Option<DropIndicator>,
        dragging_id: Option<&str>,
    ) -> Self {
        let ppm = config.pixels_per_minute();

        let gridlines = config
            .hour_marks()
            .map(|hour| Gridline {
                hour,
                offset: (hour - config.hours.start) as f32 * 60.0 * ppm,
                label: format!("{:02}:00", hour),
            })
            .collect();

        let bands = availability
            .iter()
            .filter(|band| band.day_index == day_index)
            .map(|band| Span {
                top: to_minutes(&band.start, config.hours.start) as f32 * ppm,
                height: band.duration_minutes() as f32 * ppm,
            })
            .collect();

        let drop_indicator = indicator
            .filter(|indicator| indicator.day_index == day_index)
            .map(|indicator| Span {
                top: indicator.minutes as f32 * ppm,
                height: indicator.duration as f32 * ppm,
            });

        let blocks = events
            .iter()
            .filter(|event| event.day_index == day_index)
            .map(|event| {
                let mut block = BlockLayout::for_appointment(event, config);
                block.is_dragging = dragging_id == Some(event.id.as_str());
                block
            })
            .collect();

        Self {
            day_index,
            height: config.grid_height_px(),
            gridlines,
            bands,
            drop_indicator,
            blocks,
        }
    }

    /// Topmost block under a column-relative y offset.
    pub fn block_at(&self, y: f32) -> Option<&BlockLayout> {
        self.blocks.iter().rev().find(|block| block.span.contains(y))
    }
}

/// Tooltip text for an appointment card.
pub fn format_appointment_tooltip(appointment: &Appointment) -> String {
    let mut lines = vec![
        appointment.title.clone(),
        format_time_range(&appointment.start, appointment.duration),
    ];
    if !appointment.status.trim().is_empty() {
        lines.push(format!("Status: {}", appointment.status));
    }
    lines.push("Drag to reschedule".to_string());
    lines.join("\n")
}
