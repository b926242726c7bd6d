//! Week view: header, hour ruler and seven day columns, wired to the drag
//! engine in [`crate::services::week`].
//!
//! Each frame the columns are laid out and registered in a
//! [`ColumnRegistry`], then egui pointer state is translated into
//! [`PointerInput`]s for the [`WeekGrid`]. Results are collected in a
//! [`WeekViewResponse`] for the app to apply.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use egui::{
    Align, Align2, CursorIcon, FontId, Id, Key, KeyboardShortcut, LayerId, Layout, Modifiers,
    Order, Pos2, Rect, RichText, Sense, Stroke, Vec2,
};

use super::appointment_block::{block_rect, paint_ghost};
use super::day_column::{paint_day_column, paint_now_line};
use super::palette::{BlockPalette, TimeGridPalette};
use crate::models::appointment::{Appointment, AvailabilityBand};
use crate::models::settings::{CalendarSettings, GridConfig};
use crate::services::drag::{CancelReason, DragOutcome, DragState, Point, PointerInput};
use crate::services::geometry::{ColumnBounds, ColumnGeometryProvider, ColumnRegistry};
use crate::services::layout::{format_appointment_tooltip, BlockLayout, DayColumnLayout};
use crate::services::week::{now_indicator, week_label, CalendarHost, WeekGrid, WeekNavigation};
use crate::ui_egui::theme::CalendarTheme;
use crate::utils::time::{format_time_range, from_minutes};

const TIME_LABEL_WIDTH: f32 = 50.0;
const COLUMN_SPACING: f32 = 2.0;
const DAY_HEADER_HEIGHT: f32 = 40.0;
const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// What happened during one frame of the week view.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WeekViewResponse {
    /// New appointment list after a drop, undo or redo
    pub changed: Option<Vec<Appointment>>,
    /// Appointment clicked without dragging
    pub selected: Option<String>,
    pub navigation: Option<WeekNavigation>,
}

impl CalendarHost for WeekViewResponse {
    fn on_change(&mut self, events: Vec<Appointment>) {
        self.changed = Some(events);
    }

    fn on_prev_week(&mut self) {
        self.navigation = Some(WeekNavigation::Previous);
    }

    fn on_next_week(&mut self) {
        self.navigation = Some(WeekNavigation::Next);
    }

    fn on_select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }
}

/// Pointer state sampled once per frame.
struct PointerFrame {
    pos: Option<Pos2>,
    pressed: bool,
    released: bool,
    moving: bool,
    escape: bool,
}

pub struct WeekCalendarView {
    grid: WeekGrid,
    registry: ColumnRegistry,
    date_format: String,
}

impl WeekCalendarView {
    pub fn new(week_start: NaiveDate, settings: &CalendarSettings) -> Self {
        Self {
            grid: WeekGrid::new(week_start, settings.grid.clone()),
            registry: ColumnRegistry::new(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn grid(&self) -> &WeekGrid {
        &self.grid
    }

    pub fn week_start(&self) -> NaiveDate {
        self.grid.week_start()
    }

    pub fn set_week_start(&mut self, date: NaiveDate) {
        self.grid.set_week_start(date);
    }

    /// Pick up changed settings. A new grid geometry drops any gesture.
    pub fn apply_settings(&mut self, settings: &CalendarSettings) {
        if self.grid.config() != &settings.grid {
            self.grid.set_config(settings.grid.clone());
        }
        self.date_format = settings.date_format.clone();
    }

    pub fn cancel_drag(&mut self) -> DragOutcome {
        self.grid.teardown()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        events: &[Appointment],
        availability: &[AvailabilityBand],
        theme: &CalendarTheme,
        now: NaiveDateTime,
    ) -> WeekViewResponse {
        let mut response = WeekViewResponse::default();
        let grid_palette = TimeGridPalette::from_theme(theme);
        let block_palette = BlockPalette::from_theme(theme);
        let today = now.date();

        self.show_navigation(ui, &grid_palette, &mut response);
        ui.add_space(4.0);
        self.show_day_headers(ui, &grid_palette, today);
        ui.add_space(4.0);

        let layouts = self.grid.column_layouts(events, availability);
        let config = self.grid.config().clone();
        let now_line = now_indicator(now, self.grid.week_start(), &config);
        let dates = self.grid.dates();

        let registry = &mut self.registry;
        let dragging = !self.grid.controller().state().is_idle();
        let mut visible = Rect::NOTHING;
        let mut hovered_block: Option<String> = None;

        egui::ScrollArea::vertical()
            .id_source("clinic_week_grid")
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let width = ui.available_width();
                let col_width = column_width(width);
                let (rect, _) = ui.allocate_exact_size(
                    Vec2::new(width, config.grid_height_px()),
                    Sense::click_and_drag(),
                );
                visible = ui.clip_rect().intersect(rect);
                let painter = ui.painter_at(rect);

                paint_ruler(&painter, rect, &config, &grid_palette);

                registry.clear();
                for (index, layout) in layouts.iter().enumerate() {
                    let left = rect.left() + TIME_LABEL_WIDTH + index as f32 * (col_width + COLUMN_SPACING);
                    let column = Rect::from_min_size(
                        Pos2::new(left, rect.top()),
                        Vec2::new(col_width, layout.height),
                    );
                    registry.register(
                        layout.day_index,
                        ColumnBounds::new(column.left(), column.top(), column.width(), column.height()),
                    );

                    let is_today = dates[index] == today;
                    paint_day_column(&painter, column, layout, &grid_palette, &block_palette, is_today);

                    if let Some((_, offset)) = now_line.filter(|(day, _)| *day == layout.day_index) {
                        paint_now_line(&painter, column, offset, &grid_palette);
                    }

                    if !dragging {
                        for block in &layout.blocks {
                            let card = block_rect(column, block);
                            let block_response = ui.interact(
                                card,
                                Id::new(("clinic_block", &block.id)),
                                Sense::hover(),
                            );
                            if block_response.hovered() {
                                hovered_block = Some(block.id.clone());
                            }
                            if let Some(appointment) = events.iter().find(|e| e.id == block.id) {
                                block_response.on_hover_text(format_appointment_tooltip(appointment));
                            }
                        }
                    }
                }
            });

        let frame = ui.input(|i| PointerFrame {
            pos: i.pointer.latest_pos(),
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            moving: i.pointer.is_moving(),
            escape: i.key_pressed(Key::Escape),
        });
        self.handle_pointer(frame, visible, &layouts, events, &mut response);
        self.handle_shortcuts(ui, events, &mut response);
        self.update_cursor(ui, hovered_block.is_some());
        self.paint_drag_ghost(ui, &config, &block_palette);

        response
    }

    fn show_navigation(&mut self, ui: &mut egui::Ui, palette: &TimeGridPalette, response: &mut WeekViewResponse) {
        let label = week_label(self.grid.week_start());
        let mut direction = None;
        ui.horizontal(|ui| {
            if ui.button("◀").on_hover_text("Previous week").clicked() {
                direction = Some(WeekNavigation::Previous);
            }
            if ui.button("▶").on_hover_text("Next week").clicked() {
                direction = Some(WeekNavigation::Next);
            }
            ui.add_space(8.0);
            ui.label(RichText::new(label).size(16.0).strong().color(palette.header_text));
        });

        if let Some(direction) = direction {
            self.grid.navigate(direction, response);
        }
    }

    fn show_day_headers(&self, ui: &mut egui::Ui, palette: &TimeGridPalette, today: NaiveDate) {
        let dates = self.grid.dates();
        // Leave room for the scroll bar so headers line up with the columns.
        let width = ui.available_width() - ui.spacing().scroll.bar_width;
        let col_width = column_width(width);

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.allocate_space(Vec2::new(TIME_LABEL_WIDTH, DAY_HEADER_HEIGHT));

            for (i, date) in dates.iter().enumerate() {
                let color = if *date == today {
                    palette.drop_border
                } else {
                    palette.header_text
                };
                ui.allocate_ui_with_layout(
                    Vec2::new(col_width, DAY_HEADER_HEIGHT),
                    Layout::top_down(Align::Center),
                    |ui| {
                        ui.label(RichText::new(DAY_NAMES[date.weekday().num_days_from_monday() as usize]).size(12.0).strong().color(color));
                        ui.label(RichText::new(format_short_date(*date, &self.date_format)).size(11.0).color(color));
                    },
                );
                if i + 1 < dates.len() {
                    ui.add_space(COLUMN_SPACING);
                }
            }
        });
    }

    fn handle_pointer(
        &mut self,
        frame: PointerFrame,
        visible: Rect,
        layouts: &[DayColumnLayout],
        events: &[Appointment],
        response: &mut WeekViewResponse,
    ) {
        if frame.escape && !self.grid.controller().state().is_idle() {
            let outcome = self.grid.handle_input(
                PointerInput::Cancel(CancelReason::Escape),
                events,
                &self.registry,
                response,
            );
            log::debug!("Escape: {:?}", outcome);
            return;
        }

        let Some(pos) = frame.pos else {
            return;
        };
        let point = Point::new(pos.x, pos.y);
        // Columns scrolled out of view must not be hit.
        let over_day = if visible.contains(pos) {
            self.registry.day_at(pos.x, pos.y)
        } else {
            None
        };

        if frame.pressed {
            if let Some(input) = self.press_input(point, over_day, layouts) {
                self.grid.handle_input(input, events, &self.registry, response);
            }
        }

        if frame.moving && !self.grid.controller().state().is_idle() {
            let outcome = self.grid.handle_input(
                PointerInput::Move { pos: point, over_day },
                events,
                &self.registry,
                response,
            );
            if let DragOutcome::Started { id } = &outcome {
                log::debug!("Dragging appointment {}", id);
            }
        }

        if frame.released && !self.grid.controller().state().is_idle() {
            let outcome = self.grid.handle_input(
                PointerInput::Up { pos: point, over_day },
                events,
                &self.registry,
                response,
            );
            match outcome {
                DragOutcome::Committed { record, .. } => log::debug!("{}", record.description()),
                DragOutcome::Cancelled(reason) => log::debug!("Drop cancelled: {:?}", reason),
                _ => {}
            }
        }
    }

    /// Down input for a press on a block, if any block is under the pointer.
    fn press_input(&self, point: Point, over_day: Option<u8>, layouts: &[DayColumnLayout]) -> Option<PointerInput> {
        let day = over_day?;
        let column = self.registry.column(day)?;
        let layout = layouts.iter().find(|layout| layout.day_index == day)?;
        let block = layout.block_at(point.y - column.top)?;
        Some(PointerInput::Down {
            id: block.id.clone(),
            pos: point,
            block_top: column.top + block.span.top,
        })
    }

    fn handle_shortcuts(&mut self, ui: &mut egui::Ui, events: &[Appointment], response: &mut WeekViewResponse) {
        let redo = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

        // Redo first: the undo shortcut would also match with shift held.
        if ui.input_mut(|i| i.consume_shortcut(&redo)) {
            if self.grid.redo(events, response) {
                log::info!("Redo move");
            }
        } else if ui.input_mut(|i| i.consume_shortcut(&undo)) && self.grid.undo(events, response) {
            log::info!("Undo move");
        }
    }

    fn update_cursor(&self, ui: &egui::Ui, over_block: bool) {
        match self.grid.controller().state() {
            DragState::Dragging(_) => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);
                ui.ctx().request_repaint();
            }
            DragState::Pressed { .. } => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
            }
            DragState::Idle if over_block => {
                ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
            }
            DragState::Idle => {}
        }
    }

    fn paint_drag_ghost(&self, ui: &egui::Ui, config: &GridConfig, palette: &BlockPalette) {
        let DragState::Dragging(session) = self.grid.controller().state() else {
            return;
        };
        let Some(pos) = ui.input(|i| i.pointer.latest_pos()) else {
            return;
        };

        let layout = BlockLayout::for_appointment(&session.ghost, config);
        let top = session.dragged_top(Point::new(pos.x, pos.y));
        let hovered_column = session
            .over_day_index
            .and_then(|day| self.registry.column(day));
        let (left, width) = match hovered_column {
            Some(bounds) => (bounds.left, bounds.width),
            None => {
                let width = self
                    .registry
                    .column(session.original_day_index)
                    .map_or(120.0, |bounds| bounds.width);
                (pos.x - width / 2.0, width)
            }
        };

        let time_range = match session.over_minutes {
            Some(minutes) => format_time_range(
                &from_minutes(minutes as i32, config.hours.start),
                session.ghost.duration,
            ),
            None => layout.time_range.clone(),
        };

        let painter = ui.ctx().layer_painter(LayerId::new(Order::Tooltip, Id::new("clinic_drag_ghost")));
        let rect = Rect::from_min_size(Pos2::new(left + 2.0, top), Vec2::new((width - 4.0).max(0.0), layout.span.height));
        paint_ghost(&painter, rect, &layout.title, &time_range, layout.style, palette);
    }
}

fn column_width(total_width: f32) -> f32 {
    let spacing = COLUMN_SPACING * 6.0;
    ((total_width - TIME_LABEL_WIDTH - spacing) / 7.0).max(20.0)
}

fn paint_ruler(painter: &egui::Painter, rect: Rect, config: &GridConfig, palette: &TimeGridPalette) {
    let ppm = config.pixels_per_minute();
    for hour in config.hour_marks() {
        let y = rect.top() + (hour - config.hours.start) as f32 * 60.0 * ppm;
        painter.text(
            Pos2::new(rect.left() + TIME_LABEL_WIDTH - 6.0, y + 1.0),
            Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            FontId::proportional(11.0),
            palette.ruler_text,
        );
        painter.line_segment(
            [
                Pos2::new(rect.left() + TIME_LABEL_WIDTH - 4.0, y),
                Pos2::new(rect.left() + TIME_LABEL_WIDTH, y),
            ],
            Stroke::new(1.0, palette.hour_line),
        );
    }
}

fn format_short_date(date: NaiveDate, date_format: &str) -> String {
    if date_format.starts_with("DD/MM") || date_format.starts_with("dd/mm") {
        date.format("%d/%m").to_string()
    } else if date_format.starts_with("YYYY") || date_format.starts_with("yyyy") {
        date.format("%Y/%m/%d").to_string()
    } else {
        date.format("%m/%d").to_string()
    }
}
