//! Day column rendering: background, hour gridlines, availability bands,
//! drop indicator and appointment blocks for one day of the week grid.

use egui::{Painter, Pos2, Rect, Rounding, Stroke, Vec2};

use super::appointment_block::{block_rect, paint_block};
use super::palette::{BlockPalette, TimeGridPalette};
use crate::services::layout::{DayColumnLayout, Span};

/// Screen rect of a column-relative span.
pub fn span_rect(column: Rect, span: Span) -> Rect {
    Rect::from_min_size(
        Pos2::new(column.left(), column.top() + span.top),
        Vec2::new(column.width(), span.height.max(0.0)),
    )
}

pub fn paint_day_column(
    painter: &Painter,
    column: Rect,
    layout: &DayColumnLayout,
    grid_palette: &TimeGridPalette,
    block_palette: &BlockPalette,
    is_today: bool,
) {
    let painter = painter.with_clip_rect(column.intersect(painter.clip_rect()));

    let background = if is_today {
        grid_palette.today_bg
    } else {
        grid_palette.column_bg
    };
    painter.rect_filled(column, Rounding::ZERO, background);

    for band in &layout.bands {
        painter.rect_filled(span_rect(column, *band), Rounding::ZERO, grid_palette.band_fill);
    }

    for line in &layout.gridlines {
        let y = column.top() + line.offset;
        painter.line_segment(
            [Pos2::new(column.left(), y), Pos2::new(column.right(), y)],
            Stroke::new(1.0, grid_palette.hour_line),
        );
    }

    if let Some(indicator) = layout.drop_indicator {
        let rect = span_rect(column, indicator).shrink2(Vec2::new(1.0, 0.0));
        painter.rect_filled(rect, Rounding::same(4.0), grid_palette.drop_fill);
        painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.5, grid_palette.drop_border));
    }

    for block in &layout.blocks {
        paint_block(
            &painter,
            block_rect(column, block),
            block,
            block_palette,
            block.is_dragging,
        );
    }

    painter.line_segment(
        [column.right_top(), column.right_bottom()],
        Stroke::new(1.0, grid_palette.divider),
    );
}

/// Current time line across one column.
pub fn paint_now_line(painter: &Painter, column: Rect, offset: f32, palette: &TimeGridPalette) {
    let y = column.top() + offset;
    painter.circle_filled(Pos2::new(column.left() + 3.0, y), 3.0, palette.now_line);
    painter.line_segment(
        [Pos2::new(column.left(), y), Pos2::new(column.right(), y)],
        Stroke::new(2.0, palette.now_line),
    );
}
