//! Painting of a single appointment card.
//!
//! Geometry comes from [`BlockLayout`]; this module only decides colors,
//! borders and text placement.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2};

use super::palette::BlockPalette;
use crate::services::layout::{BlockLayout, BlockStyle, BorderStyle};

const BLOCK_ROUNDING: f32 = 4.0;
const TEXT_PADDING: Vec2 = Vec2::new(6.0, 3.0);
const HORIZONTAL_INSET: f32 = 2.0;

/// Screen rect of a block inside its column.
pub fn block_rect(column: Rect, block: &BlockLayout) -> Rect {
    Rect::from_min_size(
        Pos2::new(column.left() + HORIZONTAL_INSET, column.top() + block.span.top),
        Vec2::new(
            (column.width() - HORIZONTAL_INSET * 2.0).max(0.0),
            block.span.height,
        ),
    )
}

/// Paint one block. `faded` marks the source of an active drag.
pub fn paint_block(painter: &Painter, rect: Rect, block: &BlockLayout, palette: &BlockPalette, faded: bool) {
    paint_card(
        painter,
        rect,
        &block.title,
        &block.time_range,
        block.style,
        palette,
        faded,
    );
}

/// Floating preview that follows the pointer while dragging.
pub fn paint_ghost(painter: &Painter, rect: Rect, title: &str, time_range: &str, style: BlockStyle, palette: &BlockPalette) {
    painter.rect_filled(
        rect.translate(Vec2::new(2.0, 3.0)),
        Rounding::same(BLOCK_ROUNDING),
        Color32::from_black_alpha(40),
    );
    paint_card(painter, rect, title, time_range, style, palette, false);
}

fn paint_card(
    painter: &Painter,
    rect: Rect,
    title: &str,
    time_range: &str,
    style: BlockStyle,
    palette: &BlockPalette,
    faded: bool,
) {
    let (mut fill, text_color) = if style.muted {
        (palette.muted_fill, palette.muted_text)
    } else {
        (palette.fill, palette.text)
    };
    if faded {
        fill = BlockPalette::faded(fill);
    }

    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    painter.rect_filled(rect, Rounding::same(BLOCK_ROUNDING), fill);

    let stroke = Stroke::new(1.0, palette.border);
    match style.border {
        BorderStyle::Solid => {
            painter.rect_stroke(rect, Rounding::same(BLOCK_ROUNDING), stroke);
        }
        BorderStyle::Dashed => {
            let outline = [
                rect.left_top(),
                rect.right_top(),
                rect.right_bottom(),
                rect.left_bottom(),
                rect.left_top(),
            ];
            painter.extend(Shape::dashed_line(&outline, Stroke::new(1.5, palette.border), 5.0, 3.0));
        }
    }

    let title_rect = painter.text(
        rect.left_top() + TEXT_PADDING,
        Align2::LEFT_TOP,
        title,
        FontId::proportional(12.0),
        text_color,
    );
    if style.strikethrough {
        painter.line_segment(
            [title_rect.left_center(), title_rect.right_center()],
            Stroke::new(1.0, text_color),
        );
    }

    // time range only when there is room below the title
    if rect.height() >= title_rect.height() * 2.0 + TEXT_PADDING.y * 2.0 {
        painter.text(
            Pos2::new(title_rect.left(), title_rect.bottom() + 1.0),
            Align2::LEFT_TOP,
            time_range,
            FontId::proportional(11.0),
            text_color,
        );
    }
}
