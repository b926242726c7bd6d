use crate::ui_egui::theme::CalendarTheme;
use egui::Color32;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Colors for the week grid body: columns, ruler, bands and indicators.
#[derive(Clone, Copy, Debug)]
pub struct TimeGridPalette {
    pub column_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub divider: Color32,
    pub ruler_text: Color32,
    pub header_text: Color32,
    pub band_fill: Color32,
    pub drop_fill: Color32,
    pub drop_border: Color32,
    pub now_line: Color32,
}

impl TimeGridPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        Self {
            column_bg: theme.column_background,
            today_bg: blend(theme.column_background, theme.primary, 0.06),
            hour_line: with_alpha(theme.day_border, 170),
            divider: with_alpha(theme.day_border, 220),
            ruler_text: theme.text_secondary,
            header_text: theme.text_primary,
            band_fill: with_alpha(theme.secondary, if theme.is_dark { 60 } else { 40 }),
            drop_fill: with_alpha(theme.primary, if theme.is_dark { 80 } else { 50 }),
            drop_border: theme.primary,
            now_line: Color32::from_rgb(255, 100, 100),
        }
    }
}

/// Colors for appointment cards.
#[derive(Clone, Copy, Debug)]
pub struct BlockPalette {
    pub fill: Color32,
    pub muted_fill: Color32,
    pub border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl BlockPalette {
    pub fn from_theme(theme: &CalendarTheme) -> Self {
        Self {
            fill: theme.primary,
            muted_fill: blend(theme.primary, theme.column_background, 0.65),
            border: blend(theme.primary, Color32::BLACK, 0.25),
            text: Color32::WHITE,
            muted_text: with_alpha(theme.text_primary, 150),
        }
    }

    /// Translucent copy of a fill for the source block of a drag.
    pub fn faded(color: Color32) -> Color32 {
        with_alpha(color, 90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::ThemeColors;

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }

    #[test]
    fn test_palettes_follow_brand_colors() {
        let theme = CalendarTheme::light(&ThemeColors::default());
        let grid = TimeGridPalette::from_theme(&theme);
        let block = BlockPalette::from_theme(&theme);
        assert_eq!(grid.drop_border, theme.primary);
        assert_eq!(block.fill, theme.primary);
        assert_eq!(grid.band_fill.a(), 40);
    }
}
