//! Theme module for the egui week calendar
//!
//! Builds the CalendarTheme from the clinic's primary/secondary brand colors
//! and applies it to an egui context.

use egui::Color32;

use crate::models::settings::ThemeColors;

const DEFAULT_PRIMARY: Color32 = Color32::from_rgb(42, 125, 225);
const DEFAULT_SECONDARY: Color32 = Color32::from_rgb(56, 178, 172);

/// All colors used by the calendar views
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTheme {
    /// Whether this is a dark theme (affects base egui::Visuals)
    pub is_dark: bool,

    /// Application background color
    pub app_background: Color32,

    /// Day column background color
    pub column_background: Color32,

    /// Gridline and divider color
    pub day_border: Color32,

    /// Appointment block fill
    pub primary: Color32,

    /// Availability bands and accents
    pub secondary: Color32,

    /// Primary text color (headings, dates)
    pub text_primary: Color32,

    /// Secondary text color (ruler labels)
    pub text_secondary: Color32,
}

impl CalendarTheme {
    /// Light base with the given brand colors. Unparsable colors fall back
    /// to the built-in defaults.
    pub fn light(colors: &ThemeColors) -> Self {
        let (primary, secondary) = brand_colors(colors);
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 245),
            column_background: Color32::from_rgb(255, 255, 255),
            day_border: Color32::from_rgb(220, 220, 220),
            primary,
            secondary,
            text_primary: Color32::from_rgb(40, 40, 40),
            text_secondary: Color32::from_rgb(100, 100, 100),
        }
    }

    pub fn dark(colors: &ThemeColors) -> Self {
        let (primary, secondary) = brand_colors(colors);
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(30, 30, 30),
            column_background: Color32::from_rgb(40, 40, 40),
            day_border: Color32::from_rgb(60, 60, 60),
            primary,
            secondary,
            text_primary: Color32::from_rgb(240, 240, 240),
            text_secondary: Color32::from_rgb(170, 170, 170),
        }
    }

    pub fn from_colors(colors: &ThemeColors, is_dark: bool) -> Self {
        if is_dark {
            Self::dark(colors)
        } else {
            Self::light(colors)
        }
    }

    /// Apply this theme to an egui context
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.selection.bg_fill = self.primary;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }

    /// Parse hex string to Color32
    pub fn hex_to_color(hex: &str) -> Result<Color32, String> {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return Err("Hex color must be 6 characters".to_string());
        }

        let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "Invalid hex color")?;
        let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "Invalid hex color")?;
        let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "Invalid hex color")?;

        Ok(Color32::from_rgb(r, g, b))
    }
}

fn brand_colors(colors: &ThemeColors) -> (Color32, Color32) {
    let parse = |hex: &str, fallback: Color32| {
        CalendarTheme::hex_to_color(hex).unwrap_or_else(|e| {
            log::warn!("Ignoring theme color {:?}: {}", hex, e);
            fallback
        })
    };
    (
        parse(&colors.primary, DEFAULT_PRIMARY),
        parse(&colors.secondary, DEFAULT_SECONDARY),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_color() {
        let result = CalendarTheme::hex_to_color("#FF8040").unwrap();
        assert_eq!(result, Color32::from_rgb(255, 128, 64));

        let result2 = CalendarTheme::hex_to_color("FF8040").unwrap();
        assert_eq!(result2, Color32::from_rgb(255, 128, 64));

        assert!(CalendarTheme::hex_to_color("#FFF").is_err());
        assert!(CalendarTheme::hex_to_color("#GG0000").is_err());
    }

    #[test]
    fn test_brand_colors_applied() {
        let colors = ThemeColors {
            primary: "#112233".to_string(),
            secondary: "#445566".to_string(),
        };
        let theme = CalendarTheme::light(&colors);
        assert!(!theme.is_dark);
        assert_eq!(theme.primary, Color32::from_rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.secondary, Color32::from_rgb(0x44, 0x55, 0x66));
    }

    #[test]
    fn test_invalid_brand_color_falls_back() {
        let colors = ThemeColors {
            primary: "blue".to_string(),
            secondary: "#445566".to_string(),
        };
        let theme = CalendarTheme::from_colors(&colors, true);
        assert!(theme.is_dark);
        assert_eq!(theme.primary, DEFAULT_PRIMARY);
    }
}
