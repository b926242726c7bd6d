//! Pointer-to-slot mapping for the week grid.
//!
//! Day columns report their on-screen bounds through a
//! [`ColumnGeometryProvider`]; the [`SlotMapper`] turns the dragged block's
//! top edge into a snapped `(day, minutes)` target. Nothing here depends on
//! egui, so the mapping can be exercised with synthetic rectangles.

use crate::models::appointment::DAYS_PER_WEEK;
use crate::models::settings::GridConfig;
use crate::utils::time::snap;

/// Screen-space rectangle of one day column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ColumnBounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

/// Source of day column geometry.
///
/// The egui front-end fills a [`ColumnRegistry`] every frame; tests supply
/// fixed rectangles.
pub trait ColumnGeometryProvider {
    /// Bounds of the column registered for `day_index`, if any.
    fn column(&self, day_index: u8) -> Option<ColumnBounds>;

    /// Day whose column contains the point.
    fn day_at(&self, x: f32, y: f32) -> Option<u8> {
        (0..DAYS_PER_WEEK).find(|day| {
            self.column(*day)
                .map_or(false, |bounds| bounds.contains(x, y))
        })
    }
}

/// Per-frame record of where each day column was laid out.
#[derive(Debug, Clone, Default)]
pub struct ColumnRegistry {
    columns: [Option<ColumnBounds>; DAYS_PER_WEEK as usize],
}

impl ColumnRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `bounds` with `day_index`. Out-of-week indices are ignored.
    pub fn register(&mut self, day_index: u8, bounds: ColumnBounds) {
        if let Some(slot) = self.columns.get_mut(day_index as usize) {
            *slot = Some(bounds);
        }
    }

    pub fn clear(&mut self) {
        self.columns = Default::default();
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }
}

impl ColumnGeometryProvider for ColumnRegistry {
    fn column(&self, day_index: u8) -> Option<ColumnBounds> {
        self.columns.get(day_index as usize).copied().flatten()
    }
}

/// A snapped drop position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTarget {
    pub day_index: u8,
    /// Minutes from the grid start, always a multiple of the slot size
    pub minutes: u32,
}

/// Converts vertical pixel positions into snapped grid minutes.
#[derive(Debug, Clone, Copy)]
pub struct SlotMapper {
    slot_minutes: u32,
    pixels_per_minute: f32,
    total_minutes: u32,
}

impl SlotMapper {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            slot_minutes: config.slot_minutes,
            pixels_per_minute: config.pixels_per_minute(),
            total_minutes: config.total_minutes(),
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.total_minutes
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.pixels_per_minute
    }

    /// Resolve the drop target for a dragged block whose top edge is at
    /// `dragged_top`. Returns `None` when no column is under the pointer or
    /// the column has no registered geometry.
    pub fn resolve(
        &self,
        geometry: &dyn ColumnGeometryProvider,
        over_day: Option<u8>,
        dragged_top: f32,
    ) -> Option<SlotTarget> {
        let day_index = over_day?;
        let column = geometry.column(day_index)?;

        let relative_y = (dragged_top - column.top).clamp(0.0, column.height.max(0.0));
        let raw_minutes = if self.pixels_per_minute > 0.0 {
            (relative_y / self.pixels_per_minute).round() as i32
        } else {
            0
        };
        let bounded = raw_minutes.clamp(0, self.total_minutes as i32);
        let snapped = snap(bounded, self.slot_minutes).max(0) as u32;

        Some(SlotTarget {
            day_index,
            minutes: snapped,
        })
    }

    /// Pixel offset from the column top for a minute offset.
    pub fn offset_for(&self, minutes: i32) -> f32 {
        minutes as f32 * self.pixels_per_minute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::GridHours;

    fn registry() -> ColumnRegistry {
        let mut registry = ColumnRegistry::new();
        for day in 0..DAYS_PER_WEEK {
            registry.register(day, ColumnBounds::new(100.0 + day as f32 * 50.0, 40.0, 50.0, 800.0));
        }
        registry
    }

    fn mapper() -> SlotMapper {
        SlotMapper::new(&GridConfig::new(GridHours { start: 8, end: 18 }, 15))
    }

    #[test]
    fn test_resolve_snaps_to_slot() {
        let mapper = mapper();
        let ppm = mapper.pixels_per_minute();
        let target = mapper.resolve(&registry(), Some(2), 40.0 + 127.0 * ppm).unwrap();
        assert_eq!(target, SlotTarget { day_index: 2, minutes: 120 });
    }

    #[test]
    fn test_resolve_clamps_above_column() {
        let target = mapper().resolve(&registry(), Some(0), -300.0).unwrap();
        assert_eq!(target.minutes, 0);
    }

    #[test]
    fn test_resolve_clamps_below_column() {
        let target = mapper().resolve(&registry(), Some(6), 5000.0).unwrap();
        assert_eq!(target.minutes, 600);
    }

    #[test]
    fn test_resolve_without_target_day() {
        assert!(mapper().resolve(&registry(), None, 200.0).is_none());
    }

    #[test]
    fn test_resolve_unregistered_column() {
        let mut registry = ColumnRegistry::new();
        registry.register(1, ColumnBounds::new(0.0, 0.0, 10.0, 10.0));
        assert!(mapper().resolve(&registry, Some(3), 5.0).is_none());
    }

    #[test]
    fn test_day_at_hit_tests_columns() {
        let registry = registry();
        assert_eq!(registry.day_at(125.0, 100.0), Some(0));
        assert_eq!(registry.day_at(260.0, 100.0), Some(3));
        assert_eq!(registry.day_at(99.0, 100.0), None);
        assert_eq!(registry.day_at(125.0, 900.0), None);
    }

    #[test]
    fn test_register_ignores_out_of_week() {
        let mut registry = ColumnRegistry::new();
        registry.register(9, ColumnBounds::new(0.0, 0.0, 10.0, 10.0));
        assert!(registry.is_empty());
        registry.register(0, ColumnBounds::new(0.0, 0.0, 10.0, 10.0));
        registry.clear();
        assert!(registry.is_empty());
    }
}
