//! Time-of-day conversions for the scheduling grid.
//!
//! All grid arithmetic happens in minutes measured from the grid start hour
//! (`hours.start:00`). Appointments keep their start as an `"HH:MM"` string so
//! the host's data shape passes through untouched; these helpers are the only
//! place that string is parsed or produced.

/// Parse an `"HH:MM"` string into minutes elapsed since `grid_start_hour:00`.
///
/// Malformed input never fails: any component that cannot be parsed counts as
/// zero, so `"9"` is 09:00 and `"xx:30"` is 00:30. The result is negative for
/// times earlier than the grid start. Out-of-range components saturate
/// instead of overflowing.
///
/// # Examples
/// ```
/// use clinic_calendar::utils::time::to_minutes;
///
/// assert_eq!(to_minutes("09:30", 8), 90);
/// assert_eq!(to_minutes("garbage", 8), -480);
/// ```
pub fn to_minutes(hhmm: &str, grid_start_hour: u32) -> i32 {
    let mut parts = hhmm.trim().splitn(2, ':');
    let hours = parse_component(parts.next());
    let minutes = parse_component(parts.next());
    let total = hours
        .saturating_mul(60)
        .saturating_add(minutes)
        .saturating_sub(grid_start_hour as i64 * 60);
    total.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as i32
}

// Keeps `minutes + duration` and pixel offsets well inside `i32`.
const MAX_MINUTES: i32 = i32::MAX / 4;
const MIN_MINUTES: i32 = -MAX_MINUTES;

fn parse_component(part: Option<&str>) -> i64 {
    part.and_then(|p| p.trim().parse::<i64>().ok()).unwrap_or(0)
}

/// Inverse of [`to_minutes`]: format a grid offset as a zero-padded `"HH:MM"`.
///
/// The grid never spans midnight, so offsets are not wrapped; anything that
/// would land before `00:00` is pinned there.
pub fn from_minutes(minutes_since_grid_start: i32, grid_start_hour: u32) -> String {
    let total = (grid_start_hour as i32)
        .saturating_mul(60)
        .saturating_add(minutes_since_grid_start)
        .max(0);
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Round `minutes` to the nearest multiple of `slot_size`, halves rounding up.
///
/// A zero slot size disables snapping.
pub fn snap(minutes: i32, slot_size: u32) -> i32 {
    if slot_size == 0 {
        return minutes;
    }
    let slot = slot_size as i32;
    // floor(m / s + 1/2) without leaving integer arithmetic
    (2 * minutes + slot).div_euclid(2 * slot) * slot
}

/// Clamp a candidate start so that `[start, start + duration]` stays inside
/// `[0, total_minutes]`. The latest start is rounded down to a `slot_size`
/// boundary so a clamped start never leaves the slot grid. Durations longer
/// than the grid pin the start to 0.
pub fn clamp_start(start: i32, duration: u32, total_minutes: u32, slot_size: u32) -> u32 {
    let mut latest = total_minutes.saturating_sub(duration);
    if slot_size > 0 {
        latest = latest / slot_size * slot_size;
    }
    start.clamp(0, latest.min(i32::MAX as u32) as i32) as u32
}

/// Wall-clock end of an appointment as `"HH:MM"`.
pub fn end_time(start: &str, duration: u32) -> String {
    let duration = duration.min(MAX_MINUTES as u32) as i32;
    from_minutes(to_minutes(start, 0).saturating_add(duration), 0)
}

/// Human-readable range such as `"09:00 - 09:30"`.
pub fn format_time_range(start: &str, duration: u32) -> String {
    let normalized = from_minutes(to_minutes(start, 0), 0);
    format!("{} - {}", normalized, end_time(start, duration))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_minutes_relative_to_grid_start() {
        assert_eq!(to_minutes("08:00", 8), 0);
        assert_eq!(to_minutes("10:30", 8), 150);
        assert_eq!(to_minutes("07:45", 8), -15);
    }

    #[test]
    fn test_to_minutes_malformed_components_are_zero() {
        assert_eq!(to_minutes("9", 0), 540);
        assert_eq!(to_minutes("ab:15", 0), 15);
        assert_eq!(to_minutes("10:zz", 0), 600);
        assert_eq!(to_minutes("", 0), 0);
        assert_eq!(to_minutes(" 09 : 05 ", 0), 545);
    }

    #[test]
    fn test_to_minutes_huge_components_saturate() {
        assert_eq!(to_minutes("99999999:00", 8), MAX_MINUTES);
        assert_eq!(to_minutes("-99999999:00", 8), MIN_MINUTES);
        assert_eq!(to_minutes("00:99999999999999999999", 0), 0);
        assert_eq!(to_minutes("2147483647:2147483647", 23), MAX_MINUTES);
        assert!(end_time("99999999:00", u32::MAX).len() >= 5);
        assert_eq!(from_minutes(i32::MAX, 23), "35791394:07");
    }

    #[test]
    fn test_from_minutes_pads() {
        assert_eq!(from_minutes(0, 8), "08:00");
        assert_eq!(from_minutes(125, 8), "10:05");
        assert_eq!(from_minutes(-600, 8), "00:00");
    }

    #[test]
    fn test_snap_rounds_half_up() {
        assert_eq!(snap(127, 15), 120);
        assert_eq!(snap(128, 15), 135);
        assert_eq!(snap(7, 15), 0);
        assert_eq!(snap(8, 15), 15);
        assert_eq!(snap(5, 10), 10);
        assert_eq!(snap(-5, 10), 0);
        assert_eq!(snap(-6, 10), -10);
        assert_eq!(snap(42, 0), 42);
    }

    #[test]
    fn test_clamp_start() {
        assert_eq!(clamp_start(585, 60, 600, 15), 540);
        assert_eq!(clamp_start(-30, 30, 600, 15), 0);
        assert_eq!(clamp_start(120, 30, 600, 15), 120);
        assert_eq!(clamp_start(120, 900, 600, 15), 0);
    }

    #[test]
    fn test_clamp_start_stays_on_slot_grid() {
        // 600 - 50 = 550 is off the 15-minute grid; 540 is the last slot that fits.
        assert_eq!(clamp_start(585, 50, 600, 15), 540);
        assert_eq!(clamp_start(585, 50, 600, 0), 550);
        assert_eq!(clamp_start(555, 7, 600, 10), 555);
    }

    #[test]
    fn test_format_time_range() {
        assert_eq!(format_time_range("09:00", 30), "09:00 - 09:30");
        assert_eq!(format_time_range("9:5", 60), "09:05 - 10:05");
        assert_eq!(end_time("17:30", 45), "18:15");
    }
}
