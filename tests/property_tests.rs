// Property-based tests for time conversion and drag commits
// Exercises the grid arithmetic with random inputs

mod fixtures;

use chrono::NaiveDate;
use clinic_calendar::models::appointment::Appointment;
use clinic_calendar::services::drag::{DragController, DragOutcome};
use clinic_calendar::utils::time::{clamp_start, from_minutes, snap, to_minutes};
use fixtures::{grid, pointer};
use proptest::prelude::*;

proptest! {
    /// Property: formatting a parsed "HH:MM" gives back the same string
    #[test]
    fn prop_time_round_trip(hour in 0u32..24, minute in 0u32..60, grid_start in 0u32..24) {
        let text = format!("{:02}:{:02}", hour, minute);
        prop_assert_eq!(from_minutes(to_minutes(&text, grid_start), grid_start), text);
    }

    /// Property: snapping is idempotent and lands on a slot boundary
    #[test]
    fn prop_snap_idempotent(minutes in -2000i32..2000, slot in 0u32..=60) {
        let once = snap(minutes, slot);
        prop_assert_eq!(snap(once, slot), once);
        if slot > 0 {
            prop_assert_eq!(once.rem_euclid(slot as i32), 0);
            prop_assert!((once - minutes).abs() <= slot as i32 / 2 + 1);
        }
    }

    /// Property: clamping a snapped start keeps the whole appointment inside
    /// the grid and on a slot boundary
    #[test]
    fn prop_clamp_keeps_inside(
        start in -1000i32..2000,
        duration in 1u32..=600,
        total_hours in 1u32..=24,
        slot in prop::sample::select(vec![5u32, 10, 15, 20, 30, 60]),
    ) {
        let total = total_hours * 60;
        let clamped = clamp_start(snap(start, slot), duration, total, slot);
        prop_assert_eq!(clamped % slot, 0);
        if duration <= total {
            prop_assert!(clamped + duration <= total);
        } else {
            prop_assert_eq!(clamped, 0);
        }
    }

    /// Property: any gesture that ends inside a column commits exactly once,
    /// on a slot boundary, with the appointment fully inside the grid
    #[test]
    fn prop_drag_commits_once_inside_grid(
        start_slot in 0u32..36,
        duration in 1u32..=240,
        path in prop::collection::vec((0u8..7, 0f32..600.0), 1..20),
        drop_day in 0u8..7,
        drop_minutes in 0f32..600.0,
    ) {
        let config = grid::clinic_day();
        let appointment = Appointment::new(
            "p1",
            0,
            from_minutes((start_slot * 15) as i32, config.hours.start),
            duration,
            "Prop",
        )
        .unwrap();
        let others = Appointment::new("p2", 3, "12:00", 30, "Other").unwrap();
        let events = vec![appointment.clone(), others.clone()];
        let geometry = grid::week_columns();
        let mut controller = DragController::new(config);

        let mut inputs = vec![pointer::press(&appointment)];
        // Guarantee activation regardless of the random path.
        inputs.push(pointer::move_to(6, 0.0));
        inputs.extend(path.iter().map(|(day, minutes)| pointer::move_to(*day, *minutes)));
        inputs.push(pointer::release_at(drop_day, drop_minutes));

        let commits: Vec<Vec<Appointment>> = inputs
            .into_iter()
            .filter_map(|input| match controller.handle(input, &events, &geometry) {
                DragOutcome::Committed { events, .. } => Some(events),
                _ => None,
            })
            .collect();

        prop_assert_eq!(commits.len(), 1);
        let committed = &commits[0];
        prop_assert_eq!(&committed[1], &others);
        let moved = &committed[0];
        prop_assert_eq!(moved.day_index, drop_day);
        let start = moved.start_minutes(config.hours.start);
        prop_assert!(start >= 0);
        prop_assert_eq!(start % 15, 0);
        prop_assert!(start as u32 + moved.duration <= config.total_minutes());
        prop_assert!(controller.state().is_idle());
    }
}

#[test]
fn test_week_dates_are_consecutive() {
    let dates = clinic_calendar::services::week::week_dates(NaiveDate::from_ymd_opt(2024, 2, 26).unwrap());
    for pair in dates.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 1);
    }
}
