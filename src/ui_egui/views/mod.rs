pub mod appointment_block;
pub mod day_column;
pub mod palette;
pub mod week_view;

pub use week_view::{WeekCalendarView, WeekViewResponse};
