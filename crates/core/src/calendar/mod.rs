//! Jalali (civil) calendar: date types and the conversion boundary.
//!
//! Every user-facing date is a [`CivilDate`]. Day arithmetic happens on
//! Gregorian [`chrono::NaiveDate`]s; [`to_gregorian`] and [`to_civil`] are the
//! only crossing points between the two.

mod civil;
mod convert;
mod grid;
mod names;
mod range;

pub use civil::{CivilDate, CivilDateTime, DayKey, MINUTES_PER_DAY};
pub use convert::{
    add_days, is_leap_year, minute_of_day, month_length, to_civil, to_gregorian, weekday_index,
    MAX_YEAR, MIN_YEAR,
};
pub use grid::{month_grid, MonthGrid};
pub use names::{month_title, weekday_name, MONTH_NAMES, WEEKDAY_NAMES};
pub use range::DateRange;
