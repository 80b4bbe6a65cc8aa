use chrono::Weekday;
use serde::Serialize;

use super::civil::CivilDate;
use super::convert::{month_length, to_gregorian, weekday_index};

/// Cell layout of one month in a 7-column week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    /// Empty cells before day 1.
    pub leading_blanks: usize,
    pub days: Vec<CivilDate>,
    /// Empty cells completing the last week row.
    pub trailing_blanks: usize,
}

impl MonthGrid {
    /// Number of week rows in the grid.
    pub fn weeks(&self) -> usize {
        (self.leading_blanks + self.days.len() + self.trailing_blanks) / 7
    }
}

/// Builds the grid for a Jalali month.
pub fn month_grid(year: i32, month: u32, week_start: Weekday) -> MonthGrid {
    let first = CivilDate::new(year, month, 1);
    let leading_blanks = usize::from(weekday_index(to_gregorian(first), week_start));
    let days: Vec<CivilDate> = (1..=month_length(year, month))
        .map(|day| CivilDate::new(year, month, day))
        .collect();

    let remainder = (leading_blanks + days.len()) % 7;
    let trailing_blanks = if remainder == 0 { 0 } else { 7 - remainder };

    MonthGrid {
        leading_blanks,
        days,
        trailing_blanks,
    }
}
