use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::civil::CivilDate;
use super::convert::{add_days, to_civil};

/// Inclusive range of Gregorian days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering one day.
    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Returns true if `start > end`.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days covered, 0 for an empty range.
    pub fn len_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.end.signed_duration_since(self.start).num_days() + 1
        }
    }

    /// Narrows this range to the days also covered by `other`.
    pub fn intersect(&self, other: DateRange) -> DateRange {
        DateRange::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Iterates each day from start to end, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days()).map(move |offset| add_days(start, offset))
    }

    pub fn civil_start(&self) -> CivilDate {
        to_civil(self.start)
    }

    pub fn civil_end(&self) -> CivilDate {
        to_civil(self.end)
    }
}
