use serde::Serialize;

use crate::bucket::DayBucket;
use crate::calendar::{CivilDate, MINUTES_PER_DAY};
use crate::config::EngineConfig;
use crate::event::Event;

/// A timed event clipped to one rendered day, in minutes since midnight.
///
/// Always satisfies `0 <= start_minute < end_minute <= 1440` when built
/// through [`timed_interval_for_day`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedInterval<'a> {
    pub event: &'a Event,
    pub start_minute: u32,
    pub end_minute: u32,
}

impl<'a> TimedInterval<'a> {
    pub fn new(event: &'a Event, start_minute: u32, end_minute: u32) -> Self {
        Self {
            event,
            start_minute,
            end_minute,
        }
    }

    pub fn duration(&self) -> u32 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Half-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimedInterval<'_>) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

/// Clips a timed event to `day`.
///
/// Parts before or after the day are cut at midnight. A degenerate result is
/// stretched to `min_timed_minutes`, shifted back if it would run past the end
/// of the day. Returns `None` for all-day events and events not touching `day`.
pub fn timed_interval_for_day<'a>(
    event: &'a Event,
    day: CivilDate,
    config: &EngineConfig,
) -> Option<TimedInterval<'a>> {
    if event.is_all_day() {
        return None;
    }

    let end = event.end_or_start();
    if event.start_date() > day || end.date < day {
        return None;
    }

    let min = config.min_timed_minutes.clamp(1, MINUTES_PER_DAY);
    let mut start_minute = if event.start_date() < day {
        0
    } else {
        event.start.minutes()
    };
    let mut end_minute = if end.date > day {
        MINUTES_PER_DAY
    } else {
        end.minutes()
    };

    if start_minute >= MINUTES_PER_DAY {
        start_minute = MINUTES_PER_DAY - min;
    }
    if end_minute <= start_minute {
        end_minute = start_minute + min;
    }
    end_minute = end_minute.min(MINUTES_PER_DAY);

    Some(TimedInterval::new(event, start_minute, end_minute))
}

/// Every timed event of a bucket day as an interval, in bucket order.
pub fn timed_intervals_for_day<'a>(
    bucket: &'a DayBucket,
    day: CivilDate,
    config: &EngineConfig,
) -> Vec<TimedInterval<'a>> {
    bucket
        .day(day)
        .filter_map(|event| timed_interval_for_day(event, day, config))
        .collect()
}
