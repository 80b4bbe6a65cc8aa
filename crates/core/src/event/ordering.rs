use std::cmp::Ordering;

use serde::Serialize;

use super::filter::normalize_text;
use super::types::Event;

/// A day's events split the way month cells and all-day rows show them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPartition<'a> {
    /// Sorted by normalized title.
    pub all_day: Vec<&'a Event>,
    /// Sorted by start.
    pub timed: Vec<&'a Event>,
}

/// Splits a day's events into all-day and timed groups.
pub fn partition_day<'a>(events: impl IntoIterator<Item = &'a Event>) -> DayPartition<'a> {
    let (mut all_day, mut timed): (Vec<&Event>, Vec<&Event>) =
        events.into_iter().partition(|event| event.is_all_day());

    all_day.sort_by_cached_key(|event| normalize_text(&event.title));
    timed.sort_by_key(|event| event.sort_key());

    DayPartition { all_day, timed }
}

/// Orders events for the list view: by start, then by normalized title.
pub fn sort_for_list(events: &mut [&Event]) {
    events.sort_by(|a, b| match a.sort_key().cmp(&b.sort_key()) {
        Ordering::Equal => normalize_text(&a.title).cmp(&normalize_text(&b.title)),
        other => other,
    });
}

/// How many items fit under a display cap, and how many are left over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overflow {
    pub shown: usize,
    pub hidden: usize,
}

impl Overflow {
    pub fn has_hidden(&self) -> bool {
        self.hidden > 0
    }
}

/// Splits `total` items under `cap`. `hidden` is always the literal remainder.
pub fn summarize_overflow(total: usize, cap: usize) -> Overflow {
    let shown = total.min(cap);
    Overflow {
        shown,
        hidden: total - shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CivilDate;
    use chrono::NaiveTime;

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_partition_day() {
        let date = CivilDate::new(1403, 4, 4);
        let events = vec![
            Event::timed("Lunch", date, make_time(12, 0), make_time(13, 0)),
            Event::all_day("zebra day", date),
            Event::timed("Standup", date, make_time(9, 0), make_time(9, 15)),
            Event::all_day("Anniversary", date),
        ];

        let partition = partition_day(&events);

        assert_eq!(partition.all_day.len(), 2);
        assert_eq!(partition.all_day[0].title, "Anniversary");
        assert_eq!(partition.all_day[1].title, "zebra day");
        assert_eq!(partition.timed[0].title, "Standup");
        assert_eq!(partition.timed[1].title, "Lunch");
    }

    #[test]
    fn test_sort_for_list_breaks_ties_by_title() {
        let date = CivilDate::new(1403, 4, 4);
        let events = vec![
            Event::timed("beta", date, make_time(9, 0), make_time(10, 0)),
            Event::timed("Alpha", date, make_time(9, 0), make_time(10, 0)),
            Event::all_day("Holiday", date),
        ];
        let mut refs: Vec<&Event> = events.iter().collect();

        sort_for_list(&mut refs);

        assert_eq!(refs[0].title, "Holiday"); // date-only sorts at minute 0
        assert_eq!(refs[1].title, "Alpha");
        assert_eq!(refs[2].title, "beta");
    }

    #[test]
    fn test_summarize_overflow_reports_literal_count() {
        assert_eq!(
            summarize_overflow(7, 2),
            Overflow {
                shown: 2,
                hidden: 5
            }
        );
        assert!(!summarize_overflow(2, 2).has_hidden());
        assert_eq!(summarize_overflow(0, 3).shown, 0);
    }
}
