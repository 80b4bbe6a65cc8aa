//! The engine's entry points for one render pass, composed from the lower
//! level modules.

use chrono::NaiveDate;
use serde::Serialize;

use crate::bucket::DayBucket;
use crate::calendar::{to_gregorian, CivilDate, DateRange};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::event::{
    filter_events, partition_day, summarize_overflow, DayPartition, Event, EventPredicate,
    Overflow,
};
use crate::highlight::{match_highlights, HighlightResult, HighlightRule, MatchContext};
use crate::layout::{layout_day, timed_intervals_for_day, LayoutRecord};
use crate::recurrence::expand_recurring;
use crate::view::{compute_visible_range, ViewKind};

/// Visible range for a view given by name.
///
/// Unknown names are an error. Known but disabled views resolve to the first
/// enabled view.
pub fn visible_range(view: &str, anchor: NaiveDate, config: &EngineConfig) -> Result<DateRange> {
    let view = config.resolve_view(view.parse::<ViewKind>()?);
    Ok(compute_visible_range(view, anchor, config))
}

/// Expands, filters and indexes `base` for `range`.
///
/// `base` is never modified; every call builds a fresh bucket.
pub fn build_day_bucket<P>(
    base: &[Event],
    range: DateRange,
    filter: &P,
    config: &EngineConfig,
) -> DayBucket
where
    P: EventPredicate + ?Sized,
{
    let expanded = expand_recurring(base, range, config);
    let expanded_len = expanded.len();
    let filtered = filter_events(expanded, filter);

    tracing::debug!(
        base = base.len(),
        expanded = expanded_len,
        filtered = filtered.len(),
        "Filtered expanded events"
    );
    DayBucket::index_within(filtered, range)
}

/// Lays out the timed events of one bucket day under the configured policy.
pub fn day_layout<'a>(
    bucket: &'a DayBucket,
    day: CivilDate,
    config: &EngineConfig,
) -> Vec<LayoutRecord<'a>> {
    let intervals = timed_intervals_for_day(bucket, day, config);
    layout_day(&intervals, config.layout, config)
}

/// Highlights for a civil day in `view`.
pub fn day_highlights(
    rules: &[HighlightRule],
    day: CivilDate,
    view: ViewKind,
    config: &EngineConfig,
) -> HighlightResult {
    let ctx = MatchContext::new(to_gregorian(day), day, view, config);
    match_highlights(rules, &ctx)
}

/// What a view shows for one day: its ordered events and how many of each
/// kind fit under the view's display caps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary<'a> {
    pub day: CivilDate,
    #[serde(flatten)]
    pub events: DayPartition<'a>,
    pub all_day_overflow: Overflow,
    pub timed_overflow: Overflow,
}

/// Orders a bucket day and applies the display caps of `view`.
///
/// Month cells cap both groups; week and day views cap only the all-day row
/// since timed events go on the minute grid.
pub fn summarize_day<'a>(
    bucket: &'a DayBucket,
    day: CivilDate,
    view: ViewKind,
    config: &EngineConfig,
) -> DaySummary<'a> {
    let events = partition_day(bucket.day(day));
    let (all_day_cap, timed_cap) = match view {
        ViewKind::Month => (config.max_month_all_day, config.max_month_timed),
        view if view.has_time_grid() => (config.max_all_day_per_day, usize::MAX),
        _ => (usize::MAX, usize::MAX),
    };

    DaySummary {
        day,
        all_day_overflow: summarize_overflow(events.all_day.len(), all_day_cap),
        timed_overflow: summarize_overflow(events.timed.len(), timed_cap),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventFilter;
    use crate::layout::{LayoutPolicy, Placement};
    use crate::recurrence::RepeatRule;
    use crate::EngineError;
    use chrono::NaiveTime;
    use serde_json::json;

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    fn civil_range(start: CivilDate, end: CivilDate) -> DateRange {
        DateRange::new(to_gregorian(start), to_gregorian(end))
    }

    #[test]
    fn test_monthly_scenario_through_bucket() {
        let events: Vec<Event> = serde_json::from_value(json!([{
            "title": "Rent",
            "start": "1403-01-01",
            "end": "1403-01-01",
            "repeat": { "freq": "monthly", "interval": 1, "count": 3 }
        }]))
        .unwrap();
        let range = civil_range(CivilDate::new(1403, 1, 1), CivilDate::new(1403, 4, 1));

        let bucket = build_day_bucket(&events, range, &EventFilter::new(), &EngineConfig::default());

        let keys: Vec<String> = bucket.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["1403-1-1", "1403-2-1", "1403-3-1"]);
        assert_eq!(bucket.count(CivilDate::new(1403, 4, 1)), 0);
    }

    #[test]
    fn test_far_future_years_land_outside_the_range() {
        let events: Vec<Event> = serde_json::from_value(json!([
            { "title": "Far", "start": "2147483600-01-01" },
            { "title": "Inverted", "start": "300000-01-01", "end": "1403-01-05" },
            { "title": "Here", "start": "1403-01-03" }
        ]))
        .unwrap();
        let range = civil_range(CivilDate::new(1403, 1, 1), CivilDate::new(1403, 1, 31));

        let bucket = build_day_bucket(&events, range, &EventFilter::new(), &EngineConfig::default());

        let keys: Vec<String> = bucket.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["1403-1-3"]);
    }

    #[test]
    fn test_filter_applies_to_occurrences() {
        let start = CivilDate::new(1403, 1, 1);
        let events = vec![
            Event::all_day("Standup", start)
                .with_kind("work")
                .with_repeat(RepeatRule::daily()),
            Event::all_day("Gym", start).with_kind("personal"),
        ];
        let range = civil_range(start, CivilDate::new(1403, 1, 7));
        let filter = EventFilter::new().with_kind("work");

        let bucket = build_day_bucket(&events, range, &filter, &EngineConfig::default());

        assert_eq!(bucket.len(), 7);
        assert!(bucket.events().iter().all(|e| e.kind == "work" && e.occurrence));
    }

    #[test]
    fn test_closure_predicate() {
        let start = CivilDate::new(1403, 1, 1);
        let events = vec![Event::all_day("Keep", start), Event::all_day("Drop", start)];
        let range = DateRange::single(to_gregorian(start));

        let bucket = build_day_bucket(
            &events,
            range,
            &|event: &Event| event.title == "Keep",
            &EngineConfig::default(),
        );

        assert_eq!(bucket.count(start), 1);
    }

    #[test]
    fn test_base_events_are_not_modified() {
        let start = CivilDate::new(1403, 1, 1);
        let events = vec![Event::all_day("Daily", start).with_repeat(RepeatRule::daily())];
        let before = events.clone();
        let range = civil_range(start, CivilDate::new(1403, 1, 3));

        let _ = build_day_bucket(&events, range, &EventFilter::new(), &EngineConfig::default());

        assert_eq!(events, before);
    }

    #[test]
    fn test_visible_range_by_name() {
        let config = EngineConfig::default();
        let anchor = to_gregorian(CivilDate::new(1403, 1, 10));

        let range = visible_range("month", anchor, &config).unwrap();
        assert_eq!(range.civil_start(), CivilDate::new(1403, 1, 1));

        assert_eq!(
            visible_range("agenda", anchor, &config),
            Err(EngineError::UnknownView("agenda".to_string()))
        );
    }

    #[test]
    fn test_visible_range_falls_back_from_disabled_view() {
        let config = EngineConfig::default().with_enabled_views([ViewKind::Day]);
        let anchor = to_gregorian(CivilDate::new(1403, 1, 10));

        assert_eq!(
            visible_range("year", anchor, &config),
            Ok(DateRange::single(anchor))
        );
    }

    #[test]
    fn test_day_layout_uses_configured_policy() {
        let day = CivilDate::new(1403, 2, 2);
        let events = vec![
            Event::timed("A", day, make_time(9, 0), make_time(10, 0)),
            Event::timed("B", day, make_time(9, 30), make_time(10, 30)),
            Event::all_day("Holiday", day),
        ];
        let bucket = DayBucket::index(events);
        let config = EngineConfig::default().with_layout(LayoutPolicy::Columns);

        let records = day_layout(&bucket, day, &config);

        assert_eq!(records.len(), 2);
        assert!(matches!(
            records[1].placement,
            Placement::Column {
                col_index: 1,
                col_count: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_day_highlights() {
        let rules: Vec<HighlightRule> =
            serde_json::from_value(json!([{ "jDates": ["1403-01-01"], "bg": "#fdd" }])).unwrap();
        let config = EngineConfig::default();

        let hit = day_highlights(&rules, CivilDate::new(1403, 1, 1), ViewKind::Month, &config);
        let miss = day_highlights(&rules, CivilDate::new(1403, 1, 2), ViewKind::Month, &config);

        assert!(hit.day_style.is_some());
        assert!(miss.is_empty());
    }

    #[test]
    fn test_summarize_day_caps_month_cells() {
        let day = CivilDate::new(1403, 2, 2);
        let events = vec![
            Event::all_day("B banner", day),
            Event::all_day("a banner", day),
            Event::timed("Late", day, make_time(18, 0), make_time(19, 0)),
            Event::timed("Early", day, make_time(8, 0), make_time(9, 0)),
            Event::timed("Noon", day, make_time(12, 0), make_time(13, 0)),
        ];
        let bucket = DayBucket::index(events);
        let config = EngineConfig::default();

        let month = summarize_day(&bucket, day, ViewKind::Month, &config);
        assert_eq!(month.events.all_day[0].title, "a banner");
        assert_eq!(month.events.timed[0].title, "Early");
        assert_eq!(month.all_day_overflow, Overflow { shown: 1, hidden: 1 });
        assert_eq!(month.timed_overflow, Overflow { shown: 2, hidden: 1 });

        let week = summarize_day(&bucket, day, ViewKind::Week, &config);
        assert!(!week.all_day_overflow.has_hidden());
        assert!(!week.timed_overflow.has_hidden());
    }
}
