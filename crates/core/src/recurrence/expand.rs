//! Expands recurring definitions into occurrences within a visible range.

use chrono::{Duration, NaiveDate, NaiveTime};

use super::types::{Frequency, RepeatRule};
use crate::calendar::{to_civil, to_gregorian, weekday_index, CivilDate, CivilDateTime, DateRange};
use crate::config::EngineConfig;
use crate::event::Event;

/// The defining day of a recurring event.
struct Anchor {
    day: NaiveDate,
    civil: CivilDate,
}

/// One day being tested against a rule.
struct Candidate {
    civil: CivilDate,
    /// Days since the anchor day; never negative.
    day_offset: i64,
    weekday: u8,
}

impl Frequency {
    /// Whether `candidate` is an occurrence day for a rule of this frequency.
    fn admits(
        self,
        rule: &RepeatRule,
        weekdays: &[u8],
        anchor: &Anchor,
        candidate: &Candidate,
    ) -> bool {
        let interval = i64::from(rule.interval.max(1));
        match self {
            Frequency::Daily => candidate.day_offset % interval == 0,
            Frequency::Weekly => {
                weekdays.contains(&candidate.weekday)
                    && (candidate.day_offset / 7) % interval == 0
            }
            Frequency::Monthly => {
                candidate.civil.day == anchor.civil.day
                    && (candidate.civil.month_index() - anchor.civil.month_index()) % interval == 0
            }
            Frequency::Unknown => false,
        }
    }
}

/// Replaces every recurring definition with its occurrences inside `range`.
///
/// Non-recurring events pass through unchanged and in place; range
/// intersection for them is left to the day indexer. Definitions are never
/// emitted themselves.
///
/// Iteration is bounded by `range`: it starts at the later of the range start
/// and the defining start day, and stops at the range end, at the rule's
/// `until` day, or once `count` occurrences have been produced.
pub fn expand_recurring(events: &[Event], range: DateRange, config: &EngineConfig) -> Vec<Event> {
    let mut out = Vec::with_capacity(events.len());
    let mut definitions = 0usize;

    for event in events {
        match &event.repeat {
            Some(rule) => {
                definitions += 1;
                let before = out.len();
                expand_event(event, rule, range, config, &mut out);
                tracing::trace!(
                    title = %event.title,
                    freq = %rule.freq,
                    occurrences = out.len() - before,
                    "Expanded recurring event"
                );
            }
            None => out.push(event.clone()),
        }
    }

    tracing::debug!(
        events = events.len(),
        definitions,
        output = out.len(),
        start = %range.start,
        end = %range.end,
        "Expanded events for range"
    );
    out
}

fn expand_event(
    event: &Event,
    rule: &RepeatRule,
    range: DateRange,
    config: &EngineConfig,
    out: &mut Vec<Event>,
) {
    if rule.freq == Frequency::Unknown {
        tracing::warn!(title = %event.title, "Unknown repeat frequency, skipping");
        return;
    }

    let anchor = Anchor {
        day: to_gregorian(event.start.date),
        civil: event.start.date,
    };
    let all_day = event.is_all_day();
    let start_time = event.start.time.unwrap_or(NaiveTime::MIN);
    let duration = if all_day {
        Duration::zero()
    } else {
        elapsed(event).max(Duration::minutes(i64::from(config.min_timed_minutes)))
    };
    let weekdays = rule
        .by_weekday
        .clone()
        .unwrap_or_else(|| vec![weekday_index(anchor.day, config.week_start)]);
    let until = rule.until.map(to_gregorian);

    let window = DateRange::new(range.start.max(anchor.day), range.end);
    let mut produced = 0u32;

    for day in window.days() {
        if until.is_some_and(|until| day > until) {
            break;
        }

        let candidate = Candidate {
            civil: to_civil(day),
            day_offset: day.signed_duration_since(anchor.day).num_days(),
            weekday: weekday_index(day, config.week_start),
        };
        if !rule.freq.admits(rule, &weekdays, &anchor, &candidate) {
            continue;
        }

        out.push(materialize(
            event,
            day,
            candidate.civil,
            start_time,
            duration,
            all_day,
        ));
        produced += 1;

        if rule.count.is_some_and(|count| produced >= count) {
            break;
        }
    }
}

/// Wall-clock time elapsed between the defining start and end.
fn elapsed(event: &Event) -> Duration {
    let end = event.end_or_start();
    let start_at = to_gregorian(event.start.date).and_time(event.start.time.unwrap_or(NaiveTime::MIN));
    let end_at = to_gregorian(end.date).and_time(end.time.unwrap_or(NaiveTime::MIN));
    end_at.signed_duration_since(start_at)
}

/// Copies `event` onto `day`. Timed copies keep the defining duration exactly.
fn materialize(
    event: &Event,
    day: NaiveDate,
    civil: CivilDate,
    start_time: NaiveTime,
    duration: Duration,
    all_day: bool,
) -> Event {
    let mut occurrence = event.clone();

    if all_day {
        occurrence.start = CivilDateTime::date_only(civil);
        occurrence.end = Some(CivilDateTime::date_only(civil));
    } else {
        let start_at = day.and_time(start_time);
        let end_at = start_at.checked_add_signed(duration).unwrap_or(start_at);
        occurrence.start = civil.at(start_time);
        occurrence.end = Some(to_civil(end_at.date()).at(end_at.time()));
    }

    occurrence.all_day = all_day;
    occurrence.occurrence = true;
    occurrence
}
