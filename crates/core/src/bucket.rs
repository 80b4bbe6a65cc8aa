//! Day indexer: maps each civil day to the events touching it.

use std::collections::BTreeMap;

use crate::calendar::{to_civil, to_gregorian, CivilDate, DateRange, DayKey};
use crate::event::Event;

/// Events grouped by the civil days they span, for one render pass.
///
/// The bucket owns its events; each day holds indices into them so a
/// multi-day event is stored once no matter how many days it covers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBucket {
    events: Vec<Event>,
    days: BTreeMap<DayKey, Vec<usize>>,
}

impl DayBucket {
    /// Indexes every day of every event's span.
    pub fn index(events: Vec<Event>) -> Self {
        Self::build(events, None)
    }

    /// Indexes only the days of each span that fall inside `range`.
    pub fn index_within(events: Vec<Event>, range: DateRange) -> Self {
        Self::build(events, Some(range))
    }

    fn build(events: Vec<Event>, range: Option<DateRange>) -> Self {
        let mut days: BTreeMap<DayKey, Vec<usize>> = BTreeMap::new();

        for (position, event) in events.iter().enumerate() {
            let span = span_of(event);
            let span = match range {
                Some(range) => span.intersect(range),
                None => span,
            };
            for day in span.days() {
                days.entry(to_civil(day).key()).or_default().push(position);
            }
        }

        tracing::debug!(events = events.len(), days = days.len(), "Built day bucket");
        Self { events, days }
    }

    /// Events touching `date`, in input order.
    pub fn day(&self, date: CivilDate) -> impl Iterator<Item = &Event> + '_ {
        self.days
            .get(&date.key())
            .into_iter()
            .flatten()
            .map(|&position| &self.events[position])
    }

    /// Number of events touching `date`.
    pub fn count(&self, date: CivilDate) -> usize {
        self.days.get(&date.key()).map_or(0, Vec::len)
    }

    /// Days with at least one event, in chronological order.
    pub fn keys(&self) -> impl Iterator<Item = DayKey> + '_ {
        self.days.keys().copied()
    }

    /// Each non-empty day with its events.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, Vec<&Event>)> + '_ {
        self.days.iter().map(|(key, positions)| {
            (
                *key,
                positions.iter().map(|&position| &self.events[position]).collect(),
            )
        })
    }

    /// All indexed events, including ones that landed on no day.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of non-empty days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// First through last civil day of an event, as Gregorian days.
/// Empty when the end precedes the start.
fn span_of(event: &Event) -> DateRange {
    DateRange::new(to_gregorian(event.start_date()), to_gregorian(event.end_date()))
}
