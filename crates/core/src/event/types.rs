use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::calendar::{CivilDate, CivilDateTime};
use crate::recurrence::RepeatRule;
use crate::serde::{deserialize_flag, deserialize_optional_id, deserialize_string};

/// A calendar event as supplied by the host, or an occurrence produced from a
/// recurring definition.
///
/// Fields the engine does not know about are kept in `extra` and copied onto
/// every occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string")]
    pub title: String,
    /// Event category, used for filtering and type colors.
    #[serde(rename = "type", default, deserialize_with = "deserialize_string")]
    pub kind: String,
    #[serde(default)]
    pub start: CivilDateTime,
    /// Defaults to `start` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<CivilDateTime>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub all_day: bool,
    /// Keeps a multi-day event on the time grid instead of the all-day row.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub force_timed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<RepeatRule>,
    /// Set on copies materialized by the recurrence expander.
    #[serde(
        default,
        rename = "_occurrence",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub occurrence: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Event {
    /// Creates an event starting (and ending) at `start`.
    pub fn new(title: impl Into<String>, start: impl Into<CivilDateTime>) -> Self {
        Self {
            id: None,
            title: title.into(),
            kind: String::new(),
            start: start.into(),
            end: None,
            all_day: false,
            force_timed: false,
            repeat: None,
            occurrence: false,
            extra: serde_json::Map::new(),
        }
    }

    /// Creates a single-day all-day event.
    pub fn all_day(title: impl Into<String>, date: CivilDate) -> Self {
        let mut event = Self::new(title, date);
        event.all_day = true;
        event
    }

    /// Creates a timed event within one day.
    pub fn timed(
        title: impl Into<String>,
        date: CivilDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self::new(title, date.at(start)).with_end(date.at(end))
    }

    /// Creates an all-day event spanning `start..=end`.
    pub fn multi_day(title: impl Into<String>, start: CivilDate, end: CivilDate) -> Self {
        Self::new(title, start).with_end(end)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_end(mut self, end: impl Into<CivilDateTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn with_repeat(mut self, repeat: RepeatRule) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Keeps a multi-day event on the time grid.
    pub fn force_timed(mut self) -> Self {
        self.force_timed = true;
        self
    }

    /// End, falling back to start.
    pub fn end_or_start(&self) -> CivilDateTime {
        self.end.unwrap_or(self.start)
    }

    pub fn start_date(&self) -> CivilDate {
        self.start.date
    }

    pub fn end_date(&self) -> CivilDate {
        self.end_or_start().date
    }

    /// Returns true if start and end fall on different civil days.
    pub fn is_multi_day(&self) -> bool {
        self.start_date() != self.end_date()
    }

    /// All-day when flagged, when the start carries no time, or when it spans
    /// several days without `force_timed`.
    pub fn is_all_day(&self) -> bool {
        self.all_day || !self.start.has_time() || (self.is_multi_day() && !self.force_timed)
    }

    /// Chronological sort key: start date, then start minute.
    pub fn sort_key(&self) -> (CivilDate, u32) {
        (self.start.date, self.start.minutes())
    }
}

/// Fills in missing `end` values with `start`.
pub fn normalize_events(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .map(|mut event| {
            event.end.get_or_insert(event.start);
            event
        })
        .collect()
}
