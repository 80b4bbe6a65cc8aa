use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minutes in a rendered day.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A Jalali calendar date. Month is 1-12.
///
/// Never validated on construction: the parser yields zeroed components for
/// garbage input and callers are expected to pass real dates otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Parses the date part of `"Y-M-D"` or `"Y-M-DTHH:MM"`.
    ///
    /// Missing or non-numeric components become 0.
    pub fn parse(input: &str) -> Self {
        let date_part = input.split('T').next().unwrap_or_default();
        let mut parts = date_part.split('-');
        let year = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        let month = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        let day = parts
            .next()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(0);
        Self { year, month, day }
    }

    /// Single comparable number, `yyyymmdd`.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 10_000 + i64::from(self.month) * 100 + i64::from(self.day)
    }

    /// Total months since year 0, for month-offset arithmetic.
    pub fn month_index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Attaches a time of day.
    pub fn at(self, time: NaiveTime) -> CivilDateTime {
        CivilDateTime::timed(self, time)
    }

    pub fn key(self) -> DayKey {
        DayKey(self)
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl Serialize for CivilDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => CivilDate::parse(&s),
            _ => CivilDate::default(),
        })
    }
}

/// A Jalali date with an optional wall-clock time of day.
///
/// An absent time marks the value as date-only, which makes the owning event
/// all-day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDateTime {
    pub date: CivilDate,
    pub time: Option<NaiveTime>,
}

impl CivilDateTime {
    pub const fn date_only(date: CivilDate) -> Self {
        Self { date, time: None }
    }

    pub const fn timed(date: CivilDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Parses `"Y-M-D"` or `"Y-M-DTHH:MM"`. Seconds are ignored.
    ///
    /// A malformed time part degrades to midnight rather than failing.
    pub fn parse(input: &str) -> Self {
        let date = CivilDate::parse(input);
        let time = input.split_once('T').map(|(_, time)| parse_time(time));
        Self { date, time }
    }

    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Minute of day of the time part, 0 when date-only.
    pub fn minutes(&self) -> u32 {
        self.time.map_or(0, |t| t.hour() * 60 + t.minute())
    }
}

impl From<CivilDate> for CivilDateTime {
    fn from(date: CivilDate) -> Self {
        Self::date_only(date)
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(
                f,
                "{}T{:02}:{:02}",
                self.date,
                time.hour(),
                time.minute()
            ),
            None => write!(f, "{}", self.date),
        }
    }
}

impl Serialize for CivilDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(serde_json::Value::String(s)) => CivilDateTime::parse(&s),
            _ => CivilDateTime::default(),
        })
    }
}

fn parse_time(input: &str) -> NaiveTime {
    let hhmm: String = input.chars().take(5).collect();
    let mut parts = hhmm.split(':');
    let hour = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    let minute = parts
        .next()
        .and_then(|p| p.trim().parse().ok())
        .unwrap_or(0);
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Day-bucket key, displayed as unpadded `"year-month-day"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(pub CivilDate);

impl DayKey {
    pub fn date(&self) -> CivilDate {
        self.0
    }
}

impl From<CivilDate> for DayKey {
    fn from(date: CivilDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
