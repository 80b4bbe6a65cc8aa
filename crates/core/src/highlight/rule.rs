use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::matcher::MatchContext;
use crate::calendar::{CivilDate, MINUTES_PER_DAY};
use crate::serde::deserialize_string_list;
use crate::view::ViewKind;

/// Background used for time blocks that do not name one.
pub const DEFAULT_TIME_BLOCK_BG: &str = "rgba(26,115,232,0.08)";

/// One condition a rule places on a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// The view being rendered is one of these names.
    Views(Vec<String>),
    /// The day's local weekday index is one of these.
    Weekdays(Vec<i64>),
    /// The civil date is exactly one of these.
    Dates(Vec<CivilDate>),
    /// The civil date lies within these `yyyymmdd` bounds, inclusive. A
    /// missing bound is open.
    Range { start: Option<i64>, end: Option<i64> },
}

impl Predicate {
    pub fn holds(&self, ctx: &MatchContext) -> bool {
        match self {
            Predicate::Views(views) => views.iter().any(|view| view == ctx.view.as_str()),
            Predicate::Weekdays(weekdays) => weekdays.contains(&i64::from(ctx.weekday)),
            Predicate::Dates(dates) => dates.contains(&ctx.civil),
            Predicate::Range { start, end } => {
                let day = ctx.civil.ordinal();
                start.is_none_or(|start| day >= start) && end.is_none_or(|end| day <= end)
            }
        }
    }
}

/// Day-level styling. Either part may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStyle {
    pub bg: Option<String>,
    pub class_name: Option<String>,
}

/// A highlighted minute range within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub start_minute: u32,
    pub end_minute: u32,
    pub bg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl TimeBlock {
    /// Clamps both ends to the day. `None` when nothing is left.
    pub fn clamped(start_minute: i64, end_minute: i64) -> Option<Self> {
        let day = i64::from(MINUTES_PER_DAY);
        let start = start_minute.clamp(0, day);
        let end = end_minute.clamp(0, day);
        if end <= start {
            return None;
        }
        Some(Self {
            start_minute: u32::try_from(start).ok()?,
            end_minute: u32::try_from(end).ok()?,
            bg: DEFAULT_TIME_BLOCK_BG.to_string(),
            class_name: None,
        })
    }
}

/// A highlight rule as supplied by the host, e.g.
/// `{ "when": { "weekdays": [6] }, "bg": "#fee" }` or
/// `{ "jRange": { "start": "1403-01-01" }, "timeStart": "12:00", "timeEnd": "13:00" }`.
///
/// Conditions may sit under `when` or directly on the rule. Unrecognized or
/// ill-typed fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRule")]
pub struct HighlightRule {
    pub predicates: Vec<Predicate>,
    pub day_style: Option<DayStyle>,
    pub time_block: Option<TimeBlock>,
}

impl HighlightRule {
    /// A rule with no conditions and no payload.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_views(mut self, views: impl IntoIterator<Item = ViewKind>) -> Self {
        let names = views.into_iter().map(|view| view.as_str().to_string()).collect();
        self.predicates.push(Predicate::Views(names));
        self
    }

    pub fn on_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        let weekdays = weekdays.into_iter().map(i64::from).collect();
        self.predicates.push(Predicate::Weekdays(weekdays));
        self
    }

    pub fn on_dates(mut self, dates: impl IntoIterator<Item = CivilDate>) -> Self {
        self.predicates.push(Predicate::Dates(dates.into_iter().collect()));
        self
    }

    pub fn between(mut self, start: Option<CivilDate>, end: Option<CivilDate>) -> Self {
        self.predicates.push(Predicate::Range {
            start: start.map(|d| d.ordinal()),
            end: end.map(|d| d.ordinal()),
        });
        self
    }

    pub fn with_day_style(mut self, bg: Option<&str>, class_name: Option<&str>) -> Self {
        self.day_style = Some(DayStyle {
            bg: bg.map(str::to_string),
            class_name: class_name.map(str::to_string),
        });
        self
    }

    /// Adds a time block with the default background. Dropped if it is empty
    /// once clamped to the day.
    pub fn with_time_block(mut self, start_minute: i64, end_minute: i64) -> Self {
        self.time_block = TimeBlock::clamped(start_minute, end_minute);
        self
    }

    /// Whether every predicate holds. A rule without predicates always matches.
    pub fn matches(&self, ctx: &MatchContext) -> bool {
        self.predicates.iter().all(|predicate| predicate.holds(ctx))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRule {
    #[serde(default, deserialize_with = "deserialize_string_list")]
    views: Vec<String>,
    #[serde(default)]
    when: Option<Value>,
    #[serde(default)]
    day: Option<Value>,
    #[serde(default)]
    bg: Option<Value>,
    #[serde(default)]
    class_name: Option<Value>,
    #[serde(default)]
    time: Option<Value>,
    #[serde(default)]
    time_start: Option<Value>,
    #[serde(default)]
    time_end: Option<Value>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl From<RawRule> for HighlightRule {
    fn from(raw: RawRule) -> Self {
        let mut predicates = Vec::new();
        if !raw.views.is_empty() {
            predicates.push(Predicate::Views(raw.views.clone()));
        }

        let empty = Map::new();
        let conditions = match raw.when.as_ref() {
            Some(when) if truthy(when) => when.as_object().unwrap_or(&empty),
            _ => &raw.rest,
        };
        predicates.extend(condition_predicates(conditions));

        Self {
            predicates,
            day_style: day_style(&raw),
            time_block: time_block(&raw),
        }
    }
}

fn condition_predicates(conditions: &Map<String, Value>) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(Value::Array(items)) = either(conditions, "weekday", "weekdays") {
        if !items.is_empty() {
            let weekdays = items.iter().filter_map(whole_number).collect();
            predicates.push(Predicate::Weekdays(weekdays));
        }
    }

    if let Some(Value::Array(items)) = either(conditions, "jDates", "dates") {
        if !items.is_empty() {
            let dates = items.iter().map(|item| CivilDate::parse(&as_text(item))).collect();
            predicates.push(Predicate::Dates(dates));
        }
    }

    if let Some(Value::Object(range)) = either(conditions, "jRange", "range") {
        let bound = |key: &str| {
            range
                .get(key)
                .filter(|value| truthy(value))
                .map(|value| CivilDate::parse(&as_text(value)).ordinal())
        };
        let (start, end) = (bound("start"), bound("end"));
        if start.is_some() || end.is_some() {
            predicates.push(Predicate::Range { start, end });
        }
    }

    predicates
}

fn day_style(raw: &RawRule) -> Option<DayStyle> {
    let present = [&raw.day, &raw.bg, &raw.class_name]
        .into_iter()
        .any(|value| value.as_ref().is_some_and(truthy));
    if !present {
        return None;
    }

    let day = raw.day.as_ref().and_then(Value::as_object);
    let field = |key: &str| day.and_then(|day| day.get(key)).and_then(style_text);
    Some(DayStyle {
        bg: field("bg").or_else(|| raw.bg.as_ref().and_then(style_text)),
        class_name: field("className").or_else(|| raw.class_name.as_ref().and_then(style_text)),
    })
}

fn time_block(raw: &RawRule) -> Option<TimeBlock> {
    let given = raw.time.as_ref().filter(|time| truthy(time));
    let (start, end, bg, class_name) = match given {
        Some(time) => {
            let time = time.as_object()?;
            (
                time.get("start"),
                time.get("end"),
                time.get("bg"),
                time.get("className"),
            )
        }
        None => {
            let flat = [&raw.time_start, &raw.time_end]
                .into_iter()
                .any(|value| value.as_ref().is_some_and(truthy));
            if !flat {
                return None;
            }
            (raw.time_start.as_ref(), raw.time_end.as_ref(), raw.bg.as_ref(), None)
        }
    };

    let start = start.filter(|value| truthy(value))?;
    let end = end.filter(|value| truthy(value))?;
    let mut block =
        TimeBlock::clamped(clock_minutes(&as_text(start)), clock_minutes(&as_text(end)))?;
    if let Some(bg) = bg.and_then(style_text) {
        block.bg = bg;
    }
    block.class_name = class_name.and_then(style_text);
    Some(block)
}

/// The first key if its value is truthy, otherwise the second key.
fn either<'a>(map: &'a Map<String, Value>, first: &str, second: &str) -> Option<&'a Value> {
    map.get(first)
        .filter(|value| truthy(value))
        .or_else(|| map.get(second))
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A style token: non-empty strings, or numbers written out.
fn style_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn whole_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|n| n.fract() == 0.0).map(|n| n as i64))
}

/// Minutes since midnight for `"HH:MM"`. Bad parts count as 0.
fn clock_minutes(input: &str) -> i64 {
    let mut parts = input.split(':').map(|part| part.trim().parse::<i64>().unwrap_or(0));
    let hours = parts.next().unwrap_or(0);
    let minutes = parts.next().unwrap_or(0);
    hours.saturating_mul(60).saturating_add(minutes)
}
