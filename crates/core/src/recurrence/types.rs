use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::CivilDate;
use crate::serde::{
    deserialize_interval, deserialize_optional_civil_date, deserialize_optional_count,
    deserialize_optional_weekdays,
};

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    /// Any frequency name the engine does not know. Produces no occurrences.
    Unknown,
}

impl Frequency {
    /// Parses a frequency name. Empty means daily.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Unknown,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

impl<'de> Deserialize<'de> for Frequency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match value {
            None | Some(serde_json::Value::Null) => Frequency::Daily,
            Some(serde_json::Value::String(name)) => Frequency::parse(&name),
            Some(_) => Frequency::Unknown,
        })
    }
}

/// A repeat rule attached to an event, e.g.
/// `{ "freq": "weekly", "interval": 2, "byWeekday": [0, 3], "count": 10 }`.
///
/// Deserialization never fails on bad values: intervals below 1 become 1,
/// non-positive counts are dropped and unknown frequencies map to
/// [`Frequency::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatRule {
    #[serde(default)]
    pub freq: Frequency,
    #[serde(default = "default_interval", deserialize_with = "deserialize_interval")]
    pub interval: u32,
    /// Last civil day (inclusive) an occurrence may fall on.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_civil_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub until: Option<CivilDate>,
    /// Maximum occurrences materialized per expansion.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub count: Option<u32>,
    /// Weekday indices (0 = first day of the local week) for weekly rules.
    #[serde(
        default,
        deserialize_with = "deserialize_optional_weekdays",
        skip_serializing_if = "Option::is_none"
    )]
    pub by_weekday: Option<Vec<u8>>,
}

fn default_interval() -> u32 {
    1
}

impl RepeatRule {
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            until: None,
            count: None,
            by_weekday: None,
        }
    }

    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Sets the interval, coercing 0 to 1.
    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval.max(1);
        self
    }

    pub fn until(mut self, until: CivilDate) -> Self {
        self.until = Some(until);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn on_weekdays(mut self, weekdays: impl IntoIterator<Item = u8>) -> Self {
        self.by_weekday = Some(weekdays.into_iter().collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_rule() {
        let value = json!({
            "freq": "weekly",
            "interval": 2,
            "until": "1404-12-29",
            "count": 50,
            "byWeekday": [0, 2]
        });
        let rule: RepeatRule = serde_json::from_value(value).unwrap();

        assert_eq!(
            rule,
            RepeatRule::weekly()
                .every(2)
                .until(CivilDate::new(1404, 12, 29))
                .count(50)
                .on_weekdays([0, 2])
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let rule: RepeatRule = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rule, RepeatRule::daily());

        let rule: RepeatRule = serde_json::from_value(json!({ "freq": null })).unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
    }

    #[test]
    fn test_deserialize_normalizes_bad_values() {
        let value = json!({ "freq": "yearly", "interval": 0, "count": -2 });
        let rule: RepeatRule = serde_json::from_value(value).unwrap();

        assert_eq!(rule.freq, Frequency::Unknown);
        assert_eq!(rule.interval, 1);
        assert_eq!(rule.count, None);
    }

    #[test]
    fn test_frequency_parse_is_case_insensitive() {
        assert_eq!(Frequency::parse("Monthly"), Frequency::Monthly);
        assert_eq!(Frequency::parse(""), Frequency::Daily);
        assert_eq!(Frequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_every_coerces_zero() {
        assert_eq!(RepeatRule::daily().every(0).interval, 1);
    }
}
