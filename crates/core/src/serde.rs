//! Lenient serde helpers for host-supplied event and rule data.
//!
//! Event lists come straight from the host application. A bad field should
//! degrade to a safe default instead of rejecting the whole list, so these
//! deserializers accept loosely typed JSON and normalize it.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::calendar::CivilDate;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a string that may be missing, null or loosely typed.
/// Numbers keep their text; anything else that is not a string becomes empty.
pub fn deserialize_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Deserialize an optional identifier, accepting strings and numbers.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Deserialize an optional civil date string. Empty strings and non-strings
/// are None; anything else goes through the lenient date parser.
pub fn deserialize_optional_civil_date<'de, D>(
    deserializer: D,
) -> Result<Option<CivilDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(CivilDate::parse(&s)),
        _ => None,
    })
}

/// Deserialize a repeat interval. Missing, non-numeric and values below 1 all
/// become 1.
pub fn deserialize_interval<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(number_from(value.as_ref()).map_or(1, |n| clamp_to_u32(n).max(1)))
}

/// Deserialize an optional positive count. Zero, negatives and garbage are None.
pub fn deserialize_optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(number_from(value.as_ref())
        .map(clamp_to_u32)
        .filter(|n| *n > 0))
}

/// Deserialize an optional list of weekday indices (0..=6).
///
/// Non-arrays become None; entries outside 0..=6 or non-numeric are dropped.
/// An empty array is kept as `Some(vec![])` so callers can tell "given but
/// empty" from "absent".
pub fn deserialize_optional_weekdays<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| number_from(Some(item)))
                .filter(|n| (0.0..=6.0).contains(n) && n.fract() == 0.0)
                .map(|n| n as u8)
                .collect(),
        ),
        _ => None,
    })
}

/// Deserialize a list of strings, ignoring non-string entries and non-arrays.
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Deserialize a boolean flag, treating anything other than `true` as false.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

fn number_from(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn clamp_to_u32(n: f64) -> u32 {
    n.clamp(0.0, f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_string")]
        text: String,
        #[serde(default, deserialize_with = "deserialize_optional_id")]
        id: Option<String>,
        #[serde(default = "one", deserialize_with = "deserialize_interval")]
        interval: u32,
        #[serde(default, deserialize_with = "deserialize_optional_count")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "deserialize_optional_weekdays")]
        weekdays: Option<Vec<u8>>,
        #[serde(default, deserialize_with = "deserialize_string_list")]
        names: Vec<String>,
        #[serde(default, deserialize_with = "deserialize_flag")]
        flag: bool,
        #[serde(default, deserialize_with = "deserialize_optional_civil_date")]
        until: Option<CivilDate>,
    }

    fn one() -> u32 {
        1
    }

    #[test]
    fn test_deserialize_optional_string_whitespace() {
        let json = r#"{"string_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_string_tolerates_other_types() {
        let result: TestStruct = serde_json::from_str(r#"{"text": "Dentist"}"#).unwrap();
        assert_eq!(result.text, "Dentist");

        let result: TestStruct = serde_json::from_str(r#"{"text": 7}"#).unwrap();
        assert_eq!(result.text, "7");

        for json in [r#"{"text": null}"#, r#"{"text": [1]}"#, r#"{"text": false}"#, "{}"] {
            let result: TestStruct = serde_json::from_str(json).unwrap();
            assert_eq!(result.text, "", "input: {json}");
        }
    }

    #[test]
    fn test_deserialize_optional_id_number_and_string() {
        let result: TestStruct = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(result.id, Some("42".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"id": "ev-1"}"#).unwrap();
        assert_eq!(result.id, Some("ev-1".to_string()));

        let result: TestStruct = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(result.id, None);
    }

    #[test]
    fn test_deserialize_interval_coerces_to_one() {
        for json in [
            r#"{"interval": 0}"#,
            r#"{"interval": -3}"#,
            r#"{"interval": "abc"}"#,
            r#"{"interval": null}"#,
            r#"{}"#,
        ] {
            let result: TestStruct = serde_json::from_str(json).unwrap();
            assert_eq!(result.interval, 1, "input: {json}");
        }

        let result: TestStruct = serde_json::from_str(r#"{"interval": "3"}"#).unwrap();
        assert_eq!(result.interval, 3);
    }

    #[test]
    fn test_deserialize_optional_count() {
        let result: TestStruct = serde_json::from_str(r#"{"count": 5}"#).unwrap();
        assert_eq!(result.count, Some(5));

        let result: TestStruct = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert_eq!(result.count, None);
    }

    #[test]
    fn test_deserialize_optional_weekdays_drops_invalid_entries() {
        let json = r#"{"weekdays": [0, 3, 7, -1, "x", 2.5, 6]}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.weekdays, Some(vec![0, 3, 6]));

        let result: TestStruct = serde_json::from_str(r#"{"weekdays": 3}"#).unwrap();
        assert_eq!(result.weekdays, None);
    }

    #[test]
    fn test_deserialize_string_list() {
        let json = r#"{"names": ["month", 3, "week"]}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.names, vec!["month".to_string(), "week".to_string()]);
    }

    #[test]
    fn test_deserialize_optional_civil_date() {
        let result: TestStruct = serde_json::from_str(r#"{"until": "1404-12-29"}"#).unwrap();
        assert_eq!(result.until, Some(CivilDate::new(1404, 12, 29)));

        let result: TestStruct = serde_json::from_str(r#"{"until": ""}"#).unwrap();
        assert_eq!(result.until, None);
    }

    #[test]
    fn test_deserialize_flag() {
        let result: TestStruct = serde_json::from_str(r#"{"flag": true}"#).unwrap();
        assert!(result.flag);

        let result: TestStruct = serde_json::from_str(r#"{"flag": "yes"}"#).unwrap();
        assert!(!result.flag);
    }
}
