//! State derived from the current event list.
//!
//! Recomputed from scratch on every pass instead of being cached, so it can
//! never go stale when the host swaps its event list.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::filter::normalize_text;
use super::types::Event;

/// Colors for one event type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStyle {
    pub bg: String,
    pub color: String,
}

/// Host-supplied colors for a type; either part may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeStyleOverride {
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Sorted, de-duplicated, trimmed event types.
pub fn available_types(events: &[Event]) -> Vec<String> {
    collect_sorted(events.iter().map(|event| event.kind.as_str()))
}

/// Sorted, de-duplicated, trimmed titles for search suggestions.
pub fn autocomplete_titles(events: &[Event]) -> Vec<String> {
    collect_sorted(events.iter().map(|event| event.title.as_str()))
}

fn collect_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Titles containing `query` (case-insensitive), at most `limit` of them.
pub fn suggest_titles<'a>(titles: &'a [String], query: &str, limit: usize) -> Vec<&'a str> {
    let query = normalize_text(query);
    if query.is_empty() {
        return Vec::new();
    }
    titles
        .iter()
        .filter(|title| normalize_text(title).contains(&query))
        .take(limit)
        .map(String::as_str)
        .collect()
}

/// Automatic style for a type: the FNV-1a hash of its name picks a hue.
pub fn type_style(kind: &str) -> TypeStyle {
    let hue = fnv1a(kind) % 360;
    TypeStyle {
        bg: format!("hsl({hue}, 70%, 45%)"),
        color: "#fff".to_string(),
    }
}

/// Style for every type present in `events`, with host overrides applied.
pub fn type_palette(
    events: &[Event],
    overrides: &HashMap<String, TypeStyleOverride>,
) -> BTreeMap<String, TypeStyle> {
    available_types(events)
        .into_iter()
        .map(|kind| {
            let auto = type_style(&kind);
            let style = match overrides.get(&kind) {
                Some(custom) if custom.bg.is_some() || custom.color.is_some() => TypeStyle {
                    bg: custom.bg.clone().unwrap_or(auto.bg),
                    color: custom.color.clone().unwrap_or(auto.color),
                },
                _ => auto,
            };
            (kind, style)
        })
        .collect()
}

/// 32-bit FNV-1a over UTF-16 code units.
fn fnv1a(text: &str) -> u32 {
    text.encode_utf16().fold(2_166_136_261_u32, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(16_777_619)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CivilDate;

    fn make_events() -> Vec<Event> {
        let date = CivilDate::new(1403, 1, 1);
        vec![
            Event::all_day("Gym", date).with_kind("personal"),
            Event::all_day(" Standup ", date).with_kind("meeting "),
            Event::all_day("Standup", date).with_kind("meeting"),
            Event::all_day("", date),
        ]
    }

    #[test]
    fn test_available_types_sorted_unique() {
        assert_eq!(available_types(&make_events()), vec!["meeting", "personal"]);
    }

    #[test]
    fn test_autocomplete_titles_sorted_unique() {
        assert_eq!(autocomplete_titles(&make_events()), vec!["Gym", "Standup"]);
    }

    #[test]
    fn test_suggest_titles() {
        let titles = vec![
            "Daily standup".to_string(),
            "Gym".to_string(),
            "Standup retro".to_string(),
        ];
        assert_eq!(
            suggest_titles(&titles, "STAND", 30),
            vec!["Daily standup", "Standup retro"]
        );
        assert_eq!(suggest_titles(&titles, "stand", 1), vec!["Daily standup"]);
        assert!(suggest_titles(&titles, "  ", 30).is_empty());
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(""), 2_166_136_261);
        assert_eq!(fnv1a("a"), 0xe40c_292c);
    }

    #[test]
    fn test_type_style_is_stable() {
        let style = type_style("meeting");
        assert_eq!(style, type_style("meeting"));
        assert_eq!(style.color, "#fff");
        assert!(style.bg.starts_with("hsl("));
    }

    #[test]
    fn test_type_palette_applies_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "meeting".to_string(),
            TypeStyleOverride {
                bg: Some("#123456".to_string()),
                color: None,
            },
        );
        overrides.insert("personal".to_string(), TypeStyleOverride::default());

        let palette = type_palette(&make_events(), &overrides);

        assert_eq!(palette.len(), 2);
        assert_eq!(palette["meeting"].bg, "#123456");
        assert_eq!(palette["meeting"].color, "#fff");
        assert_eq!(palette["personal"], type_style("personal"));
    }
}
