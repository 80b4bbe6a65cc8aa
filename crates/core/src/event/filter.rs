use serde::{Deserialize, Serialize};

use super::types::Event;

/// Type filter value meaning "every type".
pub const ALL_TYPES: &str = "__all__";

/// Decides whether an expanded event is shown in the current pass.
pub trait EventPredicate {
    fn accepts(&self, event: &Event) -> bool;
}

impl<F> EventPredicate for F
where
    F: Fn(&Event) -> bool,
{
    fn accepts(&self, event: &Event) -> bool {
        self(event)
    }
}

/// The sidebar filter: exact type match plus case-insensitive title search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// `None`, empty or [`ALL_TYPES`] disables the type filter.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::serde::deserialize_optional_string"
    )]
    pub kind: Option<String>,
    #[serde(rename = "q", default)]
    pub query: String,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Returns true if neither part of the filter is active.
    pub fn is_empty(&self) -> bool {
        self.active_kind().is_none() && normalize_text(&self.query).is_empty()
    }

    fn active_kind(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .filter(|kind| !kind.is_empty() && *kind != ALL_TYPES)
    }
}

impl EventPredicate for EventFilter {
    fn accepts(&self, event: &Event) -> bool {
        if let Some(kind) = self.active_kind() {
            if event.kind != kind {
                return false;
            }
        }

        let query = normalize_text(&self.query);
        query.is_empty() || normalize_text(&event.title).contains(&query)
    }
}

/// Trims and lowercases text for comparisons.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Keeps the events accepted by `predicate`, preserving order.
pub fn filter_events<P>(events: Vec<Event>, predicate: &P) -> Vec<Event>
where
    P: EventPredicate + ?Sized,
{
    events
        .into_iter()
        .filter(|event| predicate.accepts(event))
        .collect()
}
