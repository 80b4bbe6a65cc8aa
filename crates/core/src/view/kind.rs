use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The five calendar views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Month,
    Week,
    Day,
    Year,
    List,
}

impl ViewKind {
    /// Every view, in fallback order.
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Month,
        ViewKind::Week,
        ViewKind::Day,
        ViewKind::Year,
        ViewKind::List,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Month => "month",
            ViewKind::Week => "week",
            ViewKind::Day => "day",
            ViewKind::Year => "year",
            ViewKind::List => "list",
        }
    }

    /// Whether the view renders a minute grid with timed events.
    pub fn has_time_grid(&self) -> bool {
        matches!(self, ViewKind::Week | ViewKind::Day)
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        ViewKind::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| EngineError::UnknownView(name.to_string()))
    }
}
