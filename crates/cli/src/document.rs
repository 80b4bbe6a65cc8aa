//! Loading the events document a command runs against.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use zarvan_core::event::{normalize_events, Event, TypeStyleOverride};
use zarvan_core::highlight::HighlightRule;
use zarvan_core::EngineConfig;

use crate::error::{CliError, Result};

/// Everything the host would hand the engine for one calendar.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Document {
    pub events: Vec<Event>,
    pub highlights: Vec<HighlightRule>,
    pub type_styles: HashMap<String, TypeStyleOverride>,
    pub config: EngineConfig,
}

impl Document {
    /// Reads a document from disk. See [`Document::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_json(&text)?;

        tracing::info!(
            path = %path.display(),
            events = document.events.len(),
            highlights = document.highlights.len(),
            "Loaded document"
        );
        Ok(document)
    }

    /// Parses either a bare array of events or a full document object.
    /// Missing `end` values are filled in from `start`.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let mut document = match value {
            Value::Array(_) => Self {
                events: serde_json::from_value(value)?,
                ..Self::default()
            },
            other => serde_json::from_value(other)?,
        };
        document.events = normalize_events(document.events);
        Ok(document)
    }
}
