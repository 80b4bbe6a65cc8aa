//! Engine configuration from the environment and command line.

use std::env;

use chrono::Weekday;
use zarvan_core::{EngineConfig, LayoutPolicy};

use crate::cli::{parse_weekday, Cli};
use crate::error::{CliError, Result};

/// Engine overrides read from environment variables.
///
/// Environment variables:
/// - `ZARVAN_WEEK_START` - first day of the week (default: sat)
/// - `ZARVAN_LAYOUT` - `overlap` or `columns` (default: overlap)
/// - `ZARVAN_OVERLAP_STEP` - stack offset per level in percent (default: 14)
/// - `ZARVAN_OVERLAP_MIN_WIDTH` - narrowest stacked width in percent (default: 42)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub week_start: Option<Weekday>,
    pub layout: Option<LayoutPolicy>,
    pub overlap_step_percent: Option<u32>,
    pub overlap_min_width_percent: Option<u32>,
}

impl EnvConfig {
    /// Load overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load overrides through `lookup`. Unset or blank variables are skipped,
    /// unparsable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |name: &'static str| lookup(name).filter(|value| !value.trim().is_empty());

        Ok(Self {
            week_start: read("ZARVAN_WEEK_START")
                .map(|value| parse_var("ZARVAN_WEEK_START", value, |v| parse_weekday(v).ok()))
                .transpose()?,
            layout: read("ZARVAN_LAYOUT")
                .map(|value| parse_var("ZARVAN_LAYOUT", value, |v| v.parse().ok()))
                .transpose()?,
            overlap_step_percent: read("ZARVAN_OVERLAP_STEP")
                .map(|value| parse_var("ZARVAN_OVERLAP_STEP", value, |v| v.trim().parse().ok()))
                .transpose()?,
            overlap_min_width_percent: read("ZARVAN_OVERLAP_MIN_WIDTH")
                .map(|value| {
                    parse_var("ZARVAN_OVERLAP_MIN_WIDTH", value, |v| v.trim().parse().ok())
                })
                .transpose()?,
        })
    }

    /// Applies the overrides that are set.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(week_start) = self.week_start {
            config.week_start = week_start;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if let Some(step) = self.overlap_step_percent {
            config.overlap_step_percent = step;
        }
        if let Some(min_width) = self.overlap_min_width_percent {
            config.overlap_min_width_percent = min_width;
        }
        config
    }
}

fn parse_var<T>(
    name: &'static str,
    value: String,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T> {
    parse(&value).ok_or(CliError::InvalidEnv { name, value })
}

/// Layers the engine config: document, then environment, then flags.
pub fn resolve_config(base: EngineConfig, env: &EnvConfig, cli: &Cli) -> Result<EngineConfig> {
    let mut config = env.apply(base);
    if let Some(week_start) = cli.week_start {
        config.week_start = week_start;
    }
    if let Some(layout) = cli.layout {
        config.layout = layout.into();
    }

    let config = config.validated()?;
    tracing::debug!(
        week_start = %config.week_start,
        layout = %config.layout,
        "Resolved engine config"
    );
    Ok(config)
}
