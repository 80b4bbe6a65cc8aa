//! Engine configuration with validation.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::LayoutPolicy;
use crate::view::ViewKind;

/// Tunables shared by every render pass.
///
/// Deserializes from camelCase JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// First day of the local week (weekday index 0).
    pub week_start: Weekday,
    /// Layout policy for same-day timed events.
    pub layout: LayoutPolicy,
    /// Horizontal shrink per stack level in the overlap policy, in percent.
    pub overlap_step_percent: u32,
    /// Narrowest width a stacked event may shrink to, in percent.
    pub overlap_min_width_percent: u32,
    /// Length given to timed intervals that degenerate to zero minutes.
    pub min_timed_minutes: u32,
    /// All-day events shown per day in the week/day all-day rows.
    pub max_all_day_per_day: usize,
    /// All-day pills shown per month cell before the overflow marker.
    pub max_month_all_day: usize,
    /// Timed rows shown per month cell before the overflow marker.
    pub max_month_timed: usize,
    /// Views the host exposes.
    pub enabled_views: Vec<ViewKind>,
    /// Applies the day styles of highlight rules.
    pub day_highlights: bool,
    /// Applies the time blocks of highlight rules.
    pub time_highlights: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sat,
            layout: LayoutPolicy::Overlap,
            overlap_step_percent: 14,
            overlap_min_width_percent: 42,
            min_timed_minutes: 15,
            max_all_day_per_day: 2,
            max_month_all_day: 1,
            max_month_timed: 2,
            enabled_views: ViewKind::ALL.to_vec(),
            day_highlights: true,
            time_highlights: true,
        }
    }
}

impl EngineConfig {
    /// Checks every tunable is within bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overlap_step_percent == 0 {
            return Err(ConfigError::InvalidOverlapStep);
        }
        if !(1..=100).contains(&self.overlap_min_width_percent) {
            return Err(ConfigError::InvalidMinWidth(
                self.overlap_min_width_percent,
            ));
        }
        if self.min_timed_minutes == 0 {
            return Err(ConfigError::InvalidMinDuration);
        }
        if self.max_all_day_per_day == 0 || self.max_month_all_day == 0 || self.max_month_timed == 0
        {
            return Err(ConfigError::InvalidDisplayCap);
        }
        if self.enabled_views.is_empty() {
            return Err(ConfigError::NoViewsEnabled);
        }
        Ok(())
    }

    /// Validates and returns the config.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Sets the first day of the week.
    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    /// Sets the layout policy.
    pub fn with_layout(mut self, layout: LayoutPolicy) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the enabled views.
    pub fn with_enabled_views(mut self, views: impl IntoIterator<Item = ViewKind>) -> Self {
        self.enabled_views = views.into_iter().collect();
        self
    }

    pub fn is_view_enabled(&self, view: ViewKind) -> bool {
        self.enabled_views.contains(&view)
    }

    /// The first enabled view in month, week, day, year, list order.
    pub fn first_enabled_view(&self) -> ViewKind {
        ViewKind::ALL
            .into_iter()
            .find(|view| self.is_view_enabled(*view))
            .unwrap_or(ViewKind::Month)
    }

    /// Returns `view` if enabled, otherwise the first enabled view.
    pub fn resolve_view(&self, view: ViewKind) -> ViewKind {
        if self.is_view_enabled(view) {
            view
        } else {
            self.first_enabled_view()
        }
    }
}
