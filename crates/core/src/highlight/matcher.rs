use chrono::NaiveDate;
use serde::Serialize;

use super::rule::{DayStyle, HighlightRule, TimeBlock};
use crate::calendar::{to_civil, weekday_index, CivilDate};
use crate::config::EngineConfig;
use crate::view::ViewKind;

/// The date and view a rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchContext {
    pub gregorian: NaiveDate,
    pub civil: CivilDate,
    pub view: ViewKind,
    /// Local weekday index of `gregorian`.
    pub weekday: u8,
    pub day_highlights: bool,
    pub time_highlights: bool,
}

impl MatchContext {
    pub fn new(
        gregorian: NaiveDate,
        civil: CivilDate,
        view: ViewKind,
        config: &EngineConfig,
    ) -> Self {
        Self {
            gregorian,
            civil,
            view,
            weekday: weekday_index(gregorian, config.week_start),
            day_highlights: config.day_highlights,
            time_highlights: config.time_highlights,
        }
    }

    /// Context for a Gregorian day, deriving the civil date.
    pub fn for_day(day: NaiveDate, view: ViewKind, config: &EngineConfig) -> Self {
        Self::new(day, to_civil(day), view, config)
    }
}

/// Highlights that apply to one day in one view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightResult {
    /// From the last matching rule that carries a day style.
    pub day_style: Option<DayStyle>,
    /// One block per matching rule that carries a time range, in rule order.
    pub time_blocks: Vec<TimeBlock>,
}

impl HighlightResult {
    pub fn is_empty(&self) -> bool {
        self.day_style.is_none() && self.time_blocks.is_empty()
    }
}

/// Evaluates `rules` in order against one date and view.
///
/// Day styles and time blocks are skipped when the context turns them off.
pub fn match_highlights(rules: &[HighlightRule], ctx: &MatchContext) -> HighlightResult {
    let mut result = HighlightResult::default();

    for rule in rules.iter().filter(|rule| rule.matches(ctx)) {
        if let Some(style) = rule.day_style.as_ref().filter(|_| ctx.day_highlights) {
            result.day_style = Some(style.clone());
        }
        if let Some(block) = rule.time_block.as_ref().filter(|_| ctx.time_highlights) {
            result.time_blocks.push(block.clone());
        }
    }

    tracing::trace!(
        day = %ctx.civil,
        view = %ctx.view,
        rules = rules.len(),
        blocks = result.time_blocks.len(),
        styled = result.day_style.is_some(),
        "Matched highlights"
    );
    result
}
