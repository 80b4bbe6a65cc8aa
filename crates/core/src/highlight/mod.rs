//! Declarative highlight rules for days and time ranges.
//!
//! A rule is a list of [`Predicate`]s plus an optional day style and an
//! optional time block. Rules hold no state and are evaluated fresh for every
//! rendered day.

mod matcher;
mod rule;

pub use matcher::{match_highlights, HighlightResult, MatchContext};
pub use rule::{DayStyle, HighlightRule, Predicate, TimeBlock, DEFAULT_TIME_BLOCK_BG};
