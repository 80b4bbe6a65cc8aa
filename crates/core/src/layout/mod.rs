//! Interval layout engine for one day's timed events.
//!
//! Two policies share the same input: [`LayoutPolicy::Overlap`] stacks
//! overlapping events with a shrinking width, [`LayoutPolicy::Columns`] splits
//! overlapping clusters into side-by-side columns. Both return one record per
//! input interval, in input order.

mod columns;
mod interval;
mod overlap;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

pub use interval::{timed_interval_for_day, timed_intervals_for_day, TimedInterval};

/// Selects how overlapping timed events are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPolicy {
    /// Greedy stacking with per-level offset.
    #[default]
    Overlap,
    /// Side-by-side columns within overlap clusters.
    Columns,
}

impl LayoutPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPolicy::Overlap => "overlap",
            LayoutPolicy::Columns => "columns",
        }
    }
}

impl fmt::Display for LayoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overlap" => Ok(LayoutPolicy::Overlap),
            "columns" => Ok(LayoutPolicy::Columns),
            other => Err(format!("unknown layout policy: {other}")),
        }
    }
}

/// Policy-specific position of a laid out interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Placement {
    #[serde(rename_all = "camelCase")]
    Stacked {
        stack_index: usize,
        offset_percent: u32,
        width_percent: u32,
    },
    #[serde(rename_all = "camelCase")]
    Column {
        col_index: usize,
        col_count: usize,
        col_span: usize,
    },
}

/// A timed interval with its placement and the intervals it overlaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord<'a> {
    /// Position of the interval in the layout input.
    pub index: usize,
    #[serde(flatten)]
    pub interval: TimedInterval<'a>,
    pub placement: Placement,
    /// Indices of every other interval whose minutes overlap this one.
    pub conflicts: Vec<usize>,
}

impl LayoutRecord<'_> {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Lays out one day's timed intervals under `policy`.
pub fn layout_day<'a>(
    intervals: &[TimedInterval<'a>],
    policy: LayoutPolicy,
    config: &EngineConfig,
) -> Vec<LayoutRecord<'a>> {
    let placements = match policy {
        LayoutPolicy::Overlap => overlap::place(
            intervals,
            config.overlap_step_percent,
            config.overlap_min_width_percent,
        ),
        LayoutPolicy::Columns => columns::place(intervals),
    };

    let records: Vec<LayoutRecord<'a>> = intervals
        .iter()
        .zip(placements)
        .enumerate()
        .map(|(index, (interval, placement))| LayoutRecord {
            index,
            interval: *interval,
            placement,
            conflicts: conflicts_of(intervals, index),
        })
        .collect();

    tracing::trace!(
        intervals = intervals.len(),
        policy = %policy,
        conflicted = records.iter().filter(|r| r.has_conflicts()).count(),
        "Laid out day"
    );
    records
}

fn conflicts_of(intervals: &[TimedInterval<'_>], index: usize) -> Vec<usize> {
    let this = &intervals[index];
    intervals
        .iter()
        .enumerate()
        .filter(|(other, interval)| *other != index && this.overlaps(interval))
        .map(|(other, _)| other)
        .collect()
}

/// Input positions ordered by start minute, longer intervals first on ties.
fn start_order(intervals: &[TimedInterval<'_>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..intervals.len()).collect();
    order.sort_by_key(|&i| {
        let interval = &intervals[i];
        (interval.start_minute, std::cmp::Reverse(interval.duration()))
    });
    order
}
