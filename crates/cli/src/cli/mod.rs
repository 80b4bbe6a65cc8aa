//! CLI command definitions.

mod dates;

pub use dates::{parse_civil_date, parse_weekday};

use std::path::PathBuf;

use chrono::Weekday;
use clap::{Args, Parser, Subcommand, ValueEnum};
use zarvan_core::calendar::CivilDate;
use zarvan_core::view::Step;
use zarvan_core::LayoutPolicy;

/// Jalali calendar scheduling engine.
#[derive(Debug, Parser)]
#[command(name = "zarvan")]
#[command(version, about = "Jalali calendar scheduling engine", long_about = None)]
pub struct Cli {
    /// Events document: a JSON array of events, or an object with `events`,
    /// `highlights`, `typeStyles` and `config`.
    #[arg(long, short, env = "ZARVAN_FILE")]
    pub file: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// First day of the week (sat, sun, mon, ...).
    #[arg(long, value_parser = parse_weekday)]
    pub week_start: Option<Weekday>,

    /// Layout policy for overlapping timed events.
    #[arg(long)]
    pub layout: Option<LayoutArg>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// CLI layout policy (with clap ValueEnum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Overlap,
    Columns,
}

impl From<LayoutArg> for LayoutPolicy {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Overlap => LayoutPolicy::Overlap,
            LayoutArg::Columns => LayoutPolicy::Columns,
        }
    }
}

/// CLI paging direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StepArg {
    Next,
    Prev,
}

impl From<StepArg> for Step {
    fn from(arg: StepArg) -> Self {
        match arg {
            StepArg::Next => Step::Next,
            StepArg::Prev => Step::Prev,
        }
    }
}

/// A view and the date it is anchored on.
#[derive(Debug, Clone, Args)]
pub struct PeriodArgs {
    /// View name: month, week, day, year or list.
    #[arg(long, default_value = "month")]
    pub view: String,

    /// Anchor date in the Jalali calendar (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_civil_date)]
    pub date: Option<CivilDate>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the visible range of a view.
    Range(PeriodArgs),
    /// Move a view one period forward or back and show the new range.
    Navigate {
        #[command(flatten)]
        period: PeriodArgs,
        /// Direction.
        #[arg(value_enum)]
        step: StepArg,
    },
    /// List the events of every day in a view's range.
    Days {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only events of this type.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Only events whose title contains this text.
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Lay out the timed events of one day.
    Layout {
        /// Jalali date (YYYY-MM-DD).
        #[arg(value_parser = parse_civil_date)]
        day: CivilDate,
    },
    /// Evaluate highlight rules over a view's range.
    Highlights(PeriodArgs),
    /// Show the month grid containing a date.
    Grid {
        /// Jalali date (YYYY-MM-DD). Defaults to today.
        #[arg(long, value_parser = parse_civil_date)]
        date: Option<CivilDate>,
    },
    /// List event types and their colors.
    Types,
    /// Suggest event titles containing a query.
    Suggest {
        query: String,
        /// Maximum number of suggestions.
        #[arg(long, default_value_t = 30)]
        limit: usize,
    },
}
