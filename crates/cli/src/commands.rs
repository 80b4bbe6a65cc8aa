//! Command execution: runs the engine and renders the result.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use zarvan_core::bucket::DayBucket;
use zarvan_core::calendar::{
    minute_of_day, month_grid, month_title, to_civil, to_gregorian, weekday_name, CivilDate,
    DateRange, MonthGrid,
};
use zarvan_core::event::{
    autocomplete_titles, available_types, sort_for_list, suggest_titles, type_palette, Event,
    EventFilter, TypeStyle,
};
use zarvan_core::highlight::HighlightResult;
use zarvan_core::layout::{LayoutPolicy, LayoutRecord};
use zarvan_core::pipeline::{
    build_day_bucket, day_highlights, day_layout, summarize_day, DaySummary,
};
use zarvan_core::view::{active_date, compute_visible_range, navigate, ViewKind};
use zarvan_core::EngineConfig;

use crate::cli::{Commands, OutputFormat, PeriodArgs};
use crate::document::Document;
use crate::error::Result;
use crate::output::{format_output, pretty};

/// Inputs shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub document: Document,
    pub config: EngineConfig,
    /// Anchor used when a command is given no date.
    pub today: NaiveDate,
    /// Local wall-clock time, for the "now" marker.
    pub now: NaiveTime,
}

/// A view's visible range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeReport {
    pub view: ViewKind,
    /// Month title for month and list views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub start: CivilDate,
    pub end: CivilDate,
    pub gregorian: DateRange,
    pub days: i64,
    pub active: CivilDate,
}

/// Events of one list-view day, in agenda order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaDay<'a> {
    pub day: CivilDate,
    pub events: Vec<&'a Event>,
}

/// Per-day events of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DaysReport<'a> {
    /// Month, week, day and year views.
    Cells(Vec<DaySummary<'a>>),
    /// List view.
    Agenda(Vec<AgendaDay<'a>>),
}

/// Layout of one day's timed events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport<'a> {
    pub day: CivilDate,
    pub policy: LayoutPolicy,
    /// Minute of the "now" marker when `day` is today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub now_minute: Option<u32>,
    pub records: Vec<LayoutRecord<'a>>,
}

/// Highlights of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHighlights {
    pub day: CivilDate,
    #[serde(flatten)]
    pub result: HighlightResult,
}

/// A month grid with its header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridReport {
    pub title: String,
    pub weekdays: Vec<&'static str>,
    #[serde(flatten)]
    pub grid: MonthGrid,
}

/// Event types and their colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypesReport {
    pub types: Vec<String>,
    pub palette: BTreeMap<String, TypeStyle>,
}

/// Runs `command` and renders its output.
pub fn run(command: &Commands, ctx: &Context, format: OutputFormat) -> Result<String> {
    let config = &ctx.config;
    let events = &ctx.document.events;

    let output = match command {
        Commands::Range(period) => {
            let (view, anchor) = resolve_period(period, ctx)?;
            format_output(&range_report(view, anchor, config), format, pretty::format_range)
        }
        Commands::Navigate { period, step } => {
            let (view, anchor) = resolve_period(period, ctx)?;
            let anchor = navigate(view, anchor, (*step).into());
            format_output(&range_report(view, anchor, config), format, pretty::format_range)
        }
        Commands::Days {
            period,
            kind,
            query,
        } => {
            let (view, anchor) = resolve_period(period, ctx)?;
            let range = compute_visible_range(view, anchor, config);
            let filter = EventFilter {
                kind: kind.clone(),
                query: query.clone().unwrap_or_default(),
            };
            let bucket = build_day_bucket(events, range, &filter, config);
            format_output(&days_report(&bucket, view, config), format, pretty::format_days)
        }
        Commands::Layout { day } => {
            let gregorian = to_gregorian(*day);
            let range = DateRange::single(gregorian);
            let bucket = build_day_bucket(events, range, &EventFilter::new(), config);
            let report = LayoutReport {
                day: *day,
                policy: config.layout,
                now_minute: (gregorian == ctx.today).then(|| minute_of_day(ctx.now)),
                records: day_layout(&bucket, *day, config),
            };
            format_output(&report, format, pretty::format_layout)
        }
        Commands::Highlights(period) => {
            let (view, anchor) = resolve_period(period, ctx)?;
            let range = compute_visible_range(view, anchor, config);
            let report: Vec<DayHighlights> = range
                .days()
                .map(to_civil)
                .map(|day| DayHighlights {
                    day,
                    result: day_highlights(&ctx.document.highlights, day, view, config),
                })
                .filter(|day| !day.result.is_empty())
                .collect();
            format_output(&report, format, |days| pretty::format_highlights(days))
        }
        Commands::Grid { date } => {
            let date = date.unwrap_or_else(|| to_civil(ctx.today));
            format_output(&grid_report(date, config), format, pretty::format_grid)
        }
        Commands::Types => {
            let report = TypesReport {
                types: available_types(events),
                palette: type_palette(events, &ctx.document.type_styles),
            };
            format_output(&report, format, pretty::format_types)
        }
        Commands::Suggest { query, limit } => {
            let titles = autocomplete_titles(events);
            let suggestions = suggest_titles(&titles, query, *limit);
            format_output(&suggestions, format, |titles| pretty::format_suggestions(titles))
        }
    };

    Ok(output)
}

fn resolve_period(period: &PeriodArgs, ctx: &Context) -> Result<(ViewKind, NaiveDate)> {
    let view = ctx.config.resolve_view(period.view.parse::<ViewKind>()?);
    let anchor = period.date.map(to_gregorian).unwrap_or(ctx.today);
    tracing::debug!(view = %view, anchor = %anchor, "Resolved period");
    Ok((view, anchor))
}

/// Range report for `view` anchored on `anchor`.
pub fn range_report(view: ViewKind, anchor: NaiveDate, config: &EngineConfig) -> RangeReport {
    let range = compute_visible_range(view, anchor, config);
    let start = range.civil_start();
    let title = match view {
        ViewKind::Month | ViewKind::List => Some(month_title(start.year, start.month)),
        _ => None,
    };

    RangeReport {
        view,
        title,
        start,
        end: range.civil_end(),
        gregorian: range,
        days: range.len_days(),
        active: to_civil(active_date(view, anchor, config)),
    }
}

/// Non-empty days of `bucket`, shaped for `view`.
pub fn days_report<'a>(
    bucket: &'a DayBucket,
    view: ViewKind,
    config: &EngineConfig,
) -> DaysReport<'a> {
    match view {
        ViewKind::List => DaysReport::Agenda(
            bucket
                .iter()
                .map(|(key, mut events)| {
                    sort_for_list(&mut events);
                    AgendaDay {
                        day: key.date(),
                        events,
                    }
                })
                .collect(),
        ),
        _ => DaysReport::Cells(
            bucket
                .keys()
                .map(|key| summarize_day(bucket, key.date(), view, config))
                .collect(),
        ),
    }
}

/// Grid of the month containing `date`, with weekday headers starting at the
/// configured first day of the week.
pub fn grid_report(date: CivilDate, config: &EngineConfig) -> GridReport {
    // Saturday-first index of the configured week start.
    let offset = (config.week_start.num_days_from_monday() + 7
        - Weekday::Sat.num_days_from_monday())
        % 7;
    let weekdays = (0..7u32)
        .filter_map(|column| u8::try_from((offset + column) % 7).ok())
        .filter_map(weekday_name)
        .collect();

    GridReport {
        title: month_title(date.year, date.month),
        weekdays,
        grid: month_grid(date.year, date.month, config.week_start),
    }
}
