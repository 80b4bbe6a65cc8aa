//! Pretty output formatting.

use zarvan_core::event::{DayPartition, Event, Overflow};
use zarvan_core::highlight::TimeBlock;
use zarvan_core::layout::Placement;
use zarvan_core::pipeline::DaySummary;

use crate::commands::{
    AgendaDay, DayHighlights, DaysReport, GridReport, LayoutReport, RangeReport, TypesReport,
};

/// Format a visible range for display.
pub fn format_range(report: &RangeReport) -> String {
    let mut output = report.view.as_str().to_uppercase();
    if let Some(title) = &report.title {
        output.push_str(&format!(" {}", title));
    }
    output.push_str(&format!(
        "\n  {} .. {} ({} days)\n  Gregorian: {} .. {}\n  Active: {}",
        report.start,
        report.end,
        report.days,
        report.gregorian.start,
        report.gregorian.end,
        report.active
    ));
    output
}

/// Format an event on one line.
pub fn format_event(event: &Event) -> String {
    let when = if event.is_all_day() {
        "all day".to_string()
    } else {
        let end = event.end_or_start();
        format!(
            "{}-{}",
            clock(event.start.minutes()),
            if end.date == event.start.date {
                clock(end.minutes())
            } else {
                end.to_string()
            }
        )
    };
    let mut output = format!("{:<11} {}", when, event.title);
    if !event.kind.is_empty() {
        output.push_str(&format!(" [{}]", event.kind));
    }
    if event.occurrence {
        output.push_str(" (repeats)");
    }
    output
}

/// Format per-day events for display.
pub fn format_days(report: &DaysReport<'_>) -> String {
    match report {
        DaysReport::Cells(days) if !days.is_empty() => {
            let mut output = format!("DAYS ({})\n", days.len());
            output.push_str(&"-".repeat(40));
            for day in days {
                output.push_str(&format!("\n{}", format_summary(day)));
                output.push('\n');
            }
            output
        }
        DaysReport::Agenda(days) if !days.is_empty() => {
            let mut output = format!("AGENDA ({})\n", days.len());
            output.push_str(&"-".repeat(40));
            for day in days {
                output.push_str(&format!("\n{}", format_agenda_day(day)));
                output.push('\n');
            }
            output
        }
        _ => "No events found.".to_string(),
    }
}

fn format_summary(summary: &DaySummary<'_>) -> String {
    let DayPartition { all_day, timed } = &summary.events;
    let mut output = summary.day.to_string();
    for event in all_day.iter().take(summary.all_day_overflow.shown) {
        output.push_str(&format!("\n  {}", format_event(event)));
    }
    push_more(&mut output, summary.all_day_overflow);
    for event in timed.iter().take(summary.timed_overflow.shown) {
        output.push_str(&format!("\n  {}", format_event(event)));
    }
    push_more(&mut output, summary.timed_overflow);
    output
}

fn push_more(output: &mut String, overflow: Overflow) {
    if overflow.has_hidden() {
        output.push_str(&format!("\n  +{} more", overflow.hidden));
    }
}

fn format_agenda_day(day: &AgendaDay<'_>) -> String {
    let mut output = day.day.to_string();
    for event in &day.events {
        output.push_str(&format!("\n  {}", format_event(event)));
    }
    output
}

/// Format a day layout for display.
pub fn format_layout(report: &LayoutReport<'_>) -> String {
    if report.records.is_empty() {
        return format!("No timed events on {}.", report.day);
    }
    let mut output = format!("LAYOUT {} ({})\n", report.day, report.policy);
    output.push_str(&"-".repeat(40));
    for record in &report.records {
        let placement = match record.placement {
            Placement::Stacked {
                stack_index,
                offset_percent,
                width_percent,
            } => format!("stack {stack_index}, offset {offset_percent}%, width {width_percent}%"),
            Placement::Column {
                col_index,
                col_count,
                col_span,
            } => format!("column {}/{col_count}, span {col_span}", col_index + 1),
        };
        output.push_str(&format!(
            "\n[{}] {}-{} {}\n  {}",
            record.index,
            clock(record.interval.start_minute),
            clock(record.interval.end_minute),
            record.interval.event.title,
            placement
        ));
        if record.has_conflicts() {
            let ids: Vec<String> = record.conflicts.iter().map(|id| id.to_string()).collect();
            output.push_str(&format!("\n  Conflicts: {}", ids.join(", ")));
        }
    }
    if let Some(minute) = report.now_minute {
        output.push_str(&format!("\nNow: {}", clock(minute)));
    }
    output
}

/// Format highlighted days for display.
pub fn format_highlights(days: &[DayHighlights]) -> String {
    if days.is_empty() {
        return "No highlighted days.".to_string();
    }
    let mut output = format!("HIGHLIGHTS ({})\n", days.len());
    output.push_str(&"-".repeat(40));
    for day in days {
        output.push_str(&format!("\n{}", day.day));
        if let Some(style) = &day.result.day_style {
            let parts: Vec<&str> = [style.bg.as_deref(), style.class_name.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            output.push_str(&format!("\n  Day: {}", parts.join(" ")));
        }
        for block in &day.result.time_blocks {
            output.push_str(&format!("\n  {}", format_time_block(block)));
        }
    }
    output
}

fn format_time_block(block: &TimeBlock) -> String {
    let mut output = format!(
        "{}-{} {}",
        clock(block.start_minute),
        clock(block.end_minute),
        block.bg
    );
    if let Some(class_name) = &block.class_name {
        output.push_str(&format!(" .{}", class_name));
    }
    output
}

/// Format a month grid as a calendar page.
pub fn format_grid(report: &GridReport) -> String {
    let mut output = format!("{}\n", report.title);
    let header: Vec<String> = report
        .weekdays
        .iter()
        .map(|name| name.chars().take(2).collect())
        .collect();
    output.push_str(&header.join(" "));

    let cells = std::iter::repeat_n(None, report.grid.leading_blanks)
        .chain(report.grid.days.iter().map(|day| Some(day.day)))
        .chain(std::iter::repeat_n(None, report.grid.trailing_blanks))
        .collect::<Vec<_>>();
    for week in cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                Some(day) => format!("{:>2}", day),
                None => "  ".to_string(),
            })
            .collect();
        output.push_str(&format!("\n{}", row.join(" ")));
    }
    output
}

/// Format event types for display.
pub fn format_types(report: &TypesReport) -> String {
    if report.types.is_empty() {
        return "No event types found.".to_string();
    }
    let mut output = format!("TYPES ({})\n", report.types.len());
    output.push_str(&"-".repeat(40));
    for (kind, style) in &report.palette {
        output.push_str(&format!(
            "\n{}\n  Background: {}\n  Text: {}",
            kind, style.bg, style.color
        ));
    }
    output
}

/// Format title suggestions, one per line.
pub fn format_suggestions(titles: &[&str]) -> String {
    if titles.is_empty() {
        return "No suggestions.".to_string();
    }
    titles.join("\n")
}

/// `HH:MM` for minutes since midnight.
fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use zarvan_core::calendar::CivilDate;

    fn make_time(hour: u32, min: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, min, 0).unwrap()
    }

    #[test]
    fn test_format_event() {
        let day = CivilDate::new(1403, 1, 2);
        let timed =
            Event::timed("Standup", day, make_time(9, 0), make_time(9, 15)).with_kind("work");
        let all_day = Event::all_day("Holiday", day);

        assert_eq!(format_event(&timed), "09:00-09:15 Standup [work]");
        assert_eq!(format_event(&all_day), "all day     Holiday");
    }

    #[test]
    fn test_format_overnight_event_shows_end_date() {
        let event = Event::new("Flight", CivilDate::new(1403, 1, 2).at(make_time(22, 0)))
            .with_end(CivilDate::new(1403, 1, 3).at(make_time(2, 0)))
            .force_timed();

        assert_eq!(format_event(&event), "22:00-1403-1-3T02:00 Flight");
    }

    #[test]
    fn test_clock() {
        assert_eq!(clock(0), "00:00");
        assert_eq!(clock(570), "09:30");
        assert_eq!(clock(1440), "24:00");
    }

    #[test]
    fn test_empty_outputs() {
        assert_eq!(format_days(&DaysReport::Cells(Vec::new())), "No events found.");
        assert_eq!(format_highlights(&[]), "No highlighted days.");
        assert_eq!(format_suggestions(&[]), "No suggestions.");
    }
}
