use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::kind::ViewKind;
use crate::calendar::{
    add_days, month_length, to_civil, to_gregorian, weekday_index, CivilDate, DateRange,
};
use crate::config::EngineConfig;

/// Paging direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Next,
    Prev,
}

impl Step {
    fn sign(self) -> i64 {
        match self {
            Step::Next => 1,
            Step::Prev => -1,
        }
    }
}

/// First day of the local week containing `day`.
pub fn week_start_of(day: NaiveDate, config: &EngineConfig) -> NaiveDate {
    add_days(day, -i64::from(weekday_index(day, config.week_start)))
}

/// Gregorian days shown by `view` around `anchor`.
///
/// Month and list views cover the anchor's civil month, year view its civil
/// year, week view the local week and day view the anchor alone.
pub fn compute_visible_range(
    view: ViewKind,
    anchor: NaiveDate,
    config: &EngineConfig,
) -> DateRange {
    let civil = to_civil(anchor);
    let range = match view {
        ViewKind::Month | ViewKind::List => DateRange::new(
            to_gregorian(CivilDate::new(civil.year, civil.month, 1)),
            to_gregorian(CivilDate::new(
                civil.year,
                civil.month,
                month_length(civil.year, civil.month),
            )),
        ),
        ViewKind::Year => DateRange::new(
            to_gregorian(CivilDate::new(civil.year, 1, 1)),
            to_gregorian(CivilDate::new(civil.year, 12, month_length(civil.year, 12))),
        ),
        ViewKind::Week => {
            let start = week_start_of(anchor, config);
            DateRange::new(start, add_days(start, 6))
        }
        ViewKind::Day => DateRange::single(anchor),
    };

    tracing::trace!(
        view = %view,
        start = %range.start,
        end = %range.end,
        "Computed visible range"
    );
    range
}

/// The day a view considers current: the first day of its period.
pub fn active_date(view: ViewKind, anchor: NaiveDate, config: &EngineConfig) -> NaiveDate {
    compute_visible_range(view, anchor, config).start
}

/// Moves `anchor` one period forward or back.
///
/// Month and year steps work on the civil calendar and clamp the day to the
/// target month's length.
pub fn navigate(view: ViewKind, anchor: NaiveDate, step: Step) -> NaiveDate {
    match view {
        ViewKind::Month | ViewKind::List => shift_months(anchor, step.sign()),
        ViewKind::Year => shift_months(anchor, 12 * step.sign()),
        ViewKind::Week => add_days(anchor, 7 * step.sign()),
        ViewKind::Day => add_days(anchor, step.sign()),
    }
}

fn shift_months(anchor: NaiveDate, months: i64) -> NaiveDate {
    let civil = to_civil(anchor);
    let index = civil.month_index() + months;
    let Ok(year) = i32::try_from(index.div_euclid(12)) else {
        return anchor;
    };
    // rem_euclid(12) is always 0..12.
    let month = index.rem_euclid(12) as u32 + 1;
    let day = civil.day.min(month_length(year, month));
    to_gregorian(CivilDate::new(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn civil(year: i32, month: u32, day: u32) -> NaiveDate {
        to_gregorian(CivilDate::new(year, month, day))
    }

    #[test]
    fn test_month_range_covers_civil_month() {
        let config = EngineConfig::default();
        let range = compute_visible_range(ViewKind::Month, civil(1403, 1, 15), &config);

        assert_eq!(range.start, make_date(2024, 3, 20));
        assert_eq!(range.civil_end(), CivilDate::new(1403, 1, 31));
        assert_eq!(range.len_days(), 31);
    }

    #[test]
    fn test_list_range_matches_month() {
        let config = EngineConfig::default();
        let anchor = civil(1403, 8, 3);

        assert_eq!(
            compute_visible_range(ViewKind::List, anchor, &config),
            compute_visible_range(ViewKind::Month, anchor, &config)
        );
    }

    #[test]
    fn test_year_range_in_leap_year() {
        let config = EngineConfig::default();
        let range = compute_visible_range(ViewKind::Year, make_date(2024, 10, 1), &config);

        assert_eq!(range.civil_start(), CivilDate::new(1403, 1, 1));
        assert_eq!(range.civil_end(), CivilDate::new(1403, 12, 30));
        assert_eq!(range.len_days(), 366);
    }

    #[test]
    fn test_week_range_starts_on_saturday() {
        let config = EngineConfig::default();
        // 2024-03-20 is a Wednesday.
        let range = compute_visible_range(ViewKind::Week, make_date(2024, 3, 20), &config);

        assert_eq!(range.start, make_date(2024, 3, 16));
        assert_eq!(range.end, make_date(2024, 3, 22));
    }

    #[test]
    fn test_week_range_honors_week_start() {
        let config = EngineConfig::default().with_week_start(Weekday::Mon);
        let range = compute_visible_range(ViewKind::Week, make_date(2024, 3, 20), &config);

        assert_eq!(range.start, make_date(2024, 3, 18));
        assert_eq!(range.end, make_date(2024, 3, 24));
    }

    #[test]
    fn test_day_range_is_single_day() {
        let config = EngineConfig::default();
        let day = make_date(2024, 7, 7);

        assert_eq!(compute_visible_range(ViewKind::Day, day, &config), DateRange::single(day));
    }

    #[test]
    fn test_active_date_is_period_start() {
        let config = EngineConfig::default();
        let anchor = civil(1403, 5, 17);

        assert_eq!(active_date(ViewKind::Month, anchor, &config), civil(1403, 5, 1));
        assert_eq!(active_date(ViewKind::Year, anchor, &config), civil(1403, 1, 1));
        assert_eq!(active_date(ViewKind::Day, anchor, &config), anchor);
        assert_eq!(
            active_date(ViewKind::Week, anchor, &config),
            week_start_of(anchor, &config)
        );
    }

    #[test]
    fn test_navigate_month_wraps_year() {
        assert_eq!(navigate(ViewKind::Month, civil(1403, 12, 5), Step::Next), civil(1404, 1, 5));
        assert_eq!(navigate(ViewKind::List, civil(1403, 1, 5), Step::Prev), civil(1402, 12, 5));
    }

    #[test]
    fn test_navigate_month_clamps_day() {
        assert_eq!(navigate(ViewKind::Month, civil(1403, 6, 31), Step::Next), civil(1403, 7, 30));
    }

    #[test]
    fn test_navigate_year_clamps_leap_day() {
        // 1403 is leap, 1404 is not.
        assert_eq!(navigate(ViewKind::Year, civil(1403, 12, 30), Step::Next), civil(1404, 12, 29));
        assert_eq!(navigate(ViewKind::Year, civil(1403, 4, 2), Step::Prev), civil(1402, 4, 2));
    }

    #[test]
    fn test_navigate_week_and_day() {
        let anchor = make_date(2024, 12, 30);

        assert_eq!(navigate(ViewKind::Week, anchor, Step::Next), make_date(2025, 1, 6));
        assert_eq!(navigate(ViewKind::Day, anchor, Step::Prev), make_date(2024, 12, 29));
    }
}
