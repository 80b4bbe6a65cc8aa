//! Jalali <-> Gregorian conversion.
//!
//! Leap years follow Borkowski's break-year table: between two break years
//! leaps repeat on a 33-year cycle.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};

use super::civil::{CivilDate, MINUTES_PER_DAY};

/// Jalali years where the leap cycle pattern shifts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// First Jalali year the break table covers.
pub const MIN_YEAR: i32 = BREAKS[0];
/// Last Jalali year the break table covers.
pub const MAX_YEAR: i32 = BREAKS[BREAKS.len() - 1] - 1;

/// Leap state and the Gregorian anchor of one Jalali year.
struct YearInfo {
    /// Years since the last leap year; 0 means this year is leap.
    leap: i32,
    /// Gregorian year in which this Jalali year starts.
    gregorian_year: i32,
    /// March day of 1 Farvardin.
    march_day: i32,
}

fn year_info(year: i32) -> YearInfo {
    let gregorian_year = year + 621;
    let mut leap_j = -14;
    let mut previous_break = BREAKS[0];
    let mut jump = 0;

    for &next_break in &BREAKS[1..] {
        jump = next_break - previous_break;
        if year < next_break {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        previous_break = next_break;
    }

    let mut n = year - previous_break;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    YearInfo {
        leap,
        gregorian_year,
        march_day,
    }
}

/// Gregorian date of 1 Farvardin for the given year info.
fn first_of_year(info: &YearInfo) -> NaiveDate {
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, 1)
        .map(|march_first| add_days(march_first, i64::from(info.march_day) - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// Clamps a Jalali year into the range the break table covers. Years outside
/// it map to the nearest covered year instead of wrapping or overflowing.
fn era_year(year: i32) -> i32 {
    year.clamp(MIN_YEAR, MAX_YEAR)
}

/// Shifts a Gregorian date by `days`, saturating at chrono's supported range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Returns true if the Jalali year has a 30-day Esfand.
pub fn is_leap_year(year: i32) -> bool {
    year_info(era_year(year)).leap == 0
}

/// Number of days in a Jalali month.
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        0..=6 => 31,
        7..=11 => 30,
        _ if is_leap_year(year) => 30,
        _ => 29,
    }
}

/// Converts a Jalali date to its Gregorian equivalent.
pub fn to_gregorian(date: CivilDate) -> NaiveDate {
    let info = year_info(era_year(date.year));
    let month = i64::from(date.month);
    let day_of_year = (month - 1) * 31 - month / 7 * (month - 7) + i64::from(date.day) - 1;
    add_days(first_of_year(&info), day_of_year)
}

/// Converts a Gregorian date to its Jalali equivalent.
pub fn to_civil(date: NaiveDate) -> CivilDate {
    let gregorian_year = date.year();
    let mut year = gregorian_year - 621;
    let info = year_info(year);
    let mut days = date.signed_duration_since(first_of_year(&info)).num_days();

    if days >= 0 {
        if days <= 185 {
            return CivilDate::new(year, to_u32(1 + days / 31), to_u32(days % 31 + 1));
        }
        days -= 186;
    } else {
        year -= 1;
        days += 179;
        if info.leap == 1 {
            days += 1;
        }
    }

    CivilDate::new(year, to_u32(7 + days / 30), to_u32(days % 30 + 1))
}

fn to_u32(n: i64) -> u32 {
    u32::try_from(n).unwrap_or(0)
}

/// Position of `date` in the local week, 0 being `week_start`.
pub fn weekday_index(date: NaiveDate, week_start: Weekday) -> u8 {
    let day = date.weekday().num_days_from_monday();
    let start = week_start.num_days_from_monday();
    ((day + 7 - start) % 7) as u8
}

/// Minute of day for the "now" marker, clamped to the rendered day.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    (time.hour() * 60 + time.minute()).min(MINUTES_PER_DAY)
}
