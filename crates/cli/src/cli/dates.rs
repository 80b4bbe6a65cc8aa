use chrono::Weekday;
use zarvan_core::calendar::{month_length, CivilDate, MAX_YEAR, MIN_YEAR};

/// Parses a Jalali `YYYY-MM-DD` argument, rejecting dates that do not exist.
pub fn parse_civil_date(input: &str) -> Result<CivilDate, String> {
    let date = CivilDate::parse(input);
    let valid = (MIN_YEAR..=MAX_YEAR).contains(&date.year)
        && (1..=12).contains(&date.month)
        && (1..=month_length(date.year, date.month)).contains(&date.day);

    if valid {
        Ok(date)
    } else {
        Err(format!("not a Jalali date: {input}"))
    }
}

/// Parses a weekday name such as `sat` or `Monday`.
pub fn parse_weekday(input: &str) -> Result<Weekday, String> {
    input
        .trim()
        .parse::<Weekday>()
        .map_err(|_| format!("not a weekday: {input}"))
}
