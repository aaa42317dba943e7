//! Date, billing-period and month-label extraction.

use chrono::{Datelike, NaiveDate};

use crate::error::ExtractionError;

use super::patterns::{DATE_DMY, DATE_RANGE};

type Result<T> = std::result::Result<T, ExtractionError>;

/// Pivot for two-digit years: 00..=50 land in the 2000s, 51..=99 in the 1900s.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 50;

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        if year <= TWO_DIGIT_YEAR_PIVOT {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn date_from_parts(day: &str, month: &str, year: &str, source: &str) -> Result<NaiveDate> {
    let day: u32 = day.parse().unwrap_or(0);
    let month: u32 = month.parse().unwrap_or(0);
    let year = parse_year(year);

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ExtractionError::Malformed {
        kind: "date",
        value: source.to_string(),
    })
}

/// Find the first `d.m.yy` / `dd.mm.yyyy` date in `text`, day first.
pub fn extract_date(text: &str) -> Result<NaiveDate> {
    let caps = DATE_DMY
        .captures(text)
        .ok_or(ExtractionError::NoMatch("date"))?;

    date_from_parts(&caps[1], &caps[2], &caps[3], &caps[0])
}

/// Find the first `d.m.yy - d.m.yy` billing period in `text`.
///
/// Whitespace inside the tokens and around the dash is tolerated; both
/// halves use two-digit years.
pub fn extract_date_range(text: &str) -> Result<(NaiveDate, NaiveDate)> {
    let caps = DATE_RANGE
        .captures(text)
        .ok_or(ExtractionError::NoMatch("date range"))?;

    let start = date_from_parts(&caps[1], &caps[2], &caps[3], &caps[0])?;
    let end = date_from_parts(&caps[4], &caps[5], &caps[6], &caps[0])?;
    Ok((start, end))
}

/// First day of the month after `date`, rolling December into January.
pub fn first_day_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// Full month names visited from `start` up to (not including) `end`,
/// joined with ", ".
///
/// Visits `start` itself, then the first of each following month while
/// strictly before `end`; each step advances a whole month, so the walk
/// terminates for any finite range. `start >= end` yields an empty string.
pub fn months_in_range(start: NaiveDate, end: NaiveDate) -> String {
    let mut months = Vec::new();
    let mut current = start;

    while current < end {
        months.push(current.format("%B").to_string());
        current = first_day_of_next_month(current);
    }
    months.join(", ")
}
