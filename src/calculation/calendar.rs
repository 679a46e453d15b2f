//! Calendar arithmetic for monthly payroll.
//!
//! This module provides the Gregorian day count of a month and the number of
//! times a weekday occurs in it. Both fail with
//! [`EngineError::InvalidCalendarInput`] instead of falling back to a default.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// Returns the first day of the given month.
pub(crate) fn first_of_month(year: i32, month: u32) -> EngineResult<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidCalendarInput {
            message: format!("month {} is outside 1-12", month),
        });
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::InvalidCalendarInput {
        message: format!("year {} is outside the supported calendar range", year),
    })
}

/// Returns the number of days in a month (28-31), accounting for leap years.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2).unwrap(), 29);
/// assert_eq!(days_in_month(2025, 2).unwrap(), 28);
/// assert!(days_in_month(2025, 13).is_err());
/// ```
pub fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = first_of_month(year, month)?;
    let next_first = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    Ok((next_first - first).num_days() as u32)
}

/// Counts the dates in a month that fall on `weekday`.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use payroll_engine::calculation::count_weekday;
///
/// // January 2025 has five Thursdays.
/// assert_eq!(count_weekday(2025, 1, Weekday::Thu).unwrap(), 5);
/// ```
pub fn count_weekday(year: i32, month: u32, weekday: Weekday) -> EngineResult<u32> {
    let first = first_of_month(year, month)?;
    let total = days_in_month(year, month)?;
    let count = first
        .iter_days()
        .take(total as usize)
        .filter(|date| date.weekday() == weekday)
        .count();
    Ok(count as u32)
}

/// Counts the dates in a month that fall on the weekday called `weekday_name`.
///
/// The name must be a full English weekday name, matched case-insensitively.
pub fn count_weekday_by_name(year: i32, month: u32, weekday_name: &str) -> EngineResult<u32> {
    count_weekday(year, month, parse_weekday(weekday_name)?)
}

/// Parses a full English weekday name ("Sunday" through "Saturday").
///
/// Abbreviations and misspellings are rejected so that a typo in the
/// configuration cannot silently move the weekly-off day.
///
/// # Example
///
/// ```
/// use chrono::Weekday;
/// use payroll_engine::calculation::parse_weekday;
///
/// assert_eq!(parse_weekday("thursday").unwrap(), Weekday::Thu);
/// assert!(parse_weekday("Thursdy").is_err());
/// ```
pub fn parse_weekday(name: &str) -> EngineResult<Weekday> {
    match name.trim().to_ascii_lowercase().as_str() {
        "sunday" => Ok(Weekday::Sun),
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        _ => Err(EngineError::InvalidCalendarInput {
            message: format!("unrecognized weekday '{}'", name),
        }),
    }
}

/// Returns the full English name of a weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_for_every_month_of_2025() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(
                days_in_month(2025, index as u32 + 1).unwrap(),
                *days,
                "month {}",
                index + 1
            );
        }
    }

    #[test]
    fn test_february_leap_years() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
    }

    #[test]
    fn test_month_zero_and_thirteen_rejected() {
        for month in [0, 13] {
            match days_in_month(2025, month) {
                Err(EngineError::InvalidCalendarInput { message }) => {
                    assert!(message.contains(&month.to_string()));
                }
                other => panic!("Expected InvalidCalendarInput, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_january_2025_has_five_thursdays() {
        assert_eq!(count_weekday(2025, 1, Weekday::Thu).unwrap(), 5);
        assert_eq!(count_weekday_by_name(2025, 1, "Thursday").unwrap(), 5);
    }

    #[test]
    fn test_leap_february_counts() {
        // 2024-02-01 is a Thursday, so the 29th is a Thursday too.
        assert_eq!(count_weekday(2024, 2, Weekday::Thu).unwrap(), 5);
        assert_eq!(count_weekday(2024, 2, Weekday::Fri).unwrap(), 4);
        // 2025-02 has exactly four of every weekday.
        assert_eq!(count_weekday(2025, 2, Weekday::Sun).unwrap(), 4);
    }

    #[test]
    fn test_weekday_counts_sum_to_days_in_month() {
        let weekdays = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        for month in 1..=12 {
            let total: u32 = weekdays
                .iter()
                .map(|w| count_weekday(2024, month, *w).unwrap())
                .sum();
            assert_eq!(total, days_in_month(2024, month).unwrap());
        }
    }

    #[test]
    fn test_parse_weekday_is_case_insensitive() {
        assert_eq!(parse_weekday("SUNDAY").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday(" friday ").unwrap(), Weekday::Fri);
    }

    #[test]
    fn test_parse_weekday_rejects_typo() {
        match parse_weekday("Thursdy") {
            Err(EngineError::InvalidCalendarInput { message }) => {
                assert_eq!(message, "unrecognized weekday 'Thursdy'");
            }
            other => panic!("Expected InvalidCalendarInput, got {:?}", other),
        }
    }

    #[test]
    fn test_weekday_name_round_trips_through_parse() {
        for weekday in [Weekday::Sun, Weekday::Wed, Weekday::Sat] {
            assert_eq!(parse_weekday(weekday_name(weekday)).unwrap(), weekday);
        }
    }
}
