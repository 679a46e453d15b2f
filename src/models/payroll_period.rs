//! Monthly payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type that names the calendar
//! month a salary slip is computed for.

use chrono::NaiveDate;

use crate::calculation::{days_in_month, first_of_month};
use crate::error::EngineResult;

/// A validated calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod::new(2024, 2).unwrap();
/// assert_eq!(period.total_days(), 29);
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert!(PayrollPeriod::new(2024, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PayrollPeriod {
    year: i32,
    month: u32,
    start_date: NaiveDate,
    total_days: u32,
}

impl PayrollPeriod {
    /// Creates a period, rejecting months outside 1-12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        let start_date = first_of_month(year, month)?;
        let total_days = days_in_month(year, month)?;
        Ok(Self {
            year,
            month,
            start_date,
            total_days,
        })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The number of days in the month.
    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    /// The first day of the month.
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// The last day of the month.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Duration::days(i64::from(self.total_days) - 1)
    }

    /// Checks if a date falls inside the month (inclusive on both ends).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date()
    }
}

impl std::fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_january_bounds() {
        let period = PayrollPeriod::new(2025, 1).unwrap();
        assert_eq!(
            period.start_date(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
        );
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        assert_eq!(period.total_days(), 31);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = PayrollPeriod::new(2025, 4).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
        assert!(period.contains(NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(matches!(
            PayrollPeriod::new(2025, 0),
            Err(EngineError::InvalidCalendarInput { .. })
        ));
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(PayrollPeriod::new(2025, 3).unwrap().to_string(), "2025-03");
    }
}
