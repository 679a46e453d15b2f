//! Attendance aggregation.
//!
//! Reduces a month of punch-clock rows to the number of days present.

use crate::models::AttendanceDay;

/// Counts the records with a recorded arrival.
///
/// A missing departure does not matter: an employee who clocked in and never
/// clocked out is present for payroll. The caller is trusted to pass only the
/// target employee's rows for the target month.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::days_present;
/// use payroll_engine::models::AttendanceDay;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let arrived = NaiveDateTime::parse_from_str("2025-01-06 09:00:00", "%Y-%m-%d %H:%M:%S").ok();
/// let records = vec![
///     AttendanceDay {
///         employee_id: "emp_001".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///         arrival: arrived,
///         departure: None,
///     },
///     AttendanceDay {
///         employee_id: "emp_001".to_string(),
///         date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
///         arrival: None,
///         departure: None,
///     },
/// ];
/// assert_eq!(days_present(&records), 1);
/// ```
pub fn days_present(records: &[AttendanceDay]) -> u32 {
    records.iter().filter(|r| r.is_present()).count() as u32
}
