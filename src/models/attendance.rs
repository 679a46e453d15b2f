//! Attendance model.
//!
//! One [`AttendanceDay`] exists per employee per calendar date. Records are
//! created by the punch-clock flow and only read by the payroll engine.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single day's punch-clock record for one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceDay;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let day = AttendanceDay {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
///     arrival: NaiveDateTime::parse_from_str("2025-01-06 08:55:00", "%Y-%m-%d %H:%M:%S").ok(),
///     departure: None,
/// };
/// assert!(day.is_present());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The calendar date of the record.
    pub date: NaiveDate,
    /// When the employee clocked in, if they did.
    #[serde(default)]
    pub arrival: Option<NaiveDateTime>,
    /// When the employee clocked out, if they did.
    #[serde(default)]
    pub departure: Option<NaiveDateTime>,
}

impl AttendanceDay {
    /// A day counts as present when an arrival was recorded, with or
    /// without a departure.
    pub fn is_present(&self) -> bool {
        self.arrival.is_some()
    }
}
