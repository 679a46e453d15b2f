//! Calculation logic for the payroll engine.
//!
//! This module contains the pure functions behind a salary slip: calendar
//! arithmetic, attendance aggregation, the weekly-off eligibility threshold,
//! salary proration with the optional cap, and the composed monthly
//! calculation.

mod attendance;
mod calendar;
mod gross_salary;
mod paid_days;
mod payroll;

pub use attendance::days_present;
pub(crate) use calendar::first_of_month;
pub use calendar::{count_weekday, count_weekday_by_name, days_in_month, parse_weekday, weekday_name};
pub use gross_salary::{GrossSalaryResult, calculate_gross_salary};
pub use paid_days::{PaidDaysResult, determine_paid_days};
pub use payroll::{PayrollInput, calculate_payroll};
