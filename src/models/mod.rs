//! Core data models for the payroll engine.
//!
//! This module contains the domain models read and written by the engine.

mod advance;
mod attendance;
mod computation;
mod payroll_period;
mod salary_slip;

pub use advance::{AdvanceEntry, DeductionAllocation};
pub use attendance::AttendanceDay;
pub use computation::{AuditStep, AuditTrace, AuditWarning, PayrollComputation, round_money};
pub use payroll_period::PayrollPeriod;
pub use salary_slip::{SalarySlip, SlipKey};
