//! Salary slip model.
//!
//! A [`SalarySlip`] is the frozen, persisted result of one payroll commit for
//! one employee and month. It copies every figure it needs and keeps the
//! advance allocations it made, so a regeneration can undo exactly its own
//! ledger effect.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DeductionAllocation, PayrollComputation, PayrollPeriod};

/// The unique key of a salary slip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlipKey {
    /// The employee the slip belongs to.
    pub employee_id: String,
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: u32,
}

impl SlipKey {
    /// Builds the key for an employee and period.
    pub fn new(employee_id: impl Into<String>, period: PayrollPeriod) -> Self {
        Self {
            employee_id: employee_id.into(),
            year: period.year(),
            month: period.month(),
        }
    }
}

/// A persisted salary slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySlip {
    /// Identifier of the slip, kept stable across regenerations.
    pub id: Uuid,
    /// The employee the slip belongs to.
    pub employee_id: String,
    /// The calendar month.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
    /// Days in the month.
    pub total_days: u32,
    /// Days with a recorded arrival.
    pub days_present: u32,
    /// Occurrences of the weekly-off weekday.
    pub weekly_off_days: u32,
    /// Days the employee is compensated for.
    pub paid_days: u32,
    /// The monthly salary used.
    pub monthly_salary: Decimal,
    /// The per-day rate at full precision.
    pub per_day_salary: Decimal,
    /// Gross pay for the period.
    pub gross_salary: Decimal,
    /// Advance balance outstanding at computation time.
    pub advance_balance: Decimal,
    /// Advance amount recovered by this slip.
    pub advance_deduction: Decimal,
    /// Manual deductions.
    pub other_deductions: Decimal,
    /// Pay after deductions.
    pub net_salary: Decimal,
    /// Advance balance remaining after the deduction.
    pub advance_balance_after: Decimal,
    /// The advance entries this slip drew from, oldest first.
    pub allocations: Vec<DeductionAllocation>,
    /// How many times the slip has been generated for this key.
    pub revision: u32,
    /// When the slip was generated.
    pub generated_at: DateTime<Utc>,
    /// Who generated the slip.
    pub generated_by: String,
}

impl SalarySlip {
    /// Freezes a computation into a slip.
    ///
    /// When `previous` is given, the slip keeps its id and bumps the revision.
    pub fn from_computation(
        computation: &PayrollComputation,
        allocations: Vec<DeductionAllocation>,
        generated_by: impl Into<String>,
        generated_at: DateTime<Utc>,
        previous: Option<&SalarySlip>,
    ) -> Self {
        let (id, revision) = match previous {
            Some(prior) => (prior.id, prior.revision + 1),
            None => (Uuid::new_v4(), 1),
        };

        Self {
            id,
            employee_id: computation.employee_id.clone(),
            month: computation.month,
            year: computation.year,
            total_days: computation.total_days,
            days_present: computation.days_present,
            weekly_off_days: computation.weekly_off_days,
            paid_days: computation.paid_days,
            monthly_salary: computation.monthly_salary,
            per_day_salary: computation.per_day_salary,
            gross_salary: computation.gross_salary,
            advance_balance: computation.advance_balance,
            advance_deduction: computation.advance_deduction,
            other_deductions: computation.other_deductions,
            net_salary: computation.net_salary,
            advance_balance_after: computation.advance_balance_after,
            allocations,
            revision,
            generated_at,
            generated_by: generated_by.into(),
        }
    }

    /// The key this slip is stored under.
    pub fn key(&self) -> SlipKey {
        SlipKey {
            employee_id: self.employee_id.clone(),
            year: self.year,
            month: self.month,
        }
    }

    /// Sum of the allocations, which always equals `advance_deduction`.
    pub fn allocated_total(&self) -> Decimal {
        self.allocations.iter().map(|a| a.amount).sum()
    }
}
