//! Payroll computation models.
//!
//! This module contains the [`PayrollComputation`] produced by the pure
//! calculator, together with the audit structures that record every step of
//! the salary derivation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag conditions an operator should look at before committing,
/// without preventing the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    pub(crate) fn new(code: &str, message: String, severity: &str) -> Self {
        Self {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        }
    }
}

/// The complete audit trace for a calculation.
///
/// Holds no timestamps, so two calculations over the same inputs produce
/// equal traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The itemized result of a monthly salary calculation.
///
/// Every intermediate figure is kept so the slip can be printed and audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period.
    pub month: u32,
    /// The configured weekly-off weekday.
    pub weekly_off_day: String,
    /// Days in the month.
    pub total_days: u32,
    /// Days with a recorded arrival.
    pub days_present: u32,
    /// Occurrences of the weekly-off weekday in the month.
    pub weekly_off_days: u32,
    /// Whether attendance met the threshold for paid weekly-offs.
    pub weekly_off_paid: bool,
    /// Days the employee is compensated for.
    pub paid_days: u32,
    /// The monthly salary used (override or default).
    pub monthly_salary: Decimal,
    /// Monthly salary over days in the month, at full precision.
    pub per_day_salary: Decimal,
    /// Gross pay before the cap, rounded to cents.
    pub uncapped_gross_salary: Decimal,
    /// Whether the gross was cut back to the monthly salary.
    pub cap_applied: bool,
    /// Gross pay for the period.
    pub gross_salary: Decimal,
    /// Advance balance outstanding when the calculation ran.
    pub advance_balance: Decimal,
    /// The part of the advance balance recovered from this salary.
    pub advance_deduction: Decimal,
    /// Manual deductions supplied by the operator.
    pub other_deductions: Decimal,
    /// Pay after deductions, never below zero.
    pub net_salary: Decimal,
    /// Advance balance left after this deduction.
    pub advance_balance_after: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollComputation {
    /// The per-day rate rounded to cents for printing.
    ///
    /// Arithmetic always uses [`PayrollComputation::per_day_salary`] directly.
    pub fn per_day_salary_display(&self) -> Decimal {
        round_money(self.per_day_salary)
    }
}

/// Rounds a monetary amount to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_money_midpoint_goes_away_from_zero() {
        assert_eq!(round_money(dec("10.005")), dec("10.01"));
        assert_eq!(round_money(dec("10.004")), dec("10.00"));
        assert_eq!(round_money(dec("666.6666666")), dec("666.67"));
    }

    #[test]
    fn test_audit_trace_default_is_empty() {
        let trace = AuditTrace::default();
        assert!(trace.steps.is_empty());
        assert!(trace.warnings.is_empty());
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning::new("NET_FLOORED", "net floored".to_string(), "medium");
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["code"], "NET_FLOORED");
        assert_eq!(json["severity"], "medium");
    }
}
