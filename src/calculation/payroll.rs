//! Monthly payroll calculation.
//!
//! [`calculate_payroll`] combines the calendar facts, the attendance count,
//! the salary rate and the advance balance into an itemized
//! [`PayrollComputation`]. It has no side effects and may be called on every
//! change of a preview form.

use rust_decimal::Decimal;

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditTrace, AuditWarning, PayrollComputation, PayrollPeriod};

use super::calendar::{count_weekday, weekday_name};
use super::gross_salary::calculate_gross_salary;
use super::paid_days::determine_paid_days;

/// Everything the calculator needs besides the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollInput {
    /// The employee being paid.
    pub employee_id: String,
    /// The month being paid.
    pub period: PayrollPeriod,
    /// Days with a recorded arrival in the month.
    pub days_present: u32,
    /// The employee's monthly salary (override or default).
    pub monthly_salary: Decimal,
    /// Outstanding advance balance to recover from.
    pub advance_balance: Decimal,
    /// Manual deductions entered by the operator.
    pub other_deductions: Decimal,
}

/// Calculates the salary for one employee and month.
///
/// # Returns
///
/// The itemized computation, or an error if:
/// - a salary, balance or deduction figure is negative (`NegativeInputRejected`)
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{calculate_payroll, PayrollInput};
/// use payroll_engine::config::PayrollSettings;
/// use payroll_engine::models::PayrollPeriod;
/// use rust_decimal::Decimal;
///
/// let settings = PayrollSettings::new(Decimal::new(18000, 0), "Thursday", 20, true).unwrap();
/// let input = PayrollInput {
///     employee_id: "emp_001".to_string(),
///     period: PayrollPeriod::new(2025, 1).unwrap(),
///     days_present: 22,
///     monthly_salary: Decimal::new(18000, 0),
///     advance_balance: Decimal::ZERO,
///     other_deductions: Decimal::ZERO,
/// };
/// let computation = calculate_payroll(&input, &settings).unwrap();
/// assert_eq!(computation.paid_days, 27);
/// ```
pub fn calculate_payroll(
    input: &PayrollInput,
    settings: &PayrollSettings,
) -> EngineResult<PayrollComputation> {
    EngineError::reject_negative("monthly_salary", input.monthly_salary)?;
    EngineError::reject_negative("advance_balance", input.advance_balance)?;
    EngineError::reject_negative("other_deductions", input.other_deductions)?;

    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();

    // Calendar facts
    let period = input.period;
    let total_days = period.total_days();
    let weekly_off_days = count_weekday(period.year(), period.month(), settings.weekly_off_day)?;
    steps.push(AuditStep {
        step_number: 1,
        rule_id: "calendar".to_string(),
        rule_name: "Calendar Facts".to_string(),
        input: serde_json::json!({
            "year": period.year(),
            "month": period.month(),
            "weekly_off_day": weekday_name(settings.weekly_off_day)
        }),
        output: serde_json::json!({
            "total_days": total_days,
            "weekly_off_days": weekly_off_days
        }),
        reasoning: format!(
            "{} has {} days, {} of them {}s",
            period,
            total_days,
            weekly_off_days,
            weekday_name(settings.weekly_off_day)
        ),
    });

    // Weekly-off eligibility
    let paid = determine_paid_days(
        input.days_present,
        weekly_off_days,
        settings.min_days_for_weekly_off_paid,
        2,
    );
    steps.push(paid.audit_step);
    if !paid.weekly_off_paid && weekly_off_days > 0 {
        warnings.push(AuditWarning::new(
            "WEEKLY_OFF_FORFEITED",
            format!(
                "{} days present is below the threshold of {}; {} weekly-off days are unpaid",
                input.days_present, settings.min_days_for_weekly_off_paid, weekly_off_days
            ),
            "low",
        ));
    }
    if paid.paid_days > total_days {
        warnings.push(AuditWarning::new(
            "PAID_DAYS_EXCEED_MONTH",
            format!(
                "{} paid days exceed the {} days in {}",
                paid.paid_days, total_days, period
            ),
            "medium",
        ));
    }

    // Per-day rate and gross
    let gross = calculate_gross_salary(
        input.monthly_salary,
        total_days,
        paid.paid_days,
        settings.cap_at_monthly_salary,
        3,
    )?;
    steps.extend(gross.audit_steps);
    if gross.cap_applied {
        warnings.push(AuditWarning::new(
            "GROSS_CAPPED",
            format!(
                "Gross ${} capped at monthly salary ${}",
                gross.uncapped_gross_salary.normalize(),
                input.monthly_salary.normalize()
            ),
            "low",
        ));
    }
    let gross_salary = gross.gross_salary;

    // Advance recovery is bounded by gross, not net
    let advance_deduction = gross_salary.min(input.advance_balance);
    steps.push(AuditStep {
        step_number: 5,
        rule_id: "advance_deduction".to_string(),
        rule_name: "Advance Recovery".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "advance_balance": input.advance_balance.normalize().to_string()
        }),
        output: serde_json::json!({
            "advance_deduction": advance_deduction.normalize().to_string()
        }),
        reasoning: format!(
            "min(gross ${}, balance ${}) = ${}",
            gross_salary.normalize(),
            input.advance_balance.normalize(),
            advance_deduction.normalize()
        ),
    });

    // Net, floored at zero
    let unfloored_net = gross_salary - advance_deduction - input.other_deductions;
    let net_salary = unfloored_net.max(Decimal::ZERO);
    if unfloored_net < Decimal::ZERO {
        warnings.push(AuditWarning::new(
            "NET_FLOORED",
            format!(
                "Deductions exceed gross by ${}; net salary set to zero",
                (-unfloored_net).normalize()
            ),
            "medium",
        ));
    }
    steps.push(AuditStep {
        step_number: 6,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "advance_deduction": advance_deduction.normalize().to_string(),
            "other_deductions": input.other_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.normalize().to_string()
        }),
        reasoning: format!(
            "max(0, ${} - ${} - ${}) = ${}",
            gross_salary.normalize(),
            advance_deduction.normalize(),
            input.other_deductions.normalize(),
            net_salary.normalize()
        ),
    });

    // Balance carried forward
    let advance_balance_after = input.advance_balance - advance_deduction;
    steps.push(AuditStep {
        step_number: 7,
        rule_id: "advance_balance_after".to_string(),
        rule_name: "Advance Balance Carried Forward".to_string(),
        input: serde_json::json!({
            "advance_balance": input.advance_balance.normalize().to_string(),
            "advance_deduction": advance_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "advance_balance_after": advance_balance_after.normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} = ${} left to recover",
            input.advance_balance.normalize(),
            advance_deduction.normalize(),
            advance_balance_after.normalize()
        ),
    });

    Ok(PayrollComputation {
        employee_id: input.employee_id.clone(),
        year: period.year(),
        month: period.month(),
        weekly_off_day: weekday_name(settings.weekly_off_day).to_string(),
        total_days,
        days_present: input.days_present,
        weekly_off_days,
        weekly_off_paid: paid.weekly_off_paid,
        paid_days: paid.paid_days,
        monthly_salary: input.monthly_salary,
        per_day_salary: gross.per_day_salary,
        uncapped_gross_salary: gross.uncapped_gross_salary,
        cap_applied: gross.cap_applied,
        gross_salary,
        advance_balance: input.advance_balance,
        advance_deduction,
        other_deductions: input.other_deductions,
        net_salary,
        advance_balance_after,
        audit_trace: AuditTrace { steps, warnings },
    })
}
