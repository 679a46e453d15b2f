//! Gross salary proration.
//!
//! This module turns a monthly salary into a per-day rate and multiplies it by
//! the paid days, optionally capping the result at the monthly salary.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, round_money};

/// The result of prorating a monthly salary, with its audit steps.
#[derive(Debug, Clone)]
pub struct GrossSalaryResult {
    /// Monthly salary divided by days in the month, unrounded.
    pub per_day_salary: Decimal,
    /// Per-day rate times paid days, rounded to cents.
    pub uncapped_gross_salary: Decimal,
    /// The gross after the optional cap.
    pub gross_salary: Decimal,
    /// Whether the cap reduced the gross.
    pub cap_applied: bool,
    /// Audit steps for the per-day rate and the gross.
    pub audit_steps: Vec<AuditStep>,
}

/// Prorates a monthly salary over the paid days.
///
/// The per-day rate keeps full precision; only the gross is rounded to cents.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_gross_salary;
/// use rust_decimal::Decimal;
///
/// let result = calculate_gross_salary(Decimal::new(20000, 0), 30, 35, true, 1).unwrap();
/// assert!(result.cap_applied);
/// assert_eq!(result.gross_salary, Decimal::new(20000, 0));
/// ```
pub fn calculate_gross_salary(
    monthly_salary: Decimal,
    total_days: u32,
    paid_days: u32,
    cap_at_monthly_salary: bool,
    step_number: u32,
) -> EngineResult<GrossSalaryResult> {
    EngineError::reject_negative("monthly_salary", monthly_salary)?;
    if total_days == 0 {
        return Err(EngineError::InvalidCalendarInput {
            message: "a month cannot have zero days".to_string(),
        });
    }

    let per_day_salary = monthly_salary / Decimal::from(total_days);
    let uncapped_gross_salary = round_money(per_day_salary * Decimal::from(paid_days));

    let (gross_salary, cap_applied) =
        if cap_at_monthly_salary && uncapped_gross_salary > monthly_salary {
            (monthly_salary, true)
        } else {
            (uncapped_gross_salary, false)
        };

    let per_day_step = AuditStep {
        step_number,
        rule_id: "per_day_salary".to_string(),
        rule_name: "Per-Day Salary".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string(),
            "total_days": total_days
        }),
        output: serde_json::json!({
            "per_day_salary": per_day_salary.to_string()
        }),
        reasoning: format!(
            "${} / {} days = ${} per day",
            monthly_salary.normalize(),
            total_days,
            round_money(per_day_salary).normalize()
        ),
    };

    let reasoning = if cap_applied {
        format!(
            "{} paid days × ${} = ${} (capped at monthly salary ${})",
            paid_days,
            round_money(per_day_salary).normalize(),
            uncapped_gross_salary.normalize(),
            monthly_salary.normalize()
        )
    } else {
        format!(
            "{} paid days × ${} = ${}",
            paid_days,
            round_money(per_day_salary).normalize(),
            gross_salary.normalize()
        )
    };

    let gross_step = AuditStep {
        step_number: step_number + 1,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input: serde_json::json!({
            "per_day_salary": per_day_salary.to_string(),
            "paid_days": paid_days,
            "cap_at_monthly_salary": cap_at_monthly_salary
        }),
        output: serde_json::json!({
            "uncapped_gross_salary": uncapped_gross_salary.normalize().to_string(),
            "gross_salary": gross_salary.normalize().to_string(),
            "cap_applied": cap_applied
        }),
        reasoning,
    };

    Ok(GrossSalaryResult {
        per_day_salary,
        uncapped_gross_salary,
        gross_salary,
        cap_applied,
        audit_steps: vec![per_day_step, gross_step],
    })
}
