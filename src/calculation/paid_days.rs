//! Paid-day eligibility.
//!
//! Weekly-off days are paid only when the employee's attendance reaches the
//! configured threshold. The rule is a step: one day short forfeits every
//! weekly-off day of the month.

use crate::models::AuditStep;

/// The result of applying the weekly-off threshold, with its audit step.
#[derive(Debug, Clone)]
pub struct PaidDaysResult {
    /// Days the employee is paid for.
    pub paid_days: u32,
    /// Whether the weekly-off days were added.
    pub weekly_off_paid: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Determines the paid days for a month.
///
/// Reaching the threshold exactly pays the weekly-off days.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::determine_paid_days;
///
/// assert_eq!(determine_paid_days(20, 4, 20, 1).paid_days, 24);
/// assert_eq!(determine_paid_days(19, 4, 20, 1).paid_days, 19);
/// ```
pub fn determine_paid_days(
    days_present: u32,
    weekly_off_days: u32,
    min_days_for_weekly_off_paid: u32,
    step_number: u32,
) -> PaidDaysResult {
    let weekly_off_paid = days_present >= min_days_for_weekly_off_paid;
    let paid_days = if weekly_off_paid {
        days_present + weekly_off_days
    } else {
        days_present
    };

    let reasoning = if weekly_off_paid {
        format!(
            "{} days present meets the threshold of {}: {} + {} weekly-off days = {} paid days",
            days_present, min_days_for_weekly_off_paid, days_present, weekly_off_days, paid_days
        )
    } else {
        format!(
            "{} days present is below the threshold of {}: weekly-off days unpaid, {} paid days",
            days_present, min_days_for_weekly_off_paid, paid_days
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "paid_days".to_string(),
        rule_name: "Weekly-Off Eligibility".to_string(),
        input: serde_json::json!({
            "days_present": days_present,
            "weekly_off_days": weekly_off_days,
            "min_days_for_weekly_off_paid": min_days_for_weekly_off_paid
        }),
        output: serde_json::json!({
            "weekly_off_paid": weekly_off_paid,
            "paid_days": paid_days
        }),
        reasoning,
    };

    PaidDaysResult {
        paid_days,
        weekly_off_paid,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_at_threshold_pays_weekly_offs() {
        let result = determine_paid_days(20, 5, 20, 1);
        assert!(result.weekly_off_paid);
        assert_eq!(result.paid_days, 25);
    }

    #[test]
    fn test_one_below_threshold_forfeits_all_weekly_offs() {
        let result = determine_paid_days(19, 5, 20, 1);
        assert!(!result.weekly_off_paid);
        assert_eq!(result.paid_days, 19);
    }

    #[test]
    fn test_zero_threshold_always_pays() {
        let result = determine_paid_days(0, 4, 0, 1);
        assert!(result.weekly_off_paid);
        assert_eq!(result.paid_days, 4);
    }

    #[test]
    fn test_paid_days_may_exceed_calendar_days() {
        // 30 days present plus 5 offs: the cap handles this downstream.
        let result = determine_paid_days(30, 5, 20, 1);
        assert_eq!(result.paid_days, 35);
    }

    #[test]
    fn test_audit_step_records_decision() {
        let result = determine_paid_days(19, 5, 20, 3);
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "paid_days");
        assert_eq!(result.audit_step.output["weekly_off_paid"], false);
        assert!(result.audit_step.reasoning.contains("below the threshold"));
    }
}
