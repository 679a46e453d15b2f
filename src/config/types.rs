//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Settings are validated
//! while they are deserialized, so a loaded [`PayrollSettings`] is always
//! usable by the calculator.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{parse_weekday, weekday_name};
use crate::error::{EngineError, EngineResult};

/// Which advances count toward the balance recovered from a salary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceScope {
    /// Every outstanding advance, whatever its grant date.
    #[default]
    AllOutstanding,
    /// Only advances granted on or before the last day of the period.
    GrantedByPeriodEnd,
}

/// What a commit does when a slip already exists for the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommitPolicy {
    /// Hand back the prior slip's advance deduction, then recompute and reapply.
    #[default]
    Reapply,
    /// Refuse with [`EngineError::DuplicateCommit`].
    Reject,
}

/// The settings file as written on disk.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPayrollSettings {
    default_monthly_salary: Decimal,
    weekly_off_day: String,
    min_days_for_weekly_off_paid: u32,
    #[serde(default)]
    cap_at_monthly_salary: bool,
    #[serde(default)]
    advance_scope: AdvanceScope,
    #[serde(default)]
    recommit_policy: RecommitPolicy,
}

/// Organization-wide payroll settings.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollSettings;
/// use chrono::Weekday;
///
/// let yaml = r#"
/// default_monthly_salary: "18000.00"
/// weekly_off_day: Thursday
/// min_days_for_weekly_off_paid: 20
/// cap_at_monthly_salary: true
/// "#;
/// let settings: PayrollSettings = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(settings.weekly_off_day, Weekday::Thu);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawPayrollSettings")]
pub struct PayrollSettings {
    /// Monthly salary for employees without an override.
    pub default_monthly_salary: Decimal,
    /// The weekday treated as the weekly off.
    pub weekly_off_day: Weekday,
    /// Days present needed for weekly-off days to be paid.
    pub min_days_for_weekly_off_paid: u32,
    /// Whether gross pay is capped at the monthly salary.
    pub cap_at_monthly_salary: bool,
    /// Which advances are recovered from the salary.
    pub advance_scope: AdvanceScope,
    /// How a repeated commit for the same month is handled.
    pub recommit_policy: RecommitPolicy,
}

impl PayrollSettings {
    /// Builds settings from a weekday name, validating every field.
    pub fn new(
        default_monthly_salary: Decimal,
        weekly_off_day: &str,
        min_days_for_weekly_off_paid: u32,
        cap_at_monthly_salary: bool,
    ) -> EngineResult<Self> {
        EngineError::reject_negative("default_monthly_salary", default_monthly_salary)?;
        Ok(Self {
            default_monthly_salary,
            weekly_off_day: parse_weekday(weekly_off_day)?,
            min_days_for_weekly_off_paid,
            cap_at_monthly_salary,
            advance_scope: AdvanceScope::default(),
            recommit_policy: RecommitPolicy::default(),
        })
    }

    /// Replaces the advance scope.
    pub fn with_advance_scope(mut self, scope: AdvanceScope) -> Self {
        self.advance_scope = scope;
        self
    }

    /// Replaces the recommit policy.
    pub fn with_recommit_policy(mut self, policy: RecommitPolicy) -> Self {
        self.recommit_policy = policy;
        self
    }

    /// The full name of the weekly-off day.
    pub fn weekly_off_day_name(&self) -> &'static str {
        weekday_name(self.weekly_off_day)
    }
}

impl TryFrom<RawPayrollSettings> for PayrollSettings {
    type Error = EngineError;

    fn try_from(raw: RawPayrollSettings) -> Result<Self, Self::Error> {
        Ok(PayrollSettings::new(
            raw.default_monthly_salary,
            &raw.weekly_off_day,
            raw.min_days_for_weekly_off_paid,
            raw.cap_at_monthly_salary,
        )?
        .with_advance_scope(raw.advance_scope)
        .with_recommit_policy(raw.recommit_policy))
    }
}

/// A per-employee monthly salary that replaces the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRate {
    /// The employee the rate applies to.
    pub employee_id: String,
    /// The employee's monthly salary.
    pub monthly_salary: Decimal,
}

/// Rates file structure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RatesConfig {
    /// Per-employee salary overrides.
    #[serde(default)]
    pub rates: Vec<EmployeeRate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let yaml = r#"
default_monthly_salary: "15000"
weekly_off_day: sunday
min_days_for_weekly_off_paid: 18
"#;
        let settings: PayrollSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.weekly_off_day, Weekday::Sun);
        assert!(!settings.cap_at_monthly_salary);
        assert_eq!(settings.advance_scope, AdvanceScope::AllOutstanding);
        assert_eq!(settings.recommit_policy, RecommitPolicy::Reapply);
    }

    #[test]
    fn test_misspelled_weekday_fails_to_load() {
        let yaml = r#"
default_monthly_salary: "15000"
weekly_off_day: Thrusday
min_days_for_weekly_off_paid: 18
"#;
        let result: Result<PayrollSettings, _> = serde_yaml::from_str(yaml);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unrecognized weekday 'Thrusday'"), "{}", message);
    }

    #[test]
    fn test_negative_default_salary_fails_to_load() {
        let yaml = r#"
default_monthly_salary: "-1"
weekly_off_day: Thursday
min_days_for_weekly_off_paid: 18
"#;
        let result: Result<PayrollSettings, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_scope_and_policy() {
        let yaml = r#"
default_monthly_salary: "15000"
weekly_off_day: Friday
min_days_for_weekly_off_paid: 18
cap_at_monthly_salary: true
advance_scope: granted_by_period_end
recommit_policy: reject
"#;
        let settings: PayrollSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.advance_scope, AdvanceScope::GrantedByPeriodEnd);
        assert_eq!(settings.recommit_policy, RecommitPolicy::Reject);
        assert_eq!(settings.default_monthly_salary, dec("15000"));
        assert_eq!(settings.weekly_off_day_name(), "Friday");
    }

    #[test]
    fn test_new_rejects_unknown_weekday() {
        let result = PayrollSettings::new(dec("15000"), "Funday", 20, false);
        assert!(matches!(
            result,
            Err(EngineError::InvalidCalendarInput { .. })
        ));
    }
}
