//! Salary advance ledger models.
//!
//! An [`AdvanceEntry`] records cash paid to an employee ahead of salary. Its
//! original amount never changes; its remaining amount is reduced by payroll
//! commits through FIFO deduction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A cash advance granted to an employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AdvanceEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let advance = AdvanceEntry::new(
///     "adv_001",
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     Decimal::new(3000, 0),
///     Some("festival".to_string()),
/// )
/// .unwrap();
/// assert_eq!(advance.remaining_amount, advance.original_amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceEntry {
    /// Unique identifier of the advance.
    pub id: String,
    /// The employee who received the advance.
    pub employee_id: String,
    /// The date the advance was granted.
    pub grant_date: NaiveDate,
    /// The amount originally paid out.
    pub original_amount: Decimal,
    /// The amount still to be recovered.
    pub remaining_amount: Decimal,
    /// Why the advance was granted.
    #[serde(default)]
    pub reason: Option<String>,
}

impl AdvanceEntry {
    /// Creates a fully outstanding advance.
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        grant_date: NaiveDate,
        amount: Decimal,
        reason: Option<String>,
    ) -> EngineResult<Self> {
        let entry = Self {
            id: id.into(),
            employee_id: employee_id.into(),
            grant_date,
            original_amount: amount,
            remaining_amount: amount,
            reason,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Checks `0 <= remaining_amount <= original_amount`.
    pub fn validate(&self) -> EngineResult<()> {
        EngineError::reject_negative("original_amount", self.original_amount)?;
        if self.remaining_amount < Decimal::ZERO || self.remaining_amount > self.original_amount {
            return Err(EngineError::LedgerInvariant {
                message: format!(
                    "advance '{}' has remaining {} outside 0..={}",
                    self.id, self.remaining_amount, self.original_amount
                ),
            });
        }
        Ok(())
    }

    /// Returns true if part of the advance is still to be recovered.
    pub fn is_outstanding(&self) -> bool {
        self.remaining_amount > Decimal::ZERO
    }
}

/// The share of a deduction taken from one advance entry.
///
/// Salary slips keep the allocations they made so that regenerating a slip
/// can hand the exact amounts back before deducting again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionAllocation {
    /// The advance the amount was taken from.
    pub advance_id: String,
    /// The amount taken.
    pub amount: Decimal,
}
