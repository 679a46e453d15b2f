//! Advance ledger operations.
//!
//! An employee's advances are recovered oldest-first. This module reads the
//! outstanding balance, allocates a deduction across entries in FIFO order,
//! and hands back a prior allocation when a salary slip is regenerated.
//!
//! The functions work on copies of the entries; persisting the result is the
//! caller's job and must happen atomically with the salary slip write.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::AdvanceScope;
use crate::error::{EngineError, EngineResult};
use crate::models::{AdvanceEntry, DeductionAllocation};

/// The ledger after a FIFO deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionOutcome {
    /// Every entry, oldest grant first, with reduced remaining amounts.
    pub entries: Vec<AdvanceEntry>,
    /// The amount actually deducted: `min(requested, outstanding balance)`.
    pub deducted: Decimal,
    /// What was taken from each entry, in the order it was taken.
    pub allocations: Vec<DeductionAllocation>,
}

/// Sums the remaining amounts of all entries.
///
/// No date filter is applied; see [`scope_entries`] for that.
pub fn outstanding_balance(entries: &[AdvanceEntry]) -> Decimal {
    entries.iter().map(|e| e.remaining_amount).sum()
}

/// Keeps the entries that count toward the balance under `scope`.
pub fn scope_entries(
    entries: &[AdvanceEntry],
    scope: AdvanceScope,
    period_end: NaiveDate,
) -> Vec<AdvanceEntry> {
    match scope {
        AdvanceScope::AllOutstanding => entries.to_vec(),
        AdvanceScope::GrantedByPeriodEnd => entries
            .iter()
            .filter(|e| e.grant_date <= period_end)
            .cloned()
            .collect(),
    }
}

/// Deducts `amount` from the entries, oldest grant date first.
///
/// Entries granted on the same date keep their given order. A non-positive
/// amount or an empty ledger leaves everything unchanged.
///
/// # Example
///
/// ```
/// use payroll_engine::ledger::apply_deduction;
/// use payroll_engine::models::AdvanceEntry;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entries = vec![
///     AdvanceEntry::new("adv_002", "emp_001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
///         Decimal::new(5000, 0), None).unwrap(),
///     AdvanceEntry::new("adv_001", "emp_001", NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         Decimal::new(3000, 0), None).unwrap(),
/// ];
///
/// let outcome = apply_deduction(&entries, Decimal::new(4000, 0));
/// assert_eq!(outcome.entries[0].id, "adv_001");
/// assert_eq!(outcome.entries[0].remaining_amount, Decimal::ZERO);
/// assert_eq!(outcome.entries[1].remaining_amount, Decimal::new(4000, 0));
/// assert_eq!(outcome.deducted, Decimal::new(4000, 0));
/// ```
pub fn apply_deduction(entries: &[AdvanceEntry], amount: Decimal) -> DeductionOutcome {
    let mut ordered = entries.to_vec();
    ordered.sort_by_key(|e| e.grant_date);

    let mut to_deduct = amount.max(Decimal::ZERO);
    let mut allocations = Vec::new();

    for entry in ordered.iter_mut() {
        if to_deduct <= Decimal::ZERO {
            break;
        }
        if !entry.is_outstanding() {
            continue;
        }
        let take = entry.remaining_amount.min(to_deduct);
        entry.remaining_amount -= take;
        to_deduct -= take;
        allocations.push(DeductionAllocation {
            advance_id: entry.id.clone(),
            amount: take,
        });
    }

    let deducted: Decimal = allocations.iter().map(|a| a.amount).sum();

    DeductionOutcome {
        entries: ordered,
        deducted,
        allocations,
    }
}

/// Restores the amounts a previous deduction took.
///
/// # Returns
///
/// The entries in their given order with the allocations added back, or an
/// error if:
/// - an allocation names an entry that is not in the ledger (`AdvanceNotFound`)
/// - a restore would lift an entry above its original amount (`LedgerInvariant`)
pub fn reverse_allocations(
    entries: &[AdvanceEntry],
    allocations: &[DeductionAllocation],
) -> EngineResult<Vec<AdvanceEntry>> {
    let mut restored = entries.to_vec();

    for allocation in allocations {
        let entry = restored
            .iter_mut()
            .find(|e| e.id == allocation.advance_id)
            .ok_or_else(|| EngineError::AdvanceNotFound {
                advance_id: allocation.advance_id.clone(),
            })?;

        entry.remaining_amount += allocation.amount;
        if entry.remaining_amount > entry.original_amount {
            return Err(EngineError::LedgerInvariant {
                message: format!(
                    "restoring {} to advance '{}' would exceed its original amount {}",
                    allocation.amount, entry.id, entry.original_amount
                ),
            });
        }
    }

    Ok(restored)
}
