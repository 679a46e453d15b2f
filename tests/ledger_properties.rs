//! Property tests for FIFO advance recovery.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::ledger::{apply_deduction, outstanding_balance, reverse_allocations};
use payroll_engine::models::AdvanceEntry;

/// Advances with amounts in cents, granted within two months of each other.
fn ledger_strategy() -> impl Strategy<Value = Vec<AdvanceEntry>> {
    prop::collection::vec((0i64..60, 1i64..1_000_000, 0u32..=100), 0..8).prop_map(|rows| {
        let base = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        rows.into_iter()
            .enumerate()
            .map(|(i, (offset, cents, percent_left))| {
                let original = Decimal::new(cents, 2);
                let remaining = (original * Decimal::from(percent_left) / Decimal::from(100))
                    .round_dp(2);
                AdvanceEntry {
                    id: format!("adv_{:03}", i),
                    employee_id: "emp_001".to_string(),
                    grant_date: base + Duration::days(offset),
                    original_amount: original,
                    remaining_amount: remaining,
                    reason: None,
                }
            })
            .collect()
    })
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn deducted_is_request_clamped_to_balance(
        entries in ledger_strategy(),
        amount in amount_strategy(),
    ) {
        let balance = outstanding_balance(&entries);
        let outcome = apply_deduction(&entries, amount);
        let expected = amount.max(Decimal::ZERO).min(balance);
        prop_assert_eq!(outcome.deducted, expected);
    }

    #[test]
    fn remaining_amounts_stay_in_range(
        entries in ledger_strategy(),
        amount in amount_strategy(),
    ) {
        let outcome = apply_deduction(&entries, amount);
        for entry in &outcome.entries {
            prop_assert!(entry.remaining_amount >= Decimal::ZERO);
            prop_assert!(entry.remaining_amount <= entry.original_amount);
        }
    }

    #[test]
    fn balance_drops_by_exactly_the_deducted_amount(
        entries in ledger_strategy(),
        amount in amount_strategy(),
    ) {
        let before = outstanding_balance(&entries);
        let outcome = apply_deduction(&entries, amount);
        prop_assert_eq!(outstanding_balance(&outcome.entries), before - outcome.deducted);

        let allocated: Decimal = outcome.allocations.iter().map(|a| a.amount).sum();
        prop_assert_eq!(allocated, outcome.deducted);
    }

    #[test]
    fn newer_advance_untouched_while_older_has_balance(
        entries in ledger_strategy(),
        amount in amount_strategy(),
    ) {
        let outcome = apply_deduction(&entries, amount);
        // Entries come back oldest first; once one is left with a balance,
        // everything granted strictly later keeps its starting balance.
        let mut oldest_open: Option<NaiveDate> = None;
        for entry in &outcome.entries {
            if let Some(open_date) = oldest_open {
                if entry.grant_date > open_date {
                    let before = entries.iter().find(|e| e.id == entry.id).unwrap();
                    prop_assert_eq!(entry.remaining_amount, before.remaining_amount);
                }
            } else if entry.remaining_amount > Decimal::ZERO {
                oldest_open = Some(entry.grant_date);
            }
        }
    }

    #[test]
    fn reversal_restores_the_ledger(
        entries in ledger_strategy(),
        amount in amount_strategy(),
    ) {
        let outcome = apply_deduction(&entries, amount);
        let restored = reverse_allocations(&outcome.entries, &outcome.allocations).unwrap();
        for entry in &entries {
            let back = restored.iter().find(|e| e.id == entry.id).unwrap();
            prop_assert_eq!(back.remaining_amount, entry.remaining_amount);
        }
    }
}
