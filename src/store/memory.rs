//! In-memory payroll store.
//!
//! Holds every table behind one mutex, so a commit's version check and its
//! writes happen under the same lock.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::config::{ConfigLoader, PayrollSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{AdvanceEntry, AttendanceDay, SalarySlip, SlipKey};

use super::{CommitBatch, CommitContext, LedgerSnapshot, PayrollStore};

#[derive(Debug, Default)]
struct Ledger {
    version: u64,
    entries: Vec<AdvanceEntry>,
}

#[derive(Debug, Default)]
struct Tables {
    settings: Option<PayrollSettings>,
    rates: HashMap<String, Decimal>,
    attendance: HashMap<String, BTreeMap<NaiveDate, AttendanceDay>>,
    ledgers: HashMap<String, Ledger>,
    slips: HashMap<SlipKey, SalarySlip>,
}

impl Tables {
    fn snapshot(&self, employee_id: &str) -> LedgerSnapshot {
        self.ledgers
            .get(employee_id)
            .map(|l| LedgerSnapshot {
                version: l.version,
                entries: l.entries.clone(),
            })
            .unwrap_or(LedgerSnapshot {
                version: 0,
                entries: Vec::new(),
            })
    }
}

/// A [`PayrollStore`] kept in process memory.
///
/// # Example
///
/// ```
/// use payroll_engine::store::{InMemoryStore, PayrollStore};
///
/// let store = InMemoryStore::new();
/// assert!(store.payroll_settings().unwrap().is_none());
/// assert_eq!(store.ledger("emp_001").unwrap().version, 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store with no settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the loaded settings and salary overrides.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let store = Self::new();
        store.put_settings(config.settings().clone());
        for rate in config.employee_rates() {
            store.lock().rates.insert(rate.employee_id, rate.monthly_salary);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Recovers the tables from a poisoned lock.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the payroll settings.
    pub fn put_settings(&self, settings: PayrollSettings) {
        self.lock().settings = Some(settings);
    }

    /// Sets an employee's monthly salary override.
    pub fn set_employee_rate(&self, employee_id: &str, monthly_salary: Decimal) -> EngineResult<()> {
        EngineError::reject_negative("monthly_salary", monthly_salary)?;
        self.lock()
            .rates
            .insert(employee_id.to_string(), monthly_salary);
        Ok(())
    }

    /// Stores an attendance row, replacing any row for the same employee and date.
    pub fn record_attendance(&self, day: AttendanceDay) {
        self.lock()
            .attendance
            .entry(day.employee_id.clone())
            .or_default()
            .insert(day.date, day);
    }

    /// Adds an advance to the employee's ledger and bumps its version.
    pub fn grant_advance(&self, entry: AdvanceEntry) -> EngineResult<()> {
        entry.validate()?;
        let mut tables = self.lock();
        let ledger = tables.ledgers.entry(entry.employee_id.clone()).or_default();
        if ledger.entries.iter().any(|e| e.id == entry.id) {
            return Err(EngineError::LedgerInvariant {
                message: format!("advance '{}' already exists", entry.id),
            });
        }
        debug!(
            employee_id = %entry.employee_id,
            advance_id = %entry.id,
            amount = %entry.original_amount,
            "Advance granted"
        );
        ledger.entries.push(entry);
        ledger.version += 1;
        Ok(())
    }
}

impl PayrollStore for InMemoryStore {
    fn payroll_settings(&self) -> EngineResult<Option<PayrollSettings>> {
        Ok(self.lock().settings.clone())
    }

    fn employee_rate(&self, employee_id: &str) -> EngineResult<Option<Decimal>> {
        Ok(self.lock().rates.get(employee_id).copied())
    }

    fn attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceDay>> {
        Ok(self
            .lock()
            .attendance
            .get(employee_id)
            .map(|days| days.range(start..=end).map(|(_, d)| d.clone()).collect())
            .unwrap_or_default())
    }

    fn ledger(&self, employee_id: &str) -> EngineResult<LedgerSnapshot> {
        Ok(self.lock().snapshot(employee_id))
    }

    fn salary_slip(&self, key: &SlipKey) -> EngineResult<Option<SalarySlip>> {
        Ok(self.lock().slips.get(key).cloned())
    }

    fn commit_context(&self, employee_id: &str, key: &SlipKey) -> EngineResult<CommitContext> {
        let tables = self.lock();
        Ok(CommitContext {
            ledger: tables.snapshot(employee_id),
            previous: tables.slips.get(key).cloned(),
        })
    }

    fn commit(&self, batch: CommitBatch) -> EngineResult<()> {
        let mut tables = self.lock();
        let ledger = tables.ledgers.entry(batch.employee_id.clone()).or_default();

        if ledger.version != batch.expected_version {
            return Err(EngineError::ConcurrentCommitConflict {
                employee_id: batch.employee_id,
                expected_version: batch.expected_version,
                actual_version: ledger.version,
            });
        }

        // Validate every update before touching anything.
        let mut positions = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            entry.validate()?;
            let position = ledger
                .entries
                .iter()
                .position(|e| e.id == entry.id)
                .ok_or_else(|| EngineError::AdvanceNotFound {
                    advance_id: entry.id.clone(),
                })?;
            if ledger.entries[position].original_amount != entry.original_amount {
                return Err(EngineError::LedgerInvariant {
                    message: format!("original amount of advance '{}' is immutable", entry.id),
                });
            }
            positions.push(position);
        }

        for (position, entry) in positions.into_iter().zip(batch.entries) {
            ledger.entries[position].remaining_amount = entry.remaining_amount;
        }
        ledger.version += 1;
        let version = ledger.version;

        let key = batch.slip.key();
        debug!(
            employee_id = %key.employee_id,
            year = key.year,
            month = key.month,
            ledger_version = version,
            "Salary slip stored"
        );
        tables.slips.insert(key, batch.slip);
        Ok(())
    }
}
