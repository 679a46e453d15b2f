//! Persistence contract for the payroll engine.
//!
//! The engine reads attendance, advances, settings and salary overrides from a
//! [`PayrollStore`] and writes salary slips and advance balances back through
//! it. Ledgers are versioned per employee: [`PayrollStore::commit`] only
//! succeeds if the ledger is still at the version the commit read, and writes
//! the slip and every advance update together or not at all.
//!
//! The trait is synchronous. The HTTP handlers call it directly from their
//! futures, which suits [`InMemoryStore`]; a store that blocks on I/O needs
//! `tokio::task::spawn_blocking` around the service calls or an async trait.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollSettings;
use crate::error::EngineResult;
use crate::models::{AdvanceEntry, AttendanceDay, SalarySlip, SlipKey};

pub use memory::InMemoryStore;

/// An employee's advances as read at one ledger version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    /// Incremented by every write to this employee's ledger.
    pub version: u64,
    /// Every advance of the employee, settled ones included.
    pub entries: Vec<AdvanceEntry>,
}

/// What a commit reads before planning its writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitContext {
    /// The employee's ledger.
    pub ledger: LedgerSnapshot,
    /// The slip already stored for the month, if any.
    pub previous: Option<SalarySlip>,
}

/// The writes of one payroll commit.
#[derive(Debug, Clone)]
pub struct CommitBatch {
    /// The employee whose ledger and slip are written.
    pub employee_id: String,
    /// The ledger version the commit was computed from.
    pub expected_version: u64,
    /// Advance entries with their new remaining amounts.
    pub entries: Vec<AdvanceEntry>,
    /// The slip to insert or overwrite.
    pub slip: SalarySlip,
}

/// Data source and sink for payroll.
///
/// Methods are called from async handlers without `spawn_blocking`, so they
/// must not block for long.
pub trait PayrollStore: Send + Sync {
    /// Returns the organization's payroll settings, if configured.
    fn payroll_settings(&self) -> EngineResult<Option<PayrollSettings>>;

    /// Returns the employee's monthly salary override, if any.
    fn employee_rate(&self, employee_id: &str) -> EngineResult<Option<Decimal>>;

    /// Returns the employee's attendance rows dated within `[start, end]`.
    fn attendance(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceDay>>;

    /// Returns the employee's advance ledger and its version.
    fn ledger(&self, employee_id: &str) -> EngineResult<LedgerSnapshot>;

    /// Returns the slip stored under `key`, if any.
    fn salary_slip(&self, key: &SlipKey) -> EngineResult<Option<SalarySlip>>;

    /// Returns the employee's ledger and the slip under `key` as of one
    /// instant, so the slip's allocations always match the ledger version.
    fn commit_context(&self, employee_id: &str, key: &SlipKey) -> EngineResult<CommitContext>;

    /// Atomically writes a commit batch.
    ///
    /// Fails with `ConcurrentCommitConflict` and writes nothing when the
    /// ledger version no longer matches `batch.expected_version`.
    fn commit(&self, batch: CommitBatch) -> EngineResult<()>;
}
