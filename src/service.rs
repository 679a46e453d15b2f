//! Payroll preview and commit orchestration.
//!
//! [`PayrollService`] gathers the calculator's inputs from a [`PayrollStore`],
//! runs the pure calculation, and commits the resulting salary slip together
//! with the FIFO advance deduction.
//!
//! Regenerating a slip first hands back the advance amounts the previous slip
//! took (recorded in its allocations), so committing the same month twice
//! deducts once. Commits are checked against the ledger version they read and
//! are retried once if another commit for the same employee got there first.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::calculation::{PayrollInput, calculate_payroll, days_present};
use crate::config::{AdvanceScope, PayrollSettings, RecommitPolicy};
use crate::error::{EngineError, EngineResult};
use crate::ledger::{apply_deduction, outstanding_balance, reverse_allocations, scope_entries};
use crate::models::{AdvanceEntry, PayrollComputation, PayrollPeriod, SalarySlip, SlipKey};
use crate::store::{CommitBatch, CommitContext, PayrollStore};

/// A request to preview or commit one employee's salary for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// The month to pay.
    pub period: PayrollPeriod,
    /// Manual deductions; zero when none were entered.
    pub other_deductions: Decimal,
}

impl PayrollRequest {
    /// Builds a request, validating the month.
    pub fn new(
        employee_id: impl Into<String>,
        year: i32,
        month: u32,
        other_deductions: Decimal,
    ) -> EngineResult<Self> {
        Ok(Self {
            employee_id: employee_id.into(),
            period: PayrollPeriod::new(year, month)?,
            other_deductions,
        })
    }
}

/// Everything read for one calculation.
struct Prepared {
    settings: PayrollSettings,
    ledger_version: u64,
    entries: Vec<AdvanceEntry>,
    previous: Option<SalarySlip>,
    computation: PayrollComputation,
}

/// Previews and commits salary slips against a store.
#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
}

impl PayrollService {
    /// Creates a service over the given store.
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn PayrollStore> {
        &self.store
    }

    /// Calculates a salary without writing anything.
    ///
    /// When a slip already exists and regeneration is allowed, the preview
    /// shows what a new commit would produce, i.e. with the old slip's
    /// advance deduction handed back first.
    pub fn preview(&self, request: &PayrollRequest) -> EngineResult<PayrollComputation> {
        let prepared = self.prepare(request, false)?;
        debug!(
            employee_id = %request.employee_id,
            period = %request.period,
            net_salary = %prepared.computation.net_salary,
            "Payroll previewed"
        );
        Ok(prepared.computation)
    }

    /// Calculates and persists a salary slip, applying the advance deduction.
    ///
    /// A ledger conflict is retried once with freshly read data; a second
    /// conflict is returned to the caller with nothing written.
    pub fn commit(&self, request: &PayrollRequest, actor: &str) -> EngineResult<SalarySlip> {
        match self.try_commit(request, actor) {
            Err(EngineError::ConcurrentCommitConflict {
                employee_id,
                expected_version,
                actual_version,
            }) => {
                warn!(
                    employee_id = %employee_id,
                    expected_version,
                    actual_version,
                    "Advance ledger changed during commit, retrying"
                );
                self.try_commit(request, actor)
            }
            result => result,
        }
    }

    /// Returns the stored slip for an employee and month.
    pub fn salary_slip(
        &self,
        employee_id: &str,
        period: PayrollPeriod,
    ) -> EngineResult<Option<SalarySlip>> {
        self.store.salary_slip(&SlipKey::new(employee_id, period))
    }

    fn try_commit(&self, request: &PayrollRequest, actor: &str) -> EngineResult<SalarySlip> {
        let prepared = self.prepare(request, true)?;

        let (entries, slip) = plan_commit(
            &prepared.computation,
            &prepared.entries,
            prepared.settings.advance_scope,
            request.period.end_date(),
            prepared.previous.as_ref(),
            actor,
            Utc::now(),
        )?;

        self.store.commit(CommitBatch {
            employee_id: request.employee_id.clone(),
            expected_version: prepared.ledger_version,
            entries,
            slip: slip.clone(),
        })?;

        info!(
            employee_id = %slip.employee_id,
            year = slip.year,
            month = slip.month,
            revision = slip.revision,
            gross_salary = %slip.gross_salary,
            advance_deduction = %slip.advance_deduction,
            net_salary = %slip.net_salary,
            generated_by = %slip.generated_by,
            "Salary slip committed"
        );
        Ok(slip)
    }

    fn prepare(&self, request: &PayrollRequest, committing: bool) -> EngineResult<Prepared> {
        let settings = self
            .store
            .payroll_settings()?
            .ok_or_else(|| EngineError::MissingSettings {
                source_path: "payroll store".to_string(),
            })?;

        let employee_id = request.employee_id.as_str();
        let period = request.period;

        let monthly_salary = match self.store.employee_rate(employee_id)? {
            Some(rate) => rate,
            None => settings.default_monthly_salary,
        };

        let attendance = self
            .store
            .attendance(employee_id, period.start_date(), period.end_date())?;

        let CommitContext {
            ledger: snapshot,
            previous,
        } = self
            .store
            .commit_context(employee_id, &SlipKey::new(employee_id, period))?;

        let entries = match (&previous, settings.recommit_policy) {
            (Some(_), RecommitPolicy::Reject) if committing => {
                return Err(EngineError::DuplicateCommit {
                    employee_id: employee_id.to_string(),
                    month: period.month(),
                    year: period.year(),
                });
            }
            (Some(prior), RecommitPolicy::Reapply) => {
                reverse_allocations(&snapshot.entries, &prior.allocations)?
            }
            _ => snapshot.entries,
        };

        let advance_balance = outstanding_balance(&scope_entries(
            &entries,
            settings.advance_scope,
            period.end_date(),
        ));

        let input = PayrollInput {
            employee_id: employee_id.to_string(),
            period,
            days_present: days_present(&attendance),
            monthly_salary,
            advance_balance,
            other_deductions: request.other_deductions,
        };
        let computation = calculate_payroll(&input, &settings)?;

        Ok(Prepared {
            settings,
            ledger_version: snapshot.version,
            entries,
            previous,
            computation,
        })
    }
}

/// Plans the ledger and slip writes for a computation.
///
/// `entries` is the employee's full ledger with any earlier deduction for the
/// same month already handed back. Returns every ledger entry with its new
/// remaining amount, plus the slip recording which entries were drawn on.
///
/// # Returns
///
/// An error if the ledger cannot cover the computation's advance deduction
/// (`LedgerInvariant`), which means the computation was made from other data.
pub fn plan_commit(
    computation: &PayrollComputation,
    entries: &[AdvanceEntry],
    scope: AdvanceScope,
    period_end: NaiveDate,
    previous: Option<&SalarySlip>,
    actor: &str,
    generated_at: DateTime<Utc>,
) -> EngineResult<(Vec<AdvanceEntry>, SalarySlip)> {
    let in_scope = scope_entries(entries, scope, period_end);
    let outcome = apply_deduction(&in_scope, computation.advance_deduction);

    if outcome.deducted != computation.advance_deduction {
        return Err(EngineError::LedgerInvariant {
            message: format!(
                "ledger covers {} of the {} advance deduction for employee '{}'",
                outcome.deducted, computation.advance_deduction, computation.employee_id
            ),
        });
    }

    let updated = entries
        .iter()
        .map(|entry| {
            outcome
                .entries
                .iter()
                .find(|e| e.id == entry.id)
                .cloned()
                .unwrap_or_else(|| entry.clone())
        })
        .collect();

    let slip = SalarySlip::from_computation(
        computation,
        outcome.allocations,
        actor,
        generated_at,
        previous,
    );
    Ok((updated, slip))
}
