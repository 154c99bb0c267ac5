//! Reconciliation driver.
//!
//! Pure orchestration over the calculator, materializer and storage port.
//! Definitions are processed independently - one definition's failure never
//! aborts its siblings - and in parallel, since each definition's state
//! transition is self-contained.

use chrono::NaiveDate;
use moneta_shared::types::WorkspaceId;
use moneta_shared::Currency;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::materialize::{MaterializeError, MaterializeOutcome, Materializer};
use crate::recurrence::{RecurrenceCalculator, RecurringDefinition};
use crate::storage::{RecurringStore, StorageError};

use super::types::{DefinitionOutcome, ReconcileReport, SkipReason, SkippedOccurrence};

/// Orchestrates materialization across a workspace's active definitions.
pub struct ReconciliationDriver;

impl ReconciliationDriver {
    /// Reconciles every active recurring definition of the workspace at the
    /// reference date `now`.
    ///
    /// # Errors
    ///
    /// Fails only when the workspace or its definition list cannot be read;
    /// per-definition failures are captured in the report instead.
    pub fn reconcile<S, F>(
        store: &S,
        workspace_id: WorkspaceId,
        now: NaiveDate,
        rate_lookup: &F,
    ) -> Result<ReconcileReport, StorageError>
    where
        S: RecurringStore + ?Sized,
        F: Fn(Currency, Currency) -> Option<Decimal> + Sync,
    {
        let workspace_currency = store.workspace_currency(workspace_id)?;
        let definitions = store.active_definitions(workspace_id)?;
        info!(
            workspace = %workspace_id,
            definitions = definitions.len(),
            %now,
            "reconciling workspace"
        );

        let outcomes: Vec<DefinitionOutcome> = definitions
            .par_iter()
            .map(|definition| {
                Self::process_definition(store, definition, now, workspace_currency, rate_lookup)
            })
            .collect();

        let report = ReconcileReport::from_outcomes(workspace_id, outcomes);
        info!(
            workspace = %workspace_id,
            created = report.created,
            skipped = report.skipped,
            "reconciliation finished"
        );
        Ok(report)
    }

    /// Processes one definition: schedule, then materialize in order with
    /// the compare-and-swap guard threaded forward.
    fn process_definition<S, F>(
        store: &S,
        definition: &RecurringDefinition,
        now: NaiveDate,
        workspace_currency: Currency,
        rate_lookup: &F,
    ) -> DefinitionOutcome
    where
        S: RecurringStore + ?Sized,
        F: Fn(Currency, Currency) -> Option<Decimal> + Sync,
    {
        let schedule = RecurrenceCalculator::due_occurrences(definition, now);
        let mut outcome = DefinitionOutcome::new(definition.id);
        outcome.overflowed = schedule.overflowed;
        outcome.exhausted = schedule.exhausted;

        if schedule.occurrences.is_empty() {
            if schedule.exhausted {
                // User edits moved end_date behind the cursor; retire the
                // definition so it stops being swept.
                match Materializer::retire(store, definition) {
                    Ok(retired) => outcome.exhausted = retired,
                    Err(err) => {
                        warn!(definition = %definition.id, %err, "failed to retire definition");
                        outcome.exhausted = false;
                    }
                }
            }
            return outcome;
        }

        let mut expected = definition.last_processed_date;
        for occurrence in &schedule.occurrences {
            match Materializer::materialize(
                store,
                definition,
                expected,
                *occurrence,
                workspace_currency,
                rate_lookup,
            ) {
                Ok(MaterializeOutcome::Created(_)) => {
                    outcome.created.push(*occurrence);
                    expected = Some(*occurrence);
                }
                Ok(MaterializeOutcome::AlreadyProcessed) => {
                    // A concurrent run owns this definition now; the stale
                    // guard keeps every remaining occurrence idempotent.
                    outcome.skipped.push(SkippedOccurrence {
                        date: *occurrence,
                        reason: SkipReason::AlreadyProcessed,
                    });
                }
                Err(MaterializeError::Rate(err)) => {
                    warn!(definition = %definition.id, %err, "skipping occurrence");
                    outcome.skipped.push(SkippedOccurrence {
                        date: *occurrence,
                        reason: SkipReason::RateUnavailable,
                    });
                    // Stop here: advancing past a skipped occurrence would
                    // drop it forever. The cursor stays put for the next run.
                    break;
                }
                Err(MaterializeError::Storage(err)) => {
                    warn!(definition = %definition.id, %err, "storage failure, deferring definition");
                    outcome.skipped.push(SkippedOccurrence {
                        date: *occurrence,
                        reason: SkipReason::StorageUnavailable,
                    });
                    break;
                }
            }
        }

        outcome
    }
}
