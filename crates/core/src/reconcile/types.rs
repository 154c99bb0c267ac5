//! Reconciliation report types.

use chrono::NaiveDate;
use moneta_shared::types::{RecurringDefinitionId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Why an occurrence produced no new transaction in this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// A concurrent run already materialized it - idempotent success.
    AlreadyProcessed,
    /// No exchange rate for the definition's currency pair; retried next run.
    RateUnavailable,
    /// The storage port failed; the definition is retried wholesale next run.
    StorageUnavailable,
}

/// One occurrence that was skipped, with its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedOccurrence {
    /// The occurrence's due date.
    pub date: NaiveDate,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Per-definition result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionOutcome {
    /// The definition this outcome describes.
    pub definition_id: RecurringDefinitionId,
    /// Occurrence dates materialized by this run, ascending.
    pub created: Vec<NaiveDate>,
    /// Occurrences that produced no new transaction, with reasons.
    pub skipped: Vec<SkippedOccurrence>,
    /// True when the backlog was truncated at the per-run cap.
    pub overflowed: bool,
    /// True when the definition's cursor has passed its end date and the
    /// definition no longer generates transactions.
    pub exhausted: bool,
}

impl DefinitionOutcome {
    /// Creates an empty outcome for a definition.
    #[must_use]
    pub fn new(definition_id: RecurringDefinitionId) -> Self {
        Self {
            definition_id,
            created: Vec::new(),
            skipped: Vec::new(),
            overflowed: false,
            exhausted: false,
        }
    }

    /// Returns true if this definition needs operator attention: its backlog
    /// overflowed or an exchange rate was missing.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.overflowed
            || self
                .skipped
                .iter()
                .any(|s| s.reason == SkipReason::RateUnavailable)
    }
}

/// Aggregate report for one reconciliation run over a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// The reconciled workspace.
    pub workspace_id: WorkspaceId,
    /// Total transactions created across all definitions.
    pub created: usize,
    /// Total occurrences skipped across all definitions.
    pub skipped: usize,
    /// Per-definition outcomes, ordered by definition ID.
    pub definitions: Vec<DefinitionOutcome>,
}

impl ReconcileReport {
    /// Builds a report from per-definition outcomes, deriving the totals.
    #[must_use]
    pub fn from_outcomes(workspace_id: WorkspaceId, definitions: Vec<DefinitionOutcome>) -> Self {
        let created = definitions.iter().map(|d| d.created.len()).sum();
        let skipped = definitions.iter().map(|d| d.skipped.len()).sum();
        Self {
            workspace_id,
            created,
            skipped,
            definitions,
        }
    }

    /// Returns the definitions needing operator attention (overflowed or
    /// missing an exchange rate).
    #[must_use]
    pub fn needs_attention(&self) -> Vec<RecurringDefinitionId> {
        self.definitions
            .iter()
            .filter(|d| d.needs_attention())
            .map(|d| d.definition_id)
            .collect()
    }
}
