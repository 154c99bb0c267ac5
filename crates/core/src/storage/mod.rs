//! Storage ports consumed by the engine.
//!
//! The engine is persistence-agnostic: it talks to a row-oriented store
//! through these traits and relies on one atomic primitive -
//! [`RecurringStore::commit_occurrence`] - to create a generated transaction
//! and advance its definition's cursor in a single conditional step.

pub mod error;
pub mod memory;

use chrono::NaiveDate;
use moneta_shared::types::{RecurringDefinitionId, WorkspaceId};
use moneta_shared::{Currency, Period};

use crate::budget::types::{BudgetCategory, MonthlyBudget};
use crate::recurrence::RecurringDefinition;
use crate::transaction::Transaction;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;

/// Cursor update persisted together with a generated transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefinitionAdvance {
    /// The occurrence just materialized.
    pub last_processed_date: NaiveDate,
    /// The next occurrence the definition is due on.
    pub next_due_date: NaiveDate,
    /// True when the new cursor has passed `end_date` and the definition
    /// must stop generating.
    pub deactivate: bool,
}

/// Outcome of the conditional commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Transaction inserted and cursor advanced.
    Committed,
    /// The definition's stored `last_processed_date` no longer matches the
    /// guard - a concurrent run advanced it first.
    VersionConflict,
    /// A transaction for this (workspace, definition, date) already exists.
    DuplicateTransaction,
}

/// Mutation-side port: recurring definitions and the atomic commit.
pub trait RecurringStore: Send + Sync {
    /// Returns the workspace's base currency.
    fn workspace_currency(&self, workspace_id: WorkspaceId) -> StorageResult<Currency>;

    /// Returns all active recurring definitions of the workspace.
    fn active_definitions(
        &self,
        workspace_id: WorkspaceId,
    ) -> StorageResult<Vec<RecurringDefinition>>;

    /// Atomically inserts `transaction` and applies `advance` to the
    /// definition, guarded by compare-and-swap on the definition's stored
    /// `last_processed_date` against `expected_last_processed`.
    ///
    /// Either both writes happen or neither does. Guard mismatches and
    /// unique-key violations are reported as outcomes, not errors.
    fn commit_occurrence(
        &self,
        definition_id: RecurringDefinitionId,
        expected_last_processed: Option<NaiveDate>,
        transaction: Transaction,
        advance: DefinitionAdvance,
    ) -> StorageResult<CommitOutcome>;

    /// Deactivates a definition whose `end_date` now lies behind its cursor,
    /// guarded like [`Self::commit_occurrence`]. Returns false when the
    /// guard was stale (a concurrent run already touched the definition).
    fn retire_definition(
        &self,
        definition_id: RecurringDefinitionId,
        expected_last_processed: Option<NaiveDate>,
    ) -> StorageResult<bool>;
}

/// Read-side port: inputs for the budget overview.
pub trait OverviewStore: Send + Sync {
    /// Returns the workspace's budget categories.
    fn categories(&self, workspace_id: WorkspaceId) -> StorageResult<Vec<BudgetCategory>>;

    /// Returns the workspace's budget rows for the period.
    fn monthly_budgets(
        &self,
        workspace_id: WorkspaceId,
        period: Period,
    ) -> StorageResult<Vec<MonthlyBudget>>;

    /// Returns the workspace's transactions dated within the period.
    fn transactions_in_period(
        &self,
        workspace_id: WorkspaceId,
        period: Period,
    ) -> StorageResult<Vec<Transaction>>;
}
