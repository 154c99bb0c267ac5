//! In-memory storage backend.
//!
//! Reference implementation of the storage ports, used by the test suite and
//! by embedded callers that do not need durability. A single mutex provides
//! the per-row atomicity the ports require; the unique-index set enforces
//! the (workspace, definition, date) de-duplication key.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::NaiveDate;
use moneta_shared::types::{RecurringDefinitionId, TransactionId, WorkspaceId};
use moneta_shared::{Currency, Period};

use crate::budget::types::{BudgetCategory, MonthlyBudget};
use crate::recurrence::RecurringDefinition;
use crate::transaction::Transaction;

use super::error::{StorageError, StorageResult};
use super::{CommitOutcome, DefinitionAdvance, OverviewStore, RecurringStore};

#[derive(Debug, Default)]
struct Inner {
    workspaces: HashMap<WorkspaceId, Currency>,
    definitions: HashMap<RecurringDefinitionId, RecurringDefinition>,
    transactions: HashMap<TransactionId, Transaction>,
    generated_index: HashSet<(WorkspaceId, RecurringDefinitionId, NaiveDate)>,
    categories: Vec<BudgetCategory>,
    budgets: Vec<MonthlyBudget>,
}

/// Mutex-guarded in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned mutex means a panicking test; propagate the data as-is.
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Registers a workspace with its base currency.
    pub fn put_workspace(&self, workspace_id: WorkspaceId, currency: Currency) {
        self.lock().workspaces.insert(workspace_id, currency);
    }

    /// Inserts or replaces a recurring definition.
    pub fn put_definition(&self, definition: RecurringDefinition) {
        self.lock().definitions.insert(definition.id, definition);
    }

    /// Inserts a transaction row directly (manual entries in tests).
    pub fn put_transaction(&self, transaction: Transaction) {
        let mut inner = self.lock();
        if let Some(definition_id) = transaction.recurring_definition_id {
            inner.generated_index.insert((
                transaction.workspace_id,
                definition_id,
                transaction.transaction_date,
            ));
        }
        inner.transactions.insert(transaction.id, transaction);
    }

    /// Inserts a budget category.
    pub fn put_category(&self, category: BudgetCategory) {
        self.lock().categories.push(category);
    }

    /// Inserts a monthly budget row.
    pub fn put_budget(&self, budget: MonthlyBudget) {
        self.lock().budgets.push(budget);
    }

    /// Returns a snapshot of every stored transaction, ordered by date.
    #[must_use]
    pub fn transactions(&self) -> Vec<Transaction> {
        let inner = self.lock();
        let mut rows: Vec<_> = inner.transactions.values().cloned().collect();
        rows.sort_by_key(|t| (t.transaction_date, t.id.into_inner()));
        rows
    }

    /// Returns the current state of a definition, if present.
    #[must_use]
    pub fn definition(&self, definition_id: RecurringDefinitionId) -> Option<RecurringDefinition> {
        self.lock().definitions.get(&definition_id).cloned()
    }
}

impl RecurringStore for MemoryStore {
    fn workspace_currency(&self, workspace_id: WorkspaceId) -> StorageResult<Currency> {
        self.lock()
            .workspaces
            .get(&workspace_id)
            .copied()
            .ok_or(StorageError::WorkspaceNotFound(workspace_id))
    }

    fn active_definitions(
        &self,
        workspace_id: WorkspaceId,
    ) -> StorageResult<Vec<RecurringDefinition>> {
        let inner = self.lock();
        let mut definitions: Vec<_> = inner
            .definitions
            .values()
            .filter(|d| d.workspace_id == workspace_id && d.is_active)
            .cloned()
            .collect();
        definitions.sort_by_key(|d| d.id.into_inner());
        Ok(definitions)
    }

    fn commit_occurrence(
        &self,
        definition_id: RecurringDefinitionId,
        expected_last_processed: Option<NaiveDate>,
        transaction: Transaction,
        advance: DefinitionAdvance,
    ) -> StorageResult<CommitOutcome> {
        let mut inner = self.lock();

        let Some(definition) = inner.definitions.get(&definition_id) else {
            return Err(StorageError::DefinitionNotFound(definition_id));
        };
        if definition.last_processed_date != expected_last_processed {
            return Ok(CommitOutcome::VersionConflict);
        }

        let key = (
            transaction.workspace_id,
            definition_id,
            transaction.transaction_date,
        );
        if inner.generated_index.contains(&key) {
            return Ok(CommitOutcome::DuplicateTransaction);
        }

        // Both writes under the same lock: all-or-nothing.
        inner.generated_index.insert(key);
        inner.transactions.insert(transaction.id, transaction);
        let definition = inner
            .definitions
            .get_mut(&definition_id)
            .ok_or(StorageError::DefinitionNotFound(definition_id))?;
        definition.last_processed_date = Some(advance.last_processed_date);
        definition.next_due_date = advance.next_due_date;
        if advance.deactivate {
            definition.is_active = false;
        }

        Ok(CommitOutcome::Committed)
    }

    fn retire_definition(
        &self,
        definition_id: RecurringDefinitionId,
        expected_last_processed: Option<NaiveDate>,
    ) -> StorageResult<bool> {
        let mut inner = self.lock();
        let definition = inner
            .definitions
            .get_mut(&definition_id)
            .ok_or(StorageError::DefinitionNotFound(definition_id))?;
        if definition.last_processed_date != expected_last_processed {
            return Ok(false);
        }
        definition.is_active = false;
        Ok(true)
    }
}

impl OverviewStore for MemoryStore {
    fn categories(&self, workspace_id: WorkspaceId) -> StorageResult<Vec<BudgetCategory>> {
        Ok(self
            .lock()
            .categories
            .iter()
            .filter(|c| c.workspace_id == workspace_id)
            .cloned()
            .collect())
    }

    fn monthly_budgets(
        &self,
        workspace_id: WorkspaceId,
        period: Period,
    ) -> StorageResult<Vec<MonthlyBudget>> {
        Ok(self
            .lock()
            .budgets
            .iter()
            .filter(|b| b.workspace_id == workspace_id && b.year == period.year && b.month == period.month)
            .cloned()
            .collect())
    }

    fn transactions_in_period(
        &self,
        workspace_id: WorkspaceId,
        period: Period,
    ) -> StorageResult<Vec<Transaction>> {
        Ok(self
            .lock()
            .transactions
            .values()
            .filter(|t| t.workspace_id == workspace_id && period.contains(t.transaction_date))
            .cloned()
            .collect())
    }
}
